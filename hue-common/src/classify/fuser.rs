//! External signal fusion
//!
//! Two-axis classifier used when no season-bearing answers exist: a
//! warm/cool undertone axis scored from indicator flags and the vision
//! signal, and a contrast axis that picks the deep or light season.

use serde::{Deserialize, Serialize};

use crate::season::Season;
use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Undertone {
    Warm,
    Cool,
}

/// Result of a vision analysis of the user's photo
///
/// `confidence` is carried along but neither classifier consults it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VisionSignal {
    pub undertone: Undertone,
    pub intensity: f64,
    pub confidence: f64,
}

impl VisionSignal {
    /// Reject signals whose confidence lies outside [0, 1]
    pub fn validate(self) -> Result<Self> {
        if !(0.0..=1.0).contains(&self.confidence) {
            return Err(Error::Validation(format!(
                "Vision confidence {} outside [0, 1]",
                self.confidence
            )));
        }
        Ok(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Veins {
    Green,
    Blue,
}

impl Veins {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "green" => Some(Veins::Green),
            "blue" => Some(Veins::Blue),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Jewelry {
    Gold,
    Silver,
}

impl Jewelry {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "gold" => Some(Jewelry::Gold),
            "silver" => Some(Jewelry::Silver),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Contrast {
    High,
    Low,
}

impl Contrast {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "high" => Some(Contrast::High),
            "low" => Some(Contrast::Low),
            _ => None,
        }
    }
}

/// Simple self-reported indicator flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Indicators {
    pub veins: Option<Veins>,
    pub jewelry: Option<Jewelry>,
    pub contrast: Option<Contrast>,
}

impl Indicators {
    pub fn is_empty(&self) -> bool {
        self.veins.is_none() && self.jewelry.is_none() && self.contrast.is_none()
    }
}

/// Warm and cool signal counts
pub fn undertone_signals(signal: Option<&VisionSignal>, indicators: &Indicators) -> (usize, usize) {
    let undertone = signal.map(|s| s.undertone);

    let warm = [
        indicators.veins == Some(Veins::Green),
        indicators.jewelry == Some(Jewelry::Gold),
        undertone == Some(Undertone::Warm),
    ]
    .iter()
    .filter(|hit| **hit)
    .count();

    let cool = [
        indicators.veins == Some(Veins::Blue),
        indicators.jewelry == Some(Jewelry::Silver),
        undertone == Some(Undertone::Cool),
    ]
    .iter()
    .filter(|hit| **hit)
    .count();

    (warm, cool)
}

/// Classify from undertone signals and contrast
///
/// Warm wins only with strictly more signals; a tie counts as cool.
pub fn fuse(signal: Option<&VisionSignal>, indicators: &Indicators) -> Season {
    let (warm, cool) = undertone_signals(signal, indicators);
    let high_contrast = indicators.contrast == Some(Contrast::High);

    match (warm > cool, high_contrast) {
        (true, true) => Season::Autumn,
        (true, false) => Season::Spring,
        (false, true) => Season::Winter,
        (false, false) => Season::Summer,
    }
}
