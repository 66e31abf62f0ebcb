//! Trait encoder
//!
//! Turns raw questionnaire answers into a keyed ballot of season votes.
//! Season-bearing answers look like `"<season>-<qualifier>"`; only the part
//! before the first `-` matters.

use std::collections::BTreeMap;
use tracing::debug;

use super::fuser::{Contrast, Indicators, Jewelry, Veins};
use crate::season::Season;
use crate::{Error, Result};

/// Question id of the "is this your natural hair color" answer
pub const NATURAL_HAIR: &str = "naturalHair";
/// Question id of the natural (pre-dye) hair color answer
pub const NATURAL_HAIR_COLOR: &str = "naturalHairColor";

/// Questions whose answers cast a season vote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TraitId {
    SkinTone,
    EyeColor,
    CurrentHairColor,
}

impl TraitId {
    pub const ALL: [TraitId; 3] = [TraitId::SkinTone, TraitId::EyeColor, TraitId::CurrentHairColor];

    /// Question id as sent by clients
    pub fn question_id(&self) -> &'static str {
        match self {
            TraitId::SkinTone => "skinTone",
            TraitId::EyeColor => "eyeColor",
            TraitId::CurrentHairColor => "currentHairColor",
        }
    }

    pub fn from_question_id(id: &str) -> Option<Self> {
        TraitId::ALL.into_iter().find(|t| t.question_id() == id)
    }
}

/// Season votes keyed by the question that produced them
pub type Ballot = BTreeMap<TraitId, Season>;

/// Everything the classifiers need from one questionnaire
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EncodedAnswers {
    /// Primary vote set
    pub ballot: Ballot,
    /// `Some(false)` when the user reported dyed hair
    pub natural_hair: Option<bool>,
    /// Season encoded by the natural hair color answer, kept out of the ballot
    pub natural_hair_color: Option<Season>,
    /// Indicator flags for the signal fuser
    pub indicators: Indicators,
}

/// Decode one `"<season>-<qualifier>"` answer
pub fn season_token(question_id: &str, value: &str) -> Result<Season> {
    let (prefix, _) = value.split_once('-').ok_or_else(|| {
        Error::Validation(format!(
            "Answer '{}' for '{}' is missing the '-' separator",
            value, question_id
        ))
    })?;

    prefix.parse::<Season>().map_err(|_| {
        Error::Validation(format!(
            "Answer '{}' for '{}' does not start with a season",
            value, question_id
        ))
    })
}

fn yes_no(question_id: &str, value: &str) -> Result<bool> {
    match value {
        "yes" => Ok(true),
        "no" => Ok(false),
        other => Err(Error::Validation(format!(
            "Answer '{}' for '{}' must be \"yes\" or \"no\"",
            other, question_id
        ))),
    }
}

/// Encode a questionnaire
///
/// Fails on the first malformed season-bearing answer. Answers to unknown
/// questions are skipped.
pub fn encode(answers: &BTreeMap<String, String>) -> Result<EncodedAnswers> {
    let mut encoded = EncodedAnswers::default();

    for trait_id in TraitId::ALL {
        if let Some(value) = answers.get(trait_id.question_id()) {
            let season = season_token(trait_id.question_id(), value)?;
            debug!(question = trait_id.question_id(), %season, "Encoded vote");
            encoded.ballot.insert(trait_id, season);
        }
    }

    if let Some(value) = answers.get(NATURAL_HAIR) {
        encoded.natural_hair = Some(yes_no(NATURAL_HAIR, value)?);
    }
    if let Some(value) = answers.get(NATURAL_HAIR_COLOR) {
        encoded.natural_hair_color = Some(season_token(NATURAL_HAIR_COLOR, value)?);
    }

    encoded.indicators = Indicators {
        veins: answers.get("veins").and_then(|v| Veins::parse(v)),
        jewelry: answers.get("jewelry").and_then(|v| Jewelry::parse(v)),
        contrast: answers.get("contrast").and_then(|v| Contrast::parse(v)),
    };

    for key in answers.keys() {
        let known = TraitId::from_question_id(key).is_some()
            || matches!(key.as_str(), NATURAL_HAIR | NATURAL_HAIR_COLOR | "veins" | "jewelry" | "contrast");
        if !known {
            debug!(question = %key, "Ignoring unrecognized question");
        }
    }

    Ok(encoded)
}
