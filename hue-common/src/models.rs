//! Analysis documents and palette entries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::season::Season;
use crate::{Error, Result};

/// Stable identifier of the user owning an analysis document
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerId(String);

impl OwnerId {
    /// Create an owner id, rejecting blank values
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(Error::Validation("Owner id must not be empty".to_string()));
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single palette color
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorInfo {
    pub name: String,
    pub hex: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl ColorInfo {
    pub fn new(name: impl Into<String>, hex: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hex: hex.into(),
            description: None,
            category: None,
        }
    }

    /// Hex codes compare case-insensitively ("#FF7F50" == "#ff7f50")
    pub fn has_hex(&self, hex: &str) -> bool {
        self.hex.eq_ignore_ascii_case(hex)
    }
}

/// Visual characteristics summarized for a season
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Characteristics {
    pub skin_tone: String,
    pub eye_color: Vec<String>,
    pub hair_color: Vec<String>,
}

/// Ordered color lists for every season
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SeasonColors {
    #[serde(default)]
    pub spring: Vec<ColorInfo>,
    #[serde(default)]
    pub summer: Vec<ColorInfo>,
    #[serde(default)]
    pub autumn: Vec<ColorInfo>,
    #[serde(default)]
    pub winter: Vec<ColorInfo>,
}

impl SeasonColors {
    pub fn get(&self, season: Season) -> &[ColorInfo] {
        match season {
            Season::Spring => &self.spring,
            Season::Summer => &self.summer,
            Season::Autumn => &self.autumn,
            Season::Winter => &self.winter,
        }
    }

    pub fn get_mut(&mut self, season: Season) -> &mut Vec<ColorInfo> {
        match season {
            Season::Spring => &mut self.spring,
            Season::Summer => &mut self.summer,
            Season::Autumn => &mut self.autumn,
            Season::Winter => &mut self.winter,
        }
    }
}

/// Characteristics, palettes and description for one classification result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonalProfile {
    pub characteristics: Characteristics,
    pub colors: SeasonColors,
    pub description: String,
}

/// Classification result owned by a user
///
/// `favorites` holds hex strings only. A favorite may outlive the palette
/// entry it was taken from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub season: Season,
    #[serde(default)]
    pub favorites: Vec<String>,
    pub profile: SeasonalProfile,
}

impl Analysis {
    pub fn new(season: Season, profile: SeasonalProfile) -> Self {
        Self {
            season,
            favorites: Vec::new(),
            profile,
        }
    }

    pub fn is_favorite(&self, hex: &str) -> bool {
        self.favorites.iter().any(|f| f == hex)
    }

    /// Flip membership of `hex` in favorites. Returns the new membership.
    pub fn toggle_favorite(&mut self, hex: &str) -> bool {
        if self.is_favorite(hex) {
            self.favorites.retain(|f| f != hex);
            false
        } else {
            self.favorites.push(hex.to_string());
            true
        }
    }

    /// Colors of the analysis' own season
    pub fn palette(&self) -> &[ColorInfo] {
        self.profile.colors.get(self.season)
    }

    /// Append `color` to the own-season palette unless its hex is already
    /// present. Returns whether the palette changed.
    pub fn add_color(&mut self, color: ColorInfo) -> bool {
        let palette = self.profile.colors.get_mut(self.season);
        if palette.iter().any(|c| c.has_hex(&color.hex)) {
            return false;
        }
        palette.push(color);
        true
    }

    /// Drop every own-season entry matching `hex`. Returns how many went.
    pub fn remove_color(&mut self, hex: &str) -> usize {
        let palette = self.profile.colors.get_mut(self.season);
        let before = palette.len();
        palette.retain(|c| !c.has_hex(hex));
        before - palette.len()
    }
}

/// Named outfit combination saved by the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomCombination {
    pub name: String,
    pub colors: Vec<String>,
    pub occasion: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalNote {
    pub id: Uuid,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub created_by: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InspirationImage {
    pub id: Uuid,
    pub url: String,
    pub caption: String,
    pub created_at: DateTime<Utc>,
    /// Object path inside the image store, needed to delete the bytes
    pub storage_path: String,
}

/// Analysis document as kept in the durable store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedAnalysis {
    pub owner_id: OwnerId,
    #[serde(flatten)]
    pub analysis: Analysis,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_combinations: Option<Vec<CustomCombination>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personal_notes: Option<Vec<PersonalNote>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inspiration_images: Option<Vec<InspirationImage>>,
}

impl PersistedAnalysis {
    pub fn new(owner_id: OwnerId, analysis: Analysis, timestamp: DateTime<Utc>) -> Self {
        Self {
            owner_id,
            analysis,
            timestamp,
            custom_combinations: None,
            personal_notes: None,
            inspiration_images: None,
        }
    }
}

/// Logical-delete marker written in place of an analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tombstone {
    pub owner_id: OwnerId,
    pub deleted: bool,
    pub timestamp: DateTime<Utc>,
}

/// Whatever the durable store holds for one owner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredDocument {
    Tombstone(Tombstone),
    Live(PersistedAnalysis),
}

impl StoredDocument {
    pub fn tombstone(owner_id: OwnerId, timestamp: DateTime<Utc>) -> Self {
        StoredDocument::Tombstone(Tombstone {
            owner_id,
            deleted: true,
            timestamp,
        })
    }

    pub fn owner_id(&self) -> &OwnerId {
        match self {
            StoredDocument::Tombstone(t) => &t.owner_id,
            StoredDocument::Live(p) => &p.owner_id,
        }
    }

    pub fn is_deleted(&self) -> bool {
        matches!(self, StoredDocument::Tombstone(_))
    }

    pub fn into_live(self) -> Option<PersistedAnalysis> {
        match self {
            StoredDocument::Live(p) => Some(p),
            StoredDocument::Tombstone(_) => None,
        }
    }
}
