//! Built-in seasonal palettes and default profiles
//!
//! Every classification outcome starts from the default profile of its
//! season: four color lists (one per season) where the own-season list is
//! annotated by category and the others are marked as variations.

use once_cell::sync::Lazy;

use crate::models::{Characteristics, ColorInfo, SeasonColors, SeasonalProfile};
use crate::season::Season;

/// Role of a color inside its seasonal palette
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorCategory {
    Primary,
    Accent,
    Neutral,
}

impl ColorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorCategory::Primary => "primary",
            ColorCategory::Accent => "accent",
            ColorCategory::Neutral => "neutral",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            ColorCategory::Primary => "Primary",
            ColorCategory::Accent => "Accent",
            ColorCategory::Neutral => "Neutral",
        }
    }
}

/// Catalog entry: (name, hex, category)
pub type CatalogColor = (&'static str, &'static str, ColorCategory);

use ColorCategory::{Accent, Neutral, Primary};

const SPRING: &[CatalogColor] = &[
    ("Coral", "#FF7F50", Primary),
    ("Golden Yellow", "#FFD700", Primary),
    ("Bright Turquoise", "#00CED1", Primary),
    ("Periwinkle", "#CCCCFF", Primary),
    ("Mint Green", "#98FF98", Primary),
    ("Warm Pink", "#FF8080", Accent),
    ("Peachy Nude", "#FFDAB9", Accent),
    ("Golden Rose", "#F8B195", Accent),
    ("Bright Salmon", "#FF8C69", Accent),
    ("Light Bronze", "#CD7F32", Neutral),
    ("Warm Copper", "#DA8A67", Neutral),
    ("Soft Coral", "#F08080", Neutral),
];

const SUMMER: &[CatalogColor] = &[
    ("Powder Blue", "#B6D0E2", Primary),
    ("Soft Rose", "#DEB1B1", Primary),
    ("Cool Lavender", "#E6E6FA", Primary),
    ("Dusty Pink", "#D8B2BE", Primary),
    ("Sage Green", "#B2AC88", Primary),
    ("Cool Mauve", "#C8A2C8", Accent),
    ("Soft Berry", "#A25768", Accent),
    ("Dusty Rose", "#C4A4A4", Accent),
    ("Cool Pink", "#D4A5A5", Accent),
    ("Silver Taupe", "#9F8170", Neutral),
    ("Cool Gray", "#D3D3D3", Neutral),
    ("Cool Plum", "#8B4963", Neutral),
];

const AUTUMN: &[CatalogColor] = &[
    ("Burnt Orange", "#CC5500", Primary),
    ("Deep Olive", "#556B2F", Primary),
    ("Warm Burgundy", "#800020", Primary),
    ("Rich Terracotta", "#E2725B", Primary),
    ("Golden Brown", "#996515", Primary),
    ("Deep Mustard", "#CD853F", Accent),
    ("Forest Green", "#228B22", Accent),
    ("Copper Brown", "#B87333", Accent),
    ("Warm Russet", "#80461B", Accent),
    ("Rich Gold", "#D4AF37", Neutral),
    ("Warm Brown", "#8B4513", Neutral),
    ("Deep Moss", "#4A5D23", Neutral),
    ("Mahogany", "#C04000", Neutral),
];

const WINTER: &[CatalogColor] = &[
    ("True White", "#FFFFFF", Primary),
    ("Pure Black", "#000000", Primary),
    ("Royal Blue", "#4169E1", Primary),
    ("Vivid Fuchsia", "#FF1493", Primary),
    ("Electric Purple", "#9400D3", Primary),
    ("True Red", "#FF0000", Primary),
    ("Emerald Green", "#50C878", Accent),
    ("Deep Berry", "#8B0A50", Accent),
    ("Bright Fuchsia", "#FF00FF", Accent),
    ("Cool Crimson", "#DC143C", Accent),
    ("Deep Purple", "#301934", Neutral),
    ("Black Cherry", "#3B0910", Neutral),
    ("Sapphire Blue", "#0F52BA", Neutral),
];

/// Catalog colors for a season
pub fn catalog(season: Season) -> &'static [CatalogColor] {
    match season {
        Season::Spring => SPRING,
        Season::Summer => SUMMER,
        Season::Autumn => AUTUMN,
        Season::Winter => WINTER,
    }
}

/// One-paragraph description of a season's palette
pub fn description(season: Season) -> &'static str {
    match season {
        Season::Spring => "Your colors are warm and bright, like the fresh blooms of spring. Your palette features clear, warm colors with yellow undertones.",
        Season::Summer => "Your colors are cool and soft, like a misty summer morning. Your palette features muted colors with blue undertones.",
        Season::Autumn => "Your colors are warm and deep, like fall foliage. Your palette features rich, muted colors with golden undertones.",
        Season::Winter => "Your colors are cool and bright, like fresh snow in sunlight. Your palette features clear colors with blue undertones.",
    }
}

fn characteristics(season: Season) -> Characteristics {
    let (skin, eyes, hair): (&str, &[&str], &[&str]) = match season {
        Season::Spring => (
            "Light to medium with warm undertones—may have a peachy or golden glow",
            &["Light and bright shades of blue", "green", "hazel", "light brown"],
            &["Light blonde to medium brown", "often with golden or red highlights"],
        ),
        Season::Summer => (
            "Light to medium with cool undertones—may appear pinkish or rosy",
            &["Soft shades of blue", "gray", "green", "light hazel"],
            &["Light ash blonde to medium ash brown", "lacking golden highlights"],
        ),
        Season::Autumn => (
            "Medium to dark with warm undertones—may have a golden, bronze, or olive tint",
            &["Deep shades of brown", "hazel", "green", "warm blue"],
            &[
                "Dark blonde to dark brown",
                "often with red or golden highlights",
                "includes auburn and chestnut shades",
            ],
        ),
        Season::Winter => (
            "Very light or very dark with cool undertones—may appear porcelain or deep ebony",
            &["Intense shades of dark brown", "icy blue", "emerald green", "dark hazel"],
            &["Dark brown to black", "often without natural highlights"],
        ),
    };

    Characteristics {
        skin_tone: skin.to_string(),
        eye_color: eyes.iter().map(|s| s.to_string()).collect(),
        hair_color: hair.iter().map(|s| s.to_string()).collect(),
    }
}

/// Palette list of `list_season` as seen from a profile of `owner_season`
fn palette_list(owner_season: Season, list_season: Season) -> Vec<ColorInfo> {
    catalog(list_season)
        .iter()
        .map(|(name, hex, category)| {
            let description = if owner_season == list_season {
                format!("{} color - {}", category.label(), name)
            } else {
                format!("{} variation - {}", list_season.title(), name)
            };
            ColorInfo {
                name: name.to_string(),
                hex: hex.to_string(),
                description: Some(description),
                category: Some(category.as_str().to_string()),
            }
        })
        .collect()
}

fn build_profile(season: Season) -> SeasonalProfile {
    let mut colors = SeasonColors::default();
    for list_season in Season::ALL {
        *colors.get_mut(list_season) = palette_list(season, list_season);
    }

    SeasonalProfile {
        characteristics: characteristics(season),
        colors,
        description: description(season).to_string(),
    }
}

static DEFAULT_PROFILES: Lazy<[SeasonalProfile; 4]> = Lazy::new(|| Season::ALL.map(build_profile));

/// Default profile for a freshly classified season
pub fn default_profile(season: Season) -> SeasonalProfile {
    DEFAULT_PROFILES[season.index()].clone()
}
