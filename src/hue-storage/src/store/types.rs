//! Stored record types.

use chrono::{DateTime, Utc};
use hue_color::{ColorRecord, Hsl, NamedColor, Rgb, rgb_to_hsl};
use serde::{Deserialize, Serialize};

/// A color to be saved under a user-supplied name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewColor {
    pub name: String,
    pub hex: String,
    pub rgb: Rgb,
    pub hsl: Hsl,
}

impl NewColor {
    /// Save `record` under `name`.
    pub fn from_record(name: impl Into<String>, record: &ColorRecord) -> Self {
        Self {
            name: name.into(),
            hex: record.hex().to_string(),
            rgb: record.rgb(),
            hsl: record.hsl(),
        }
    }
}

impl From<&NamedColor> for NewColor {
    fn from(color: &NamedColor) -> Self {
        Self {
            name: color.name.clone(),
            hex: color.hex.clone(),
            rgb: color.rgb,
            hsl: rgb_to_hsl(color.rgb),
        }
    }
}

/// A saved color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredColor {
    pub id: u64,
    pub name: String,
    pub hex: String,
    pub rgb: Rgb,
    pub hsl: Hsl,
    pub created: DateTime<Utc>,
}

impl StoredColor {
    /// The color as a record carrying its saved name.
    pub fn to_record(&self) -> ColorRecord {
        ColorRecord::unnamed(self.rgb).with_name(self.name.clone())
    }
}

/// A generated theme to be saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTheme {
    pub prompt: String,
    pub model: String,
    pub colors: Vec<ColorRecord>,
}

/// A saved theme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredTheme {
    pub id: u64,
    pub prompt: String,
    pub model: String,
    pub colors: Vec<ColorRecord>,
    pub created: DateTime<Utc>,
}
