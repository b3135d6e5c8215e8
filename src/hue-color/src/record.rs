//! The canonical color record shared by every operation.

use serde::{Deserialize, Serialize};

use crate::convert::{Hsl, Rgb, hex_to_rgb, rgb_to_hex, rgb_to_hsl};
use crate::error::Result;
use crate::names::NamedColorIndex;

/// A fully resolved color.
///
/// `hex` is always `rgb_to_hex(rgb)` and `hsl` is always `rgb_to_hsl(rgb)`.
/// Records are immutable; [`with_name`](Self::with_name) returns a new one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorRecord {
    hex: String,
    rgb: Rgb,
    hsl: Hsl,
    name: Option<String>,
}

impl ColorRecord {
    /// Record for `rgb`, named after the nearest entry in `index`.
    pub fn from_rgb(rgb: Rgb, index: &NamedColorIndex) -> Self {
        let name = index.nearest(rgb).map(|c| c.name.clone());
        Self::with_optional_name(rgb, name)
    }

    /// Record for a hex string (shorthand allowed), named after the nearest entry.
    pub fn from_hex(hex: &str, index: &NamedColorIndex) -> Result<Self> {
        Ok(Self::from_rgb(hex_to_rgb(hex)?, index))
    }

    /// Record without a name.
    pub fn unnamed(rgb: Rgb) -> Self {
        Self::with_optional_name(rgb, None)
    }

    fn with_optional_name(rgb: Rgb, name: Option<String>) -> Self {
        Self {
            hex: rgb_to_hex(rgb),
            rgb,
            hsl: rgb_to_hsl(rgb),
            name,
        }
    }

    /// Copy of this record carrying `name`.
    pub fn with_name(&self, name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..self.clone()
        }
    }

    pub fn hex(&self) -> &str {
        &self.hex
    }

    pub fn rgb(&self) -> Rgb {
        self.rgb
    }

    pub fn hsl(&self) -> Hsl {
        self.hsl
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::hsl_to_rgb;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_from_hex_fills_every_field() {
        let index = NamedColorIndex::builtin();
        let record = ColorRecord::from_hex("f00", &index).unwrap();
        assert_eq!(record.hex(), "#FF0000");
        assert_eq!(record.rgb(), Rgb::new(255, 0, 0));
        assert_eq!(record.hsl(), Hsl::new(0.0, 1.0, 0.5));
        assert_eq!(record.name(), Some("red"));
    }

    #[test]
    fn test_invariants_hold() {
        let index = NamedColorIndex::builtin();
        let record = ColorRecord::from_hex("#2196f3", &index).unwrap();
        assert_eq!(hex_to_rgb(record.hex()).unwrap(), record.rgb());
        assert_eq!(hsl_to_rgb(record.hsl()), record.rgb());
    }

    #[test]
    fn test_with_name_produces_new_record() {
        let original = ColorRecord::unnamed(Rgb::new(1, 2, 3));
        let named = original.with_name("Ink");
        assert_eq!(original.name(), None);
        assert_eq!(named.name(), Some("Ink"));
        assert_eq!(named.hex(), original.hex());
    }

    #[test]
    fn test_serialized_shape() {
        let record = ColorRecord::unnamed(Rgb::new(0, 0, 0));
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["hex"], "#000000");
        assert_eq!(json["rgb"]["r"], 0);
        assert_eq!(json["hsl"]["l"], 0.0);
        assert!(json["name"].is_null());
    }
}
