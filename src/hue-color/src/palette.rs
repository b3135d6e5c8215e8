//! Deterministic palette generation.
//!
//! Rotation modes rotate the base hue by fixed offsets and keep saturation and
//! lightness. `shades` and `tints` walk lightness down or up in steps of
//! [`LIGHTNESS_STEP`], keeping hue and saturation.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::convert::{Hsl, hex_to_rgb, hsl_to_rgb, rgb_to_hsl};
use crate::error::Result;
use crate::names::NamedColorIndex;
use crate::record::ColorRecord;

/// Number of colors produced by `shades`/`tints` when none is requested.
pub const DEFAULT_PALETTE_COUNT: usize = 5;
pub const MIN_PALETTE_COUNT: usize = 2;
pub const MAX_PALETTE_COUNT: usize = 12;

/// Lightness change per `shades`/`tints` step.
pub const LIGHTNESS_STEP: f64 = 0.15;

/// Palette generation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaletteMode {
    #[default]
    Complementary,
    Analogous,
    Triadic,
    Tetradic,
    Shades,
    Tints,
}

impl PaletteMode {
    pub const ALL: [PaletteMode; 6] = [
        PaletteMode::Complementary,
        PaletteMode::Analogous,
        PaletteMode::Triadic,
        PaletteMode::Tetradic,
        PaletteMode::Shades,
        PaletteMode::Tints,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PaletteMode::Complementary => "complementary",
            PaletteMode::Analogous => "analogous",
            PaletteMode::Triadic => "triadic",
            PaletteMode::Tetradic => "tetradic",
            PaletteMode::Shades => "shades",
            PaletteMode::Tints => "tints",
        }
    }

    /// Parse a mode name case-insensitively. Unknown names map to
    /// [`PaletteMode::Complementary`].
    pub fn parse_lenient(name: &str) -> Self {
        let wanted = name.trim();
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(wanted))
            .unwrap_or_else(|| {
                debug!(mode = %name, "Unknown palette mode, using complementary");
                PaletteMode::Complementary
            })
    }

    /// Hue offsets in degrees for rotation modes, `None` for lightness modes.
    pub fn hue_offsets(self) -> Option<&'static [f64]> {
        match self {
            PaletteMode::Complementary => Some(&[0.0, 180.0]),
            PaletteMode::Analogous => Some(&[0.0, 30.0, -30.0]),
            PaletteMode::Triadic => Some(&[0.0, 120.0, 240.0]),
            PaletteMode::Tetradic => Some(&[0.0, 90.0, 180.0, 270.0]),
            PaletteMode::Shades | PaletteMode::Tints => None,
        }
    }
}

impl fmt::Display for PaletteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A palette request as received from callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaletteRequest {
    pub base_color: String,
    #[serde(default)]
    pub mode: PaletteMode,
    #[serde(default = "default_count")]
    pub count: usize,
}

fn default_count() -> usize {
    DEFAULT_PALETTE_COUNT
}

impl PaletteRequest {
    pub fn new(base_color: impl Into<String>, mode: PaletteMode) -> Self {
        Self {
            base_color: base_color.into(),
            mode,
            count: DEFAULT_PALETTE_COUNT,
        }
    }

    /// Set the step count for `shades`/`tints`.
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    /// `count` clamped to `[MIN_PALETTE_COUNT, MAX_PALETTE_COUNT]`.
    pub fn effective_count(&self) -> usize {
        self.count.clamp(MIN_PALETTE_COUNT, MAX_PALETTE_COUNT)
    }
}

/// Builds palettes, naming each color from a shared index.
#[derive(Debug, Clone, Copy)]
pub struct PaletteGenerator<'a> {
    index: &'a NamedColorIndex,
}

impl<'a> PaletteGenerator<'a> {
    pub fn new(index: &'a NamedColorIndex) -> Self {
        Self { index }
    }

    /// Generate a palette for `request`.
    pub fn generate_request(&self, request: &PaletteRequest) -> Result<Vec<ColorRecord>> {
        self.generate(&request.base_color, request.mode, request.count)
    }

    /// Generate a palette from `base_color`.
    ///
    /// `count` only matters for `shades`/`tints` and is clamped to
    /// `[MIN_PALETTE_COUNT, MAX_PALETTE_COUNT]`. Fails with
    /// [`ColorError::InvalidColor`](crate::ColorError::InvalidColor) for a
    /// malformed base color.
    pub fn generate(
        &self,
        base_color: &str,
        mode: PaletteMode,
        count: usize,
    ) -> Result<Vec<ColorRecord>> {
        let base = rgb_to_hsl(hex_to_rgb(base_color)?);

        let palette = match mode.hue_offsets() {
            Some(offsets) => offsets
                .iter()
                .map(|offset| {
                    let hue = (base.h + offset + 360.0).rem_euclid(360.0);
                    self.record(Hsl::new(hue, base.s, base.l))
                })
                .collect(),
            None => {
                let count = count.clamp(MIN_PALETTE_COUNT, MAX_PALETTE_COUNT);
                (0..count)
                    .map(|i| {
                        let delta = LIGHTNESS_STEP * i as f64;
                        let lightness = match mode {
                            PaletteMode::Tints => (base.l + delta).min(1.0),
                            _ => (base.l - delta).max(0.0),
                        };
                        self.record(Hsl::new(base.h, base.s, lightness))
                    })
                    .collect()
            }
        };

        Ok(palette)
    }

    fn record(&self, hsl: Hsl) -> ColorRecord {
        ColorRecord::from_rgb(hsl_to_rgb(hsl), self.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ColorError;
    use pretty_assertions::assert_eq;

    fn hue_distance(a: f64, b: f64) -> f64 {
        let d = (a - b).rem_euclid(360.0);
        d.min(360.0 - d)
    }

    #[test]
    fn test_mode_cardinality() {
        let index = NamedColorIndex::builtin();
        let generator = PaletteGenerator::new(&index);
        let expected = [
            (PaletteMode::Complementary, 2),
            (PaletteMode::Analogous, 3),
            (PaletteMode::Triadic, 3),
            (PaletteMode::Tetradic, 4),
            (PaletteMode::Shades, 7),
            (PaletteMode::Tints, 7),
        ];
        for (mode, len) in expected {
            let palette = generator.generate("#2196F3", mode, 7).unwrap();
            assert_eq!(palette.len(), len, "mode {mode}");
        }
    }

    #[test]
    fn test_complementary_rotates_180() {
        let index = NamedColorIndex::builtin();
        let palette = PaletteGenerator::new(&index)
            .generate("#2196F3", PaletteMode::Complementary, 5)
            .unwrap();
        assert_eq!(palette.len(), 2);
        assert_eq!(palette[0].hex(), "#2196F3");

        let offset = hue_distance(palette[0].hsl().h, palette[1].hsl().h);
        assert!((offset - 180.0).abs() < 1.5, "offset was {offset}");
    }

    #[test]
    fn test_analogous_order() {
        let index = NamedColorIndex::builtin();
        let palette = PaletteGenerator::new(&index)
            .generate("#FF0000", PaletteMode::Analogous, 5)
            .unwrap();
        let hues: Vec<f64> = palette.iter().map(|c| c.hsl().h.round()).collect();
        assert_eq!(hues, vec![0.0, 30.0, 330.0]);
    }

    #[test]
    fn test_shades_floor_at_black() {
        let index = NamedColorIndex::builtin();
        let palette = PaletteGenerator::new(&index)
            .generate("#2196F3", PaletteMode::Shades, 6)
            .unwrap();
        assert_eq!(palette.len(), 6);

        for pair in palette.windows(2) {
            assert!(pair[0].hsl().l >= pair[1].hsl().l);
        }
        let last = palette.last().unwrap();
        assert_eq!(last.hsl().l, 0.0);
        assert_eq!(last.hex(), "#000000");
    }

    #[test]
    fn test_tints_cap_at_white() {
        let index = NamedColorIndex::builtin();
        let palette = PaletteGenerator::new(&index)
            .generate("#2196F3", PaletteMode::Tints, 5)
            .unwrap();
        for pair in palette.windows(2) {
            assert!(pair[0].hsl().l <= pair[1].hsl().l);
        }
        assert_eq!(palette.last().unwrap().hex(), "#FFFFFF");
    }

    #[test]
    fn test_count_is_clamped() {
        let index = NamedColorIndex::builtin();
        let generator = PaletteGenerator::new(&index);
        assert_eq!(generator.generate("#808080", PaletteMode::Tints, 0).unwrap().len(), 2);
        assert_eq!(generator.generate("#808080", PaletteMode::Shades, 99).unwrap().len(), 12);

        let request = PaletteRequest::new("#808080", PaletteMode::Shades).with_count(40);
        assert_eq!(request.effective_count(), 12);
        assert_eq!(generator.generate_request(&request).unwrap().len(), 12);
    }

    #[test]
    fn test_invalid_base_color() {
        let index = NamedColorIndex::builtin();
        let result = PaletteGenerator::new(&index).generate("#GGG", PaletteMode::Triadic, 5);
        assert!(matches!(result, Err(ColorError::InvalidColor(_))));
    }

    #[test]
    fn test_parse_lenient() {
        assert_eq!(PaletteMode::parse_lenient("Triadic"), PaletteMode::Triadic);
        assert_eq!(PaletteMode::parse_lenient(" tints "), PaletteMode::Tints);
        assert_eq!(PaletteMode::parse_lenient("rainbow"), PaletteMode::Complementary);
        assert_eq!(PaletteMode::parse_lenient(""), PaletteMode::Complementary);
    }

    #[test]
    fn test_request_defaults_from_json() {
        let request: PaletteRequest =
            serde_json::from_str(r##"{"base_color": "#123456"}"##).unwrap();
        assert_eq!(request.mode, PaletteMode::Complementary);
        assert_eq!(request.count, DEFAULT_PALETTE_COUNT);
    }
}
