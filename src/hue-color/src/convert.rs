//! Hex, RGB and HSL conversions.
//!
//! All functions are pure. Hue is expressed in degrees `[0, 360)`, saturation
//! and lightness in `[0, 1]`. The rounding in [`hsl_to_rgb`] is chosen so that
//! `hsl_to_rgb(rgb_to_hsl(c)) == c` for every 8-bit RGB triple.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ColorError, Result};

/// An 8-bit sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Create a color from channel values.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a color from arbitrary integers, clamping each channel to `0..=255`.
    pub fn clamped(r: i64, g: i64, b: i64) -> Self {
        Self::new(clamp_channel(r), clamp_channel(g), clamp_channel(b))
    }

    /// Squared Euclidean distance in RGB space.
    pub fn distance_squared(self, other: Rgb) -> u32 {
        let dr = i32::from(self.r) - i32::from(other.r);
        let dg = i32::from(self.g) - i32::from(other.g);
        let db = i32::from(self.b) - i32::from(other.b);
        (dr * dr + dg * dg + db * db) as u32
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}", self.r, self.g, self.b)
    }
}

/// A color in HSL space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsl {
    /// Hue in degrees, `[0, 360)`.
    pub h: f64,
    /// Saturation, `[0, 1]`.
    pub s: f64,
    /// Lightness, `[0, 1]`.
    pub l: f64,
}

impl Hsl {
    pub const fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.0}, {:.1}%, {:.1}%",
            self.h,
            self.s * 100.0,
            self.l * 100.0
        )
    }
}

fn clamp_channel(value: i64) -> u8 {
    value.clamp(0, 255) as u8
}

fn unit_to_channel(value: f64) -> u8 {
    (value * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Normalize a hex string to `#RRGGBB` form.
///
/// Trims whitespace, uppercases ASCII letters, strips one leading `#` and
/// expands 3-digit shorthand. The result is not validated; use
/// [`is_valid_hex`] for that.
pub fn normalize_hex(input: &str) -> String {
    let upper = input.trim().to_ascii_uppercase();
    let digits = upper.strip_prefix('#').unwrap_or(&upper);

    if digits.chars().count() == 3 {
        let expanded: String = digits.chars().flat_map(|c| [c, c]).collect();
        format!("#{expanded}")
    } else {
        format!("#{digits}")
    }
}

/// Whether `input` is exactly 3 or 6 hex digits with an optional leading `#`.
pub fn is_valid_hex(input: &str) -> bool {
    let digits = input.strip_prefix('#').unwrap_or(input);
    matches!(digits.len(), 3 | 6) && digits.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Parse a hex color (shorthand allowed) into RGB.
pub fn hex_to_rgb(hex: &str) -> Result<Rgb> {
    let normalized = normalize_hex(hex);
    if !is_valid_hex(&normalized) {
        return Err(ColorError::InvalidColor(hex.to_string()));
    }

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&normalized[range], 16)
            .map_err(|_| ColorError::InvalidColor(hex.to_string()))
    };

    Ok(Rgb::new(channel(1..3)?, channel(3..5)?, channel(5..7)?))
}

/// Format RGB as canonical `#RRGGBB`.
pub fn rgb_to_hex(rgb: Rgb) -> String {
    format!("#{:02X}{:02X}{:02X}", rgb.r, rgb.g, rgb.b)
}

/// Convert RGB to HSL.
///
/// Achromatic colors get `h = 0, s = 0`. When several channels share the
/// maximum, red wins over green and green over blue.
pub fn rgb_to_hsl(rgb: Rgb) -> Hsl {
    let max_channel = rgb.r.max(rgb.g).max(rgb.b);
    let min_channel = rgb.r.min(rgb.g).min(rgb.b);

    let r = f64::from(rgb.r) / 255.0;
    let g = f64::from(rgb.g) / 255.0;
    let b = f64::from(rgb.b) / 255.0;
    let max = f64::from(max_channel) / 255.0;
    let min = f64::from(min_channel) / 255.0;
    let l = (max + min) / 2.0;

    if max_channel == min_channel {
        return Hsl::new(0.0, 0.0, l);
    }

    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };

    let sector = if rgb.r == max_channel {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if rgb.g == max_channel {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    let mut h = sector * 60.0;
    if h >= 360.0 {
        h -= 360.0;
    }

    Hsl::new(h, s, l)
}

/// Convert HSL to RGB.
///
/// Hue is wrapped into `[0, 360)` first; saturation and lightness are clamped
/// to `[0, 1]`. Each channel is rounded to the nearest integer independently.
pub fn hsl_to_rgb(hsl: Hsl) -> Rgb {
    let mut h = hsl.h.rem_euclid(360.0) / 360.0;
    if !(0.0..1.0).contains(&h) {
        h = 0.0;
    }
    let s = hsl.s.clamp(0.0, 1.0);
    let l = hsl.l.clamp(0.0, 1.0);

    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h * 6.0) % 2.0 - 1.0).abs());
    let m = l - c / 2.0;

    let sector = h * 6.0;
    let (r, g, b) = if sector < 1.0 {
        (c, x, 0.0)
    } else if sector < 2.0 {
        (x, c, 0.0)
    } else if sector < 3.0 {
        (0.0, c, x)
    } else if sector < 4.0 {
        (0.0, x, c)
    } else if sector < 5.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    Rgb::new(
        unit_to_channel(r + m),
        unit_to_channel(g + m),
        unit_to_channel(b + m),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn approx(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() <= eps
    }

    #[test]
    fn test_normalize_hex() {
        assert_eq!(normalize_hex("abc"), "#AABBCC");
        assert_eq!(normalize_hex("#abcdef"), "#ABCDEF");
        assert_eq!(normalize_hex("  #0f0 "), "#00FF00");
        // Not validated, only normalized
        assert_eq!(normalize_hex("zzzz"), "#ZZZZ");
    }

    #[test]
    fn test_normalize_hex_leaves_non_ascii_alone() {
        // U+FB00 uppercases to "FF" under full Unicode case mapping.
        let normalized = normalize_hex("\u{FB00}a");
        assert_eq!(normalized, "#\u{FB00}A");
        assert!(!is_valid_hex(&normalized));
        assert!(hex_to_rgb("\u{FB00}a").is_err());
    }

    #[test]
    fn test_is_valid_hex() {
        assert!(is_valid_hex("abc"));
        assert!(is_valid_hex("#abcdef"));
        assert!(is_valid_hex("#ABCDEF"));
        assert!(!is_valid_hex("zzz"));
        assert!(!is_valid_hex("#abcd"));
        assert!(!is_valid_hex("##abc"));
        assert!(!is_valid_hex(""));
        assert!(!is_valid_hex("#"));
    }

    #[test]
    fn test_hex_to_rgb_and_back() {
        let rgb = hex_to_rgb("#00ff00").unwrap();
        assert_eq!(rgb, Rgb::new(0, 255, 0));
        assert_eq!(rgb_to_hex(rgb), "#00FF00");

        assert_eq!(hex_to_rgb("abc").unwrap(), Rgb::new(0xAA, 0xBB, 0xCC));
        assert!(matches!(
            hex_to_rgb("nope"),
            Err(ColorError::InvalidColor(_))
        ));
    }

    #[test]
    fn test_rgb_clamped() {
        assert_eq!(Rgb::clamped(-20, 300, 128), Rgb::new(0, 255, 128));
        assert_eq!(rgb_to_hex(Rgb::clamped(256, 0, 0)), "#FF0000");
    }

    #[test]
    fn test_rgb_to_hsl_known_values() {
        let red = rgb_to_hsl(Rgb::new(255, 0, 0));
        assert_eq!(red, Hsl::new(0.0, 1.0, 0.5));

        let blue = rgb_to_hsl(hex_to_rgb("#2196F3").unwrap());
        assert!(approx(blue.h, 207.0, 0.5), "hue was {}", blue.h);
        assert!(approx(blue.s, 0.897, 0.001), "saturation was {}", blue.s);
        assert!(approx(blue.l, 0.541, 0.001), "lightness was {}", blue.l);

        // Red and green share the maximum; red branch wins.
        let yellow = rgb_to_hsl(Rgb::new(255, 255, 0));
        assert!(approx(yellow.h, 60.0, 1e-9));

        let magenta = rgb_to_hsl(Rgb::new(255, 0, 255));
        assert!(approx(magenta.h, 300.0, 1e-9));
    }

    #[test]
    fn test_achromatic() {
        let gray = rgb_to_hsl(Rgb::new(128, 128, 128));
        assert_eq!(gray.h, 0.0);
        assert_eq!(gray.s, 0.0);
        assert!(approx(gray.l, 128.0 / 255.0, 1e-12));

        assert_eq!(hsl_to_rgb(gray), Rgb::new(128, 128, 128));
        assert_eq!(rgb_to_hsl(Rgb::new(0, 0, 0)).l, 0.0);
        assert_eq!(rgb_to_hsl(Rgb::new(255, 255, 255)).l, 1.0);
    }

    #[test]
    fn test_hsl_to_rgb_wraps_hue() {
        let wrapped = hsl_to_rgb(Hsl::new(480.0, 1.0, 0.5));
        assert_eq!(wrapped, hsl_to_rgb(Hsl::new(120.0, 1.0, 0.5)));
        assert_eq!(wrapped, Rgb::new(0, 255, 0));

        let negative = hsl_to_rgb(Hsl::new(-30.0, 0.6, 0.4));
        assert_eq!(negative, hsl_to_rgb(Hsl::new(330.0, 0.6, 0.4)));

        assert_eq!(hsl_to_rgb(Hsl::new(360.0, 1.0, 0.5)), Rgb::new(255, 0, 0));
    }

    #[test]
    fn test_round_trip_sampled_cube() {
        let channels: Vec<u8> = (0..=255u8).step_by(3).chain([1, 127, 128, 254]).collect();
        for &r in &channels {
            for &g in &channels {
                for &b in &channels {
                    let rgb = Rgb::new(r, g, b);
                    assert_eq!(hex_to_rgb(&rgb_to_hex(rgb)).unwrap(), rgb);
                    assert_eq!(hsl_to_rgb(rgb_to_hsl(rgb)), rgb, "round trip of {rgb:?}");
                }
            }
        }
    }

    #[test]
    fn test_display_forms() {
        let rgb = Rgb::new(33, 150, 243);
        assert_eq!(rgb.to_string(), "33, 150, 243");
        assert_eq!(rgb_to_hsl(rgb).to_string(), "207, 89.7%, 54.1%");
    }

    #[test]
    fn test_distance_squared() {
        let black = Rgb::new(0, 0, 0);
        let white = Rgb::new(255, 255, 255);
        assert_eq!(black.distance_squared(white), 3 * 255 * 255);
        assert_eq!(white.distance_squared(white), 0);
    }
}
