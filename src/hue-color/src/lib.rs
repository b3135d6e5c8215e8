//! Hue color science.
//!
//! Exact conversions between hex, RGB and HSL, nearest named color lookup and
//! deterministic palette generation. Everything in this crate is synchronous
//! and free of I/O except [`NamedColorIndex::load`], which reads the optional
//! color list once at startup.
//!
//! ```rust
//! use hue_color::{NamedColorIndex, PaletteGenerator, PaletteMode};
//!
//! let index = NamedColorIndex::builtin();
//! let palette = PaletteGenerator::new(&index)
//!     .generate("#2196F3", PaletteMode::Complementary, 5)
//!     .unwrap();
//! assert_eq!(palette.len(), 2);
//! ```

pub mod convert;
pub mod error;
pub mod names;
pub mod palette;
pub mod record;

pub use convert::{
    Hsl, Rgb, hex_to_rgb, hsl_to_rgb, is_valid_hex, normalize_hex, rgb_to_hex, rgb_to_hsl,
};
pub use error::{ColorError, Result};
pub use names::{BUILTIN_COLORS, NamedColor, NamedColorIndex};
pub use palette::{
    DEFAULT_PALETTE_COUNT, LIGHTNESS_STEP, MAX_PALETTE_COUNT, MIN_PALETTE_COUNT,
    PaletteGenerator, PaletteMode, PaletteRequest,
};
pub use record::ColorRecord;
