//! Saved color and theme persistence.
//!
//! [`ColorStore`] is the interface the engine writes through;
//! [`JsonColorStore`] keeps colors in a single JSON document and appends
//! themes to a JSONL file.

mod json;
mod types;


use async_trait::async_trait;
use hue_color::{NamedColor, hex_to_rgb, normalize_hex};

use crate::error::Result;

pub use json::JsonColorStore;
pub use types::{NewColor, NewTheme, StoredColor, StoredTheme};

/// Colors saved into an empty store when no named-color source is available.
pub const DEFAULT_SEED_COLORS: &[(&str, &str)] = &[
    ("Red", "#FF0000"),
    ("Green", "#00FF00"),
    ("Blue", "#0000FF"),
    ("Yellow", "#FFFF00"),
    ("Cyan", "#00FFFF"),
    ("Magenta", "#FF00FF"),
    ("White", "#FFFFFF"),
    ("Black", "#000000"),
];

/// [`DEFAULT_SEED_COLORS`] as seed entries.
pub fn default_seed_colors() -> Vec<NamedColor> {
    DEFAULT_SEED_COLORS
        .iter()
        .filter_map(|(name, hex)| {
            hex_to_rgb(hex).ok().map(|rgb| NamedColor {
                name: (*name).to_string(),
                hex: normalize_hex(hex),
                rgb,
            })
        })
        .collect()
}

/// Persistence for saved colors and generated themes.
#[async_trait]
pub trait ColorStore: Send + Sync {
    /// Save a color and return its id. Fails with
    /// [`StorageError::DuplicateHex`](crate::StorageError::DuplicateHex) when
    /// the hex value is already saved.
    async fn save(&self, color: NewColor) -> Result<u64>;

    async fn get(&self, id: u64) -> Result<Option<StoredColor>>;

    /// At most `limit` colors, newest first.
    async fn list_recent(&self, limit: usize) -> Result<Vec<StoredColor>>;

    async fn save_theme(&self, theme: NewTheme) -> Result<u64>;

    /// Insert `defaults` when no color is saved yet. Invalid and duplicate
    /// entries are skipped. Returns the number inserted.
    async fn seed_if_empty(&self, defaults: &[NamedColor]) -> Result<usize>;
}
