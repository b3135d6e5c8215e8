//! Named color index.
//!
//! A small, read-only map of lowercase names to canonical hex values, built
//! once at startup from the built-in table merged with an optional JSON list:
//!
//! ```json
//! { "colors": [ { "name": "Tomato", "hex": "#FF6347" } ] }
//! ```
//!
//! Iteration order is insertion order. A name that is inserted again keeps its
//! original position and takes the new value, so nearest-match ties resolve
//! the same way regardless of which source supplied the winning hex.

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::convert::{Rgb, hex_to_rgb, is_valid_hex, normalize_hex, rgb_to_hex};
use crate::error::{ColorError, Result};

/// Fallback table used when no color list is available.
pub const BUILTIN_COLORS: &[(&str, &str)] = &[
    ("red", "#FF0000"),
    ("green", "#00FF00"),
    ("blue", "#0000FF"),
    ("white", "#FFFFFF"),
    ("black", "#000000"),
    ("yellow", "#FFFF00"),
    ("cyan", "#00FFFF"),
    ("magenta", "#FF00FF"),
    ("silver", "#C0C0C0"),
    ("gray", "#808080"),
];

/// A single index entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedColor {
    /// Lowercase name, unique within the index.
    pub name: String,
    /// Canonical `#RRGGBB` value.
    pub hex: String,
    pub rgb: Rgb,
}

#[derive(Debug, Deserialize)]
struct ColorSource {
    #[serde(default)]
    colors: Vec<SourceEntry>,
}

#[derive(Debug, Deserialize)]
struct SourceEntry {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    hex: Option<String>,
}

/// Read-only name → color index.
#[derive(Debug, Clone)]
pub struct NamedColorIndex {
    entries: IndexMap<String, NamedColor>,
}

impl NamedColorIndex {
    /// Index containing only [`BUILTIN_COLORS`].
    pub fn builtin() -> Self {
        let mut index = Self {
            entries: IndexMap::with_capacity(BUILTIN_COLORS.len()),
        };
        for (name, hex) in BUILTIN_COLORS {
            index.insert(name, hex);
        }
        index
    }

    /// Built-in table with `entries` merged over it, in order.
    ///
    /// Entries with an empty name or an invalid hex are skipped.
    pub fn with_entries<N, H>(entries: impl IntoIterator<Item = (N, H)>) -> Self
    where
        N: AsRef<str>,
        H: AsRef<str>,
    {
        let mut index = Self::builtin();
        for (name, hex) in entries {
            index.insert(name.as_ref(), hex.as_ref());
        }
        index
    }

    /// Parse a `{ "colors": [...] }` document and merge it over the built-ins.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let source: ColorSource = serde_json::from_str(json)?;
        let entries = source.colors.into_iter().filter_map(|entry| {
            match (entry.name, entry.hex) {
                (Some(name), Some(hex)) => Some((name, hex)),
                _ => None,
            }
        });
        Ok(Self::with_entries(entries))
    }

    /// Load the color list at `path`.
    ///
    /// A missing file yields the built-ins. An unreadable or malformed file is
    /// logged and also yields the built-ins; startup never fails here.
    pub fn load(path: &Path) -> Self {
        if !path.is_file() {
            debug!(path = %path.display(), "No color list found, using built-in names");
            return Self::builtin();
        }

        let loaded = std::fs::read_to_string(path)
            .map_err(ColorError::from)
            .and_then(|content| Self::from_json_str(&content));

        match loaded {
            Ok(index) => {
                info!(path = %path.display(), colors = index.len(), "Loaded color list");
                index
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to load color list, using built-in names");
                Self::builtin()
            }
        }
    }

    fn insert(&mut self, name: &str, hex: &str) -> bool {
        let key = name.trim().to_lowercase();
        let hex = normalize_hex(hex);
        if key.is_empty() || !is_valid_hex(&hex) {
            debug!(name = %name, hex = %hex, "Skipping invalid named color");
            return false;
        }
        let Ok(rgb) = hex_to_rgb(&hex) else {
            return false;
        };

        self.entries.insert(
            key.clone(),
            NamedColor {
                name: key,
                hex: rgb_to_hex(rgb),
                rgb,
            },
        );
        true
    }

    /// Case-insensitive exact lookup, returning the canonical hex.
    pub fn lookup(&self, name: &str) -> Option<&str> {
        self.get(name).map(|c| c.hex.as_str())
    }

    /// Case-insensitive exact lookup, returning the whole entry.
    pub fn get(&self, name: &str) -> Option<&NamedColor> {
        self.entries.get(&name.trim().to_lowercase())
    }

    /// Like [`get`](Self::get), failing with [`ColorError::UnknownName`].
    pub fn require(&self, name: &str) -> Result<&NamedColor> {
        self.get(name)
            .ok_or_else(|| ColorError::UnknownName(name.trim().to_string()))
    }

    /// Entry closest to `rgb` by squared Euclidean distance.
    ///
    /// Ties go to the entry inserted first. An exact match ends the scan.
    /// Returns `None` only for an empty index.
    pub fn nearest(&self, rgb: Rgb) -> Option<&NamedColor> {
        let mut best: Option<(&NamedColor, u32)> = None;

        for color in self.entries.values() {
            let distance = color.rgb.distance_squared(rgb);
            if best.is_none_or(|(_, d)| distance < d) {
                best = Some((color, distance));
            }
            if distance == 0 {
                break;
            }
        }

        best.map(|(color, _)| color)
    }

    /// [`nearest`](Self::nearest) for a hex string.
    pub fn nearest_hex(&self, hex: &str) -> Result<Option<&NamedColor>> {
        Ok(self.nearest(hex_to_rgb(hex)?))
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &NamedColor> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for NamedColorIndex {
    fn default() -> Self {
        Self::builtin()
    }
}
