//! OS-aware path detection for Hue storage.
//!
//! - **Windows**: `%APPDATA%\hue\`
//! - **macOS**: `~/Library/Application Support/hue/`
//! - **Linux**: `~/.local/share/hue/`
//!
//! `HUE_DATA_DIR` overrides the data directory on every platform.

use std::path::PathBuf;
use tracing::debug;

use crate::error::{Result, StorageError};

/// Application name used for storage directories.
pub const APP_NAME: &str = "hue";

pub const COLORS_FILE: &str = "saved_colors.json";
pub const THEMES_FILE: &str = "themes.jsonl";
/// Optional named-color source looked up next to the saved data.
pub const NAMED_COLORS_FILE: &str = "colors.json";
pub const CONFIG_FILE: &str = "config.toml";

/// Hue storage paths container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuePaths {
    /// Root data directory (platform-specific).
    pub data_dir: PathBuf,
    /// Saved colors document.
    pub colors_file: PathBuf,
    /// Saved themes, one JSON document per line.
    pub themes_file: PathBuf,
}

impl HuePaths {
    /// Create HuePaths with automatic OS detection.
    pub fn new() -> Result<Self> {
        Ok(Self::from_root(hue_data_dir()?))
    }

    /// Create HuePaths from a custom root directory.
    pub fn from_root(data_dir: PathBuf) -> Self {
        Self {
            colors_file: data_dir.join(COLORS_FILE),
            themes_file: data_dir.join(THEMES_FILE),
            data_dir,
        }
    }

    /// Default location of the named-color source.
    pub fn named_colors_file(&self) -> PathBuf {
        self.data_dir.join(NAMED_COLORS_FILE)
    }

    /// Ensure the data directory exists.
    pub async fn ensure_dirs(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.data_dir).await?;
        debug!(data_dir = %self.data_dir.display(), "Hue storage directory initialized");
        Ok(())
    }
}

/// Get the Hue data directory based on the current OS.
pub fn hue_data_dir() -> Result<PathBuf> {
    if let Ok(val) = std::env::var("HUE_DATA_DIR") {
        if !val.is_empty() {
            let path = PathBuf::from(val);
            debug!(path = %path.display(), "Using HUE_DATA_DIR override");
            return Ok(path);
        }
    }

    let base = dirs::data_dir().ok_or(StorageError::HomeDirNotFound)?;
    Ok(base.join(APP_NAME))
}

/// Get the Hue config directory based on the current OS.
pub fn hue_config_dir() -> Result<PathBuf> {
    let base = dirs::config_dir().ok_or(StorageError::HomeDirNotFound)?;
    Ok(base.join(APP_NAME))
}
