//! CLI configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, bail};
use hue_ollama::OllamaConfig;
use hue_storage::{HuePaths, hue_config_dir, hue_data_dir};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Hue configuration, read from TOML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HueConfig {
    #[serde(default)]
    pub ollama: OllamaConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    /// Named-color source; defaults to `colors.json` in the data directory.
    #[serde(default)]
    pub named_colors: Option<PathBuf>,

    /// How long theme generation waits for the theme to be saved. Zero
    /// saves in the background without waiting.
    #[serde(default = "default_persist_timeout_ms")]
    pub persist_timeout_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Data directory; defaults to the platform data directory.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Seed an empty store with default colors at startup.
    #[serde(default = "default_true")]
    pub seed: bool,
}

const MAX_PERSIST_TIMEOUT_MS: u64 = 10_000;

fn default_persist_timeout_ms() -> u64 {
    250
}

fn default_true() -> bool {
    true
}

impl Default for HueConfig {
    fn default() -> Self {
        Self {
            ollama: OllamaConfig::default(),
            storage: StorageConfig::default(),
            named_colors: None,
            persist_timeout_ms: default_persist_timeout_ms(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            seed: true,
        }
    }
}

impl HueConfig {
    /// Load from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Resolve the configuration for this process: the explicit file, or the
    /// default file when present, then environment overrides. The result is
    /// validated.
    pub fn discover(explicit: Option<&Path>) -> anyhow::Result<Self> {
        let mut config = match explicit {
            Some(path) => Self::load(path)?,
            None => match default_config_path() {
                Some(path) if path.is_file() => Self::load(&path)?,
                _ => Self::default(),
            },
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Apply `HUE_*` overrides. `lookup` returns the value of a variable.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = lookup("HUE_OLLAMA_URL") {
            debug!(url = %url, "Using HUE_OLLAMA_URL override");
            self.ollama.base_url = url;
        }
        if let Some(model) = lookup("HUE_MODEL") {
            self.ollama.default_model = model;
        }
        if let Some(dir) = lookup("HUE_DATA_DIR") {
            self.storage.data_dir = Some(PathBuf::from(dir));
        }
        if let Some(file) = lookup("HUE_COLORS_FILE") {
            self.named_colors = Some(PathBuf::from(file));
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        self.ollama.validate()?;
        if self.persist_timeout_ms > MAX_PERSIST_TIMEOUT_MS {
            bail!("persist_timeout_ms must be at most {MAX_PERSIST_TIMEOUT_MS}");
        }
        Ok(())
    }

    /// Storage paths for the configured data directory.
    pub fn paths(&self) -> anyhow::Result<HuePaths> {
        let data_dir = match &self.storage.data_dir {
            Some(dir) => dir.clone(),
            None => hue_data_dir()?,
        };
        Ok(HuePaths::from_root(data_dir))
    }

    /// Named-color source for `paths`.
    pub fn named_colors_path(&self, paths: &HuePaths) -> PathBuf {
        self.named_colors
            .clone()
            .unwrap_or_else(|| paths.named_colors_file())
    }

    pub fn persist_timeout(&self) -> Duration {
        Duration::from_millis(self.persist_timeout_ms)
    }
}

fn default_config_path() -> Option<PathBuf> {
    hue_config_dir()
        .ok()
        .map(|dir| dir.join(hue_storage::paths::CONFIG_FILE))
}
