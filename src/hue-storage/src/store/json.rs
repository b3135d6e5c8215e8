//! JSON file backed [`ColorStore`].

use std::path::Path;

use async_trait::async_trait;
use chrono::Utc;
use hue_color::{NamedColor, is_valid_hex, normalize_hex};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::ColorStore;
use super::types::{NewColor, NewTheme, StoredColor, StoredTheme};
use crate::error::{Result, StorageError};
use crate::paths::HuePaths;

/// On-disk layout of the colors document.
#[derive(Debug, Serialize, Deserialize)]
struct ColorsDocument {
    next_id: u64,
    colors: Vec<StoredColor>,
}

#[derive(Debug)]
struct StoreState {
    colors: ColorsDocument,
    next_theme_id: u64,
}

impl StoreState {
    fn contains_hex(&self, hex: &str) -> bool {
        self.colors.colors.iter().any(|c| c.hex == hex)
    }

    fn push(&mut self, color: NewColor, hex: String) -> u64 {
        let id = self.colors.next_id;
        self.colors.next_id += 1;
        self.colors.colors.push(StoredColor {
            id,
            name: color.name,
            hex,
            rgb: color.rgb,
            hsl: color.hsl,
            created: Utc::now(),
        });
        id
    }
}

/// Color store writing `saved_colors.json` and `themes.jsonl` under the data
/// directory.
///
/// Writers are serialized by an async mutex. The colors document is rewritten
/// through a temporary file and renamed into place; themes are appended.
#[derive(Debug)]
pub struct JsonColorStore {
    paths: HuePaths,
    state: Mutex<Option<StoreState>>,
}

impl JsonColorStore {
    /// Open the store, creating the data directory when needed.
    pub async fn open(paths: HuePaths) -> Result<Self> {
        paths.ensure_dirs().await?;

        let colors = match fs::read_to_string(&paths.colors_file).await {
            Ok(content) => serde_json::from_str::<ColorsDocument>(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => ColorsDocument {
                next_id: 1,
                colors: Vec::new(),
            },
            Err(e) => return Err(e.into()),
        };
        let next_theme_id = last_theme_id(&paths.themes_file).await? + 1;

        info!(
            data_dir = %paths.data_dir.display(),
            colors = colors.colors.len(),
            "Color store opened"
        );

        Ok(Self {
            paths,
            state: Mutex::new(Some(StoreState {
                colors,
                next_theme_id,
            })),
        })
    }

    /// Get the underlying paths.
    pub fn paths(&self) -> &HuePaths {
        &self.paths
    }

    /// Close the store. Later operations fail with [`StorageError::Closed`].
    pub async fn close(&self) {
        if self.state.lock().await.take().is_some() {
            info!(data_dir = %self.paths.data_dir.display(), "Color store closed");
        }
    }

    async fn write_colors(&self, document: &ColorsDocument) -> Result<()> {
        let content = serde_json::to_string_pretty(document)?;
        let tmp = self.paths.colors_file.with_extension("json.tmp");

        let mut file = fs::File::create(&tmp).await?;
        file.write_all(content.as_bytes()).await?;
        file.flush().await?;
        file.sync_all().await?;
        drop(file);

        fs::rename(&tmp, &self.paths.colors_file).await?;

        #[cfg(unix)]
        {
            if let Ok(dir) = fs::File::open(&self.paths.data_dir).await {
                let _ = dir.sync_all().await;
            }
        }
        Ok(())
    }
}

/// Highest theme id in the JSONL file, 0 when absent or empty.
async fn last_theme_id(path: &Path) -> Result<u64> {
    let content = match fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
        Err(e) => return Err(e.into()),
    };

    let mut last = 0;
    for (line_no, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<StoredTheme>(line) {
            Ok(theme) => last = last.max(theme.id),
            Err(e) => warn!(line = line_no + 1, error = %e, "Skipping malformed theme entry"),
        }
    }
    Ok(last)
}

#[async_trait]
impl ColorStore for JsonColorStore {
    async fn save(&self, color: NewColor) -> Result<u64> {
        if !is_valid_hex(&color.hex) {
            return Err(StorageError::InvalidColor(color.hex));
        }
        let hex = normalize_hex(&color.hex);

        let mut guard = self.state.lock().await;
        let state = guard.as_mut().ok_or(StorageError::Closed)?;
        if state.contains_hex(&hex) {
            return Err(StorageError::DuplicateHex(hex));
        }

        let id = state.push(color, hex);
        if let Err(e) = self.write_colors(&state.colors).await {
            state.colors.colors.pop();
            state.colors.next_id = id;
            return Err(e);
        }

        debug!(id, "Color saved");
        Ok(id)
    }

    async fn get(&self, id: u64) -> Result<Option<StoredColor>> {
        let guard = self.state.lock().await;
        let state = guard.as_ref().ok_or(StorageError::Closed)?;
        Ok(state.colors.colors.iter().find(|c| c.id == id).cloned())
    }

    async fn list_recent(&self, limit: usize) -> Result<Vec<StoredColor>> {
        let guard = self.state.lock().await;
        let state = guard.as_ref().ok_or(StorageError::Closed)?;

        let mut colors = state.colors.colors.clone();
        colors.sort_by(|a, b| b.created.cmp(&a.created).then(b.id.cmp(&a.id)));
        colors.truncate(limit);
        Ok(colors)
    }

    async fn save_theme(&self, theme: NewTheme) -> Result<u64> {
        let mut guard = self.state.lock().await;
        let state = guard.as_mut().ok_or(StorageError::Closed)?;

        // Reserved before the append so a failed write never reuses the id.
        let id = state.next_theme_id;
        state.next_theme_id += 1;

        let stored = StoredTheme {
            id,
            prompt: theme.prompt,
            model: theme.model,
            colors: theme.colors,
            created: Utc::now(),
        };
        let mut line = serde_json::to_string(&stored)?;
        line.push('\n');

        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.paths.themes_file)
            .await?;
        let prior_len = file.metadata().await?.len();
        if let Err(e) = append_line(&mut file, line.as_bytes()).await {
            if let Err(truncate_err) = file.set_len(prior_len).await {
                warn!(error = %truncate_err, "Failed to drop partial theme line");
            }
            return Err(e.into());
        }

        debug!(id, colors = stored.colors.len(), "Theme saved");
        Ok(id)
    }

    async fn seed_if_empty(&self, defaults: &[NamedColor]) -> Result<usize> {
        let mut guard = self.state.lock().await;
        let state = guard.as_mut().ok_or(StorageError::Closed)?;
        if !state.colors.colors.is_empty() {
            debug!("Color store already populated, skipping seed");
            return Ok(0);
        }

        let first_id = state.colors.next_id;
        let mut inserted = 0;
        for named in defaults {
            if !is_valid_hex(&named.hex) {
                debug!(name = %named.name, hex = %named.hex, "Skipping invalid seed color");
                continue;
            }
            let hex = normalize_hex(&named.hex);
            if state.contains_hex(&hex) {
                debug!(name = %named.name, hex = %hex, "Skipping duplicate seed color");
                continue;
            }
            state.push(NewColor::from(named), hex);
            inserted += 1;
        }

        if inserted > 0 {
            if let Err(e) = self.write_colors(&state.colors).await {
                state.colors.colors.clear();
                state.colors.next_id = first_id;
                return Err(e);
            }
        }

        info!(inserted, "Seeded color store");
        Ok(inserted)
    }
}

async fn append_line(file: &mut fs::File, line: &[u8]) -> std::io::Result<()> {
    file.write_all(line).await?;
    file.flush().await?;
    file.sync_all().await
}
