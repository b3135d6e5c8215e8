//! Color queries and mutations.

use std::sync::Arc;

use hue_color::{ColorRecord, NamedColorIndex, PaletteGenerator, PaletteRequest};
use hue_storage::{ColorStore, NewColor, StorageError, StoredColor};
use tracing::info;

use crate::error::{EngineError, Result};

pub const DEFAULT_RECENT_LIMIT: usize = 20;
pub const MAX_RECENT_LIMIT: usize = 100;

/// Color lookups, palettes and saved colors.
#[derive(Clone)]
pub struct ColorService {
    index: Arc<NamedColorIndex>,
    store: Arc<dyn ColorStore>,
}

impl ColorService {
    pub fn new(index: Arc<NamedColorIndex>, store: Arc<dyn ColorStore>) -> Self {
        Self { index, store }
    }

    /// Full record for a hex color, named after the nearest known color.
    pub fn color_info(&self, hex: &str) -> Result<ColorRecord> {
        Ok(ColorRecord::from_hex(hex, &self.index)?)
    }

    /// Record for a known color name (case-insensitive).
    pub fn color_by_name(&self, name: &str) -> Result<ColorRecord> {
        let named = self.index.require(name)?;
        Ok(ColorRecord::unnamed(named.rgb).with_name(named.name.clone()))
    }

    pub fn palette(&self, request: &PaletteRequest) -> Result<Vec<ColorRecord>> {
        Ok(PaletteGenerator::new(&self.index).generate_request(request)?)
    }

    /// Save `hex` under `name` and return the stored color.
    pub async fn save_color(&self, name: &str, hex: &str) -> Result<StoredColor> {
        let name = name.trim();
        if name.is_empty() {
            return Err(EngineError::InvalidRequest("color name must not be empty".to_string()));
        }
        let record = ColorRecord::from_hex(hex, &self.index)?;

        let id = self.store.save(NewColor::from_record(name, &record)).await?;
        info!(id, name = %name, hex = %record.hex(), "Saved color");

        self.store
            .get(id)
            .await?
            .ok_or(EngineError::Persistence(StorageError::NotFound(id)))
    }

    pub async fn get_color(&self, id: u64) -> Result<Option<StoredColor>> {
        Ok(self.store.get(id).await?)
    }

    /// Most recently saved colors. `limit` defaults to
    /// [`DEFAULT_RECENT_LIMIT`] and is clamped to `1..=MAX_RECENT_LIMIT`.
    pub async fn recent_colors(&self, limit: Option<usize>) -> Result<Vec<StoredColor>> {
        let limit = limit
            .unwrap_or(DEFAULT_RECENT_LIMIT)
            .clamp(1, MAX_RECENT_LIMIT);
        Ok(self.store.list_recent(limit).await?)
    }
}
