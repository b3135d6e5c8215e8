//! Hue Storage - saved colors and generated themes.
//!
//! Data lives in an OS-aware directory (see [`paths`]):
//!
//! - `saved_colors.json`: every saved color, rewritten atomically on change
//! - `themes.jsonl`: one generated theme per line, append only
//!
//! # Usage
//!
//! ```rust,no_run
//! use hue_color::ColorRecord;
//! use hue_storage::{ColorStore, HuePaths, JsonColorStore, NewColor, default_seed_colors};
//!
//! #[tokio::main]
//! async fn main() -> hue_storage::Result<()> {
//!     let store = JsonColorStore::open(HuePaths::new()?).await?;
//!     store.seed_if_empty(&default_seed_colors()).await?;
//!
//!     let index = hue_color::NamedColorIndex::builtin();
//!     let record = ColorRecord::from_hex("#2196F3", &index).expect("valid hex");
//!     let id = store.save(NewColor::from_record("Material Blue", &record)).await?;
//!     println!("saved as {id}");
//!
//!     store.close().await;
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod paths;
pub mod store;

pub use error::{Result, StorageError};
pub use paths::{HuePaths, hue_config_dir, hue_data_dir};
pub use store::{
    ColorStore, DEFAULT_SEED_COLORS, JsonColorStore, NewColor, NewTheme, StoredColor,
    StoredTheme, default_seed_colors,
};
