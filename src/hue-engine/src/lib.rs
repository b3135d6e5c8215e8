//! Hue engine.
//!
//! Two services sit on top of the color, Ollama and storage crates:
//!
//! - [`ThemeService`] turns a theme description into colors: it prompts the
//!   model, [`extract`]s hex candidates from whatever comes back,
//!   [`normalize`]s them and saves the theme best-effort. Upstream trouble
//!   ends up in the result metadata, never as an error.
//! - [`ColorService`] answers color queries and saves named colors.

mod colors;
mod error;
mod extract;
mod normalize;
mod prompt;
mod theme;

pub use colors::{ColorService, DEFAULT_RECENT_LIMIT, MAX_RECENT_LIMIT};
pub use error::{EngineError, Result};
pub use extract::{Extraction, ExtractionMethod, extract};
pub use normalize::normalize;
pub use prompt::{MAX_THEME_COLORS, MIN_THEME_COLORS, designer_prompt};
pub use theme::{
    DEFAULT_PERSIST_TIMEOUT, ThemeGenerationResult, ThemeMetadata, ThemeRequest, ThemeService,
};
