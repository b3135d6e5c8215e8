//! Hue CLI library.
//!
//! The `hue` binary parses [`cli::Cli`], resolves [`config::HueConfig`],
//! starts an [`app::App`] and prints each command's JSON output on stdout.

pub mod app;
pub mod cli;
pub mod config;
pub mod logging;

pub use app::App;
pub use cli::{Cli, Command, LogLevel};
pub use config::{HueConfig, StorageConfig};
