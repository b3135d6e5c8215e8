//! Command-line interface definition.

mod args;

pub use args::{Cli, Command, LogLevel};
