//! CLI argument structures and parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Log verbosity level for CLI output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogLevel {
    /// Only show errors
    Error,
    /// Show warnings and errors (default)
    #[default]
    Warn,
    /// Show informational messages, warnings, and errors
    Info,
    /// Show debug messages and above
    Debug,
    /// Show all messages including trace-level details
    Trace,
}

impl LogLevel {
    /// Convert to tracing filter string.
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Hue - color utilities and AI-assisted theme generation.
#[derive(Debug, Parser)]
#[command(name = "hue", version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (defaults to <config dir>/hue/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log level used when RUST_LOG is not set
    #[arg(long, value_enum, default_value_t = LogLevel::Warn, global = true)]
    pub log_level: LogLevel,

    /// Enable verbose output (same as --log-level debug)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Indent JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Effective log level after `--verbose`.
    pub fn effective_log_level(&self) -> LogLevel {
        if self.verbose {
            LogLevel::Debug
        } else {
            self.log_level
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Show hex, RGB, HSL and nearest name for a color
    Convert {
        /// Hex color, e.g. "#2196F3" or "f80"
        hex: String,
    },

    /// Look up a named color
    Name { name: String },

    /// Generate a palette from a base color
    Palette {
        hex: String,
        /// complementary, analogous, triadic, tetradic, shades or tints
        #[arg(long, short, default_value = "complementary")]
        mode: String,
        /// Number of colors for shades/tints (2-12)
        #[arg(long, short, default_value_t = hue_color::DEFAULT_PALETTE_COUNT)]
        count: usize,
    },

    /// Generate a theme from a description using the model
    Theme {
        /// Theme description
        #[arg(required = true, num_args = 1..)]
        prompt: Vec<String>,
        /// Model to use instead of the configured default
        #[arg(long, short)]
        model: Option<String>,
    },

    /// Save a color under a name
    Save { name: String, hex: String },

    /// Show a saved color
    Show { id: u64 },

    /// List recently saved colors
    Recent {
        /// Maximum number of colors (1-100, default 20)
        #[arg(long, short)]
        limit: Option<usize>,
    },

    /// List models installed on the Ollama server
    Models,
}
