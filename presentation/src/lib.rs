//! Presentation layer for kelly
//!
//! This crate contains CLI definitions, output formatters,
//! progress reporters, and interactive chat interface.

pub mod chat;
pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use chat::{ChatRepl, ProgressMode};
pub use cli::commands::{Cli, OutputFormat};
pub use output::console::{ConsoleFormatter, FALLBACK_NOTE, JsonFormatter};
pub use output::formatter::{OutputFormatter, formatter_for};
pub use progress::reporter::{ProgressReporter, SimpleProgress};
