//! Configuration file loading for kelly
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `KELLY_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./kelly.toml` or `./.kelly.toml`
//! 4. Global: `$XDG_CONFIG_HOME/kelly/config.toml` (or `~/.config/kelly/config.toml`)
//! 5. Default values
//!
//! CLI flags are applied on top by the binary.

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileAnswerConfig, FileConfig, FileGeminiConfig, FileLoggingConfig,
    FileModelsConfig, FileOutputConfig, FileOutputFormat, FileReplConfig,
};
pub use loader::ConfigLoader;
