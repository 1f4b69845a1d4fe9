//! Output configuration from TOML (`[output]` section)

use kelly_domain::OutputFormat;
use serde::{Deserialize, Serialize};

pub use kelly_domain::OutputFormat as FileOutputFormat;

/// Raw output configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Output format (uses domain type)
    pub format: Option<OutputFormat>,
    /// Enable colored terminal output
    pub color: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            format: None,
            color: true,
        }
    }
}
