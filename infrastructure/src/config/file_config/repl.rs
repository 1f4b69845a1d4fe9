//! Chat REPL configuration from TOML (`[repl]` section)

use serde::{Deserialize, Serialize};

/// Raw REPL configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileReplConfig {
    /// Show a spinner while attempts run
    pub show_progress: bool,
    /// Line history location; the data dir is used when unset
    pub history_file: Option<String>,
}

impl Default for FileReplConfig {
    fn default() -> Self {
        Self {
            show_progress: true,
            history_file: None,
        }
    }
}
