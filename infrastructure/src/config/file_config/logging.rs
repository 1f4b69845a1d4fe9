//! Transcript configuration from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};

/// Raw logging configuration from TOML (`[logging]` section)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL transcript path; no transcript when unset
    pub conversation_log: Option<String>,
}
