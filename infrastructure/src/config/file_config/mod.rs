//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod answer;
mod gemini;
mod logging;
mod models;
mod output;
mod repl;

pub use answer::FileAnswerConfig;
pub use gemini::FileGeminiConfig;
pub use logging::FileLoggingConfig;
pub use models::FileModelsConfig;
pub use output::{FileOutputConfig, FileOutputFormat};
pub use repl::FileReplConfig;

use kelly_application::PipelineConfig;
use kelly_domain::{ConfigIssue, Model, Settings};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Errors when turning a file configuration into runtime settings
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("model name cannot be empty")]
    EmptyModelName,

    #[error("max_attempts must be between 1 and {max}, got {value}")]
    AttemptsOutOfRange { value: u32, max: u32 },
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Default and fallback models
    pub models: FileModelsConfig,
    /// Retry policy
    pub answer: FileAnswerConfig,
    /// Gemini request settings
    pub gemini: FileGeminiConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// REPL settings
    pub repl: FileReplConfig,
    /// Conversation transcript settings
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Checks empty model names, duplicate fallbacks, the attempt range and
    /// a zero timeout.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        issues.extend(self.models.parse_default().1);
        issues.extend(self.models.parse_fallback().1);
        issues.extend(self.answer.validate());
        issues
    }

    /// Build the initial per-request settings
    pub fn to_settings(&self) -> Result<Settings, ConfigValidationError> {
        let model = match self.models.default.as_deref() {
            None => Model::default(),
            Some(raw) => raw
                .parse()
                .map_err(|_| ConfigValidationError::EmptyModelName)?,
        };
        Settings::new(model, self.answer.max_attempts).map_err(|_| {
            ConfigValidationError::AttemptsOutOfRange {
                value: self.answer.max_attempts,
                max: Settings::MAX_ATTEMPTS_LIMIT,
            }
        })
    }

    /// Build the pipeline's fallback, timeout and backoff policy
    pub fn to_pipeline_config(&self) -> Result<PipelineConfig, ConfigValidationError> {
        if self.answer.timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidTimeout);
        }
        let (fallback, issues) = self.models.parse_fallback();
        if issues.iter().any(ConfigIssue::is_error) {
            return Err(ConfigValidationError::EmptyModelName);
        }

        Ok(PipelineConfig::default()
            .with_fallback_models(fallback)
            .with_call_timeout(Some(self.answer.timeout()))
            .with_refusal_backoff(Duration::from_millis(self.answer.refusal_backoff_ms))
            .with_empty_backoff(Duration::from_millis(self.answer.empty_backoff_ms))
            .with_transport_backoff(Duration::from_millis(self.answer.transport_backoff_ms)))
    }
}
