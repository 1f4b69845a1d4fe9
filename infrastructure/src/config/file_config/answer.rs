//! Retry policy from TOML (`[answer]` section)

use kelly_domain::{ConfigIssue, ConfigIssueCode, Settings};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw answer pipeline configuration from TOML
///
/// # Example
///
/// ```toml
/// [answer]
/// max_attempts = 3
/// timeout_seconds = 30
/// refusal_backoff_ms = 600
/// empty_backoff_ms = 400
/// transport_backoff_ms = 600
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAnswerConfig {
    /// Remote attempts per question (1..=6)
    pub max_attempts: u32,
    /// Upper bound for a single remote call
    pub timeout_seconds: u64,
    /// Pause after a safety refusal
    pub refusal_backoff_ms: u64,
    /// Pause after a reply without text
    pub empty_backoff_ms: u64,
    /// Pause after a network or HTTP failure
    pub transport_backoff_ms: u64,
}

impl Default for FileAnswerConfig {
    fn default() -> Self {
        Self {
            max_attempts: Settings::DEFAULT_MAX_ATTEMPTS,
            timeout_seconds: 30,
            refusal_backoff_ms: 600,
            empty_backoff_ms: 400,
            transport_backoff_ms: 600,
        }
    }
}

impl FileAnswerConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if !(1..=Settings::MAX_ATTEMPTS_LIMIT).contains(&self.max_attempts) {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::AttemptsOutOfRange {
                    value: self.max_attempts,
                    max: Settings::MAX_ATTEMPTS_LIMIT,
                },
                format!(
                    "answer.max_attempts: {} is outside 1..={}",
                    self.max_attempts,
                    Settings::MAX_ATTEMPTS_LIMIT
                ),
            ));
        }

        if self.timeout_seconds == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ZeroTimeout,
                "answer.timeout_seconds: timeout cannot be 0",
            ));
        }

        issues
    }
}
