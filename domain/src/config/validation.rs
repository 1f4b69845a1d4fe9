//! Structured configuration issues.
//!
//! Config loaders report problems as [`ConfigIssue`]s instead of failing on
//! the first one, so the CLI can print every warning at startup and refuse
//! to run only on errors.

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: the configuration works but may not behave as expected.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// A model field was set to an empty string.
    EmptyModelName { field: String },
    /// `answer.max_attempts` is outside the accepted range.
    AttemptsOutOfRange { value: u32, max: u32 },
    /// `answer.timeout_seconds` is zero.
    ZeroTimeout,
    /// The fallback list repeats a model; the repeat is ignored.
    DuplicateFallback { model: String },
}

/// A detected issue in the configuration.
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_set_severity() {
        let issue = ConfigIssue::error(ConfigIssueCode::ZeroTimeout, "timeout cannot be 0");
        assert!(issue.is_error());

        let issue = ConfigIssue::warning(
            ConfigIssueCode::DuplicateFallback {
                model: "models/gemini-2.5-pro".to_string(),
            },
            "duplicate",
        );
        assert_eq!(issue.severity, Severity::Warning);
        assert!(!issue.is_error());
    }
}
