//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid question: {0}")]
    InvalidQuestion(String),

    #[error("Invalid model: {0}")]
    InvalidModel(String),

    #[error("max attempts must be between 1 and {max}, got {value}")]
    AttemptsOutOfRange { value: u32, max: u32 },
}

impl DomainError {
    /// Check if this error was caused by user-supplied settings
    pub fn is_settings_error(&self) -> bool {
        matches!(
            self,
            DomainError::InvalidModel(_) | DomainError::AttemptsOutOfRange { .. }
        )
    }
}
