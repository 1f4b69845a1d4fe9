//! Per-request settings chosen by the user

use crate::core::{error::DomainError, model::Model};
use serde::Serialize;

/// Model selection and attempt budget (Value Object)
///
/// Owned by the session; the answer pipeline only reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settings {
    model: Model,
    max_attempts: u32,
}

impl Settings {
    /// Upper bound on attempts per question
    pub const MAX_ATTEMPTS_LIMIT: u32 = 6;

    /// Attempts used when nothing else is configured
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

    pub fn new(model: Model, max_attempts: u32) -> Result<Self, DomainError> {
        Self::check_attempts(max_attempts)?;
        Ok(Self {
            model,
            max_attempts,
        })
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn with_model(mut self, model: Model) -> Self {
        self.model = model;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Result<Self, DomainError> {
        Self::check_attempts(max_attempts)?;
        self.max_attempts = max_attempts;
        Ok(self)
    }

    fn check_attempts(value: u32) -> Result<(), DomainError> {
        if (1..=Self::MAX_ATTEMPTS_LIMIT).contains(&value) {
            Ok(())
        } else {
            Err(DomainError::AttemptsOutOfRange {
                value,
                max: Self::MAX_ATTEMPTS_LIMIT,
            })
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            model: Model::default(),
            max_attempts: Self::DEFAULT_MAX_ATTEMPTS,
        }
    }
}
