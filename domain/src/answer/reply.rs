//! The answer handed back to the caller

use crate::core::model::Model;
use serde::{Deserialize, Serialize};

/// Where an answer came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum AnswerSource {
    /// Generated by a remote model on attempt number `attempts`
    Remote { model: Model, attempts: u32 },
    /// Composed locally after `attempts` failed remote calls
    Local { attempts: u32 },
}

/// A displayable answer. Its text is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    text: String,
    #[serde(flatten)]
    source: AnswerSource,
}

impl Answer {
    pub fn remote(text: impl Into<String>, model: Model, attempts: u32) -> Self {
        Self {
            text: text.into(),
            source: AnswerSource::Remote { model, attempts },
        }
    }

    pub fn local(text: impl Into<String>, attempts: u32) -> Self {
        Self {
            text: text.into(),
            source: AnswerSource::Local { attempts },
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn source(&self) -> &AnswerSource {
        &self.source
    }

    pub fn is_local(&self) -> bool {
        matches!(self.source, AnswerSource::Local { .. })
    }

    /// Number of remote calls made to produce this answer
    pub fn attempts(&self) -> u32 {
        match self.source {
            AnswerSource::Remote { attempts, .. } | AnswerSource::Local { attempts } => attempts,
        }
    }
}

impl std::fmt::Display for Answer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}
