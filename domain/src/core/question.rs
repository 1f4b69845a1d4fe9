//! Question value object

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// A question to be answered by Kelly (Value Object)
///
/// Opaque user text. The only structural rule is that it is not empty
/// or whitespace-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    content: String,
}

impl Question {
    /// Create a new question
    ///
    /// # Panics
    /// Panics if the content is empty or only whitespace
    pub fn new(content: impl Into<String>) -> Self {
        let content = content.into();
        assert!(!content.trim().is_empty(), "Question cannot be empty");
        Self { content }
    }

    /// Try to create a new question, returning None if invalid
    pub fn try_new(content: impl Into<String>) -> Option<Self> {
        let content = content.into();
        if content.trim().is_empty() {
            None
        } else {
            Some(Self { content })
        }
    }

    /// Parse user input into a question, trimming surrounding whitespace
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        Self::try_new(input.trim())
            .ok_or_else(|| DomainError::InvalidQuestion("question cannot be empty".to_string()))
    }

    /// Get the question content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Number of whitespace-separated words
    pub fn word_count(&self) -> usize {
        self.content.split_whitespace().count()
    }

    /// Consume and return the inner content
    pub fn into_content(self) -> String {
        self.content
    }
}

impl std::fmt::Display for Question {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

impl From<&str> for Question {
    fn from(s: &str) -> Self {
        Question::new(s)
    }
}

impl From<String> for Question {
    fn from(s: String) -> Self {
        Question::new(s)
    }
}
