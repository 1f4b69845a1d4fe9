//! Session domain entities

use crate::answer::{
    reply::{Answer, AnswerSource},
    settings::Settings,
};
use crate::core::{error::DomainError, model::Model, question::Question};
use serde::Serialize;

/// One question and the answer Kelly gave (Entity)
#[derive(Debug, Clone, Serialize)]
pub struct Exchange {
    pub question: String,
    pub answer: String,
    #[serde(flatten)]
    pub source: AnswerSource,
}

impl Exchange {
    pub fn new(question: &Question, answer: &Answer) -> Self {
        Self {
            question: question.content().to_string(),
            answer: answer.text().to_string(),
            source: answer.source().clone(),
        }
    }

    pub fn is_local(&self) -> bool {
        matches!(self.source, AnswerSource::Local { .. })
    }
}

/// A user's conversation with Kelly (Entity)
///
/// Holds the settings the user picked and the exchanges so far. Each
/// front-end session owns its own value; nothing is shared between them.
#[derive(Debug, Clone, Default)]
pub struct ChatSession {
    settings: Settings,
    history: Vec<Exchange>,
}

impl ChatSession {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            history: Vec::new(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn history(&self) -> &[Exchange] {
        &self.history
    }

    pub fn set_model(&mut self, model: Model) {
        self.settings = self.settings.clone().with_model(model);
    }

    /// Change the attempt budget; the old value is kept on error
    pub fn set_max_attempts(&mut self, max_attempts: u32) -> Result<(), DomainError> {
        self.settings = self.settings.clone().with_max_attempts(max_attempts)?;
        Ok(())
    }

    pub fn record(&mut self, question: &Question, answer: &Answer) {
        self.history.push(Exchange::new(question, answer));
    }

    pub fn clear(&mut self) {
        self.history.clear();
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}
