//! A single generation attempt

use crate::core::{model::Model, question::Question};

/// One attempt against the remote model (Value Object)
///
/// Built fresh for every attempt and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    question: Question,
    model: Model,
    /// Attempts already made before this one
    attempt: u32,
    paraphrase: Option<Question>,
}

impl GenerationRequest {
    /// Create a request. A paraphrase identical to the question is dropped.
    pub fn new(question: Question, model: Model, attempt: u32, paraphrase: Option<Question>) -> Self {
        let paraphrase = paraphrase.filter(|p| p.content() != question.content());
        Self {
            question,
            model,
            attempt,
            paraphrase,
        }
    }

    pub fn question(&self) -> &Question {
        &self.question
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    pub fn paraphrase(&self) -> Option<&Question> {
        self.paraphrase.as_ref()
    }

    /// The text actually sent: the paraphrase when present, else the question
    pub fn prompt_text(&self) -> &str {
        self.paraphrase
            .as_ref()
            .unwrap_or(&self.question)
            .content()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_text_prefers_paraphrase() {
        let request = GenerationRequest::new(
            Question::new("What is a GAN?"),
            Model::default(),
            1,
            Some(Question::new("In scientific terms, describe the stages of: What is a GAN?")),
        );
        assert!(request.prompt_text().starts_with("In scientific terms"));
        assert_eq!(request.question().content(), "What is a GAN?");
        assert_eq!(request.attempt(), 1);
    }

    #[test]
    fn test_identical_paraphrase_is_dropped() {
        let request = GenerationRequest::new(
            Question::new("What is a GAN?"),
            Model::default(),
            0,
            Some(Question::new("What is a GAN?")),
        );
        assert!(request.paraphrase().is_none());
        assert_eq!(request.prompt_text(), "What is a GAN?");
    }
}
