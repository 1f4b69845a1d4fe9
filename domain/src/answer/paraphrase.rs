//! Question rewrites used when a retry needs a different wording
//!
//! The pipeline asks a [`Paraphraser`] for variant `i mod variants()` on
//! attempt `i`, so variant 0 is always what the first attempt sends.

use crate::core::question::Question;

/// Strategy producing textual variants of a question
pub trait Paraphraser: Send + Sync {
    /// Number of distinct variants (at least 1)
    fn variants(&self) -> usize;

    /// Variant `index` of the question, wrapping past `variants()`
    fn paraphrase(&self, question: &Question, index: usize) -> Question;
}

/// A single rewrite rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParaphraseTemplate {
    /// Send the question unchanged
    Verbatim,
    /// Append text after the question
    Suffix(String),
    /// Put text in front of the question
    Prefix(String),
}

impl ParaphraseTemplate {
    pub fn apply(&self, question: &Question) -> Question {
        let content = question.content();
        match self {
            ParaphraseTemplate::Verbatim => question.clone(),
            ParaphraseTemplate::Suffix(suffix) => Question::new(format!("{} {}", content, suffix)),
            ParaphraseTemplate::Prefix(prefix) => Question::new(format!("{}{}", prefix, content)),
        }
    }
}

/// Paraphraser driven by an ordered list of templates
#[derive(Debug, Clone)]
pub struct TemplateParaphraser {
    templates: Vec<ParaphraseTemplate>,
}

impl TemplateParaphraser {
    /// Build from templates. An empty list behaves as a single `Verbatim`.
    pub fn new(templates: Vec<ParaphraseTemplate>) -> Self {
        let templates = if templates.is_empty() {
            vec![ParaphraseTemplate::Verbatim]
        } else {
            templates
        };
        Self { templates }
    }

    /// Never rewrites; retries then vary only by model
    pub fn verbatim() -> Self {
        Self::new(vec![ParaphraseTemplate::Verbatim])
    }

    pub fn templates(&self) -> &[ParaphraseTemplate] {
        &self.templates
    }
}

impl Default for TemplateParaphraser {
    fn default() -> Self {
        Self::new(vec![
            ParaphraseTemplate::Verbatim,
            ParaphraseTemplate::Suffix(
                "Please explain step by step and include practical suggestions.".to_string(),
            ),
            ParaphraseTemplate::Prefix("In scientific terms, describe the stages of: ".to_string()),
        ])
    }
}

impl Paraphraser for TemplateParaphraser {
    fn variants(&self) -> usize {
        self.templates.len()
    }

    fn paraphrase(&self, question: &Question, index: usize) -> Question {
        self.templates[index % self.templates.len()].apply(question)
    }
}
