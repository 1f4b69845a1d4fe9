//! Domain layer for kelly
//!
//! This crate contains the value objects and pure logic behind Kelly,
//! the AI scientist poet. It has no dependencies on infrastructure or
//! presentation concerns.
//!
//! # Core Concepts
//!
//! ## Answer acquisition
//!
//! A [`Question`] is answered under a set of [`Settings`] by issuing one
//! [`GenerationRequest`] per attempt. Each attempt ends in a
//! [`GenerationOutcome`]; when no attempt succeeds, the [`LocalFallback`]
//! composes a deterministic poem so the user always receives an [`Answer`].
//!
//! ## Sessions
//!
//! A [`ChatSession`] carries the user's settings and the exchange history
//! explicitly, so nothing about a conversation lives in global state.

pub mod answer;
pub mod config;
pub mod core;
pub mod prompt;
pub mod session;

// Re-export commonly used types
pub use answer::{
    local_fallback::LocalFallback,
    outcome::GenerationOutcome,
    paraphrase::{ParaphraseTemplate, Paraphraser, TemplateParaphraser},
    reply::{Answer, AnswerSource},
    request::GenerationRequest,
    settings::Settings,
};
pub use config::{
    output_format::OutputFormat,
    validation::{ConfigIssue, ConfigIssueCode, Severity},
};
pub use core::{error::DomainError, model::Model, question::Question};
pub use prompt::PersonaPrompt;
pub use session::{ChatSession, Exchange};
