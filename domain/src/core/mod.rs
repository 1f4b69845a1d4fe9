//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`] — Gemini model identifiers Kelly can be asked through
//! - [`question::Question`] — a validated, non-empty user question
//! - [`error::DomainError`] — domain-level errors

pub mod error;
pub mod model;
pub mod question;
pub mod string;
