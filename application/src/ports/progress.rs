//! Progress notification port
//!
//! Defines the interface for reporting progress while an answer is acquired.

use kelly_domain::{Answer, GenerationOutcome, GenerationRequest};

/// Callback for progress updates during answer acquisition
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (spinner, plain lines, nothing).
pub trait AnswerProgressNotifier: Send + Sync {
    /// Called before each remote call
    fn on_attempt_start(&self, request: &GenerationRequest, max_attempts: u32);

    /// Called when an attempt did not produce an answer
    fn on_attempt_failed(&self, request: &GenerationRequest, outcome: &GenerationOutcome);

    /// Called once with the final answer, remote or local
    fn on_answered(&self, answer: &Answer);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl AnswerProgressNotifier for NoProgress {
    fn on_attempt_start(&self, _request: &GenerationRequest, _max_attempts: u32) {}
    fn on_attempt_failed(&self, _request: &GenerationRequest, _outcome: &GenerationOutcome) {}
    fn on_answered(&self, _answer: &Answer) {}
}
