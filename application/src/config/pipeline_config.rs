//! Pipeline parameters — retry sequencing control.
//!
//! [`PipelineConfig`] groups the static parameters that shape how the
//! [`AnswerPipeline`](crate::AnswerPipeline) moves from one attempt to the
//! next. The attempt budget itself is per-request and lives in
//! [`Settings`](kelly_domain::Settings).

use kelly_domain::{GenerationOutcome, Model};
use std::time::Duration;

/// Retry sequencing parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Models tried after the selected one, in priority order.
    pub fallback_models: Vec<Model>,
    /// Upper bound on a single remote call. `None` waits indefinitely.
    pub call_timeout: Option<Duration>,
    /// Pause after the model blocked an answer.
    pub refusal_backoff: Duration,
    /// Pause after the model replied without text.
    pub empty_backoff: Duration,
    /// Pause after a network or API failure.
    pub transport_backoff: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            fallback_models: Model::default_fallbacks(),
            call_timeout: Some(Duration::from_secs(30)),
            refusal_backoff: Duration::from_millis(600),
            empty_backoff: Duration::from_millis(400),
            transport_backoff: Duration::from_millis(600),
        }
    }
}

impl PipelineConfig {
    // ==================== Builder Methods ====================

    pub fn with_fallback_models(mut self, models: Vec<Model>) -> Self {
        self.fallback_models = models;
        self
    }

    pub fn with_call_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.call_timeout = timeout;
        self
    }

    pub fn with_refusal_backoff(mut self, backoff: Duration) -> Self {
        self.refusal_backoff = backoff;
        self
    }

    pub fn with_empty_backoff(mut self, backoff: Duration) -> Self {
        self.empty_backoff = backoff;
        self
    }

    pub fn with_transport_backoff(mut self, backoff: Duration) -> Self {
        self.transport_backoff = backoff;
        self
    }

    /// Disable every pause between attempts
    pub fn without_backoff(self) -> Self {
        self.with_refusal_backoff(Duration::ZERO)
            .with_empty_backoff(Duration::ZERO)
            .with_transport_backoff(Duration::ZERO)
    }

    // ==================== Sequencing ====================

    /// Full model ordering for a request: the selected model first, then the
    /// fallbacks in declared order with repeats removed.
    pub fn model_order(&self, selected: &Model) -> Vec<Model> {
        let mut order = vec![selected.clone()];
        for model in &self.fallback_models {
            if !order.contains(model) {
                order.push(model.clone());
            }
        }
        order
    }

    /// Pause to take after a failed attempt
    pub fn backoff_for(&self, outcome: &GenerationOutcome) -> Duration {
        match outcome {
            GenerationOutcome::Success(_) => Duration::ZERO,
            GenerationOutcome::Refused(_) if outcome.is_empty_reply() => self.empty_backoff,
            GenerationOutcome::Refused(_) => self.refusal_backoff,
            GenerationOutcome::TransportError(_) => self.transport_backoff,
        }
    }
}
