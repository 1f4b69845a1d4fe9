//! Answer pipeline use case.
//!
//! Turns a question into an answer while hiding the remote model's
//! instability behind a bounded retry policy:
//!
//! 1. Attempt `i` sends paraphrase variant `i mod variants` to model
//!    `order[i mod order.len()]`, where `order` is the selected model
//!    followed by the configured fallbacks
//! 2. `Success` ends the pipeline immediately
//! 3. `Refused` and `TransportError` are retried identically until the
//!    attempt budget from [`Settings`] is spent
//! 4. When every attempt failed, [`LocalFallback`] composes the answer
//!
//! The pipeline never returns an error: every path ends in a displayable
//! [`Answer`].

use crate::config::PipelineConfig;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::llm_gateway::LlmGateway;
use crate::ports::progress::{AnswerProgressNotifier, NoProgress};
use kelly_domain::core::string::truncate;
use kelly_domain::{
    Answer, GenerationOutcome, GenerationRequest, LocalFallback, Model, Paraphraser, Question,
    Settings, TemplateParaphraser,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Use case producing an answer for one question.
///
/// Holds no per-request state; the attempt counter lives on the stack of
/// each [`answer`](Self::answer) call, so one pipeline can serve any
/// number of independent sessions.
#[derive(Clone)]
pub struct AnswerPipeline {
    gateway: Arc<dyn LlmGateway>,
    paraphraser: Arc<dyn Paraphraser>,
    config: PipelineConfig,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl AnswerPipeline {
    pub fn new(gateway: Arc<dyn LlmGateway>, config: PipelineConfig) -> Self {
        Self {
            gateway,
            paraphraser: Arc::new(TemplateParaphraser::default()),
            config,
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    /// Replace the paraphrase strategy.
    pub fn with_paraphraser(mut self, paraphraser: Arc<dyn Paraphraser>) -> Self {
        self.paraphraser = paraphraser;
        self
    }

    /// Create with a conversation logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Answer a question with default (no-op) progress
    pub async fn answer(&self, question: &Question, settings: &Settings) -> Answer {
        self.answer_with_progress(question, settings, &NoProgress)
            .await
    }

    /// Answer a question with progress callbacks
    pub async fn answer_with_progress(
        &self,
        question: &Question,
        settings: &Settings,
        progress: &dyn AnswerProgressNotifier,
    ) -> Answer {
        let order = self.config.model_order(settings.model());
        let max_attempts = settings.max_attempts();

        info!(
            "Answering '{}' with up to {} attempts across {} model(s)",
            truncate(question.content(), 80),
            max_attempts,
            order.len()
        );

        let mut attempts = 0;
        while attempts < max_attempts {
            let request = self.build_request(question, &order, attempts);
            progress.on_attempt_start(&request, max_attempts);

            let outcome = self.dispatch(&request).await;
            attempts += 1;
            self.log_attempt(&request, &outcome);

            match outcome {
                GenerationOutcome::Success(text) => {
                    info!(
                        "Answer from {} on attempt {}/{}",
                        request.model(),
                        attempts,
                        max_attempts
                    );
                    let answer = Answer::remote(text, request.model().clone(), attempts);
                    return self.finish(answer, progress);
                }
                failure => {
                    match &failure {
                        GenerationOutcome::TransportError(detail) => warn!(
                            "Attempt {}/{} with {} failed: {}",
                            attempts,
                            max_attempts,
                            request.model(),
                            detail
                        ),
                        _ => info!(
                            "Attempt {}/{} with {} refused: {}",
                            attempts,
                            max_attempts,
                            request.model(),
                            failure.detail().unwrap_or_default()
                        ),
                    }
                    progress.on_attempt_failed(&request, &failure);

                    if attempts < max_attempts {
                        let delay = self.config.backoff_for(&failure);
                        if !delay.is_zero() {
                            debug!("Backing off {:?} before next attempt", delay);
                            tokio::time::sleep(delay).await;
                        }
                    }
                }
            }
        }

        warn!(
            "All {} attempts failed; composing local fallback",
            attempts
        );
        let answer = Answer::local(LocalFallback::compose(question), attempts);
        self.finish(answer, progress)
    }

    /// Build the request for attempt number `attempt` (0-based)
    fn build_request(&self, question: &Question, order: &[Model], attempt: u32) -> GenerationRequest {
        let index = attempt as usize;
        let model = order[index % order.len()].clone();
        let paraphrase = self.paraphraser.paraphrase(question, index);
        GenerationRequest::new(question.clone(), model, attempt, Some(paraphrase))
    }

    /// Issue one call, bounded by the configured timeout.
    ///
    /// A `Success` carrying only whitespace is treated as an empty reply so
    /// the caller never receives blank text.
    async fn dispatch(&self, request: &GenerationRequest) -> GenerationOutcome {
        debug!(
            "Attempt {} -> {}: {}",
            request.attempt() + 1,
            request.model(),
            truncate(request.prompt_text(), 120)
        );

        let outcome = match self.config.call_timeout {
            Some(limit) => {
                match tokio::time::timeout(limit, self.gateway.generate(request)).await {
                    Ok(outcome) => outcome,
                    Err(_) => GenerationOutcome::TransportError(format!(
                        "timed out after {:?}",
                        limit
                    )),
                }
            }
            None => self.gateway.generate(request).await,
        };

        match outcome {
            GenerationOutcome::Success(text) if text.trim().is_empty() => {
                GenerationOutcome::Refused(GenerationOutcome::NO_TEXT.to_string())
            }
            other => other,
        }
    }

    fn finish(&self, answer: Answer, progress: &dyn AnswerProgressNotifier) -> Answer {
        progress.on_answered(&answer);

        self.conversation_logger.log(ConversationEvent::new(
            "answer_completed",
            serde_json::json!({
                "local": answer.is_local(),
                "attempts": answer.attempts(),
                "bytes": answer.text().len(),
                "text": answer.text(),
            }),
        ));

        answer
    }

    fn log_attempt(&self, request: &GenerationRequest, outcome: &GenerationOutcome) {
        self.conversation_logger.log(ConversationEvent::new(
            "answer_attempt",
            serde_json::json!({
                "attempt": request.attempt() + 1,
                "model": request.model().to_string(),
                "prompt": request.prompt_text(),
                "outcome": outcome.label(),
                "detail": outcome.detail(),
            }),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use kelly_domain::{AnswerSource, ParaphraseTemplate};
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::time::Duration;

    // ==================== Test Mocks ====================

    /// Gateway replaying scripted outcomes and recording every request.
    /// Once the script runs out, the last outcome repeats.
    struct ScriptedGateway {
        script: Mutex<VecDeque<GenerationOutcome>>,
        last: Mutex<Option<GenerationOutcome>>,
        requests: Mutex<Vec<GenerationRequest>>,
    }

    impl ScriptedGateway {
        fn new(outcomes: Vec<GenerationOutcome>) -> Arc<Self> {
            Arc::new(Self {
                script: Mutex::new(VecDeque::from(outcomes)),
                last: Mutex::new(None),
                requests: Mutex::new(Vec::new()),
            })
        }

        fn always(outcome: GenerationOutcome) -> Arc<Self> {
            Self::new(vec![outcome])
        }

        fn calls(&self) -> usize {
            self.requests.lock().unwrap().len()
        }

        fn requests(&self) -> Vec<GenerationRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl LlmGateway for ScriptedGateway {
        async fn generate(&self, request: &GenerationRequest) -> GenerationOutcome {
            self.requests.lock().unwrap().push(request.clone());
            let next = self.script.lock().unwrap().pop_front();
            let mut last = self.last.lock().unwrap();
            if let Some(outcome) = next {
                *last = Some(outcome);
            }
            last.clone()
                .unwrap_or_else(|| GenerationOutcome::TransportError("empty script".into()))
        }
    }

    /// Gateway whose answer depends only on the model asked
    struct PerModelGateway {
        requests: Mutex<Vec<GenerationRequest>>,
    }

    #[async_trait]
    impl LlmGateway for PerModelGateway {
        async fn generate(&self, request: &GenerationRequest) -> GenerationOutcome {
            self.requests.lock().unwrap().push(request.clone());
            match request.model().as_str() {
                "B" => GenerationOutcome::Success("verse-1".to_string()),
                _ => GenerationOutcome::Refused("SAFETY".to_string()),
            }
        }
    }

    /// Gateway that never answers in time
    struct StalledGateway;

    #[async_trait]
    impl LlmGateway for StalledGateway {
        async fn generate(&self, _request: &GenerationRequest) -> GenerationOutcome {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            GenerationOutcome::Success("too late".to_string())
        }
    }

    #[derive(Default)]
    struct RecordingLogger {
        events: Mutex<Vec<(&'static str, serde_json::Value)>>,
    }

    impl ConversationLogger for RecordingLogger {
        fn log(&self, event: ConversationEvent) {
            self.events
                .lock()
                .unwrap()
                .push((event.event_type, event.payload));
        }
    }

    #[derive(Default)]
    struct RecordingProgress {
        started: Mutex<u32>,
        failed: Mutex<Vec<&'static str>>,
        answered: Mutex<Option<Answer>>,
    }

    impl AnswerProgressNotifier for RecordingProgress {
        fn on_attempt_start(&self, _request: &GenerationRequest, _max_attempts: u32) {
            *self.started.lock().unwrap() += 1;
        }

        fn on_attempt_failed(&self, _request: &GenerationRequest, outcome: &GenerationOutcome) {
            self.failed.lock().unwrap().push(outcome.label());
        }

        fn on_answered(&self, answer: &Answer) {
            *self.answered.lock().unwrap() = Some(answer.clone());
        }
    }

    // ==================== Helpers ====================

    fn model(name: &str) -> Model {
        Model::Custom(name.to_string())
    }

    fn settings(name: &str, max_attempts: u32) -> Settings {
        Settings::new(model(name), max_attempts).unwrap()
    }

    fn pipeline(gateway: Arc<dyn LlmGateway>, fallbacks: Vec<Model>) -> AnswerPipeline {
        AnswerPipeline::new(
            gateway,
            PipelineConfig::default()
                .with_fallback_models(fallbacks)
                .without_backoff(),
        )
    }

    fn refused() -> GenerationOutcome {
        GenerationOutcome::Refused("SAFETY".to_string())
    }

    fn transport() -> GenerationOutcome {
        GenerationOutcome::TransportError("HTTP 503: unavailable".to_string())
    }

    fn question() -> Question {
        Question::new("Explain the pipeline of a GAN")
    }

    // ==================== Tests ====================

    #[tokio::test]
    async fn test_first_success_returns_verbatim_with_one_call() {
        let gateway = ScriptedGateway::always(GenerationOutcome::Success(
            "  A generator learns to fool\n".to_string(),
        ));
        let pipeline = pipeline(gateway.clone(), vec![model("B")]);

        let answer = pipeline.answer(&question(), &settings("A", 3)).await;

        assert_eq!(answer.text(), "  A generator learns to fool\n");
        assert_eq!(gateway.calls(), 1);
        assert_eq!(
            answer.source(),
            &AnswerSource::Remote {
                model: model("A"),
                attempts: 1
            }
        );
    }

    #[tokio::test]
    async fn test_always_refused_uses_every_attempt_then_local_fallback() {
        let gateway = ScriptedGateway::always(refused());
        let pipeline = pipeline(gateway.clone(), vec![model("B")]);

        let answer = pipeline.answer(&question(), &settings("A", 4)).await;

        assert_eq!(gateway.calls(), 4);
        assert!(answer.is_local());
        assert_eq!(answer.attempts(), 4);
        assert_eq!(answer.text(), LocalFallback::compose(&question()));
    }

    #[tokio::test]
    async fn test_each_retry_differs_from_previous_request() {
        let gateway = ScriptedGateway::always(refused());
        let pipeline = pipeline(gateway.clone(), vec![model("B")]);

        pipeline.answer(&question(), &settings("A", 6)).await;

        let requests = gateway.requests();
        assert_eq!(requests.len(), 6);
        assert_eq!(requests[0].prompt_text(), question().content());
        for pair in requests.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            assert_ne!(
                (prev.model(), prev.prompt_text()),
                (next.model(), next.prompt_text())
            );
            assert!(prev.model() != next.model() && prev.prompt_text() != next.prompt_text());
        }
    }

    #[tokio::test]
    async fn test_alternating_failures_behave_like_refusals() {
        let refusing = ScriptedGateway::always(refused());
        let alternating = ScriptedGateway::new(vec![
            transport(),
            refused(),
            transport(),
            refused(),
            transport(),
        ]);

        let first = pipeline(refusing.clone(), vec![model("B")])
            .answer(&question(), &settings("A", 5))
            .await;
        let second = pipeline(alternating.clone(), vec![model("B")])
            .answer(&question(), &settings("A", 5))
            .await;

        assert_eq!(refusing.calls(), 5);
        assert_eq!(alternating.calls(), 5);
        assert_eq!(first, second);
        assert!(second.is_local());
    }

    #[tokio::test]
    async fn test_fallback_model_answers_on_second_attempt() {
        let gateway = Arc::new(PerModelGateway {
            requests: Mutex::new(Vec::new()),
        });
        let pipeline = pipeline(gateway.clone(), vec![model("B")]);

        let answer = pipeline.answer(&question(), &settings("A", 3)).await;

        let requests = gateway.requests.lock().unwrap().clone();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].model(), &model("A"));
        assert_eq!(requests[1].model(), &model("B"));
        assert_eq!(answer.text(), "verse-1");
        assert_eq!(
            answer.source(),
            &AnswerSource::Remote {
                model: model("B"),
                attempts: 2
            }
        );
    }

    #[tokio::test]
    async fn test_single_attempt_refusal_goes_straight_to_fallback() {
        let gateway = ScriptedGateway::always(refused());
        let pipeline = pipeline(gateway.clone(), vec![model("B")]);

        let answer = pipeline.answer(&question(), &settings("A", 1)).await;

        assert_eq!(gateway.calls(), 1);
        assert!(answer.is_local());
        assert_eq!(answer.text(), LocalFallback::compose(&question()));
    }

    #[tokio::test]
    async fn test_repeated_invocations_are_independent() {
        let gateway = ScriptedGateway::always(GenerationOutcome::Success("X".to_string()));
        let pipeline = pipeline(gateway.clone(), vec![]);
        let settings = settings("A", 3);

        let first = pipeline.answer(&question(), &settings).await;
        assert_eq!(first.text(), "X");
        assert_eq!(gateway.calls(), 1);

        let second = pipeline.answer(&question(), &settings).await;
        assert_eq!(second.text(), "X");
        assert_eq!(gateway.calls(), 2);
    }

    #[tokio::test]
    async fn test_never_more_calls_than_attempts() {
        for max_attempts in 1..=Settings::MAX_ATTEMPTS_LIMIT {
            let gateway = ScriptedGateway::always(transport());
            let answer = pipeline(gateway.clone(), vec![model("B"), model("C")])
                .answer(&question(), &settings("A", max_attempts))
                .await;
            assert_eq!(gateway.calls(), max_attempts as usize);
            assert!(!answer.text().is_empty());
        }
    }

    #[tokio::test]
    async fn test_blank_success_is_treated_as_empty_reply() {
        let gateway = ScriptedGateway::new(vec![
            GenerationOutcome::Success("   \n".to_string()),
            GenerationOutcome::Success("verse".to_string()),
        ]);
        let progress = RecordingProgress::default();

        let answer = pipeline(gateway.clone(), vec![])
            .answer_with_progress(&question(), &settings("A", 3), &progress)
            .await;

        assert_eq!(answer.text(), "verse");
        assert_eq!(gateway.calls(), 2);
        assert_eq!(*progress.failed.lock().unwrap(), vec!["refused"]);
    }

    #[tokio::test]
    async fn test_single_model_retries_vary_by_paraphrase() {
        let gateway = ScriptedGateway::always(refused());
        pipeline(gateway.clone(), vec![])
            .answer(&question(), &settings("A", 3))
            .await;

        let requests = gateway.requests();
        assert!(requests.iter().all(|r| r.model() == &model("A")));
        assert!(requests[0].paraphrase().is_none());
        assert!(requests[1].prompt_text().ends_with("include practical suggestions."));
        assert!(requests[2].prompt_text().starts_with("In scientific terms"));
    }

    #[tokio::test]
    async fn test_injected_paraphraser_is_used() {
        let gateway = ScriptedGateway::always(refused());
        let paraphraser = TemplateParaphraser::new(vec![
            ParaphraseTemplate::Verbatim,
            ParaphraseTemplate::Prefix("stub: ".to_string()),
        ]);
        pipeline(gateway.clone(), vec![])
            .with_paraphraser(Arc::new(paraphraser))
            .answer(&question(), &settings("A", 3))
            .await;

        let prompts: Vec<String> = gateway
            .requests()
            .iter()
            .map(|r| r.prompt_text().to_string())
            .collect();
        assert_eq!(
            prompts,
            vec![
                "Explain the pipeline of a GAN".to_string(),
                "stub: Explain the pipeline of a GAN".to_string(),
                "Explain the pipeline of a GAN".to_string(),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_counts_as_transport_error() {
        let pipeline = AnswerPipeline::new(
            Arc::new(StalledGateway),
            PipelineConfig::default()
                .with_call_timeout(Some(Duration::from_secs(1)))
                .without_backoff(),
        );
        let progress = RecordingProgress::default();

        let answer = pipeline
            .answer_with_progress(&question(), &settings("A", 2), &progress)
            .await;

        assert!(answer.is_local());
        assert_eq!(
            *progress.failed.lock().unwrap(),
            vec!["transport_error", "transport_error"]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_backoff_between_attempts_but_not_after_last() {
        let gateway = ScriptedGateway::always(refused());
        let pipeline = AnswerPipeline::new(
            gateway.clone(),
            PipelineConfig::default()
                .with_fallback_models(vec![])
                .with_refusal_backoff(Duration::from_millis(600)),
        );

        let start = tokio::time::Instant::now();
        pipeline.answer(&question(), &settings("A", 2)).await;
        let elapsed = start.elapsed();

        assert_eq!(gateway.calls(), 2);
        assert!(elapsed >= Duration::from_millis(600));
        assert!(elapsed < Duration::from_millis(1200));
    }

    #[tokio::test]
    async fn test_progress_and_transcript_events() {
        let gateway = ScriptedGateway::new(vec![
            transport(),
            GenerationOutcome::Success("verse".to_string()),
        ]);
        let logger = Arc::new(RecordingLogger::default());
        let progress = RecordingProgress::default();

        pipeline(gateway, vec![model("B")])
            .with_conversation_logger(logger.clone())
            .answer_with_progress(&question(), &settings("A", 3), &progress)
            .await;

        assert_eq!(*progress.started.lock().unwrap(), 2);
        assert_eq!(*progress.failed.lock().unwrap(), vec!["transport_error"]);
        assert_eq!(
            progress.answered.lock().unwrap().as_ref().map(|a| a.text().to_string()),
            Some("verse".to_string())
        );

        let events = logger.events.lock().unwrap();
        let types: Vec<&str> = events.iter().map(|(t, _)| *t).collect();
        assert_eq!(
            types,
            vec!["answer_attempt", "answer_attempt", "answer_completed"]
        );
        assert_eq!(events[0].1["outcome"], "transport_error");
        assert_eq!(events[0].1["detail"], "HTTP 503: unavailable");
        assert_eq!(events[1].1["model"], "B");
        assert_eq!(events[2].1["local"], false);
        assert_eq!(events[2].1["attempts"], 2);
    }
}
