//! Progress reporting while an answer is acquired

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use kelly_application::ports::progress::AnswerProgressNotifier;
use kelly_domain::{Answer, GenerationOutcome, GenerationRequest};
use std::sync::Mutex;
use std::time::Duration;

/// Spinner that follows the attempts of one question
pub struct ProgressReporter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.magenta} {prefix:.bold} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn attempt_label(request: &GenerationRequest, max_attempts: u32) -> String {
        format!("Attempt {}/{}", request.attempt() + 1, max_attempts)
    }

    fn failure_label(outcome: &GenerationOutcome) -> String {
        match outcome {
            GenerationOutcome::Refused(code) if outcome.is_empty_reply() => {
                format!("no text ({})", code)
            }
            GenerationOutcome::Refused(code) => format!("blocked ({})", code),
            GenerationOutcome::TransportError(detail) => format!("failed: {}", detail),
            GenerationOutcome::Success(_) => "ok".to_string(),
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl AnswerProgressNotifier for ProgressReporter {
    fn on_attempt_start(&self, request: &GenerationRequest, max_attempts: u32) {
        let Ok(mut slot) = self.spinner.lock() else {
            return;
        };
        let spinner = slot.get_or_insert_with(|| {
            let pb = ProgressBar::new_spinner();
            pb.set_style(Self::spinner_style());
            pb.enable_steady_tick(Duration::from_millis(100));
            pb
        });
        spinner.set_prefix(Self::attempt_label(request, max_attempts));
        spinner.set_message(format!("Asking {}...", request.model()));
    }

    fn on_attempt_failed(&self, request: &GenerationRequest, outcome: &GenerationOutcome) {
        if let Ok(slot) = self.spinner.lock()
            && let Some(spinner) = slot.as_ref()
        {
            spinner.println(format!(
                "  {} {} {}",
                "x".red(),
                request.model(),
                Self::failure_label(outcome).dimmed()
            ));
        }
    }

    fn on_answered(&self, _answer: &Answer) {
        if let Ok(mut slot) = self.spinner.lock()
            && let Some(spinner) = slot.take()
        {
            spinner.finish_and_clear();
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl AnswerProgressNotifier for SimpleProgress {
    fn on_attempt_start(&self, request: &GenerationRequest, max_attempts: u32) {
        eprintln!(
            "{} {} {}",
            "->".cyan(),
            ProgressReporter::attempt_label(request, max_attempts).bold(),
            request.model()
        );
    }

    fn on_attempt_failed(&self, request: &GenerationRequest, outcome: &GenerationOutcome) {
        eprintln!(
            "  {} {} {}",
            "x".red(),
            request.model(),
            ProgressReporter::failure_label(outcome)
        );
    }

    fn on_answered(&self, answer: &Answer) {
        if answer.is_local() {
            eprintln!("  {} composing locally", "~".yellow());
        }
    }
}
