//! Console output formatting for answers, history and settings

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use kelly_application::PipelineConfig;
use kelly_domain::{Answer, AnswerSource, ChatSession, ConfigIssue, Question, Settings, Severity};

/// Shown under every locally composed answer
pub const FALLBACK_NOTE: &str =
    "(Kelly note: the model returned no text; showing a local analytical fallback.)";

/// Formats answers as "Kelly:" blocks for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Render an answer block
    pub fn format_block(answer: &Answer) -> String {
        let mut output = String::new();

        output.push_str(&format!("{}\n", "Kelly:".magenta().bold()));
        output.push_str(answer.text().trim_end());
        output.push('\n');

        if answer.is_local() {
            output.push_str(&format!("\n{}\n", FALLBACK_NOTE.italic().dimmed()));
        }

        output.push_str(&format!("{}\n", Self::source_line(answer.source()).dimmed()));
        output
    }

    /// Render an answer as a single JSON document
    pub fn format_json(question: &Question, answer: &Answer) -> String {
        let mut value = serde_json::json!({
            "question": question.content(),
            "answer": answer,
        });
        if answer.is_local() {
            value["note"] = serde_json::Value::from(FALLBACK_NOTE);
        }
        serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
    }

    /// Render the session history, oldest first
    pub fn format_history(session: &ChatSession) -> String {
        if session.is_empty() {
            return format!("{}\n", "No questions asked yet.".dimmed());
        }

        let mut output = String::new();
        for (i, exchange) in session.history().iter().enumerate() {
            output.push_str(&format!(
                "{} {}\n",
                format!("[{}]", i + 1).cyan().bold(),
                exchange.question.bold()
            ));
            for line in exchange.answer.lines() {
                output.push_str(&format!("    {}\n", line));
            }
            output.push_str(&format!(
                "    {}\n",
                Self::source_line(&exchange.source).dimmed()
            ));
        }
        output
    }

    /// Render the active settings and retry policy
    pub fn format_settings(settings: &Settings, pipeline: &PipelineConfig) -> String {
        let fallbacks = if pipeline.fallback_models.is_empty() {
            "(none)".to_string()
        } else {
            pipeline
                .fallback_models
                .iter()
                .map(|m| m.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        };
        let timeout = pipeline
            .call_timeout
            .map(|t| format!("{}s", t.as_secs()))
            .unwrap_or_else(|| "none".to_string());

        format!(
            "{}\n  {:<14} {}\n  {:<14} {}\n  {:<14} {}\n  {:<14} {}\n  {:<14} {}/{}/{} ms\n",
            "Settings".cyan().bold(),
            "model:",
            settings.model(),
            "max attempts:",
            settings.max_attempts(),
            "fallbacks:",
            fallbacks,
            "timeout:",
            timeout,
            "backoff:",
            pipeline.refusal_backoff.as_millis(),
            pipeline.empty_backoff.as_millis(),
            pipeline.transport_backoff.as_millis(),
        )
    }

    /// Render one configuration issue for stderr
    pub fn format_config_issue(issue: &ConfigIssue) -> String {
        match issue.severity {
            Severity::Error => format!("{} {}", "error:".red().bold(), issue.message),
            Severity::Warning => format!("{} {}", "warning:".yellow().bold(), issue.message),
        }
    }

    fn source_line(source: &AnswerSource) -> String {
        match source {
            AnswerSource::Remote { model, attempts } => {
                format!("({} · attempt {})", model, attempts)
            }
            AnswerSource::Local { attempts } => {
                format!("(local fallback after {} attempt(s))", attempts)
            }
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_answer(&self, _question: &Question, answer: &Answer) -> String {
        ConsoleFormatter::format_block(answer)
    }
}

/// Formats answers as pretty-printed JSON
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format_answer(&self, question: &Question, answer: &Answer) -> String {
        ConsoleFormatter::format_json(question, answer)
    }
}
