//! Output formatter trait

use kelly_domain::{Answer, OutputFormat, Question};

/// Trait for rendering an answer to the terminal
pub trait OutputFormatter: Send + Sync {
    /// Render one answer to the question that produced it
    fn format_answer(&self, question: &Question, answer: &Answer) -> String;
}

/// Pick the formatter for the configured output format
pub fn formatter_for(format: OutputFormat) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Text => Box::new(super::console::ConsoleFormatter),
        OutputFormat::Json => Box::new(super::console::JsonFormatter),
    }
}
