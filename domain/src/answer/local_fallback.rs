//! Deterministic poem composed without any remote call

use crate::core::question::Question;

/// Phrases stripped from the question when deriving the topic
const TOPIC_NOISE: [&str; 3] = ["pipeline of", "Explain", "explain"];

const DEFAULT_TOPIC: &str = "this topic";

/// Questions with at most this many words get the short poem
const SHORT_QUESTION_WORDS: usize = 3;

const SHORT_POEM_LINES: usize = 4;

/// Composes Kelly's local analytical poem
///
/// Output depends only on the question text, so the same question always
/// yields the same poem.
pub struct LocalFallback;

impl LocalFallback {
    /// Derive the short topic phrase used in the opening line
    pub fn topic(question: &Question) -> String {
        let mut topic = question.content().to_string();
        for noise in TOPIC_NOISE {
            topic = topic.replace(noise, "");
        }
        match topic.trim() {
            "" => DEFAULT_TOPIC.to_string(),
            trimmed => trimmed.to_string(),
        }
    }

    /// Compose the fallback poem
    pub fn compose(question: &Question) -> String {
        let topic = Self::topic(question);
        let mut lines = vec![
            format!("In careful lines I study {},", topic),
            "A generator dreams, a critic critiques;".to_string(),
            "Adversarial rhythm tunes model feats,".to_string(),
            "Yet metrics warn where shortcuts meet.".to_string(),
            "Practical: validate with held-out sets,".to_string(),
            "Audit samples, and record your bets.".to_string(),
        ];

        if question.word_count() <= SHORT_QUESTION_WORDS {
            lines.truncate(SHORT_POEM_LINES);
        }

        lines.join("\n")
    }
}
