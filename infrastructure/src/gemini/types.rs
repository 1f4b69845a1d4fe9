//! Wire types for the Gemini `generateContent` REST endpoint.
//!
//! Only the fields this client reads or writes are modelled; everything
//! else in the response is ignored by serde.

use kelly_domain::GenerationOutcome;
use serde::{Deserialize, Serialize};

// ─── Request ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub safety_settings: Vec<SafetySetting>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Some("user".to_string()),
            parts: vec![Part::text(text)],
        }
    }

    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: None,
            parts: vec![Part::text(text)],
        }
    }
}

/// A content part. Non-text parts (inline data, function calls) deserialize
/// with `text: None`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
    pub max_output_tokens: u32,
    pub top_p: f32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SafetySetting {
    pub category: String,
    pub threshold: String,
}

impl SafetySetting {
    pub fn relaxed(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            threshold: "BLOCK_NONE".to_string(),
        }
    }
}

// ─── Response ────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    #[serde(default)]
    pub block_reason: Option<String>,
}

impl GenerateContentResponse {
    /// Every non-blank text part of every candidate, trimmed, one per line.
    pub fn text(&self) -> String {
        self.candidates
            .iter()
            .filter_map(|c| c.content.as_ref())
            .flat_map(|content| content.parts.iter())
            .filter_map(|part| part.text.as_deref())
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Why no text came back: the first candidate's finish reason, then a
    /// prompt block, then `NO_TEXT`.
    pub fn refusal(&self) -> GenerationOutcome {
        if let Some(reason) = self.candidates.first().and_then(|c| c.finish_reason.as_deref()) {
            return GenerationOutcome::Refused(reason.to_string());
        }
        match self
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.as_deref())
        {
            Some(reason) => GenerationOutcome::prompt_blocked(reason),
            None => GenerationOutcome::Refused(GenerationOutcome::NO_TEXT.to_string()),
        }
    }

    pub fn into_outcome(self) -> GenerationOutcome {
        let text = self.text();
        if text.is_empty() {
            self.refusal()
        } else {
            GenerationOutcome::Success(text)
        }
    }
}

/// Error envelope returned with non-2xx statuses
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: Option<String>,
}
