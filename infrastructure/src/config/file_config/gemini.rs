//! Gemini API settings from TOML (`[gemini]` section)

use serde::{Deserialize, Serialize};

/// Raw Gemini configuration from TOML
///
/// The API key is normally read from the environment variable named by
/// `api_key_env`; `api_key` overrides it when set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGeminiConfig {
    /// Environment variable holding the API key
    pub api_key_env: String,
    /// Inline API key (takes precedence over `api_key_env`)
    pub api_key: Option<String>,
    /// API root, without the version segment
    pub base_url: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
    pub top_p: f32,
    /// Harm categories sent with threshold `BLOCK_NONE`
    pub relaxed_categories: Vec<String>,
}

impl Default for FileGeminiConfig {
    fn default() -> Self {
        Self {
            api_key_env: "GEMINI_API_KEY".to_string(),
            api_key: None,
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            temperature: 0.45,
            max_output_tokens: 400,
            top_p: 0.9,
            relaxed_categories: vec![
                "HARM_CATEGORY_DANGEROUS_CONTENT".to_string(),
                "HARM_CATEGORY_HATE_SPEECH".to_string(),
            ],
        }
    }
}
