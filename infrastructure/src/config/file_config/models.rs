//! Model selection from TOML (`[models]` section)

use kelly_domain::{ConfigIssue, ConfigIssueCode, Model};
use serde::{Deserialize, Serialize};

/// Model selection from TOML
///
/// # Example
///
/// ```toml
/// [models]
/// default = "gemini-2.5-pro"                 # Tried first
/// fallback = ["models/gemini-flash-latest"]  # Tried in order on later attempts
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileModelsConfig {
    /// Model used for the first attempt
    pub default: Option<String>,
    /// Models rotated in after the default one
    pub fallback: Option<Vec<String>>,
}

impl FileModelsConfig {
    /// Parse the default model, collecting issues for an empty name.
    pub fn parse_default(&self) -> (Option<Model>, Vec<ConfigIssue>) {
        match self.default.as_deref() {
            None => (None, Vec::new()),
            Some(raw) => match raw.parse::<Model>() {
                Ok(model) => (Some(model), Vec::new()),
                Err(_) => (
                    None,
                    vec![ConfigIssue::error(
                        ConfigIssueCode::EmptyModelName {
                            field: "default".to_string(),
                        },
                        "models.default: model name cannot be empty",
                    )],
                ),
            },
        }
    }

    /// Parse the fallback list.
    ///
    /// Falls back to [`Model::default_fallbacks`] when unset. Empty entries
    /// are errors; repeated entries are dropped with a warning.
    pub fn parse_fallback(&self) -> (Vec<Model>, Vec<ConfigIssue>) {
        let Some(values) = self.fallback.as_ref() else {
            return (Model::default_fallbacks(), Vec::new());
        };

        let mut issues = Vec::new();
        let mut models: Vec<Model> = Vec::new();
        for raw in values {
            match raw.parse::<Model>() {
                Ok(model) if models.contains(&model) => {
                    issues.push(ConfigIssue::warning(
                        ConfigIssueCode::DuplicateFallback {
                            model: model.to_string(),
                        },
                        format!("models.fallback: '{}' is listed twice, ignoring repeat", model),
                    ));
                }
                Ok(model) => models.push(model),
                Err(_) => issues.push(ConfigIssue::error(
                    ConfigIssueCode::EmptyModelName {
                        field: "fallback".to_string(),
                    },
                    "models.fallback: model name cannot be empty in list",
                )),
            }
        }
        (models, issues)
    }
}
