//! Model value object representing a Gemini model identifier

use super::error::DomainError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Gemini models Kelly can be asked through (Value Object)
///
/// Identifiers keep the `models/` resource prefix the Gemini API expects.
/// Anything not in the known set is carried verbatim as [`Model::Custom`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Model {
    /// Least strict by default
    GeminiFlashLatest,
    GeminiPro25,
    GeminiFlash25,
    Custom(String),
}

impl Model {
    /// Get the string identifier for this model
    pub fn as_str(&self) -> &str {
        match self {
            Model::GeminiFlashLatest => "models/gemini-flash-latest",
            Model::GeminiPro25 => "models/gemini-2.5-pro",
            Model::GeminiFlash25 => "models/gemini-2.5-flash",
            Model::Custom(s) => s,
        }
    }

    /// Models offered to the user for selection
    pub fn selectable() -> Vec<Model> {
        vec![
            Model::GeminiFlashLatest,
            Model::GeminiPro25,
            Model::GeminiFlash25,
        ]
    }

    /// Default fallback ordering tried after the selected model
    pub fn default_fallbacks() -> Vec<Model> {
        vec![Model::GeminiFlashLatest]
    }

    /// The resource path used in API URLs (`models/<name>`)
    pub fn resource_path(&self) -> String {
        let id = self.as_str();
        if id.starts_with("models/") || id.starts_with("tunedModels/") {
            id.to_string()
        } else {
            format!("models/{}", id)
        }
    }
}

impl Default for Model {
    /// Returns the default model (gemini-flash-latest)
    fn default() -> Self {
        Model::GeminiFlashLatest
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Model {
    type Err = DomainError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        Ok(match s {
            "" => return Err(DomainError::InvalidModel("model name cannot be empty".into())),
            "models/gemini-flash-latest" | "gemini-flash-latest" => Model::GeminiFlashLatest,
            "models/gemini-2.5-pro" | "gemini-2.5-pro" => Model::GeminiPro25,
            "models/gemini-2.5-flash" | "gemini-2.5-flash" => Model::GeminiFlash25,
            other => Model::Custom(other.to_string()),
        })
    }
}

impl Serialize for Model {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Model {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_roundtrip() {
        for model in Model::selectable() {
            let parsed: Model = model.to_string().parse().unwrap();
            assert_eq!(model, parsed);
        }
    }

    #[test]
    fn test_short_names_resolve_to_known_models() {
        let model: Model = "gemini-2.5-pro".parse().unwrap();
        assert_eq!(model, Model::GeminiPro25);
        assert_eq!(model.as_str(), "models/gemini-2.5-pro");
    }

    #[test]
    fn test_custom_model() {
        let model: Model = "gemini-exp-1206".parse().unwrap();
        assert_eq!(model, Model::Custom("gemini-exp-1206".to_string()));
        assert_eq!(model.to_string(), "gemini-exp-1206");
        assert_eq!(model.resource_path(), "models/gemini-exp-1206");
    }

    #[test]
    fn test_empty_model_is_rejected() {
        assert!("".parse::<Model>().is_err());
        assert!("   ".parse::<Model>().is_err());
    }

    #[test]
    fn test_resource_path_keeps_prefix() {
        assert_eq!(
            Model::GeminiFlashLatest.resource_path(),
            "models/gemini-flash-latest"
        );
    }

    #[test]
    fn test_deserialize_rejects_empty() {
        let result: Result<Model, _> = serde_json::from_str("\"\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_model_default() {
        assert_eq!(Model::default(), Model::GeminiFlashLatest);
    }
}
