//! Output format value object

use serde::{Deserialize, Serialize};

/// How answers are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// The poem under a "Kelly:" header (default)
    #[default]
    Text,
    /// JSON object with text and provenance
    Json,
}
