//! Infrastructure layer for kelly
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod gemini;
pub mod logging;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileAnswerConfig, FileConfig, FileGeminiConfig,
    FileLoggingConfig, FileModelsConfig, FileOutputConfig, FileOutputFormat, FileReplConfig,
};
pub use gemini::GeminiGateway;
pub use logging::JsonlConversationLogger;
