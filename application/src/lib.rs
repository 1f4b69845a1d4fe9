//! Application layer for kelly
//!
//! This crate contains the answer pipeline, port definitions, and
//! application configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::PipelineConfig;
pub use ports::{
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    llm_gateway::{GatewayError, LlmGateway},
    progress::{AnswerProgressNotifier, NoProgress},
};
pub use use_cases::answer_pipeline::AnswerPipeline;
