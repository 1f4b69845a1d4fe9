//! Logging infrastructure: structured answer transcripts.
//!
//! Provides [`JsonlConversationLogger`], a JSONL file writer that implements
//! the [`ConversationLogger`](kelly_application::ConversationLogger) port.

mod jsonl_logger;

pub use jsonl_logger::JsonlConversationLogger;
