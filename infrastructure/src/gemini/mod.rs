//! Gemini REST adapter
//!
//! [`GeminiGateway`] implements the [`LlmGateway`](kelly_application::LlmGateway)
//! port over `POST /v1beta/{model}:generateContent` using `reqwest`.
//! Response classification lives in [`types`].

pub mod gateway;
pub mod types;

pub use gateway::GeminiGateway;
