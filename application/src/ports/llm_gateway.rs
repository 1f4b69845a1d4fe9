//! LLM Gateway port
//!
//! Defines the interface to the remote text-generation capability.

use async_trait::async_trait;
use kelly_domain::{GenerationOutcome, GenerationRequest};
use thiserror::Error;

/// Errors that can occur while talking to an LLM provider
///
/// Adapters use these internally; at the port boundary every one of them
/// becomes a [`GenerationOutcome::TransportError`].
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Timeout")]
    Timeout,

    #[error("HTTP {status}: {message}")]
    HttpStatus { status: u16, message: String },

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("API key not found (set {0})")]
    MissingApiKey(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),
}

impl From<GatewayError> for GenerationOutcome {
    fn from(error: GatewayError) -> Self {
        GenerationOutcome::TransportError(error.to_string())
    }
}

/// Gateway for LLM communication
///
/// One call per attempt. Implementations never fail at the type level:
/// refusals and transport failures are both reported as outcomes so the
/// caller can apply a single retry policy to them.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Send one request and report what happened
    async fn generate(&self, request: &GenerationRequest) -> GenerationOutcome;
}
