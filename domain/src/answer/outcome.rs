//! Result of a single generation attempt

/// What one remote call produced
///
/// Refusals and transport errors are both retryable; they are kept apart so
/// diagnostics can tell a policy block from a network failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// The model returned usable text
    Success(String),
    /// The model declined or returned nothing; carries the reason code
    Refused(String),
    /// The call itself failed (network, status, timeout, malformed body)
    TransportError(String),
}

impl GenerationOutcome {
    /// Reason code used when a reply carried no text and no explicit reason
    pub const NO_TEXT: &'static str = "NO_TEXT";

    /// Finish reasons meaning the model withheld text on policy grounds
    pub const SAFETY_CODES: [&'static str; 5] = [
        "SAFETY",
        "BLOCKLIST",
        "PROHIBITED_CONTENT",
        "SPII",
        "IMAGE_SAFETY",
    ];

    /// Prefix of the code for a prompt rejected before any candidate
    pub const PROMPT_BLOCK_PREFIX: &'static str = "PROMPT_";

    /// Refusal of the prompt itself, tagged with the upstream block reason
    pub fn prompt_blocked(reason: &str) -> Self {
        GenerationOutcome::Refused(format!("{}{}", Self::PROMPT_BLOCK_PREFIX, reason))
    }

    /// Short label for logs and transcripts
    pub fn label(&self) -> &'static str {
        match self {
            GenerationOutcome::Success(_) => "success",
            GenerationOutcome::Refused(_) => "refused",
            GenerationOutcome::TransportError(_) => "transport_error",
        }
    }

    /// Reason code or error detail for a failed attempt
    pub fn detail(&self) -> Option<&str> {
        match self {
            GenerationOutcome::Success(_) => None,
            GenerationOutcome::Refused(reason) => Some(reason),
            GenerationOutcome::TransportError(detail) => Some(detail),
        }
    }

    /// True for a refusal on safety or policy grounds
    pub fn is_policy_block(&self) -> bool {
        matches!(
            self,
            GenerationOutcome::Refused(code)
                if Self::SAFETY_CODES.contains(&code.as_str())
                    || code.starts_with(Self::PROMPT_BLOCK_PREFIX)
        )
    }

    /// True for a reply that simply carried no text (`STOP`, `MAX_TOKENS`, ...)
    pub fn is_empty_reply(&self) -> bool {
        matches!(self, GenerationOutcome::Refused(_)) && !self.is_policy_block()
    }
}
