//! Answer acquisition value objects.
//!
//! - [`settings::Settings`] — model choice and attempt budget for one request
//! - [`request::GenerationRequest`] — one attempt against the remote model
//! - [`outcome::GenerationOutcome`] — what a single attempt produced
//! - [`paraphrase::Paraphraser`] — rewrites used on retries
//! - [`local_fallback::LocalFallback`] — the poem composed when every attempt fails
//! - [`reply::Answer`] — the text handed back to the caller, with its provenance

pub mod local_fallback;
pub mod outcome;
pub mod paraphrase;
pub mod reply;
pub mod request;
pub mod settings;
