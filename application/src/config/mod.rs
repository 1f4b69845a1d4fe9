//! Application-level configuration.
//!
//! - [`PipelineConfig`] — fallback ordering, per-call timeout and backoff
//!   between attempts for the [`AnswerPipeline`](crate::AnswerPipeline)

pub mod pipeline_config;

pub use pipeline_config::PipelineConfig;
