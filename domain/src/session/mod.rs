//! Chat session domain.
//!
//! - [`entities::ChatSession`] — settings plus exchange history for one user
//! - [`entities::Exchange`] — a single question/answer pair

pub mod entities;

pub use entities::{ChatSession, Exchange};
