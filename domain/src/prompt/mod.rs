//! Prompt domain
//!
//! The Kelly persona and the shape of the user turn sent to the model.

mod persona;

pub use persona::PersonaPrompt;
