//! Interactive chat module
//!
//! Provides a readline-based interactive chat interface for Kelly.

mod repl;

pub use repl::{ChatRepl, CommandResult, ProgressMode, ReplCommand};
