//! Output formatting
//!
//! [`ConsoleFormatter`](console::ConsoleFormatter) renders "Kelly:" blocks,
//! history and settings; [`JsonFormatter`](console::JsonFormatter) renders
//! machine-readable answers.

pub mod console;
pub mod formatter;
