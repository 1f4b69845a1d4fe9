//! Progress display for answer attempts

pub mod reporter;
