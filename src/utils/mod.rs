//! Utility functions
//!
//! Pure helpers for display formatting and input sanitization, used by the
//! account cache and the CLI.

pub mod formatting;
pub mod sanitize;
