//! Error types for the JSON boundary of the macro converter.
//!
//! Parsing a table literal never fails, and manifesting a [`Value`](crate::Value)
//! never fails either. Errors only arise when a tree crosses into or out of JSON.

use thiserror::Error;

/// Errors that can occur while converting between table literals and JSON.
#[derive(Error, Debug)]
pub enum MacroError {
    /// The input string was not valid JSON (manifest path).
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// A value has no representation on the other side of the JSON boundary,
    /// e.g. a table key that collides with the reserved name field.
    #[error("Conversion error: {0}")]
    Conversion(String),
}

/// Convenience alias used throughout fusion-macro.
pub type Result<T> = std::result::Result<T, MacroError>;
