//! Error types for decoding and encoding automata.

use thiserror::Error;

/// Errors raised while reading or writing the JSON interchange format.
#[derive(Debug, Error)]
pub enum CodecError {
    /// A state label that is not `q` followed by a base-10 integer.
    #[error("malformed state label `{0}`, expected `q<integer>`")]
    InvalidStateLabel(String),

    /// A transition label that is neither a single character nor `ε`.
    #[error("malformed transition symbol `{0}`, expected one character or `ε`")]
    InvalidSymbol(String),

    /// Syntax errors, missing fields and type mismatches in the document.
    #[error("JSON error")]
    Json(#[from] serde_json::Error),

    #[error("I/O error")]
    Io(#[from] std::io::Error),
}

/// A specialized `Result` type for codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;
