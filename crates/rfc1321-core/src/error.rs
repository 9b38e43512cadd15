//! Error types for rfc1321 core.

use thiserror::Error;

/// Core errors that can occur while building, parsing, or computing digests.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A caller-supplied value is out of range, e.g. a byte buffer that is
    /// not exactly 16 bytes long.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Text did not normalize into a 32-digit hex digest.
    #[error("wrong md5 hash format: {0}")]
    Format(#[from] ParseError),

    /// I/O error from the underlying byte source, propagated verbatim.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The computation was cancelled between two chunks.
    #[error("digest computation cancelled")]
    Cancelled,
}

/// Reasons a candidate string is rejected by the digest parser.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("input is empty")]
    Empty,

    #[error("expected {expected} hex digits, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("invalid hex character {character:?} at position {position}")]
    InvalidCharacter { character: char, position: usize },
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
