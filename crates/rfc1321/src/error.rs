//! Error types for the hasher service.

use std::path::PathBuf;

use rfc1321_core::CoreError;
use thiserror::Error;

/// Errors that can occur during hasher operations.
#[derive(Debug, Error)]
pub enum HasherError {
    /// Error from the digest engine or an input adapter.
    #[error("{0}")]
    Core(#[from] CoreError),

    /// The configuration cannot be used.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A file could not be opened.
    #[error("failed to open {}: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl HasherError {
    /// True if the computation stopped because its token was cancelled.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, HasherError::Core(CoreError::Cancelled))
    }
}

/// Result type for hasher operations.
pub type Result<T> = std::result::Result<T, HasherError>;
