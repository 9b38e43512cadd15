//! Hasher configuration.

use rfc1321_core::DEFAULT_CHUNK_SIZE;

use crate::error::{HasherError, Result};

/// Configuration for the [`Hasher`](crate::Hasher).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HasherConfig {
    /// Bytes read (or gathered from a sequence) per engine update.
    pub chunk_size: usize,
    /// Whether stream hashing puts the source position back afterwards.
    pub restore_position: bool,
    /// Whether batches of files are hashed on the rayon thread pool.
    pub parallel: bool,
}

impl Default for HasherConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            restore_position: true,
            parallel: true,
        }
    }
}

impl HasherConfig {
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn with_restore_position(mut self, restore_position: bool) -> Self {
        self.restore_position = restore_position;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Reject settings the adapters cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(HasherError::InvalidConfig(
                "chunk_size must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
