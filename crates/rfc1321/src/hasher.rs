//! The Hasher: configured entry points over the core input adapters.
//!
//! A `Hasher` is cheap to share. Every call builds its own engine context,
//! so one hasher can serve many threads; batches of files are spread over
//! rayon's pool.

use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;

use rayon::prelude::*;
use rfc1321_core::{
    hash_iter, hash_reader, hash_seekable, hash_slice, hash_stream_contents, CancelToken, Md5Hash,
};

use crate::config::HasherConfig;
use crate::error::{HasherError, Result};

/// Configured MD5 hashing service.
#[derive(Debug, Clone, Default)]
pub struct Hasher {
    config: HasherConfig,
    cancel: CancelToken,
}

impl Hasher {
    /// Create a hasher, rejecting unusable configurations.
    pub fn new(config: HasherConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            cancel: CancelToken::new(),
        })
    }

    /// Share an existing cancellation token.
    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn config(&self) -> &HasherConfig {
        &self.config
    }

    /// The token checked between chunks. Cancelling it stops every
    /// in-flight chunked computation of this hasher.
    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    // ─────────────────────────────────────────────────────────────────────────
    // In-memory input
    // ─────────────────────────────────────────────────────────────────────────

    /// Hash a buffer in one call.
    pub fn hash_bytes(&self, data: &[u8]) -> Md5Hash {
        let hash = hash_slice(data);
        tracing::debug!(bytes = data.len(), digest = %hash, "hashed buffer");
        hash
    }

    /// Hash the UTF-8 bytes of a string.
    pub fn hash_str(&self, s: &str) -> Md5Hash {
        self.hash_bytes(s.as_bytes())
    }

    /// Hash a lazy byte sequence in `chunk_size` pieces.
    pub fn hash_iter<I: IntoIterator<Item = u8>>(&self, bytes: I) -> Result<Md5Hash> {
        let hash = hash_iter(bytes, self.config.chunk_size, Some(&self.cancel))?;
        tracing::debug!(digest = %hash, "hashed byte sequence");
        Ok(hash)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Streams and files
    // ─────────────────────────────────────────────────────────────────────────

    /// Hash the whole of a seekable source from its start.
    ///
    /// With `restore_position` set, the source's position is put back
    /// afterwards, also when reading fails.
    pub fn hash_stream<R: Read + Seek + ?Sized>(&self, reader: &mut R) -> Result<Md5Hash> {
        let chunk_size = self.config.chunk_size;
        let hash = if self.config.restore_position {
            hash_seekable(reader, chunk_size, Some(&self.cancel))?
        } else {
            hash_stream_contents(reader, chunk_size, Some(&self.cancel))?
        };
        tracing::debug!(digest = %hash, chunk_size, "hashed stream");
        Ok(hash)
    }

    /// Hash everything a forward-only reader yields.
    pub fn hash_reader<R: Read>(&self, reader: R) -> Result<Md5Hash> {
        let hash = hash_reader(reader, self.config.chunk_size, Some(&self.cancel))?;
        tracing::debug!(digest = %hash, "hashed reader");
        Ok(hash)
    }

    /// Hash a file's contents.
    pub fn hash_file<P: AsRef<Path>>(&self, path: P) -> Result<Md5Hash> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| HasherError::File {
            path: path.to_path_buf(),
            source,
        })?;
        let hash = hash_reader(file, self.config.chunk_size, Some(&self.cancel))?;
        tracing::debug!(path = %path.display(), digest = %hash, "hashed file");
        Ok(hash)
    }

    /// Hash many files, each with its own context.
    ///
    /// Results come back in input order; one failing file does not stop the
    /// others.
    pub fn hash_files<P: AsRef<Path> + Sync>(&self, paths: &[P]) -> Vec<Result<Md5Hash>> {
        tracing::debug!(
            files = paths.len(),
            parallel = self.config.parallel,
            "hashing batch"
        );
        if self.config.parallel {
            paths.par_iter().map(|path| self.hash_file(path)).collect()
        } else {
            paths.iter().map(|path| self.hash_file(path)).collect()
        }
    }

    /// Check a file against an expected digest.
    pub fn verify_file<P: AsRef<Path>>(&self, path: P, expected: &Md5Hash) -> Result<bool> {
        let path = path.as_ref();
        let actual = self.hash_file(path)?;
        if actual != *expected {
            tracing::warn!(
                path = %path.display(),
                expected = %expected,
                actual = %actual,
                "digest mismatch"
            );
        }
        Ok(actual == *expected)
    }
}
