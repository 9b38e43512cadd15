//! Trusted reference MD5, used only to cross-check the engine.
//!
//! Delegates to the RustCrypto `md-5` crate. The hasher is stateless and
//! built on demand; there is no shared instance.

use std::io::{self, Read};

use md5::{Digest, Md5};
use rfc1321_core::Md5Hash;

/// Reference implementation mirroring the engine's three input shapes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceHasher;

impl ReferenceHasher {
    pub fn new() -> Self {
        Self
    }

    /// Hash a buffer.
    pub fn hash(&self, data: &[u8]) -> Md5Hash {
        to_hash(Md5::digest(data).as_slice())
    }

    /// Hash everything a reader yields.
    pub fn hash_reader<R: Read>(&self, mut reader: R) -> io::Result<Md5Hash> {
        let mut hasher = Md5::new();
        io::copy(&mut reader, &mut hasher)?;
        Ok(to_hash(hasher.finalize().as_slice()))
    }

    /// Hash a byte sequence one byte at a time.
    pub fn hash_iter<I: IntoIterator<Item = u8>>(&self, bytes: I) -> Md5Hash {
        let mut hasher = Md5::new();
        for byte in bytes {
            hasher.update([byte]);
        }
        to_hash(hasher.finalize().as_slice())
    }
}

fn to_hash(output: &[u8]) -> Md5Hash {
    let mut bytes = [0u8; Md5Hash::SIZE];
    bytes.copy_from_slice(output);
    Md5Hash::from_bytes(bytes)
}

/// Shorthand for `ReferenceHasher::new().hash(data)`.
pub fn reference_digest(data: &[u8]) -> Md5Hash {
    ReferenceHasher::new().hash(data)
}
