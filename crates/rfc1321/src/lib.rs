//! # rfc1321
//!
//! Streaming MD5 (RFC 1321) hashing with a from-scratch engine.
//!
//! ## Overview
//!
//! - **Digest**: [`Md5Hash`], an immutable 16-byte value with hex, binary and
//!   serde forms and a stable total order
//! - **Engine**: [`Md5Context`], the incremental compression function
//! - **Hasher**: [`Hasher`], configured entry points for buffers, seekable
//!   streams, readers, lazy byte sequences and files
//!
//! MD5 is not collision resistant. Use it for interoperability and integrity
//! checks against accidental corruption only.
//!
//! ## Usage
//!
//! ```rust
//! use rfc1321::{Hasher, HasherConfig, Md5Hash};
//!
//! let hasher = Hasher::new(HasherConfig::default().with_chunk_size(8192)).unwrap();
//!
//! let digest = hasher.hash_str("abc");
//! assert_eq!(digest.to_string(), "900150983cd24fb0d6963f7d28e17f72");
//!
//! let mut stream = std::io::Cursor::new(b"abc".to_vec());
//! assert_eq!(hasher.hash_stream(&mut stream).unwrap(), digest);
//!
//! let lazy = hasher.hash_iter(b"abc".iter().copied()).unwrap();
//! assert_eq!(lazy, Md5Hash::parse("90:01:50:98:3C:D2:4F:B0:D6:96:3F:7D:28:E1:7F:72").unwrap());
//! ```
//!
//! ## Re-exports
//!
//! - `rfc1321::core` - The engine, digest value and raw adapters

pub mod config;
pub mod error;
pub mod hasher;

// Re-export the core crate
pub use rfc1321_core as core;

pub use config::HasherConfig;
pub use error::{HasherError, Result};
pub use hasher::Hasher;

// Re-export commonly used core types
pub use rfc1321_core::{CancelToken, CoreError, Md5Context, Md5Hash, ParseError};
