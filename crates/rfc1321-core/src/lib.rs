//! # rfc1321 Core
//!
//! A from-scratch MD5 (RFC 1321) digest engine and its 128-bit digest value.
//!
//! This crate does no allocation-heavy work and no I/O of its own beyond
//! reading from the `std::io` sources handed to the input adapters.
//!
//! ## Key Types
//!
//! - [`Md5Hash`] - The immutable 16-byte digest value
//! - [`Md5Context`] - The incremental compression engine
//! - [`CancelToken`] - Cooperative cancellation for the chunked adapters
//!
//! ## Usage
//!
//! ```rust
//! use rfc1321_core::{Md5Context, Md5Hash};
//!
//! let one_shot = Md5Hash::compute(b"message digest");
//!
//! let mut ctx = Md5Context::new();
//! ctx.update(b"message ");
//! ctx.update(b"digest");
//! assert_eq!(ctx.finalize(), one_shot);
//!
//! assert_eq!(one_shot.to_hex(), "f96b697d7cb7938d525a2f31aaf161d0");
//! assert_eq!(Md5Hash::parse("F96B697D7CB7938D525A2F31AAF161D0").unwrap(), one_shot);
//! ```
//!
//! ## Security
//!
//! MD5 is broken for security purposes. This crate targets interoperability
//! and correctness only.

pub mod calculate;
pub mod context;
pub mod digest;
pub mod error;
pub mod parser;

pub use calculate::{
    hash_iter, hash_reader, hash_seekable, hash_slice, hash_stream_contents, CancelToken,
    DEFAULT_CHUNK_SIZE,
};
pub use context::Md5Context;
pub use digest::Md5Hash;
pub use error::{CoreError, ParseError, Result};
