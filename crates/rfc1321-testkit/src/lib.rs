//! # rfc1321 Testkit
//!
//! Testing utilities for the rfc1321 MD5 engine.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: The RFC 1321 suite and padding edge cases
//! - **Reference**: A trusted MD5 (RustCrypto `md-5`) for cross-checking
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: Sequential and random messages, temp files, failing sources
//!
//! ## Golden Vectors
//!
//! ```rust
//! use rfc1321_testkit::vectors::verify_all_vectors;
//!
//! for (name, matches, hex) in verify_all_vectors() {
//!     assert!(matches, "{name}: {hex}");
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use rfc1321_core::{Md5Context, Md5Hash};
//! use rfc1321_testkit::generators::ChunkedMessage;
//!
//! proptest! {
//!     #[test]
//!     fn chunking_does_not_matter(input: ChunkedMessage) {
//!         let mut ctx = Md5Context::new();
//!         for chunk in input.chunks() {
//!             ctx.update(chunk);
//!         }
//!         prop_assert_eq!(ctx.finalize(), Md5Hash::compute(&input.message));
//!     }
//! }
//! ```

pub mod fixtures;
pub mod generators;
pub mod reference;
pub mod vectors;

pub use fixtures::{random_message, sequential_bytes, sequential_vec, FlakySource};
pub use generators::ChunkedMessage;
pub use reference::{reference_digest, ReferenceHasher};
pub use vectors::{all_vectors, verify_all_vectors, GoldenVector};
