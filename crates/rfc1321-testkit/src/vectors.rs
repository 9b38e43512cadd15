//! Golden test vectors.
//!
//! The RFC 1321 appendix suite plus vectors that pin down padding edge
//! cases. Every implementation must produce these digests exactly.

use rfc1321_core::Md5Hash;

/// A golden test vector.
#[derive(Debug, Clone)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// Message bytes.
    pub message: &'static [u8],
    /// Expected digest (hex).
    pub expected_md5: &'static str,
}

impl GoldenVector {
    /// The expected digest as a value.
    pub fn expected(&self) -> Md5Hash {
        let bytes = hex::decode(self.expected_md5).expect("golden vector is valid hex");
        Md5Hash::from_slice(&bytes).expect("golden vector is 16 bytes")
    }
}

static SEQUENTIAL_64: [u8; 64] = {
    let mut data = [0u8; 64];
    let mut i = 0;
    while i < 64 {
        data[i] = i as u8;
        i += 1;
    }
    data
};

/// Length of the large sequential-byte message.
pub const LARGE_SEQUENTIAL_LEN: usize = 12_345_678;

/// Digest of `0, 1, ..., 255, 0, 1, ...` truncated to [`LARGE_SEQUENTIAL_LEN`] bytes.
pub const LARGE_SEQUENTIAL_MD5: &str = "c509d961f3bca4f02402c0e2798a1324";

/// The seven messages from the RFC 1321 test suite.
pub fn rfc1321_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "empty",
            message: b"",
            expected_md5: "d41d8cd98f00b204e9800998ecf8427e",
        },
        GoldenVector {
            name: "a",
            message: b"a",
            expected_md5: "0cc175b9c0f1b6a831c399e269772661",
        },
        GoldenVector {
            name: "abc",
            message: b"abc",
            expected_md5: "900150983cd24fb0d6963f7d28e17f72",
        },
        GoldenVector {
            name: "message digest",
            message: b"message digest",
            expected_md5: "f96b697d7cb7938d525a2f31aaf161d0",
        },
        GoldenVector {
            name: "alphabet",
            message: b"abcdefghijklmnopqrstuvwxyz",
            expected_md5: "c3fcd3d76192e4007dfb496cca67e13b",
        },
        GoldenVector {
            name: "alphanumeric",
            message: b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789",
            expected_md5: "d174ab98d277d9f5a5611c2c9f419d9f",
        },
        GoldenVector {
            name: "digits x8",
            message: b"12345678901234567890123456789012345678901234567890123456789012345678901234567890",
            expected_md5: "57edf4a22be3c955ac49da2e2107b67a",
        },
    ]
}

/// Vectors around the padding boundaries and a few well-known strings.
pub fn edge_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "single zero byte",
            message: &[0],
            expected_md5: "93b885adfe0da089cdf634904fd59f71",
        },
        GoldenVector {
            name: "55 sequential bytes (one block)",
            message: SEQUENTIAL_64.split_at(55).0,
            expected_md5: "6912ee65fff2d9f9ce2508cddf8bcda0",
        },
        GoldenVector {
            name: "56 sequential bytes (two blocks)",
            message: SEQUENTIAL_64.split_at(56).0,
            expected_md5: "51fdd1acda72405dfdfa03fcb85896d7",
        },
        GoldenVector {
            name: "64 sequential bytes",
            message: &SEQUENTIAL_64,
            expected_md5: "b2d3f56bc197fd985d5965079b5e7148",
        },
        GoldenVector {
            name: "quick brown fox",
            message: b"The quick brown fox jumps over the lazy dog",
            expected_md5: "9e107d9d372bb6826bd81d3542a419d6",
        },
    ]
}

/// Get all golden test vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    let mut vectors = rfc1321_vectors();
    vectors.extend(edge_vectors());
    vectors
}

/// Check every vector against the engine.
///
/// Returns `(name, matches, actual_hex)` per vector.
pub fn verify_all_vectors() -> Vec<(String, bool, String)> {
    all_vectors()
        .iter()
        .map(|v| {
            let hex = Md5Hash::compute(v.message).to_hex();
            (v.name.to_string(), hex == v.expected_md5, hex)
        })
        .collect()
}
