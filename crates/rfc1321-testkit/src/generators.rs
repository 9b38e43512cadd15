//! Proptest generators for property-based testing.

use proptest::prelude::*;

use rfc1321_core::Md5Hash;

/// Generate a random digest value.
pub fn md5_hash() -> impl Strategy<Value = Md5Hash> {
    any::<[u8; 16]>().prop_map(Md5Hash::from_bytes)
}

/// Generate message bytes of at most `max_len` bytes.
pub fn message(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..=max_len)
}

/// A message together with a way of cutting it into consecutive chunks.
#[derive(Debug, Clone)]
pub struct ChunkedMessage {
    pub message: Vec<u8>,
    /// Sorted cut offsets, each within `0..=message.len()`.
    pub cuts: Vec<usize>,
}

impl ChunkedMessage {
    /// The chunks between consecutive cuts, covering the whole message.
    pub fn chunks(&self) -> Vec<&[u8]> {
        let mut chunks = Vec::with_capacity(self.cuts.len() + 1);
        let mut start = 0;
        for &cut in &self.cuts {
            chunks.push(&self.message[start..cut]);
            start = cut;
        }
        chunks.push(&self.message[start..]);
        chunks
    }
}

impl Arbitrary for ChunkedMessage {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (
            message(1000),
            prop::collection::vec(any::<prop::sample::Index>(), 0..12),
        )
            .prop_map(|(message, indices)| {
                let mut cuts: Vec<usize> = indices
                    .iter()
                    .map(|index| index.index(message.len() + 1))
                    .collect();
                cuts.sort_unstable();
                ChunkedMessage { message, cuts }
            })
            .boxed()
    }
}

/// Generate a digest together with a noisy rendering of it that the lenient
/// parser must still accept: random letter case and a separator between
/// byte pairs.
pub fn decorated_hex() -> impl Strategy<Value = (Md5Hash, String)> {
    (
        md5_hash(),
        prop::collection::vec(any::<bool>(), 32),
        prop_oneof![Just(""), Just(":"), Just("-"), Just(" ")],
    )
        .prop_map(|(hash, upper, separator)| {
            let hex = hash.to_hex();
            let mut text = String::new();
            for (i, (c, upper)) in hex.chars().zip(upper).enumerate() {
                if i > 0 && i % 2 == 0 {
                    text.push_str(separator);
                }
                text.push(if upper { c.to_ascii_uppercase() } else { c });
            }
            (hash, text)
        })
}
