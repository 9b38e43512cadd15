//! The incremental RFC 1321 compression engine.
//!
//! [`Md5Context`] holds the four running accumulators, the 64-bit message
//! length in bits, and a 64-byte pending block. `finalize` consumes the
//! context, so a finished computation can never be updated again.

use std::io;

use crate::digest::Md5Hash;

const BLOCK_SIZE: usize = 64;

/// Buffer index at which the length field starts in the last block.
const LENGTH_OFFSET: usize = 56;

const INITIAL_STATE: [u32; 4] = [0x67452301, 0xefcdab89, 0x98badcfe, 0x10325476];

const PADDING: [u8; BLOCK_SIZE] = {
    let mut data = [0u8; BLOCK_SIZE];
    data[0] = 0x80;
    data
};

/// Left-rotate amounts, four per pass.
#[rustfmt::skip]
const SHIFTS: [[u32; 4]; 4] = [
    [7, 12, 17, 22],
    [5, 9, 14, 20],
    [4, 11, 16, 23],
    [6, 10, 15, 21],
];

/// `floor(2^32 * abs(sin(i + 1)))` for step `i`.
#[rustfmt::skip]
const SINES: [u32; 64] = [
    0xd76aa478, 0xe8c7b756, 0x242070db, 0xc1bdceee, 0xf57c0faf, 0x4787c62a, 0xa8304613, 0xfd469501,
    0x698098d8, 0x8b44f7af, 0xffff5bb1, 0x895cd7be, 0x6b901122, 0xfd987193, 0xa679438e, 0x49b40821,
    0xf61e2562, 0xc040b340, 0x265e5a51, 0xe9b6c7aa, 0xd62f105d, 0x02441453, 0xd8a1e681, 0xe7d3fbc8,
    0x21e1cde6, 0xc33707d6, 0xf4d50d87, 0x455a14ed, 0xa9e3e905, 0xfcefa3f8, 0x676f02d9, 0x8d2a4c8a,
    0xfffa3942, 0x8771f681, 0x6d9d6122, 0xfde5380c, 0xa4beea44, 0x4bdecfa9, 0xf6bb4b60, 0xbebfbc70,
    0x289b7ec6, 0xeaa127fa, 0xd4ef3085, 0x04881d05, 0xd9d4d039, 0xe6db99e5, 0x1fa27cf8, 0xc4ac5665,
    0xf4292244, 0x432aff97, 0xab9423a7, 0xfc93a039, 0x655b59c3, 0x8f0ccc92, 0xffeff47d, 0x85845dd1,
    0x6fa87e4f, 0xfe2ce6e0, 0xa3014314, 0x4e0811a1, 0xf7537e82, 0xbd3af235, 0x2ad7d2bb, 0xeb86d391,
];

fn f(x: u32, y: u32, z: u32) -> u32 {
    (x & y) | (!x & z)
}

fn g(x: u32, y: u32, z: u32) -> u32 {
    (x & z) | (y & !z)
}

fn h(x: u32, y: u32, z: u32) -> u32 {
    x ^ y ^ z
}

fn i(x: u32, y: u32, z: u32) -> u32 {
    y ^ (x | !z)
}

/// Decode a 64-byte block into sixteen little-endian words.
fn decode_block(block: &[u8]) -> [u32; 16] {
    debug_assert_eq!(block.len(), BLOCK_SIZE);
    let mut words = [0u32; 16];
    for (word, bytes) in words.iter_mut().zip(block.chunks_exact(4)) {
        *word = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
    }
    words
}

/// One compression round: mix a 64-byte block into the accumulators.
pub fn compress(state: &mut [u32; 4], block: &[u8; BLOCK_SIZE]) {
    compress_words(state, &decode_block(block));
}

fn compress_words(state: &mut [u32; 4], x: &[u32; 16]) {
    let [mut a, mut b, mut c, mut d] = *state;

    for step in 0..64 {
        let pass = step / 16;
        let (mixed, index) = match pass {
            0 => (f(b, c, d), step),
            1 => (g(b, c, d), (5 * step + 1) % 16),
            2 => (h(b, c, d), (3 * step + 5) % 16),
            _ => (i(b, c, d), (7 * step) % 16),
        };
        let rotated = mixed
            .wrapping_add(a)
            .wrapping_add(x[index])
            .wrapping_add(SINES[step])
            .rotate_left(SHIFTS[pass][step % 4])
            .wrapping_add(b);

        // (a, b, c, d) <- (d, new, b, c)
        a = d;
        d = c;
        c = b;
        b = rotated;
    }

    state[0] = state[0].wrapping_add(a);
    state[1] = state[1].wrapping_add(b);
    state[2] = state[2].wrapping_add(c);
    state[3] = state[3].wrapping_add(d);
}

/// An in-progress MD5 computation.
#[derive(Clone)]
pub struct Md5Context {
    state: [u32; 4],
    /// Message length in bits, modulo 2^64.
    bit_count: u64,
    buffer: [u8; BLOCK_SIZE],
}

impl Md5Context {
    /// Create a context in the RFC 1321 initial state.
    pub fn new() -> Self {
        Self {
            state: INITIAL_STATE,
            bit_count: 0,
            buffer: [0u8; BLOCK_SIZE],
        }
    }

    /// Discard everything hashed so far.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Bytes consumed so far.
    pub fn bytes_processed(&self) -> u64 {
        self.bit_count >> 3
    }

    fn buffer_index(&self) -> usize {
        ((self.bit_count >> 3) % BLOCK_SIZE as u64) as usize
    }

    /// Append `data` to the message.
    pub fn update(&mut self, data: &[u8]) {
        let mut index = self.buffer_index();
        self.bit_count = self
            .bit_count
            .wrapping_add((data.len() as u64).wrapping_mul(8));

        let part_len = BLOCK_SIZE - index;
        let mut consumed = 0;

        if data.len() >= part_len {
            self.buffer[index..].copy_from_slice(&data[..part_len]);
            compress(&mut self.state, &self.buffer);
            consumed = part_len;

            for block in data[part_len..].chunks_exact(BLOCK_SIZE) {
                compress_words(&mut self.state, &decode_block(block));
                consumed += BLOCK_SIZE;
            }
            index = 0;
        }

        let rest = &data[consumed..];
        self.buffer[index..index + rest.len()].copy_from_slice(rest);
    }

    /// Apply RFC 1321 padding and produce the digest.
    pub fn finalize(mut self) -> Md5Hash {
        let length = self.bit_count.to_le_bytes();
        let index = self.buffer_index();
        let pad_len = if index < LENGTH_OFFSET {
            LENGTH_OFFSET - index
        } else {
            LENGTH_OFFSET + BLOCK_SIZE - index
        };
        self.update(&PADDING[..pad_len]);
        self.update(&length);
        debug_assert_eq!(self.buffer_index(), 0);

        let [a, b, c, d] = self.state;
        Md5Hash::from_words(a, b, c, d)
    }
}

impl Default for Md5Context {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Md5Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Md5Context")
            .field("bytes_processed", &self.bytes_processed())
            .finish_non_exhaustive()
    }
}

impl io::Write for Md5Context {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.update(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn md5_hex(data: &[u8]) -> String {
        let mut ctx = Md5Context::new();
        ctx.update(data);
        ctx.finalize().to_hex()
    }

    #[test]
    fn test_rfc1321_suite() {
        assert_eq!(md5_hex(b""), "d41d8cd98f00b204e9800998ecf8427e");
        assert_eq!(md5_hex(b"a"), "0cc175b9c0f1b6a831c399e269772661");
        assert_eq!(md5_hex(b"abc"), "900150983cd24fb0d6963f7d28e17f72");
        assert_eq!(
            md5_hex(b"message digest"),
            "f96b697d7cb7938d525a2f31aaf161d0"
        );
        assert_eq!(
            md5_hex(b"abcdefghijklmnopqrstuvwxyz"),
            "c3fcd3d76192e4007dfb496cca67e13b"
        );
    }

    #[test]
    fn test_single_zero_byte() {
        assert_eq!(md5_hex(&[0]), "93b885adfe0da089cdf634904fd59f71");
    }

    #[test]
    fn test_padding_boundaries() {
        let data: Vec<u8> = (0..64u8).collect();
        assert_eq!(md5_hex(&data[..55]), "6912ee65fff2d9f9ce2508cddf8bcda0");
        assert_eq!(md5_hex(&data[..56]), "51fdd1acda72405dfdfa03fcb85896d7");
        assert_eq!(md5_hex(&data), "b2d3f56bc197fd985d5965079b5e7148");
    }

    #[test]
    fn test_initial_state_compresses_nothing() {
        let ctx = Md5Context::new();
        assert_eq!(ctx.bytes_processed(), 0);
        assert_eq!(ctx.state, INITIAL_STATE);
    }

    #[test]
    fn test_buffer_index_tracks_pending_bytes() {
        let mut ctx = Md5Context::new();
        ctx.update(&[1; 63]);
        assert_eq!(ctx.buffer_index(), 63);
        assert_eq!(ctx.state, INITIAL_STATE);

        ctx.update(&[1]);
        assert_eq!(ctx.buffer_index(), 0);
        assert_ne!(ctx.state, INITIAL_STATE);
        assert_eq!(ctx.bytes_processed(), 64);
    }

    #[test]
    fn test_reset() {
        let mut ctx = Md5Context::new();
        ctx.update(b"some data");
        ctx.reset();
        assert_eq!(ctx.finalize().to_hex(), "d41d8cd98f00b204e9800998ecf8427e");
    }

    #[test]
    fn test_clone_forks_computation() {
        let mut ctx = Md5Context::new();
        ctx.update(b"message ");
        let mut fork = ctx.clone();
        ctx.update(b"digest");
        fork.update(b"digest");
        assert_eq!(ctx.finalize(), fork.finalize());
    }

    #[test]
    fn test_bit_count_wraps_modulo_2_64() {
        let mut ctx = Md5Context::new();
        ctx.bit_count = u64::MAX - 7;
        ctx.update(&[0; 2]);
        assert_eq!(ctx.bit_count, 8);
    }

    #[test]
    fn test_io_write_sink() {
        use std::io::Write;

        let mut ctx = Md5Context::new();
        write!(ctx, "message digest").unwrap();
        ctx.flush().unwrap();
        assert_eq!(ctx.finalize().to_hex(), "f96b697d7cb7938d525a2f31aaf161d0");
    }

    proptest! {
        #[test]
        fn test_split_equivalence(
            data in prop::collection::vec(any::<u8>(), 0..600),
            split in any::<prop::sample::Index>(),
        ) {
            let at = split.index(data.len() + 1);
            let mut ctx = Md5Context::new();
            ctx.update(&data[..at]);
            ctx.update(&data[at..]);
            prop_assert_eq!(ctx.finalize().to_hex(), md5_hex(&data));
        }

        #[test]
        fn test_bytewise_equivalence(data in prop::collection::vec(any::<u8>(), 0..300)) {
            let mut ctx = Md5Context::new();
            for byte in &data {
                ctx.update(std::slice::from_ref(byte));
            }
            prop_assert_eq!(ctx.finalize().to_hex(), md5_hex(&data));
        }
    }
}
