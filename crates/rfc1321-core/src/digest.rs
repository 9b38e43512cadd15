//! The 128-bit MD5 digest value.
//!
//! The sixteen bytes are stored once, in RFC 1321 output order: words
//! A, B, C, D, each least-significant byte first. The 32-bit word view and
//! the 64-bit pair view are computed from that storage.

use bytes::{Buf, BufMut};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::io::{self, Read, Write};
use std::str::FromStr;

use crate::error::{CoreError, ParseError, Result};
use crate::parser;

/// An MD5 digest.
///
/// Ordering compares the CD pair first and the AB pair second, both as
/// unsigned 64-bit values. This is a consistent total order, not the
/// lexicographic order of the bytes.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Md5Hash([u8; Md5Hash::SIZE]);

impl Md5Hash {
    /// Size of a digest in bytes.
    pub const SIZE: usize = 16;

    /// Length of the canonical hex form.
    pub const HEX_LEN: usize = Self::SIZE * 2;

    /// The all-zero digest (sentinel value).
    pub const ZERO: Self = Self([0u8; Self::SIZE]);

    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; Self::SIZE]) -> Self {
        Self(bytes)
    }

    /// Create from a byte slice, which must be exactly 16 bytes long.
    pub fn from_slice(slice: &[u8]) -> Result<Self> {
        let bytes: [u8; Self::SIZE] = slice.try_into().map_err(|_| {
            CoreError::InvalidArgument(format!(
                "md5 hash requires {} bytes, got {}",
                Self::SIZE,
                slice.len()
            ))
        })?;
        Ok(Self(bytes))
    }

    /// Create from the four state words.
    pub const fn from_words(a: u32, b: u32, c: u32, d: u32) -> Self {
        let a = a.to_le_bytes();
        let b = b.to_le_bytes();
        let c = c.to_le_bytes();
        let d = d.to_le_bytes();
        Self([
            a[0], a[1], a[2], a[3], b[0], b[1], b[2], b[3], c[0], c[1], c[2], c[3], d[0], d[1],
            d[2], d[3],
        ])
    }

    fn from_pairs(ab: u64, cd: u64) -> Self {
        let mut bytes = [0u8; Self::SIZE];
        bytes[..8].copy_from_slice(&ab.to_le_bytes());
        bytes[8..].copy_from_slice(&cd.to_le_bytes());
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; Self::SIZE] {
        &self.0
    }

    /// Copy out the raw bytes.
    pub const fn to_bytes(&self) -> [u8; Self::SIZE] {
        self.0
    }

    fn word(&self, index: usize) -> u32 {
        let offset = index * 4;
        u32::from_le_bytes([
            self.0[offset],
            self.0[offset + 1],
            self.0[offset + 2],
            self.0[offset + 3],
        ])
    }

    fn pair(&self, index: usize) -> u64 {
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&self.0[index * 8..index * 8 + 8]);
        u64::from_le_bytes(bytes)
    }

    pub fn a(&self) -> u32 {
        self.word(0)
    }

    pub fn b(&self) -> u32 {
        self.word(1)
    }

    pub fn c(&self) -> u32 {
        self.word(2)
    }

    pub fn d(&self) -> u32 {
        self.word(3)
    }

    /// The low 64 bits: `(B << 32) | A`.
    pub fn ab(&self) -> u64 {
        self.pair(0)
    }

    /// The high 64 bits: `(D << 32) | C`.
    pub fn cd(&self) -> u64 {
        self.pair(1)
    }

    /// A 64-bit hash code folding both halves together.
    pub fn long_hash_code(&self) -> u64 {
        self.ab() ^ self.cd()
    }

    /// Three-valued comparison: -1, 0 or 1.
    pub fn compare_to(&self, other: &Self) -> i32 {
        match self.cmp(other) {
            Ordering::Less => -1,
            Ordering::Equal => 0,
            Ordering::Greater => 1,
        }
    }

    /// Convert to the canonical 32-digit lowercase hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse a digest, normalizing case and stripping non-hex noise first.
    ///
    /// Fails with [`CoreError::Format`] when the normalized text is not
    /// exactly 32 hex digits.
    pub fn parse(s: &str) -> Result<Self> {
        Ok(s.parse::<Self>()?)
    }

    /// Like [`Md5Hash::parse`], but never fails.
    ///
    /// Callers that want the zero digest on failure can use
    /// `try_parse(s).unwrap_or_default()`.
    pub fn try_parse(s: &str) -> Option<Self> {
        s.parse().ok()
    }

    /// Write the AB pair then the CD pair, each as a little-endian u64.
    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writer.write_all(&self.ab().to_le_bytes())?;
        writer.write_all(&self.cd().to_le_bytes())
    }

    /// Read a digest written by [`Md5Hash::write_to`].
    pub fn read_from<R: Read>(mut reader: R) -> io::Result<Self> {
        let mut ab = [0u8; 8];
        let mut cd = [0u8; 8];
        reader.read_exact(&mut ab)?;
        reader.read_exact(&mut cd)?;
        Ok(Self::from_pairs(u64::from_le_bytes(ab), u64::from_le_bytes(cd)))
    }

    /// Append the binary form to a buffer.
    pub fn put<B: BufMut>(&self, buf: &mut B) {
        buf.put_u64_le(self.ab());
        buf.put_u64_le(self.cd());
    }

    /// Take the binary form from the front of a buffer.
    pub fn get<B: Buf>(buf: &mut B) -> Result<Self> {
        if buf.remaining() < Self::SIZE {
            return Err(CoreError::InvalidArgument(format!(
                "md5 hash requires {} bytes, {} remaining",
                Self::SIZE,
                buf.remaining()
            )));
        }
        let ab = buf.get_u64_le();
        let cd = buf.get_u64_le();
        Ok(Self::from_pairs(ab, cd))
    }
}

impl Ord for Md5Hash {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cd()
            .cmp(&other.cd())
            .then_with(|| self.ab().cmp(&other.ab()))
    }
}

impl PartialOrd for Md5Hash {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for Md5Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Md5Hash({})", self.to_hex())
    }
}

impl fmt::Display for Md5Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Md5Hash {
    type Err = ParseError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized = parser::normalize(s);
        parser::check(&normalized)?;
        Ok(parser::parse_valid(&normalized))
    }
}

impl AsRef<[u8]> for Md5Hash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; Md5Hash::SIZE]> for Md5Hash {
    fn from(bytes: [u8; Md5Hash::SIZE]) -> Self {
        Self(bytes)
    }
}

impl From<Md5Hash> for [u8; Md5Hash::SIZE] {
    fn from(hash: Md5Hash) -> Self {
        hash.0
    }
}

impl TryFrom<&[u8]> for Md5Hash {
    type Error = CoreError;

    fn try_from(slice: &[u8]) -> Result<Self> {
        Self::from_slice(slice)
    }
}

impl Serialize for Md5Hash {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.to_hex())
        } else {
            serializer.serialize_bytes(&self.0)
        }
    }
}

impl<'de> Deserialize<'de> for Md5Hash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct Md5HashVisitor;

        impl<'de> de::Visitor<'de> for Md5HashVisitor {
            type Value = Md5Hash;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a 32-digit hex string or 16 raw bytes")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Md5Hash, E> {
                v.parse().map_err(E::custom)
            }

            fn visit_bytes<E: de::Error>(self, v: &[u8]) -> std::result::Result<Md5Hash, E> {
                Md5Hash::from_slice(v).map_err(E::custom)
            }

            fn visit_seq<A: de::SeqAccess<'de>>(
                self,
                mut seq: A,
            ) -> std::result::Result<Md5Hash, A::Error> {
                let mut bytes = [0u8; Md5Hash::SIZE];
                for (i, byte) in bytes.iter_mut().enumerate() {
                    *byte = seq
                        .next_element()?
                        .ok_or_else(|| de::Error::invalid_length(i, &self))?;
                }
                Ok(Md5Hash(bytes))
            }
        }

        if deserializer.is_human_readable() {
            deserializer.deserialize_str(Md5HashVisitor)
        } else {
            deserializer.deserialize_bytes(Md5HashVisitor)
        }
    }
}
