//! Digest text parsing.
//!
//! Parsing is lenient on purpose: inputs of at least 32 characters are
//! lowercased and stripped of anything that is not a hex digit before
//! validation, so `D4:1D:8C:...` style dumps parse. Shorter inputs are left
//! alone and fail validation downstream.

use std::borrow::Cow;

use crate::digest::Md5Hash;
use crate::error::ParseError;

/// Only lowercase digits count; callers normalize first.
fn is_hex_char(c: char) -> bool {
    matches!(c, '0'..='9' | 'a'..='f')
}

fn nibble(c: u8) -> u8 {
    match c {
        b'a'..=b'f' => c - b'a' + 10,
        _ => c.wrapping_sub(b'0'),
    }
}

/// Normalize candidate text into canonical form where possible.
pub fn normalize(s: &str) -> Cow<'_, str> {
    if s.is_empty() {
        return Cow::Borrowed("");
    }
    if s.chars().count() < Md5Hash::HEX_LEN {
        return Cow::Borrowed(s);
    }
    Cow::Owned(
        s.to_lowercase()
            .chars()
            .filter(|c| is_hex_char(*c))
            .take(Md5Hash::HEX_LEN)
            .collect(),
    )
}

/// Explain why `s` is not a canonical digest string.
pub fn check(s: &str) -> Result<(), ParseError> {
    if s.is_empty() {
        return Err(ParseError::Empty);
    }
    let actual = s.chars().count();
    if actual != Md5Hash::HEX_LEN {
        return Err(ParseError::InvalidLength {
            expected: Md5Hash::HEX_LEN,
            actual,
        });
    }
    match s.chars().enumerate().find(|(_, c)| !is_hex_char(*c)) {
        Some((position, character)) => Err(ParseError::InvalidCharacter {
            character,
            position,
        }),
        None => Ok(()),
    }
}

/// True iff `s` is exactly 32 lowercase hex digits.
pub fn is_valid(s: &str) -> bool {
    check(s).is_ok()
}

/// Decode a string that already passed [`is_valid`].
///
/// Each adjacent pair becomes one byte, first character in the high nibble.
pub fn parse_valid(s: &str) -> Md5Hash {
    debug_assert!(is_valid(s), "parse_valid called with {s:?}");
    let mut bytes = [0u8; Md5Hash::SIZE];
    for (byte, pair) in bytes.iter_mut().zip(s.as_bytes().chunks_exact(2)) {
        *byte = (nibble(pair[0]) << 4) | nibble(pair[1]);
    }
    Md5Hash::from_bytes(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EMPTY_MD5: &str = "d41d8cd98f00b204e9800998ecf8427e";

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_normalize_short_input_is_unchanged() {
        assert_eq!(normalize("ABC-def"), "ABC-def");
        assert!(matches!(normalize("ABC-def"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_normalize_lowercases_and_strips() {
        let noisy = "D4 1D 8C D9 8F 00 B2 04 E9 80 09 98 EC F8 42 7E";
        assert_eq!(normalize(noisy), EMPTY_MD5);
    }

    #[test]
    fn test_normalize_truncates() {
        let long = format!("{EMPTY_MD5}ffff");
        assert_eq!(normalize(&long), EMPTY_MD5);
    }

    #[test]
    fn test_normalize_strips_non_hex_letters() {
        // 'z' is dropped, leaving 31 digits.
        let normalized = normalize("d41d8cd98fz0b204e9800998ecf8427e");
        assert_eq!(normalized.len(), 31);
        assert!(!is_valid(&normalized));
    }

    #[test]
    fn test_is_valid() {
        assert!(is_valid(EMPTY_MD5));
        assert!(!is_valid(""));
        assert!(!is_valid(&EMPTY_MD5[..31]));
        assert!(!is_valid(&EMPTY_MD5.to_uppercase()));
    }

    #[test]
    fn test_check_classifies() {
        assert_eq!(check(""), Err(ParseError::Empty));
        assert_eq!(
            check("abc"),
            Err(ParseError::InvalidLength {
                expected: 32,
                actual: 3
            })
        );
        assert_eq!(
            check("d41d8cd98f00b204e9800998ecf8427E"),
            Err(ParseError::InvalidCharacter {
                character: 'E',
                position: 31
            })
        );
    }

    #[test]
    fn test_parse_valid_byte_order() {
        let hash = parse_valid("000102030405060708090a0b0c0d0eff");
        assert_eq!(
            hash.to_bytes(),
            [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 255]
        );
        assert_eq!(hash.a(), 0x0302_0100);
    }

    #[test]
    fn test_parse_valid_matches_hex_crate() {
        let hash = parse_valid(EMPTY_MD5);
        assert_eq!(hash.as_bytes().to_vec(), hex::decode(EMPTY_MD5).unwrap());
    }
}
