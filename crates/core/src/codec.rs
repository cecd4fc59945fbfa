//! Public encode/decode entry points.
//!
//! Encoding runs two passes over the payload:
//! 1. pack the raw bytes into 7-bit cells ([`crate::sevenbit`])
//! 2. shift every cell up by one modulo 128 ([`crate::zero`])
//!
//! Decoding validates the input, undoes the shift and then unpacks. Both
//! directions are pure functions of their input.

use tracing::{debug, trace};

use crate::error::{DecodeError, Result};
use crate::sevenbit::{pack, unpack};
use crate::zero::{avoid_zero, restore_zero};

/// Exclusive upper bound for a valid unit.
const UNIT_LIMIT: u32 = 0x80;

/// Test whether every character of `text` is in the 7-bit range.
///
/// This only checks the alphabet; a valid alphabet can still carry an
/// undecodable length.
pub fn is_valid_encoding(text: &str) -> bool {
    text.chars().all(|c| (c as u32) < UNIT_LIMIT)
}

/// Test whether every raw code unit is in the 7-bit range.
pub fn is_valid_units(units: &[u8]) -> bool {
    units.iter().all(|&unit| u32::from(unit) < UNIT_LIMIT)
}

/// Encode raw bytes into 7-bit code units.
pub fn encode_units(raw: &[u8]) -> Vec<u8> {
    let units = avoid_zero(pack(raw));
    trace!(raw_len = raw.len(), encoded_len = units.len(), "encoded payload");
    units
}

/// Encode raw bytes into a string.
///
/// Never fails. Every character of the result is below U+0080, so the string
/// is plain ASCII.
pub fn encode(raw: &[u8]) -> String {
    encode_units(raw).into_iter().map(char::from).collect()
}

/// Decode a string produced by [`encode`].
///
/// # Errors
/// - `DecodeError::InvalidCharacter` if any character is U+0080 or above
///   (`position` is the character index)
/// - `DecodeError::InvalidLength` if the character count is 1 modulo 8
pub fn decode(text: &str) -> Result<Vec<u8>> {
    let mut units = Vec::with_capacity(text.len());
    for (position, c) in text.chars().enumerate() {
        let code = c as u32;
        if code >= UNIT_LIMIT {
            debug!(position, code, "rejecting encoded text");
            return Err(DecodeError::InvalidCharacter { position, code }.into());
        }
        units.push(code as u8);
    }
    decode_checked(units)
}

/// Decode raw code units produced by [`encode_units`].
///
/// # Errors
/// Same as [`decode`], with `position` counted in bytes.
pub fn decode_units(units: &[u8]) -> Result<Vec<u8>> {
    if let Some(position) = units.iter().position(|&unit| u32::from(unit) >= UNIT_LIMIT) {
        let code = u32::from(units[position]);
        debug!(position, code, "rejecting encoded units");
        return Err(DecodeError::InvalidCharacter { position, code }.into());
    }
    decode_checked(units.to_vec())
}

/// Undo zero-avoidance and unpack units already known to be 7-bit.
fn decode_checked(units: Vec<u8>) -> Result<Vec<u8>> {
    let encoded_len = units.len();
    let raw = unpack(&restore_zero(units)).inspect_err(|err| {
        debug!(encoded_len, error = %err, "rejecting encoded length");
    })?;
    trace!(encoded_len, raw_len = raw.len(), "decoded payload");
    Ok(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::sevenbit::encode_length;

    #[test]
    fn test_empty() {
        assert_eq!(encode(&[]), "");
        assert_eq!(decode("").unwrap(), Vec::<u8>::new());
        assert!(encode_units(&[]).is_empty());
        assert!(decode_units(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_seven_byte_group() {
        let raw = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07];
        let text = encode(&raw);
        assert_eq!(text.len(), 8);
        assert_eq!(text, "\u{02}\u{05}\u{0D}\u{21}\u{51}\u{41}\u{42}\u{04}");
        assert_eq!(decode(&text).unwrap(), raw);
    }

    #[test]
    fn test_single_bytes() {
        assert_eq!(encode(&[0x00]), "\u{01}\u{01}");
        assert_eq!(decode(&encode(&[0x00])).unwrap(), vec![0x00]);

        // 0xFF packs to a 0x7F cell, which wraps to unit zero
        assert_eq!(encode(&[0xFF]), "\u{00}\u{02}");
        assert_eq!(decode(&encode(&[0xFF])).unwrap(), vec![0xFF]);
    }

    #[test]
    fn test_length_formula() {
        for len in 0..=20usize {
            let raw = vec![0xA5; len];
            assert_eq!(encode(&raw).len(), encode_length(len), "len {len}");
        }
    }

    #[test]
    fn test_invalid_length() {
        for len in [1usize, 9, 17] {
            let text = "A".repeat(len);
            assert!(is_valid_encoding(&text));
            assert!(matches!(
                decode(&text),
                Err(Error::Decode(DecodeError::InvalidLength { length })) if length == len
            ));
        }
    }

    #[test]
    fn test_invalid_character_any_position() {
        let valid = encode(b"signature");
        for position in [0, 4, valid.chars().count() - 1] {
            let text: String = valid
                .chars()
                .enumerate()
                .map(|(i, c)| if i == position { 'é' } else { c })
                .collect();
            assert!(!is_valid_encoding(&text));
            assert_eq!(
                decode(&text),
                Err(Error::Decode(DecodeError::InvalidCharacter {
                    position,
                    code: 0xE9
                }))
            );
        }
    }

    #[test]
    fn test_invalid_character_reported_before_length() {
        // Nine characters would also fail the length check
        let text = "\u{80}AAAAAAAA";
        assert!(matches!(
            decode(text),
            Err(Error::Decode(DecodeError::InvalidCharacter { position: 0, .. }))
        ));
    }

    #[test]
    fn test_character_position_counts_chars() {
        // 'λ' is two bytes in UTF-8 but one character
        assert!(matches!(
            decode("ABλ"),
            Err(Error::Decode(DecodeError::InvalidCharacter { position: 2, code: 0x3BB }))
        ));
    }

    #[test]
    fn test_units_match_text() {
        let raw = b"Lscala/Option;";
        let units = encode_units(raw);
        assert_eq!(units, encode(raw).into_bytes());
        assert!(is_valid_units(&units));
        assert_eq!(decode_units(&units).unwrap(), raw);
    }

    #[test]
    fn test_units_invalid_character() {
        assert_eq!(
            decode_units(&[0x02, 0x02, 0xC0, 0x80]),
            Err(Error::Decode(DecodeError::InvalidCharacter {
                position: 2,
                code: 0xC0
            }))
        );
        assert!(!is_valid_units(&[0x7F, 0x80]));
        assert!(is_valid_units(&[0x00, 0x7F]));
    }

    #[test]
    fn test_escaped_zero_after_unescape() {
        use crate::zero::unescape_zero;

        let units = encode_units(&[0xFF, 0x10]);
        assert_eq!(units[0], 0x00);

        let mut container = vec![0xC0, 0x80];
        container.extend_from_slice(&units[1..]);
        assert!(decode_units(&container).is_err());
        assert_eq!(decode_units(&unescape_zero(&container)).unwrap(), vec![0xFF, 0x10]);
    }
}
