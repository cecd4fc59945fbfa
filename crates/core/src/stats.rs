//! Size accounting for encoded payloads.
//!
//! Pure length arithmetic: how many groups a payload spans, how large its
//! encoding is, and how much it grows.

use std::fmt;

use crate::error::Result;
use crate::sevenbit::{decode_length, encode_length, GROUP_BYTES};

/// Size breakdown of one payload and its encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodingStats {
    /// Raw payload length in bytes
    pub raw_len: usize,

    /// Encoded length in units (equal to the packed cell count)
    pub packed_len: usize,

    /// Complete 7-byte groups
    pub full_groups: usize,

    /// Raw bytes in the trailing partial group
    pub tail_len: usize,
}

impl EncodingStats {
    /// Stats for a raw payload of `raw_len` bytes.
    pub fn for_raw_len(raw_len: usize) -> Self {
        Self {
            raw_len,
            packed_len: encode_length(raw_len),
            full_groups: raw_len / GROUP_BYTES,
            tail_len: raw_len % GROUP_BYTES,
        }
    }

    /// Stats for an encoded payload of `packed_len` units.
    ///
    /// # Errors
    /// Returns `DecodeError::InvalidLength` if no raw length encodes to `packed_len`.
    pub fn for_packed_len(packed_len: usize) -> Result<Self> {
        Ok(Self::for_raw_len(decode_length(packed_len)?))
    }

    /// Encoded size relative to raw size (packed / raw).
    ///
    /// Returns 0.0 for an empty payload.
    pub fn expansion_ratio(&self) -> f64 {
        if self.raw_len == 0 {
            0.0
        } else {
            self.packed_len as f64 / self.raw_len as f64
        }
    }

    /// Units added on top of the raw length.
    pub fn overhead(&self) -> usize {
        self.packed_len - self.raw_len
    }
}

impl fmt::Display for EncodingStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Raw bytes:     {}", self.raw_len)?;
        writeln!(f, "Encoded units: {}", self.packed_len)?;
        writeln!(f, "Full groups:   {}", self.full_groups)?;
        writeln!(f, "Tail bytes:    {}", self.tail_len)?;
        write!(f, "Expansion:     {:.1}%", self.expansion_ratio() * 100.0)
    }
}
