//! Error types for the sigcodec library.
//!
//! Encoding is total and never fails. Decoding and the packed cursors return
//! structured errors so callers can tell a corrupted payload apart from a
//! truncated one.

use thiserror::Error;

/// Top-level error type for all fallible operations in the library.
///
/// Each variant corresponds to a specific failure domain:
/// - Decode: the encoded text cannot be the output of `encode`
/// - Pack: a packed cursor was driven past its bounds
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Encoded text was rejected before any output was produced
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Packed buffer cursor misuse (writing past capacity, reading past end)
    #[error("packing error: {0}")]
    Pack(#[from] PackError),
}

/// Reasons an encoded text is rejected.
///
/// Callers should treat any of these as "do not trust this payload".
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// A unit outside the 7-bit range was found
    #[error("invalid character {code:#x} at position {position}")]
    InvalidCharacter { position: usize, code: u32 },

    /// No raw byte count packs to this many cells (length % 8 == 1)
    #[error("invalid encoded length {length}: a single trailing cell cannot hold a byte")]
    InvalidLength { length: usize },
}

/// Packed cursor errors.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PackError {
    /// The writer was sized for `capacity` raw bytes and is already full
    #[error("packed writer full: capacity is {capacity} bytes")]
    CapacityExceeded { capacity: usize },

    /// Attempted to read past the last raw byte in the packed buffer
    #[error("unexpected end of packed stream")]
    UnexpectedEnd,
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;
