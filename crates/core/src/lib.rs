//! sigcodec-core: 7-bit zero-avoiding codec for binary metadata in text containers
//!
//! Containers that only accept short 7-bit strings (such as annotation
//! constants in JVM classfiles) cannot hold arbitrary bytes. This library
//! maps any byte sequence to a string of 7-bit units and back:
//! - Repacks 8-bit bytes into 7-bit cells (7 bytes become 8 cells)
//! - Shifts each cell up by one, modulo 128, to keep zero cells out of the text
//! - Inverts both steps exactly, rejecting text no encoder could have produced
//!
//! # Architecture
//!
//! - `sevenbit`: 8-to-7 bit repacking and the length arithmetic
//! - `zero`: the zero-avoidance shift and escaped-zero folding
//! - `codec`: public encode/decode/validate entry points
//! - `stats`: size accounting for payloads and their encodings
//!
//! # Example
//! ```
//! let text = sigcodec_core::encode(b"Lscala/Option;");
//! assert!(sigcodec_core::is_valid_encoding(&text));
//! assert_eq!(sigcodec_core::decode(&text).unwrap(), b"Lscala/Option;");
//! ```

pub mod codec;
pub mod error;
pub mod sevenbit;
pub mod stats;
pub mod zero;

// Re-export commonly used types
pub use codec::{decode, decode_units, encode, encode_units, is_valid_encoding, is_valid_units};
pub use error::{DecodeError, Error, PackError, Result};
pub use sevenbit::{decode_length, encode_length};
pub use stats::EncodingStats;
pub use zero::unescape_zero;
