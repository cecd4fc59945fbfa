//! 8-to-7 bit repacking.
//!
//! Raw bytes are laid out as a dense stream of 7-bit cells: every group of
//! 7 raw bytes (56 bits) fills exactly 8 packed cells (56 bits). The high bit
//! of every cell is always zero.
//!
//! # Layout
//!
//! For raw ordinal `at`, with `offset = at % 7`:
//! - the low `7 - offset` bits go into cell `(at / 7) * 8 + offset`, above
//!   the `offset` bits already owned by the previous byte
//! - the remaining `offset + 1` high bits go into the low end of the next cell
//!
//! ```text
//! raw:    [ b0 ][ b1 ][ b2 ] ... [ b6 ]
//! cell 0:  b0[6:0]
//! cell 1:  b1[5:0] b0[7]
//! cell 2:  b2[4:0] b1[7:6]
//! ...
//! cell 7:  b6[7:1]
//! ```
//!
//! # Example
//! ```
//! use sigcodec_core::sevenbit::{pack, unpack, PackedWriter, PackedReader};
//!
//! let packed = pack(&[0xFF]);
//! assert_eq!(packed, vec![0x7F, 0x01]);
//! assert_eq!(unpack(&packed).unwrap(), vec![0xFF]);
//!
//! let mut writer = PackedWriter::new(2);
//! writer.write_byte(0xAB).unwrap();
//! writer.write_byte(0xCD).unwrap();
//! let cells = writer.finish();
//!
//! let mut reader = PackedReader::new(&cells).unwrap();
//! assert_eq!(reader.read_byte().unwrap(), 0xAB);
//! assert_eq!(reader.read_byte().unwrap(), 0xCD);
//! ```

use crate::error::{DecodeError, PackError, Result};

/// Raw bytes per group.
pub const GROUP_BYTES: usize = 7;

/// Packed cells per group.
pub const GROUP_CELLS: usize = 8;

/// Significant bits of a packed cell.
const CELL_MASK: u8 = 0x7F;

/// Number of packed cells needed for `raw_len` raw bytes.
///
/// A trailing partial group of `r` bytes needs `r + 1` cells.
pub fn encode_length(raw_len: usize) -> usize {
    let rem = raw_len % GROUP_BYTES;
    (raw_len / GROUP_BYTES) * GROUP_CELLS + if rem > 0 { rem + 1 } else { 0 }
}

/// Number of raw bytes carried by `packed_len` packed cells.
///
/// # Errors
/// Returns `DecodeError::InvalidLength` when `packed_len % 8 == 1`: a single
/// trailing cell cannot hold a whole byte, so no raw length packs to it.
pub fn decode_length(packed_len: usize) -> Result<usize> {
    let rem = packed_len % GROUP_CELLS;
    if rem == 1 {
        return Err(DecodeError::InvalidLength { length: packed_len }.into());
    }
    Ok((packed_len / GROUP_CELLS) * GROUP_BYTES + if rem > 0 { rem - 1 } else { 0 })
}

/// Cell position of raw ordinal `at`: (bit offset inside the start cell,
/// number of low bits stored there, start cell index).
#[inline]
fn cell_position(at: usize) -> (u32, u32, usize) {
    let offset = at % GROUP_BYTES;
    let start = (at / GROUP_BYTES) * GROUP_CELLS + offset;
    (offset as u32, (GROUP_BYTES - offset) as u32, start)
}

/// Pack `value` as raw ordinal `at` into `buffer`.
///
/// Only the bits owned by ordinal `at` are touched, so ordinals may be packed
/// in any order into a zeroed buffer.
///
/// # Panics
/// Panics if `buffer` is shorter than `encode_length(at + 1)`.
pub fn pack_byte(buffer: &mut [u8], at: usize, value: u8) {
    let (offset, low_bits, start) = cell_position(at);

    // Low bits sit above the `offset` bits owned by the previous ordinal
    let low_mask = CELL_MASK & !((1u8 << offset) - 1);
    let low = (value << offset) & low_mask;
    buffer[start] = (buffer[start] & !low_mask) | low;

    // High bits fill the bottom of the next cell
    let high_mask = (1u8 << (offset + 1)) - 1;
    let high = (value >> low_bits) & high_mask;
    buffer[start + 1] = (buffer[start + 1] & !high_mask) | high;
}

/// Extract raw ordinal `at` from `buffer`.
///
/// # Panics
/// Panics if `buffer` is shorter than `encode_length(at + 1)`.
pub fn unpack_byte(buffer: &[u8], at: usize) -> u8 {
    let (offset, low_bits, start) = cell_position(at);

    let low = (buffer[start] & CELL_MASK) >> offset;
    // Bits belonging to the following ordinal shift out of the byte
    let high = buffer[start + 1] << low_bits;
    high | low
}

/// Pack a whole raw buffer.
pub fn pack(raw: &[u8]) -> Vec<u8> {
    let mut cells = vec![0u8; encode_length(raw.len())];
    for (at, &value) in raw.iter().enumerate() {
        pack_byte(&mut cells, at, value);
    }
    cells
}

/// Unpack a whole packed buffer.
///
/// # Errors
/// Returns `DecodeError::InvalidLength` if `packed.len() % 8 == 1`.
pub fn unpack(packed: &[u8]) -> Result<Vec<u8>> {
    Ok(PackedReader::new(packed)?.read_to_end())
}

/// Packs raw bytes one ordinal at a time into a pre-sized cell buffer.
///
/// # Invariants
/// - `cells.len() == encode_length(capacity)`
/// - `written <= capacity`
#[derive(Debug, Clone)]
pub struct PackedWriter {
    /// Packed cells, zeroed on creation
    cells: Vec<u8>,
    /// Raw bytes the buffer was sized for
    capacity: usize,
    /// Raw bytes packed so far
    written: usize,
}

impl PackedWriter {
    /// Create a writer for exactly `raw_len` raw bytes.
    pub fn new(raw_len: usize) -> Self {
        Self {
            cells: vec![0u8; encode_length(raw_len)],
            capacity: raw_len,
            written: 0,
        }
    }

    /// Pack the next raw byte.
    ///
    /// # Errors
    /// Returns `PackError::CapacityExceeded` once `capacity` bytes have been written.
    pub fn write_byte(&mut self, value: u8) -> Result<()> {
        if self.written == self.capacity {
            return Err(PackError::CapacityExceeded {
                capacity: self.capacity,
            }
            .into());
        }
        pack_byte(&mut self.cells, self.written, value);
        self.written += 1;
        Ok(())
    }

    /// Pack every byte of `bytes`, stopping at the first failure.
    pub fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        for &value in bytes {
            self.write_byte(value)?;
        }
        Ok(())
    }

    /// Number of raw bytes packed so far.
    pub fn len(&self) -> usize {
        self.written
    }

    /// Check if nothing has been written yet.
    pub fn is_empty(&self) -> bool {
        self.written == 0
    }

    /// Number of raw bytes the writer was sized for.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Finish writing and return the packed cells.
    ///
    /// Ordinals that were never written stay zero.
    pub fn finish(self) -> Vec<u8> {
        self.cells
    }
}

/// Unpacks raw bytes one ordinal at a time from a packed cell buffer.
///
/// # Invariants
/// - `position <= raw_len`
#[derive(Debug, Clone)]
pub struct PackedReader<'a> {
    /// Source cells
    cells: &'a [u8],
    /// Raw bytes carried by `cells`
    raw_len: usize,
    /// Next raw ordinal to read
    position: usize,
}

impl<'a> PackedReader<'a> {
    /// Create a reader over `cells`.
    ///
    /// # Errors
    /// Returns `DecodeError::InvalidLength` if `cells.len() % 8 == 1`.
    pub fn new(cells: &'a [u8]) -> Result<Self> {
        Ok(Self {
            cells,
            raw_len: decode_length(cells.len())?,
            position: 0,
        })
    }

    /// Unpack the next raw byte.
    ///
    /// # Errors
    /// Returns `PackError::UnexpectedEnd` once every raw byte has been read.
    pub fn read_byte(&mut self) -> Result<u8> {
        if self.position >= self.raw_len {
            return Err(PackError::UnexpectedEnd.into());
        }
        let value = unpack_byte(self.cells, self.position);
        self.position += 1;
        Ok(value)
    }

    /// Unpack every remaining raw byte.
    pub fn read_to_end(&mut self) -> Vec<u8> {
        let out: Vec<u8> = (self.position..self.raw_len)
            .map(|at| unpack_byte(self.cells, at))
            .collect();
        self.position = self.raw_len;
        out
    }

    /// Total raw bytes carried by the buffer.
    pub fn raw_len(&self) -> usize {
        self.raw_len
    }

    /// Return the number of raw bytes not yet read.
    pub fn remaining(&self) -> usize {
        self.raw_len - self.position
    }

    /// Return the next raw ordinal.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Check if every raw byte has been read.
    pub fn is_empty(&self) -> bool {
        self.position >= self.raw_len
    }
}
