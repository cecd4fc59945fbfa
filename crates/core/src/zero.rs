//! Zero-avoidance layer.
//!
//! Applied on top of the packed cells: every cell is shifted up by one,
//! modulo 128, so a packed zero becomes unit `0x01`. The mapping is a
//! bijection on `[0, 127]`, which means a packed `0x7F` wraps to unit `0x00`.
//! Encoders of this format leave that zero to the container (JVM classfiles
//! store it as the modified UTF-8 pair `0xC0 0x80`) rather than escaping it
//! here, and this layer keeps that behaviour so payloads stay byte-compatible.

/// Significant bits of a unit.
const UNIT_MASK: u8 = 0x7F;

/// First byte of the modified UTF-8 encoding of U+0000.
const ESCAPED_ZERO_LEAD: u8 = 0xC0;

/// Second byte of the modified UTF-8 encoding of U+0000.
const ESCAPED_ZERO_TRAIL: u8 = 0x80;

/// Map one packed cell to its output unit: `(cell + 1) mod 128`.
#[inline]
pub fn avoid_zero_cell(cell: u8) -> u8 {
    cell.wrapping_add(1) & UNIT_MASK
}

/// Map one output unit back to its packed cell: `(unit - 1) mod 128`.
#[inline]
pub fn restore_zero_cell(unit: u8) -> u8 {
    unit.wrapping_sub(1) & UNIT_MASK
}

/// Shift every packed cell up by one, in place.
pub fn avoid_zero(mut cells: Vec<u8>) -> Vec<u8> {
    for cell in &mut cells {
        *cell = avoid_zero_cell(*cell);
    }
    cells
}

/// Shift every unit back down by one, in place.
pub fn restore_zero(mut units: Vec<u8>) -> Vec<u8> {
    for unit in &mut units {
        *unit = restore_zero_cell(*unit);
    }
    units
}

/// Fold every `0xC0 0x80` pair back into a single `0x00` unit.
///
/// Raw container bytes written as modified UTF-8 carry U+0000 as this
/// two-byte pair. All other units, including a lone `0xC0`, pass through
/// unchanged so the decoder can still reject them.
pub fn unescape_zero(units: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(units.len());
    let mut iter = units.iter().copied().peekable();

    while let Some(unit) = iter.next() {
        if unit == ESCAPED_ZERO_LEAD && iter.peek() == Some(&ESCAPED_ZERO_TRAIL) {
            iter.next();
            out.push(0x00);
        } else {
            out.push(unit);
        }
    }

    out
}
