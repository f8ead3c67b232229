//! Base-128 variable-length integers
//!
//! Each byte carries 7 value bits, least significant group first; the high
//! bit marks that another byte follows.
//!
//! Decoding stops once the running shift reaches 32, even if the last byte
//! read still has its continuation bit set. At most five bytes are consumed
//! per value and any byte after the fifth belongs to the next field. Existing
//! index files are read with exactly this rule, so it is kept as-is.

use crate::cursor::Cursor;
use crate::Result;

/// Continuation flag
const MORE: u8 = 0x80;

/// Shift at which accumulation stops
const SHIFT_CAP: u32 = 32;

/// Maximum bytes a single value can occupy
pub const MAX_LEN: usize = 5;

/// Decode one varint from the cursor
///
/// The fifth byte contributes its full 7 bits, so the largest decodable
/// value is `2^35 - 1`.
pub fn decode(cursor: &mut Cursor<'_>) -> Result<u64> {
    let mut byte = cursor.read_u8()?;
    let mut value = u64::from(byte & !MORE);
    let mut shift = 7;

    while byte & MORE != 0 && shift < SHIFT_CAP {
        byte = cursor.read_u8()?;
        value |= u64::from(byte & !MORE) << shift;
        shift += 7;
    }

    Ok(value)
}
