//! Variable-length integer encoding (LEB128)
//!
//! Used for field keys, length prefixes and integer fields of the payload.

use alloc::vec::Vec;

use crate::error::{Error, Result};

/// Maximum bytes needed for a u64 varint (10 bytes)
pub const MAX_VARINT_U64_SIZE: usize = 10;

/// Append a u64 as varint to the given buffer
///
/// Returns the number of bytes written.
#[inline]
pub fn encode_u64(value: u64, buf: &mut Vec<u8>) -> usize {
    let mut value = value;
    let mut written = 0;

    loop {
        written += 1;

        if value < 0x80 {
            buf.push(value as u8);
            return written;
        }

        buf.push((value as u8) | 0x80);
        value >>= 7;
    }
}

/// Number of bytes `value` occupies once varint-encoded
#[inline]
pub const fn encoded_len_u64(value: u64) -> usize {
    let bits = 64 - (value | 1).leading_zeros() as usize;
    (bits + 6) / 7
}

/// Decode a u64 varint from the given buffer
///
/// Returns (value, bytes_consumed) or an error.
#[inline]
pub fn decode_u64(buf: &[u8]) -> Result<(u64, usize)> {
    let mut result = 0u64;
    let mut shift = 0;
    let mut pos = 0;

    loop {
        if pos >= buf.len() {
            return Err(Error::UnexpectedEof);
        }

        if shift >= 64 {
            return Err(Error::Overflow);
        }

        let byte = buf[pos];
        pos += 1;

        // Tenth byte may only carry the top bit of a u64
        if shift == 63 && byte & 0x7E != 0 {
            return Err(Error::Overflow);
        }

        result |= ((byte & 0x7F) as u64) << shift;

        if byte & 0x80 == 0 {
            return Ok((result, pos));
        }

        shift += 7;
    }
}
