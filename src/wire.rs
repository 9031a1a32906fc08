//! Payload encoder for the record schema
//!
//! Writes protocol-buffers compatible tag/length/value fields into a growable
//! buffer. Only the three wire types used by the record schema are supported.

use alloc::vec::Vec;

use crate::error::{Error, Result};
use crate::varint;

/// Wire type carried in the low 3 bits of every field key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum WireType {
    /// LEB128 varint (uint64, int64)
    Varint = 0,
    /// 8 bytes little-endian (double)
    Fixed64 = 1,
    /// Varint length followed by bytes (string, nested message)
    LengthDelimited = 2,
}

impl WireType {
    /// Parse the wire type from the low bits of a field key
    #[inline]
    pub fn from_key(key: u64) -> Result<Self> {
        match key & 0x07 {
            0 => Ok(WireType::Varint),
            1 => Ok(WireType::Fixed64),
            2 => Ok(WireType::LengthDelimited),
            _ => Err(Error::InvalidWireType),
        }
    }
}

/// Encoder that appends fields to an owned buffer
#[derive(Debug, Clone, Default)]
pub struct PayloadEncoder {
    buf: Vec<u8>,
}

impl PayloadEncoder {
    /// Create an empty encoder
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an encoder with preallocated capacity
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Write a field key (field number + wire type)
    #[inline]
    pub fn put_key(&mut self, number: u32, wire_type: WireType) {
        let key = ((number as u64) << 3) | wire_type as u64;
        varint::encode_u64(key, &mut self.buf);
    }

    /// Write an unsigned varint field
    #[inline]
    pub fn put_uint64(&mut self, number: u32, value: u64) {
        self.put_key(number, WireType::Varint);
        varint::encode_u64(value, &mut self.buf);
    }

    /// Write a signed varint field (two's complement, not zigzag)
    #[inline]
    pub fn put_int64(&mut self, number: u32, value: i64) {
        self.put_uint64(number, value as u64);
    }

    /// Write a double as a fixed64 field (little-endian)
    #[inline]
    pub fn put_double(&mut self, number: u32, value: f64) {
        self.put_key(number, WireType::Fixed64);
        self.buf.extend_from_slice(&value.to_bits().to_le_bytes());
    }

    /// Write a length-delimited byte field
    #[inline]
    pub fn put_bytes(&mut self, number: u32, bytes: &[u8]) {
        self.put_key(number, WireType::LengthDelimited);
        varint::encode_u64(bytes.len() as u64, &mut self.buf);
        self.buf.extend_from_slice(bytes);
    }

    /// Write a string field
    #[inline]
    pub fn put_string(&mut self, number: u32, value: &str) {
        self.put_bytes(number, value.as_bytes());
    }

    /// Write a nested message field
    #[inline]
    pub fn put_message(&mut self, number: u32, message: &PayloadEncoder) {
        self.put_bytes(number, message.as_slice());
    }

    /// Number of bytes written so far
    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Check if nothing has been written
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Reset encoder for reuse, keeping its allocation
    #[inline]
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    /// Get a slice of the encoded data
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    /// Consume the encoder and return the encoded bytes
    #[inline]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_uint64() {
        let mut enc = PayloadEncoder::new();
        enc.put_uint64(2, 150);
        assert_eq!(enc.as_slice(), &[0x10, 0x96, 0x01]);
    }

    #[test]
    fn test_put_int64_negative() {
        let mut enc = PayloadEncoder::new();
        enc.put_int64(7, -1);
        // key + 10 byte varint
        assert_eq!(enc.len(), 11);
        assert_eq!(enc.as_slice()[0], 0x38);
        assert_eq!(enc.as_slice()[10], 0x01);
    }

    #[test]
    fn test_put_double() {
        let mut enc = PayloadEncoder::new();
        enc.put_double(4, 1.0);
        assert_eq!(
            enc.as_slice(),
            &[0x21, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xF0, 0x3F]
        );
    }

    #[test]
    fn test_put_string_and_empty_string() {
        let mut enc = PayloadEncoder::new();
        enc.put_string(3, "ab");
        enc.put_string(3, "");
        assert_eq!(enc.as_slice(), &[0x1A, 0x02, b'a', b'b', 0x1A, 0x00]);
    }

    #[test]
    fn test_put_message() {
        let mut inner = PayloadEncoder::new();
        inner.put_string(1, "k");

        let mut outer = PayloadEncoder::new();
        outer.put_message(7, &inner);
        assert_eq!(outer.as_slice(), &[0x3A, 0x03, 0x0A, 0x01, b'k']);
    }

    #[test]
    fn test_wire_type_from_key() {
        assert_eq!(WireType::from_key(0x08), Ok(WireType::Varint));
        assert_eq!(WireType::from_key(0x21), Ok(WireType::Fixed64));
        assert_eq!(WireType::from_key(0x1A), Ok(WireType::LengthDelimited));
        assert_eq!(WireType::from_key(0x0D), Err(Error::InvalidWireType));
    }
}
