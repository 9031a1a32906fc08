//! Zero-copy frame and payload inspection
//!
//! The decoder operates on borrowed slices. It is the inverse of the frame
//! encoder and the payload encoder, and is used to check what actually goes
//! on the wire.

use crate::error::{Error, Result};
use crate::frame::FrameHeader;
use crate::record::RecordKind;
use crate::varint;
use crate::wire::WireType;

/// Zero-copy frame decoder
#[derive(Debug)]
pub struct FrameDecoder<'a> {
    buf: &'a [u8],
}

impl<'a> FrameDecoder<'a> {
    /// Create new decoder for the given buffer
    #[inline]
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf }
    }

    /// Decode and validate the frame header
    #[inline]
    pub fn header(&self) -> Result<FrameHeader> {
        FrameHeader::decode(self.buf)
    }

    /// Payload bytes, bounded by the header length
    #[inline]
    pub fn payload(&self) -> Result<&'a [u8]> {
        let header = self.header()?;
        let end = header.length as usize;

        if self.buf.len() < end {
            return Err(Error::UnexpectedEof);
        }

        Ok(&self.buf[FrameHeader::SIZE..end])
    }

    /// Unwrap the message envelope
    ///
    /// Returns the record kind and a cursor over the record's fields.
    pub fn record(&self) -> Result<(RecordKind, FieldCursor<'a>)> {
        let mut envelope = FieldCursor::new(self.payload()?);
        let field = envelope.next_field()?.ok_or(Error::UnknownRecord)?;
        let kind = RecordKind::from_envelope_field(field.number).ok_or(Error::UnknownRecord)?;
        Ok((kind, field.value.as_message()?))
    }
}

/// Value of a single field as found on the wire
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WireValue<'a> {
    /// Varint-encoded integer
    Varint(u64),
    /// Raw 64-bit little-endian value
    Fixed64(u64),
    /// Length-delimited bytes
    Bytes(&'a [u8]),
}

impl<'a> WireValue<'a> {
    /// Unsigned integer value
    pub fn as_u64(&self) -> Result<u64> {
        match *self {
            WireValue::Varint(v) => Ok(v),
            _ => Err(Error::WireTypeMismatch),
        }
    }

    /// Signed integer value (two's complement)
    pub fn as_i64(&self) -> Result<i64> {
        self.as_u64().map(|v| v as i64)
    }

    /// Double value
    pub fn as_f64(&self) -> Result<f64> {
        match *self {
            WireValue::Fixed64(bits) => Ok(f64::from_bits(bits)),
            _ => Err(Error::WireTypeMismatch),
        }
    }

    /// Raw bytes of a length-delimited field
    pub fn as_bytes(&self) -> Result<&'a [u8]> {
        match *self {
            WireValue::Bytes(b) => Ok(b),
            _ => Err(Error::WireTypeMismatch),
        }
    }

    /// UTF-8 string value
    pub fn as_str(&self) -> Result<&'a str> {
        core::str::from_utf8(self.as_bytes()?).map_err(|_| Error::InvalidUtf8)
    }

    /// Cursor over a nested message
    pub fn as_message(&self) -> Result<FieldCursor<'a>> {
        self.as_bytes().map(FieldCursor::new)
    }
}

/// A decoded field: number and value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WireField<'a> {
    /// Field number from the schema
    pub number: u32,
    /// Field value
    pub value: WireValue<'a>,
}

/// Cursor for reading payload fields with position tracking
#[derive(Debug, Clone)]
pub struct FieldCursor<'a> {
    /// Buffer containing the encoded fields
    pub buf: &'a [u8],
    /// Current read position
    pub pos: usize,
}

impl<'a> FieldCursor<'a> {
    /// Create a cursor at the start of `buf`
    #[inline]
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Get remaining bytes in cursor
    #[inline]
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Check if cursor is at end
    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.pos >= self.buf.len()
    }

    /// Read the next field, or `None` at the end of the buffer
    pub fn next_field(&mut self) -> Result<Option<WireField<'a>>> {
        if self.is_at_end() {
            return Ok(None);
        }

        let key = self.get_varint()?;
        let number = u32::try_from(key >> 3).map_err(|_| Error::Overflow)?;

        let value = match WireType::from_key(key)? {
            WireType::Varint => WireValue::Varint(self.get_varint()?),
            WireType::Fixed64 => {
                let bytes = self.take(8)?;
                let mut raw = [0u8; 8];
                raw.copy_from_slice(bytes);
                WireValue::Fixed64(u64::from_le_bytes(raw))
            }
            WireType::LengthDelimited => {
                let len = usize::try_from(self.get_varint()?).map_err(|_| Error::Overflow)?;
                WireValue::Bytes(self.take(len)?)
            }
        };

        Ok(Some(WireField { number, value }))
    }

    fn get_varint(&mut self) -> Result<u64> {
        let (value, len) = varint::decode_u64(&self.buf[self.pos..])?;
        self.pos += len;
        Ok(value)
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        if self.remaining() < n {
            return Err(Error::UnexpectedEof);
        }
        let bytes = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }
}

impl<'a> Iterator for FieldCursor<'a> {
    type Item = Result<WireField<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_field() {
            Ok(field) => field.map(Ok),
            Err(e) => {
                // Stop after the first error
                self.pos = self.buf.len();
                Some(Err(e))
            }
        }
    }
}
