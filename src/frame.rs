//! Frame header and frame encoder
//!
//! Every datagram carries exactly one frame: an 8-byte big-endian header
//! followed by the payload.
//!
//! ```text
//! +-------------+-------------+------------------+
//! | Version u32 | Length u32  | Payload          |
//! +-------------+-------------+------------------+
//! ```
//!
//! `Length` counts the header too. Frames longer than [`BUFFER_SIZE`] are
//! never produced.

use alloc::vec;
use alloc::vec::Vec;

use crate::error::{Error, Result};
use crate::{BUFFER_SIZE, PROTOCOL_VERSION};

/// Frame header structure (8 bytes, big-endian)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    /// Protocol version
    pub version: u32,
    /// Total frame length, header included
    pub length: u32,
}

impl Default for FrameHeader {
    fn default() -> Self {
        Self {
            version: PROTOCOL_VERSION,
            length: Self::SIZE as u32,
        }
    }
}

impl FrameHeader {
    /// Header size in bytes (fixed)
    pub const SIZE: usize = 8;

    /// Header for a payload of `payload_len` bytes
    ///
    /// Fails with [`Error::Oversized`] if the frame would exceed
    /// [`BUFFER_SIZE`].
    #[inline]
    pub fn for_payload(payload_len: usize) -> Result<Self> {
        let length = payload_len
            .checked_add(Self::SIZE)
            .ok_or(Error::Overflow)?;

        if length > BUFFER_SIZE {
            return Err(Error::Oversized);
        }

        Ok(Self {
            version: PROTOCOL_VERSION,
            length: length as u32,
        })
    }

    /// Validate frame header
    #[inline]
    pub fn validate(&self) -> Result<()> {
        if self.version != PROTOCOL_VERSION {
            return Err(Error::UnsupportedVersion);
        }

        if (self.length as usize) < Self::SIZE {
            return Err(Error::InvalidLength);
        }

        Ok(())
    }

    /// Payload length implied by the header
    #[inline]
    pub fn payload_len(&self) -> usize {
        (self.length as usize).saturating_sub(Self::SIZE)
    }

    /// Encode header to bytes (big-endian)
    #[inline]
    pub fn encode(&self, buf: &mut [u8]) -> Result<()> {
        if buf.len() < Self::SIZE {
            return Err(Error::ShortBuffer);
        }

        buf[0..4].copy_from_slice(&self.version.to_be_bytes());
        buf[4..8].copy_from_slice(&self.length.to_be_bytes());

        Ok(())
    }

    /// Decode header from bytes (big-endian)
    #[inline]
    pub fn decode(buf: &[u8]) -> Result<Self> {
        if buf.len() < Self::SIZE {
            return Err(Error::UnexpectedEof);
        }

        let header = Self {
            version: u32::from_be_bytes([buf[0], buf[1], buf[2], buf[3]]),
            length: u32::from_be_bytes([buf[4], buf[5], buf[6], buf[7]]),
        };

        header.validate()?;
        Ok(header)
    }
}

/// Frame encoder that writes into a user-provided buffer
pub struct FrameEncoder<'a> {
    buf: &'a mut [u8],
}

impl<'a> FrameEncoder<'a> {
    /// Create new encoder with the given buffer
    #[inline]
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf }
    }

    /// Write header and payload, returning the frame length
    ///
    /// Nothing is written when the frame is oversized or does not fit.
    #[inline]
    pub fn encode(&mut self, payload: &[u8]) -> Result<usize> {
        let header = FrameHeader::for_payload(payload.len())?;
        let length = header.length as usize;

        if self.buf.len() < length {
            return Err(Error::ShortBuffer);
        }

        header.encode(&mut self.buf[..FrameHeader::SIZE])?;
        self.buf[FrameHeader::SIZE..length].copy_from_slice(payload);

        Ok(length)
    }
}

/// Encode a payload into a newly allocated frame
pub fn encode_frame(payload: &[u8]) -> Result<Vec<u8>> {
    let header = FrameHeader::for_payload(payload.len())?;
    let mut frame = vec![0u8; header.length as usize];
    FrameEncoder::new(&mut frame).encode(payload)?;
    Ok(frame)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_encode_decode() {
        let header = FrameHeader {
            version: 0,
            length: 0x0102,
        };

        let mut buf = [0u8; FrameHeader::SIZE];
        header.encode(&mut buf).unwrap();
        assert_eq!(buf, [0, 0, 0, 0, 0, 0, 0x01, 0x02]);

        let decoded = FrameHeader::decode(&buf).unwrap();
        assert_eq!(header, decoded);
        assert_eq!(decoded.payload_len(), 0x0102 - 8);
    }

    #[test]
    fn test_header_validation() {
        let mut header = FrameHeader::default();
        assert!(header.validate().is_ok());

        header.version = 1;
        assert_eq!(header.validate(), Err(Error::UnsupportedVersion));
        header.version = PROTOCOL_VERSION;

        header.length = 7;
        assert_eq!(header.validate(), Err(Error::InvalidLength));
    }

    #[test]
    fn test_encode_frame_layout() {
        let frame = encode_frame(b"abc").unwrap();
        assert_eq!(frame, [0, 0, 0, 0, 0, 0, 0, 11, b'a', b'b', b'c']);
    }

    #[test]
    fn test_empty_payload() {
        let frame = encode_frame(&[]).unwrap();
        assert_eq!(frame, [0, 0, 0, 0, 0, 0, 0, 8]);
    }

    #[test]
    fn test_size_bound() {
        let max_payload = vec![0x55u8; BUFFER_SIZE - FrameHeader::SIZE];
        let frame = encode_frame(&max_payload).unwrap();
        assert_eq!(frame.len(), BUFFER_SIZE);
        assert_eq!(&frame[4..8], &(BUFFER_SIZE as u32).to_be_bytes());

        let too_big = vec![0x55u8; BUFFER_SIZE - FrameHeader::SIZE + 1];
        assert_eq!(encode_frame(&too_big), Err(Error::Oversized));
    }

    #[test]
    fn test_encoder_leaves_buffer_untouched_on_error() {
        let mut buf = [0xAAu8; BUFFER_SIZE];
        let payload = vec![0u8; BUFFER_SIZE];
        let mut encoder = FrameEncoder::new(&mut buf);
        assert_eq!(encoder.encode(&payload), Err(Error::Oversized));
        assert!(buf.iter().all(|&b| b == 0xAA));
    }

    #[test]
    fn test_encoder_buffer_too_small() {
        let mut buf = [0u8; 10];
        let mut encoder = FrameEncoder::new(&mut buf);
        assert_eq!(encoder.encode(b"abc"), Err(Error::ShortBuffer));
    }
}
