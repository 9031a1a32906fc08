//! Error types for the ffwd wire format

/// Errors that can occur while framing or inspecting payloads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Buffer too small for the operation
    ShortBuffer,
    /// Frame length exceeds the protocol buffer size
    Oversized,
    /// Unsupported protocol version
    UnsupportedVersion,
    /// Frame length field smaller than the header
    InvalidLength,
    /// Unexpected end of frame or payload data
    UnexpectedEof,
    /// Integer overflow in calculations
    Overflow,
    /// Unknown or unsupported wire type in a field key
    InvalidWireType,
    /// Field value does not have the expected wire type
    WireTypeMismatch,
    /// String field is not valid UTF-8
    InvalidUtf8,
    /// Payload does not contain a metric or event envelope
    UnknownRecord,
}

impl Error {
    /// Returns a human-readable description of the error
    pub const fn description(&self) -> &'static str {
        match self {
            Error::ShortBuffer => "buffer too small for operation",
            Error::Oversized => "frame exceeds maximum buffer size",
            Error::UnsupportedVersion => "unsupported protocol version",
            Error::InvalidLength => "frame length smaller than header",
            Error::UnexpectedEof => "unexpected end of data",
            Error::Overflow => "integer overflow in calculations",
            Error::InvalidWireType => "invalid wire type",
            Error::WireTypeMismatch => "field has unexpected wire type",
            Error::InvalidUtf8 => "string field is not valid UTF-8",
            Error::UnknownRecord => "payload is neither a metric nor an event",
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.description())
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// Result type alias for ffwd operations
pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_display_matches_description() {
        assert_eq!(
            Error::Oversized.to_string(),
            "frame exceeds maximum buffer size"
        );
        assert_eq!(
            Error::UnsupportedVersion.to_string(),
            Error::UnsupportedVersion.description()
        );
    }
}
