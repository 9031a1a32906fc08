//! ffwd-client: fire-and-forget telemetry for the ffwd collector
//!
//! This crate builds immutable event and metric records, encodes them into
//! a compact payload and ships each one as a single UDP datagram. There is
//! no acknowledgment, retry or reconnect: losing a sample is preferred over
//! blocking the instrumented process.
//!
//! # Frame Format
//!
//! ```text
//! +-------------+-------------+----------------------------------+
//! | Version u32 | Length u32  | Payload (Length - 8 bytes)       |
//! +-------------+-------------+----------------------------------+
//! ```
//!
//! Both header fields are big-endian; the version is currently 0 and the
//! length includes the header. Frames longer than [`BUFFER_SIZE`] bytes are
//! never sent.
//!
//! # Features
//!
//! - Presence tracking: a field set to zero is sent, an unset field is not
//! - Persistent builders: every `with_*` call returns a new record
//! - Canonical field order, byte-identical output for identical records
//! - `no_std` support with `alloc` (the UDP [`Client`] requires `std`)
//!
//! # Example
//!
//! ```rust
//! use ffwd_client::*;
//!
//! let metric = Metric::for_key("cpu.load")
//!     .with_host("node1")
//!     .with_value(0.73)
//!     .with_attribute("role", "db");
//!
//! let frame = frame::encode_frame(&metric.serialize())?;
//! assert_eq!(&frame[0..4], &PROTOCOL_VERSION.to_be_bytes());
//! assert_eq!(&frame[4..8], &(frame.len() as u32).to_be_bytes());
//! # Ok::<(), ffwd_client::Error>(())
//! ```

#![no_std]
#![deny(unsafe_code)]
#![warn(missing_docs)]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

pub mod config;
pub mod decoder;
pub mod error;
pub mod fieldset;
pub mod frame;
pub mod record;
pub mod varint;
pub mod wire;

#[cfg(feature = "std")]
pub mod client;

// Re-export main types
#[cfg(feature = "std")]
pub use client::{Client, SendOutcome};
pub use config::ClientConfig;
pub use decoder::{FieldCursor, FrameDecoder, WireField, WireValue};
pub use error::Error;
pub use fieldset::{Field, FieldSet};
pub use frame::{FrameEncoder, FrameHeader};
pub use record::{Attribute, Event, EventField, Metric, MetricField, Record, RecordKind};

/// Current protocol version
pub const PROTOCOL_VERSION: u32 = 0;

/// Maximum frame size, header included
pub const BUFFER_SIZE: usize = 2048;
