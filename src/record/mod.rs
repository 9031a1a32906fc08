//! Telemetry records
//!
//! [`Event`] and [`Metric`] are immutable values. Every `with_*` call returns
//! a new record with the field stored and its presence bit added; the
//! receiver is left untouched. Serialization emits only present fields, in
//! the fixed schema order of the record kind, wrapped in the message envelope
//! the collector expects.

use alloc::string::String;
use alloc::vec::Vec;

use crate::wire::PayloadEncoder;

mod event;
mod metric;

pub use event::{Event, EventField};
pub use metric::{Metric, MetricField};

/// Envelope field numbers
pub(crate) mod envelope {
    /// `Message.metric`
    pub const METRIC: u32 = 1;
    /// `Message.event`
    pub const EVENT: u32 = 2;
}

/// `Attribute` message field numbers
pub(crate) mod attribute_fields {
    pub const KEY: u32 = 1;
    pub const VALUE: u32 = 2;
}

/// Kind of record carried by a payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    /// Numeric measurement
    Metric,
    /// Discrete state change
    Event,
}

impl RecordKind {
    /// Envelope field number used for this kind
    #[inline]
    pub const fn envelope_field(&self) -> u32 {
        match self {
            RecordKind::Metric => envelope::METRIC,
            RecordKind::Event => envelope::EVENT,
        }
    }

    /// Resolve an envelope field number
    #[inline]
    pub const fn from_envelope_field(number: u32) -> Option<Self> {
        match number {
            envelope::METRIC => Some(RecordKind::Metric),
            envelope::EVENT => Some(RecordKind::Event),
            _ => None,
        }
    }
}

/// Key/value attribute attached to a record
///
/// Attributes keep insertion order; duplicate keys are kept as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Attribute {
    /// Attribute key (may be empty)
    pub key: String,
    /// Attribute value
    pub value: String,
}

impl Attribute {
    /// Create a new attribute
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A record that can be written to the collector
pub trait Record {
    /// Kind of this record
    fn kind(&self) -> RecordKind;

    /// Encode the record body (present fields only, schema order)
    fn encode_body(&self, enc: &mut PayloadEncoder);

    /// Serialize into a self-contained payload, envelope included
    ///
    /// Deterministic: the same record always yields the same bytes.
    fn serialize(&self) -> Vec<u8> {
        let mut body = PayloadEncoder::new();
        self.encode_body(&mut body);

        let mut message = PayloadEncoder::with_capacity(body.len() + 4);
        message.put_message(self.kind().envelope_field(), &body);
        message.into_bytes()
    }
}

/// Write tags as a repeated string field
pub(crate) fn encode_tags(enc: &mut PayloadEncoder, number: u32, tags: &[String]) {
    for tag in tags {
        enc.put_string(number, tag);
    }
}

/// Write attributes as a repeated nested message field
pub(crate) fn encode_attributes(enc: &mut PayloadEncoder, number: u32, attributes: &[Attribute]) {
    let mut pair = PayloadEncoder::new();
    for attribute in attributes {
        pair.clear();
        pair.put_string(attribute_fields::KEY, &attribute.key);
        pair.put_string(attribute_fields::VALUE, &attribute.value);
        enc.put_message(number, &pair);
    }
}

/// Copy `items` and append `item` at the end
pub(crate) fn appended<T: Clone>(items: &[T], item: T) -> Vec<T> {
    let mut copy = Vec::with_capacity(items.len() + 1);
    copy.extend_from_slice(items);
    copy.push(item);
    copy
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_kind_envelope_fields() {
        assert_eq!(RecordKind::Metric.envelope_field(), 1);
        assert_eq!(RecordKind::Event.envelope_field(), 2);
        assert_eq!(RecordKind::from_envelope_field(1), Some(RecordKind::Metric));
        assert_eq!(RecordKind::from_envelope_field(2), Some(RecordKind::Event));
        assert_eq!(RecordKind::from_envelope_field(3), None);
    }

    #[test]
    fn test_appended_leaves_source_untouched() {
        let source = alloc::vec![1, 2];
        let copy = appended(&source, 2);
        assert_eq!(source, [1, 2]);
        assert_eq!(copy, [1, 2, 2]);
    }

    #[test]
    fn test_encode_attributes_keeps_duplicates() {
        let attrs = [Attribute::new("a", "1"), Attribute::new("a", "2")];
        let mut enc = PayloadEncoder::new();
        encode_attributes(&mut enc, 7, &attrs);
        assert_eq!(
            enc.as_slice(),
            &[
                0x3A, 0x06, 0x0A, 0x01, b'a', 0x12, 0x01, b'1', //
                0x3A, 0x06, 0x0A, 0x01, b'a', 0x12, 0x01, b'2',
            ]
        );
    }
}
