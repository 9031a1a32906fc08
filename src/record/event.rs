//! Event records
//!
//! An event reports a discrete state change of a host or service.

use alloc::string::String;
use alloc::vec::Vec;

use crate::fieldset::{Field, FieldSet};
use crate::record::{appended, encode_attributes, encode_tags, Attribute, Record, RecordKind};
use crate::wire::PayloadEncoder;

/// Optional fields of an [`Event`], in schema order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventField {
    /// Timestamp in milliseconds
    Time,
    /// Event key
    Key,
    /// Numeric value
    Value,
    /// Reporting host
    Host,
    /// State name (e.g. "ok", "critical")
    State,
    /// Free-form description
    Description,
    /// Time-to-live
    Ttl,
    /// Tag list
    Tags,
    /// Attribute list
    Attributes,
}

impl Field for EventField {
    const COUNT: usize = 9;

    const ALL: &'static [Self] = &[
        EventField::Time,
        EventField::Key,
        EventField::Value,
        EventField::Host,
        EventField::State,
        EventField::Description,
        EventField::Ttl,
        EventField::Tags,
        EventField::Attributes,
    ];

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

/// Wire field numbers of the `Event` message
mod fields {
    pub const TIME: u32 = 1;
    pub const KEY: u32 = 2;
    pub const VALUE: u32 = 3;
    pub const HOST: u32 = 4;
    pub const STATE: u32 = 5;
    pub const DESCRIPTION: u32 = 6;
    pub const TTL: u32 = 7;
    pub const TAGS: u32 = 8;
    pub const ATTRIBUTES: u32 = 9;
}

/// An immutable event record
///
/// # Example
///
/// ```
/// use ffwd_client::{Event, EventField, Record};
///
/// let event = Event::for_key("deploy")
///     .with_host("web-01")
///     .with_state("ok")
///     .with_ttl(300)
///     .with_tag("release")
///     .with_attribute("version", "1.4.2");
///
/// assert!(event.has(EventField::Ttl));
/// assert!(!event.has(EventField::Description));
/// assert!(!event.serialize().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Event {
    fields: FieldSet<EventField>,
    time: u64,
    key: String,
    value: f64,
    host: String,
    state: String,
    description: String,
    ttl: i64,
    tags: Vec<String>,
    attributes: Vec<Attribute>,
}

impl Event {
    /// Create an empty event with no field present
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an event with its key set
    #[inline]
    pub fn for_key(key: impl Into<String>) -> Self {
        Self::new().with_key(key)
    }

    /// Set the timestamp (milliseconds)
    #[must_use]
    pub fn with_time(&self, time: u64) -> Self {
        self.derive(EventField::Time, |e| e.time = time)
    }

    /// Set the key
    #[must_use]
    pub fn with_key(&self, key: impl Into<String>) -> Self {
        let key = key.into();
        self.derive(EventField::Key, |e| e.key = key)
    }

    /// Set the value
    #[must_use]
    pub fn with_value(&self, value: f64) -> Self {
        self.derive(EventField::Value, |e| e.value = value)
    }

    /// Set the host
    #[must_use]
    pub fn with_host(&self, host: impl Into<String>) -> Self {
        let host = host.into();
        self.derive(EventField::Host, |e| e.host = host)
    }

    /// Set the state
    #[must_use]
    pub fn with_state(&self, state: impl Into<String>) -> Self {
        let state = state.into();
        self.derive(EventField::State, |e| e.state = state)
    }

    /// Set the description
    #[must_use]
    pub fn with_description(&self, description: impl Into<String>) -> Self {
        let description = description.into();
        self.derive(EventField::Description, |e| e.description = description)
    }

    /// Set the time-to-live
    #[must_use]
    pub fn with_ttl(&self, ttl: i64) -> Self {
        self.derive(EventField::Ttl, |e| e.ttl = ttl)
    }

    /// Append a tag
    #[must_use]
    pub fn with_tag(&self, tag: impl Into<String>) -> Self {
        let tags = appended(&self.tags, tag.into());
        self.derive(EventField::Tags, |e| e.tags = tags)
    }

    /// Append an attribute pair
    #[must_use]
    pub fn with_attribute(&self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let attributes = appended(&self.attributes, Attribute::new(key, value));
        self.derive(EventField::Attributes, |e| e.attributes = attributes)
    }

    /// Check if a field was explicitly set
    #[inline]
    pub fn has(&self, field: EventField) -> bool {
        self.fields.contains(field)
    }

    /// Presence set of this event
    #[inline]
    pub fn fields(&self) -> FieldSet<EventField> {
        self.fields
    }

    /// Timestamp, if set
    pub fn time(&self) -> Option<u64> {
        self.has(EventField::Time).then_some(self.time)
    }

    /// Key, if set
    pub fn key(&self) -> Option<&str> {
        self.has(EventField::Key).then_some(self.key.as_str())
    }

    /// Value, if set
    pub fn value(&self) -> Option<f64> {
        self.has(EventField::Value).then_some(self.value)
    }

    /// Host, if set
    pub fn host(&self) -> Option<&str> {
        self.has(EventField::Host).then_some(self.host.as_str())
    }

    /// State, if set
    pub fn state(&self) -> Option<&str> {
        self.has(EventField::State).then_some(self.state.as_str())
    }

    /// Description, if set
    pub fn description(&self) -> Option<&str> {
        self.has(EventField::Description)
            .then_some(self.description.as_str())
    }

    /// Time-to-live, if set
    pub fn ttl(&self) -> Option<i64> {
        self.has(EventField::Ttl).then_some(self.ttl)
    }

    /// Tags in insertion order
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Attributes in insertion order
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    fn derive(&self, field: EventField, update: impl FnOnce(&mut Self)) -> Self {
        let mut next = self.clone();
        next.fields = next.fields.with(field);
        update(&mut next);
        next
    }
}

impl Record for Event {
    fn kind(&self) -> RecordKind {
        RecordKind::Event
    }

    fn encode_body(&self, enc: &mut PayloadEncoder) {
        let has = |field: EventField| self.fields.contains(field);

        if has(EventField::Time) {
            enc.put_uint64(fields::TIME, self.time);
        }
        if has(EventField::Key) {
            enc.put_string(fields::KEY, &self.key);
        }
        if has(EventField::Value) {
            enc.put_double(fields::VALUE, self.value);
        }
        if has(EventField::Host) {
            enc.put_string(fields::HOST, &self.host);
        }
        if has(EventField::State) {
            enc.put_string(fields::STATE, &self.state);
        }
        if has(EventField::Description) {
            enc.put_string(fields::DESCRIPTION, &self.description);
        }
        if has(EventField::Ttl) {
            enc.put_int64(fields::TTL, self.ttl);
        }
        if has(EventField::Tags) {
            encode_tags(enc, fields::TAGS, &self.tags);
        }
        if has(EventField::Attributes) {
            encode_attributes(enc, fields::ATTRIBUTES, &self.attributes);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_new_event_is_empty() {
        let event = Event::new();
        assert!(event.fields().is_empty());
        assert_eq!(event.key(), None);
        assert_eq!(event.serialize(), vec![0x12, 0x00]);
    }

    #[test]
    fn test_for_key_marks_key_present() {
        let event = Event::for_key("disk.full");
        assert!(event.has(EventField::Key));
        assert_eq!(event.key(), Some("disk.full"));
    }

    #[test]
    fn test_setter_does_not_mutate_receiver() {
        let base = Event::for_key("svc");
        let derived = base.with_state("critical").with_tag("a");

        assert!(!base.has(EventField::State));
        assert!(base.tags().is_empty());
        assert_eq!(derived.state(), Some("critical"));
        assert_eq!(derived.tags(), ["a"]);
    }

    #[test]
    fn test_zero_values_are_present() {
        let event = Event::new().with_value(0.0).with_ttl(0).with_host("");
        assert_eq!(event.value(), Some(0.0));
        assert_eq!(event.ttl(), Some(0));
        assert_eq!(event.host(), Some(""));
        assert_eq!(event.fields().len(), 3);
    }

    #[test]
    fn test_serialize_negative_ttl() {
        let event = Event::new().with_ttl(-1);
        let payload = event.serialize();

        // envelope: field 2, length 11; body: key 0x38 + 10 byte varint
        assert_eq!(payload[0], 0x12);
        assert_eq!(payload[1], 11);
        assert_eq!(payload[2], 0x38);
        assert_eq!(&payload[3..12], &[0xFF; 9]);
        assert_eq!(payload[12], 0x01);
    }

    #[test]
    fn test_serialize_field_order() {
        let event = Event::new()
            .with_ttl(5)
            .with_state("ok")
            .with_time(7)
            .with_key("k");

        let payload = event.serialize();
        assert_eq!(
            payload,
            vec![
                0x12, 0x0B, // envelope
                0x08, 0x07, // time
                0x12, 0x01, b'k', // key
                0x2A, 0x02, b'o', b'k', // state
                0x38, 0x05, // ttl
            ]
        );
    }

    #[test]
    fn test_tags_and_attributes_keep_order_and_duplicates() {
        let event = Event::new()
            .with_tag("b")
            .with_tag("a")
            .with_tag("b")
            .with_attribute("k", "1")
            .with_attribute("k", "2");

        assert_eq!(event.tags(), ["b", "a", "b"]);
        assert_eq!(
            event.attributes(),
            [Attribute::new("k", "1"), Attribute::new("k", "2")]
        );
    }
}
