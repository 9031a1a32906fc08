//! Metric records

use alloc::string::String;
use alloc::vec::Vec;

use crate::fieldset::{Field, FieldSet};
use crate::record::{appended, encode_attributes, encode_tags, Attribute, Record, RecordKind};
use crate::wire::PayloadEncoder;

/// Optional fields of a [`Metric`], in schema order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricField {
    /// Reporting process or subsystem
    Proc,
    /// Timestamp in milliseconds
    Time,
    /// Metric key
    Key,
    /// Measured value
    Value,
    /// Reporting host
    Host,
    /// Tag list
    Tags,
    /// Attribute list
    Attributes,
}

impl Field for MetricField {
    const COUNT: usize = 7;

    const ALL: &'static [Self] = &[
        MetricField::Proc,
        MetricField::Time,
        MetricField::Key,
        MetricField::Value,
        MetricField::Host,
        MetricField::Tags,
        MetricField::Attributes,
    ];

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

/// Wire field numbers of the `Metric` message
mod fields {
    pub const PROC: u32 = 1;
    pub const TIME: u32 = 2;
    pub const KEY: u32 = 3;
    pub const VALUE: u32 = 4;
    pub const HOST: u32 = 5;
    pub const TAGS: u32 = 6;
    pub const ATTRIBUTES: u32 = 7;
}

/// An immutable metric record
///
/// # Example
///
/// ```
/// use ffwd_client::{Metric, MetricField};
///
/// let base = Metric::for_key("cpu.load").with_host("node1");
/// let sample = base.with_value(0.73);
///
/// assert!(sample.has(MetricField::Value));
/// assert!(!base.has(MetricField::Value));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Metric {
    fields: FieldSet<MetricField>,
    proc: String,
    time: u64,
    key: String,
    value: f64,
    host: String,
    tags: Vec<String>,
    attributes: Vec<Attribute>,
}

impl Metric {
    /// Create an empty metric with no field present
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a metric with its key set
    #[inline]
    pub fn for_key(key: impl Into<String>) -> Self {
        Self::new().with_key(key)
    }

    /// Set the reporting process
    #[must_use]
    pub fn with_proc(&self, proc: impl Into<String>) -> Self {
        let proc = proc.into();
        self.derive(MetricField::Proc, |m| m.proc = proc)
    }

    /// Set the timestamp (milliseconds)
    #[must_use]
    pub fn with_time(&self, time: u64) -> Self {
        self.derive(MetricField::Time, |m| m.time = time)
    }

    /// Set the key
    #[must_use]
    pub fn with_key(&self, key: impl Into<String>) -> Self {
        let key = key.into();
        self.derive(MetricField::Key, |m| m.key = key)
    }

    /// Set the value
    #[must_use]
    pub fn with_value(&self, value: f64) -> Self {
        self.derive(MetricField::Value, |m| m.value = value)
    }

    /// Set the host
    #[must_use]
    pub fn with_host(&self, host: impl Into<String>) -> Self {
        let host = host.into();
        self.derive(MetricField::Host, |m| m.host = host)
    }

    /// Append a tag
    #[must_use]
    pub fn with_tag(&self, tag: impl Into<String>) -> Self {
        let tags = appended(&self.tags, tag.into());
        self.derive(MetricField::Tags, |m| m.tags = tags)
    }

    /// Append an attribute pair
    #[must_use]
    pub fn with_attribute(&self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let attributes = appended(&self.attributes, Attribute::new(key, value));
        self.derive(MetricField::Attributes, |m| m.attributes = attributes)
    }

    /// Check if a field was explicitly set
    #[inline]
    pub fn has(&self, field: MetricField) -> bool {
        self.fields.contains(field)
    }

    /// Presence set of this metric
    #[inline]
    pub fn fields(&self) -> FieldSet<MetricField> {
        self.fields
    }

    /// Reporting process, if set
    pub fn proc(&self) -> Option<&str> {
        self.has(MetricField::Proc).then_some(self.proc.as_str())
    }

    /// Timestamp, if set
    pub fn time(&self) -> Option<u64> {
        self.has(MetricField::Time).then_some(self.time)
    }

    /// Key, if set
    pub fn key(&self) -> Option<&str> {
        self.has(MetricField::Key).then_some(self.key.as_str())
    }

    /// Value, if set
    pub fn value(&self) -> Option<f64> {
        self.has(MetricField::Value).then_some(self.value)
    }

    /// Host, if set
    pub fn host(&self) -> Option<&str> {
        self.has(MetricField::Host).then_some(self.host.as_str())
    }

    /// Tags in insertion order
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Attributes in insertion order
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    fn derive(&self, field: MetricField, update: impl FnOnce(&mut Self)) -> Self {
        let mut next = self.clone();
        next.fields = next.fields.with(field);
        update(&mut next);
        next
    }
}

impl Record for Metric {
    fn kind(&self) -> RecordKind {
        RecordKind::Metric
    }

    fn encode_body(&self, enc: &mut PayloadEncoder) {
        let has = |field: MetricField| self.fields.contains(field);

        if has(MetricField::Proc) {
            enc.put_string(fields::PROC, &self.proc);
        }
        if has(MetricField::Time) {
            enc.put_uint64(fields::TIME, self.time);
        }
        if has(MetricField::Key) {
            enc.put_string(fields::KEY, &self.key);
        }
        if has(MetricField::Value) {
            enc.put_double(fields::VALUE, self.value);
        }
        if has(MetricField::Host) {
            enc.put_string(fields::HOST, &self.host);
        }
        if has(MetricField::Tags) {
            encode_tags(enc, fields::TAGS, &self.tags);
        }
        if has(MetricField::Attributes) {
            encode_attributes(enc, fields::ATTRIBUTES, &self.attributes);
        }
    }
}
