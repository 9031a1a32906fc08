//! Property tests for record presence tracking and framing

use ffwd_client::*;
use proptest::prelude::*;

/// A single metric setter call
#[derive(Debug, Clone)]
enum MetricOp {
    Proc(String),
    Time(u64),
    Key(String),
    Value(f64),
    Host(String),
    Tag(String),
    Attribute(String, String),
}

impl MetricOp {
    fn apply(&self, metric: &Metric) -> Metric {
        match self {
            MetricOp::Proc(p) => metric.with_proc(p.as_str()),
            MetricOp::Time(t) => metric.with_time(*t),
            MetricOp::Key(k) => metric.with_key(k.as_str()),
            MetricOp::Value(v) => metric.with_value(*v),
            MetricOp::Host(h) => metric.with_host(h.as_str()),
            MetricOp::Tag(t) => metric.with_tag(t.as_str()),
            MetricOp::Attribute(k, v) => metric.with_attribute(k.as_str(), v.as_str()),
        }
    }

    fn field(&self) -> MetricField {
        match self {
            MetricOp::Proc(_) => MetricField::Proc,
            MetricOp::Time(_) => MetricField::Time,
            MetricOp::Key(_) => MetricField::Key,
            MetricOp::Value(_) => MetricField::Value,
            MetricOp::Host(_) => MetricField::Host,
            MetricOp::Tag(_) => MetricField::Tags,
            MetricOp::Attribute(_, _) => MetricField::Attributes,
        }
    }
}

fn metric_op() -> impl Strategy<Value = MetricOp> {
    let text = "[a-z0-9.]{0,12}";
    prop_oneof![
        text.prop_map(MetricOp::Proc),
        any::<u64>().prop_map(MetricOp::Time),
        text.prop_map(MetricOp::Key),
        any::<f64>().prop_map(MetricOp::Value),
        text.prop_map(MetricOp::Host),
        text.prop_map(MetricOp::Tag),
        (text, text).prop_map(|(k, v)| MetricOp::Attribute(k, v)),
    ]
}

fn build(ops: &[MetricOp]) -> Metric {
    ops.iter().fold(Metric::new(), |m, op| op.apply(&m))
}

proptest! {
    #[test]
    fn presence_is_union_of_set_fields(ops in prop::collection::vec(metric_op(), 0..16)) {
        let metric = build(&ops);
        let expected: FieldSet<MetricField> = ops.iter().map(MetricOp::field).collect();
        prop_assert_eq!(metric.fields(), expected);
    }

    #[test]
    fn presence_is_order_independent(ops in prop::collection::vec(metric_op(), 0..16)) {
        let mut reversed = ops.clone();
        reversed.reverse();
        prop_assert_eq!(build(&ops).fields(), build(&reversed).fields());
    }

    #[test]
    fn setters_never_mutate_receiver(
        ops in prop::collection::vec(metric_op(), 0..8),
        op in metric_op(),
    ) {
        let base = build(&ops);
        let snapshot = base.clone();
        let bytes = base.serialize();

        let _derived = op.apply(&base);

        prop_assert_eq!(base.fields(), snapshot.fields());
        prop_assert_eq!(base.tags(), snapshot.tags());
        prop_assert_eq!(base.attributes(), snapshot.attributes());
        prop_assert_eq!(base.serialize(), bytes);
    }

    #[test]
    fn serialization_is_deterministic(ops in prop::collection::vec(metric_op(), 0..16)) {
        let metric = build(&ops);
        prop_assert_eq!(metric.serialize(), metric.serialize());
    }

    #[test]
    fn only_present_fields_are_emitted(ops in prop::collection::vec(metric_op(), 0..16)) {
        let metric = build(&ops);
        let frame = frame::encode_frame(&metric.serialize());

        // Small records always fit in a frame
        let frame = frame.unwrap();
        let (kind, cursor) = FrameDecoder::new(&frame).record().unwrap();
        prop_assert_eq!(kind, RecordKind::Metric);

        let mut last = 0u32;
        for field in cursor {
            let field = field.unwrap();
            // numbers are non-decreasing: canonical order
            prop_assert!(field.number >= last);
            last = field.number;

            let present = MetricField::ALL[(field.number - 1) as usize];
            prop_assert!(metric.has(present));
        }
    }

    #[test]
    fn tags_keep_insertion_order(tags in prop::collection::vec("[a-c]{0,2}", 0..10)) {
        let event = tags.iter().fold(Event::new(), |e, t| e.with_tag(t.as_str()));
        prop_assert_eq!(event.tags(), tags.as_slice());
        prop_assert_eq!(event.has(EventField::Tags), !tags.is_empty());
    }

    #[test]
    fn frame_header_matches_payload(len in 0usize..4096) {
        let payload = vec![0xA5u8; len];
        match frame::encode_frame(&payload) {
            Ok(frame) => {
                prop_assert!(len + FrameHeader::SIZE <= BUFFER_SIZE);
                prop_assert_eq!(&frame[0..4], &[0u8, 0, 0, 0]);
                prop_assert_eq!(&frame[4..8], &((len + 8) as u32).to_be_bytes());
                prop_assert_eq!(&frame[8..], payload.as_slice());
            }
            Err(e) => {
                prop_assert!(len + FrameHeader::SIZE > BUFFER_SIZE);
                prop_assert_eq!(e, Error::Oversized);
            }
        }
    }
}
