//! Tests for the JSON lines serializer.

use serde::Serialize;

use crate::{JsonLinesSerializer, LineSerializer};

#[derive(Serialize)]
struct Metric {
    name: &'static str,
    value: f64,
}

#[test]
fn record_becomes_one_compact_line() {
    let lines = JsonLinesSerializer
        .serialize(&Metric {
            name: "cpu",
            value: 0.5,
        })
        .unwrap();

    assert_eq!(lines, vec![r#"{"name":"cpu","value":0.5}"#]);
}

#[test]
fn embedded_newlines_are_escaped() {
    let lines = JsonLinesSerializer.serialize("a\nb").unwrap();
    assert_eq!(lines, vec![r#""a\nb""#]);
}
