//! Tests for the plaintext serializer and format names.

use crate::format::{FormatError, resolve_format};
use crate::{FormatKind, LineSerializer, PlaintextSerializer};

#[test]
fn single_line_record() {
    let lines = PlaintextSerializer.serialize("cpu usage=1").unwrap();
    assert_eq!(lines, vec!["cpu usage=1"]);
}

#[test]
fn multi_line_record_splits_into_lines() {
    let lines = PlaintextSerializer.serialize("a\nb\r\nc\n").unwrap();
    assert_eq!(lines, vec!["a", "b", "c"]);
}

#[test]
fn empty_record_yields_no_lines() {
    let lines = PlaintextSerializer.serialize("").unwrap();
    assert!(lines.is_empty());
}

#[test]
fn display_types_are_accepted() {
    let lines = PlaintextSerializer.serialize(&42).unwrap();
    assert_eq!(lines, vec!["42"]);
}

#[test]
fn format_names_parse() {
    assert_eq!(FormatKind::from_str("TEXT"), Some(FormatKind::Plaintext));
    assert_eq!(FormatKind::from_str("ndjson"), Some(FormatKind::Json));
    assert_eq!(FormatKind::from_str("influx"), None);
    assert_eq!(FormatKind::Json.to_string(), "json");
    assert!(matches!(resolve_format("xml"), Err(FormatError::UnknownFormat(_))));
    assert_eq!(resolve_format("plaintext").unwrap(), FormatKind::Plaintext);
}
