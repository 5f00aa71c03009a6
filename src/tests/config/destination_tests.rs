//! Tests for destination parsing and template resolution.

use std::path::PathBuf;

use chrono::{TimeZone, Utc};

use crate::{Destination, ResolveError};

#[test]
fn stdout_sentinel_is_an_exact_match() {
    assert_eq!(Destination::parse("stdout"), Destination::Stdout);
    assert!(!Destination::parse("STDOUT").is_stdout());
    assert_eq!(
        Destination::parse("./stdout"),
        Destination::TimestampedFile {
            template: "./stdout".into()
        }
    );
}

#[test]
fn template_round_trips_through_display() {
    let d = Destination::parse("/var/log/m-%Y%m%d");
    assert_eq!(d.template(), "/var/log/m-%Y%m%d");
    assert_eq!(d.to_string(), "/var/log/m-%Y%m%d");
    assert_eq!(Destination::Stdout.to_string(), "stdout");
}

#[test]
fn resolve_substitutes_utc_time() {
    let now = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 3).unwrap();
    let d = Destination::parse("/tmp/metrics-%Y%m%d-%H%M%S");

    assert_eq!(
        d.resolve(now).unwrap(),
        Some(PathBuf::from("/tmp/metrics-20240309-070503"))
    );
}

#[test]
fn literal_path_resolves_to_itself() {
    let now = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 3).unwrap();
    let d = Destination::parse("/tmp/metrics.out");

    assert_eq!(d.resolve(now).unwrap(), Some(PathBuf::from("/tmp/metrics.out")));
}

#[test]
fn escaped_percent_is_kept_literal() {
    let now = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 3).unwrap();
    let d = Destination::parse("/tmp/100%%-%Y");

    assert_eq!(d.resolve(now).unwrap(), Some(PathBuf::from("/tmp/100%-2024")));
}

#[test]
fn stdout_has_no_path() {
    let now = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 3).unwrap();
    assert_eq!(Destination::Stdout.resolve(now).unwrap(), None);
}

#[test]
fn invalid_directive_is_a_resolve_error() {
    let now = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 3).unwrap();
    let err = Destination::parse("/tmp/bad-%Q").resolve(now).unwrap_err();

    assert!(matches!(err, ResolveError::InvalidDirective { .. }));
    assert!(err.to_string().contains("/tmp/bad-%Q"));
}

#[test]
fn empty_template_is_a_resolve_error() {
    let now = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 3).unwrap();
    let err = Destination::parse("").resolve(now).unwrap_err();

    assert!(matches!(err, ResolveError::EmptyPath { .. }));
}
