//! Tests for CLI destination token handling.

use std::sync::Arc;

use chrono::{TimeZone, Utc};

use crate::cli::{OutputArgs, normalize_output};
use crate::{InMemoryFilesystem, ManualClock, RotatingWriterBuilder};

#[test]
fn dash_and_stdout_select_standard_output() {
    assert_eq!(normalize_output("-"), "stdout");
    assert_eq!(normalize_output("StdOut"), "stdout");
    assert_eq!(normalize_output("/tmp/x-%Y"), "/tmp/x-%Y");
}

#[test]
fn at_prefix_forces_a_path() {
    assert_eq!(normalize_output("@stdout"), "stdout");
    assert_eq!(normalize_output("@-"), "-");
}

#[test]
fn comma_separated_list_is_split_and_trimmed() {
    let args = OutputArgs::parse_list(" -, /tmp/a-%H ,, /tmp/b ");
    assert_eq!(args.as_slice(), &["stdout", "/tmp/a-%H", "/tmp/b"]);
    assert!(args.is_stdout());
}

#[test]
fn builder_takes_output_args_in_order() {
    let args = OutputArgs::new().with_output("/logs/a").with_output("-");
    let fs = InMemoryFilesystem::new();
    let clock = ManualClock::new(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());

    let mut writer = RotatingWriterBuilder::new()
        .with_output_args(&args)
        .with_filesystem(Arc::new(fs.clone()))
        .with_clock(Arc::new(clock))
        .build();
    writer.write_lines(&["hi"]).unwrap();

    assert_eq!(writer.templates(), vec!["/logs/a", "stdout"]);
    assert_eq!(fs.contents_string("/logs/a").as_deref(), Some("hi\n"));
    assert_eq!(fs.stdout_string(), "hi\n");
}

#[test]
fn empty_config_files_do_not_add_stdout_before_outputs() {
    let config = crate::RollingFileConfig::new();
    let args = OutputArgs::parse_list("/logs/a");

    let writer = RotatingWriterBuilder::new()
        .destinations_from_args(&args.merged_with(&config))
        .build();

    assert_eq!(writer.templates(), vec!["/logs/a"]);
}

#[test]
fn config_files_come_before_outputs() {
    let config = crate::RollingFileConfig::new().add_file("/logs/c-%Y");
    let args = OutputArgs::parse_list("-");

    assert_eq!(args.merged_with(&config), vec!["/logs/c-%Y", "stdout"]);
}

#[test]
fn nothing_configured_still_defaults_to_stdout() {
    let merged = OutputArgs::new().merged_with(&crate::RollingFileConfig::new());
    assert!(merged.is_empty());

    let writer = RotatingWriterBuilder::new()
        .destinations_from_args(&merged)
        .build();
    assert_eq!(writer.templates(), vec!["stdout"]);
}
