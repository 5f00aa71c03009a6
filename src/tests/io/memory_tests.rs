//! Tests for the in-memory filesystem.

use std::io::{ErrorKind, Write};
use std::path::Path;

use crate::{Filesystem, InMemoryFilesystem};

#[test]
fn open_creates_and_appends() {
    let fs = InMemoryFilesystem::new();
    fs.insert("/a", "old\n");

    let mut h = fs.open_append_or_create(Path::new("/a")).unwrap();
    h.write_all(b"new\n").unwrap();
    h.close().unwrap();

    let mut h = fs.open_append_or_create(Path::new("/b")).unwrap();
    h.write_all(b"fresh\n").unwrap();

    assert_eq!(fs.contents_string("/a").as_deref(), Some("old\nnew\n"));
    assert_eq!(fs.contents_string("/b").as_deref(), Some("fresh\n"));
    assert_eq!(fs.open_count("/a"), 1);
    assert_eq!(fs.close_count("/a"), 1);
}

#[test]
fn stdout_is_captured_separately() {
    let fs = InMemoryFilesystem::new();
    let mut out = fs.stdout();
    out.write_all(b"hello\n").unwrap();
    out.close().unwrap();

    assert_eq!(fs.stdout_string(), "hello\n");
    assert_eq!(fs.stdout_binds(), 1);
    assert_eq!(fs.stdout_closes(), 1);
    assert!(fs.paths().is_empty());
}

#[test]
fn injected_failures_apply_until_cleared() {
    let fs = InMemoryFilesystem::new();
    fs.fail_open("/a");

    let err = fs.open_append_or_create(Path::new("/a")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PermissionDenied);
    assert!(!fs.exists("/a"));

    fs.clear_failures("/a");
    fs.fail_write("/a");
    fs.fail_close("/a");
    let mut h = fs.open_append_or_create(Path::new("/a")).unwrap();
    assert!(h.write_all(b"x").is_err());
    assert!(h.close().is_err());
    assert_eq!(fs.close_count("/a"), 1);
}
