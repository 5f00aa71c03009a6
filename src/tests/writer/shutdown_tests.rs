//! Shutdown behavior of RotatingWriter.

use chrono::TimeDelta;

use super::{at, make_writer};
use crate::{SlotState, Stage};

#[test]
fn shutdown_closes_each_open_handle_once() {
    let (mut writer, fs, clock) =
        make_writer(&["/logs/a-%Y%m%d", "/logs/b-%Y%m%d"], at(2024, 3, 9, 12, 0, 0));
    writer.reconcile().unwrap();
    clock.advance(TimeDelta::days(1));
    writer.reconcile().unwrap();

    writer.shutdown().expect("clean shutdown");

    assert_eq!(fs.close_count("/logs/a-20240310"), 1);
    assert_eq!(fs.close_count("/logs/b-20240310"), 1);
    // Rotated-away handles were closed by rotation, not again by shutdown.
    assert_eq!(fs.close_count("/logs/a-20240309"), 1);
    assert_eq!(fs.total_closes(), 4);
    assert_eq!(writer.open_count(), 0);
}

#[test]
fn shutdown_attempts_every_slot_and_reports_each_failure() {
    let (mut writer, fs, _clock) = make_writer(&["/logs/a", "/logs/b"], at(2024, 3, 9, 12, 0, 0));
    writer.reconcile().unwrap();
    fs.fail_close("/logs/a");

    let err = writer.shutdown().unwrap_err();

    assert_eq!(err.len(), 1);
    assert_eq!(err.errors[0].stage, Stage::Close);
    assert_eq!(err.errors[0].target, "/logs/a");
    assert_eq!(fs.close_count("/logs/b"), 1);
    assert_eq!(writer.slot_states(), vec![SlotState::Unopened, SlotState::Unopened]);
}

#[test]
fn shutdown_flushes_stdout_without_closing_files_twice() {
    let (mut writer, fs, _clock) = make_writer(&["stdout", "/logs/a"], at(2024, 3, 9, 12, 0, 0));
    writer.write_lines(&["x"]).unwrap();

    writer.shutdown().unwrap();
    writer.shutdown().unwrap();

    assert_eq!(fs.stdout_closes(), 1);
    assert_eq!(fs.close_count("/logs/a"), 1);
}

#[test]
fn shutdown_skips_slots_that_never_opened() {
    let (mut writer, fs, _clock) = make_writer(&["/locked/a", "/logs/b"], at(2024, 3, 9, 12, 0, 0));
    fs.fail_open("/locked/a");
    assert!(writer.reconcile().is_err());

    writer.shutdown().unwrap();

    assert_eq!(fs.close_count("/locked/a"), 0);
    assert_eq!(fs.close_count("/logs/b"), 1);
}

#[test]
fn shutdown_before_any_reconcile_is_clean() {
    let (mut writer, fs, _clock) = make_writer(&["stdout", "/logs/a"], at(2024, 3, 9, 12, 0, 0));

    writer.shutdown().unwrap();

    assert_eq!(fs.total_closes(), 0);
    assert_eq!(fs.stdout_closes(), 0);
}
