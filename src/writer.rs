//! Rotating multi-destination writer.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::builder::RotatingWriterBuilder;
use crate::clock::{Clock, SystemClock};
use crate::config::{Destination, RollingFileConfig, STDOUT_SENTINEL};
use crate::error::{AggregateError, SingleIoError, Stage, WriteError};
use crate::format::LineSerializer;
use crate::io::{Filesystem, OutputHandle, StdFilesystem};

/// Observable state of one destination slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    /// Never resolved, or reset by shutdown
    Unopened,
    /// Holds an open handle
    Open,
    /// The last resolved path could not be opened; skipped until it rotates
    Failed,
}

/// Per-destination state. The handle doubles as the close capability, so
/// write and close are present or absent together.
#[derive(Debug)]
struct Slot {
    destination: Destination,
    resolved: Option<PathBuf>,
    handle: Option<Box<dyn OutputHandle>>,
}

impl Slot {
    fn new(destination: Destination) -> Self {
        Self {
            destination,
            resolved: None,
            handle: None,
        }
    }

    fn label(&self) -> String {
        match (&self.destination, &self.resolved) {
            (Destination::Stdout, _) => STDOUT_SENTINEL.to_string(),
            (_, Some(path)) => path.display().to_string(),
            (Destination::TimestampedFile { template }, None) => template.clone(),
        }
    }

    fn state(&self) -> SlotState {
        match (&self.handle, &self.resolved) {
            (Some(_), _) => SlotState::Open,
            (None, Some(_)) => SlotState::Failed,
            (None, None) => SlotState::Unopened,
        }
    }
}

/// The fan-out target: indices of every slot holding an open handle, in
/// slot order.
///
/// Derived from slot state after a reconcile pass that changed something;
/// reused untouched otherwise.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CombinedSink {
    members: Vec<usize>,
}

impl CombinedSink {
    fn from_slots(slots: &[Slot]) -> Self {
        let members = slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.handle.is_some())
            .map(|(i, _)| i)
            .collect();
        Self { members }
    }

    /// Slot indices receiving writes.
    pub fn members(&self) -> &[usize] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Writer that fans every line out to a set of time-templated destinations.
///
/// Lifecycle: `initialize` once, `write_lines`/`write_records` once per
/// batch (each batch reconciles first), `shutdown` at teardown. Not meant
/// for concurrent callers; serialize batches externally.
#[derive(Debug)]
pub struct RotatingWriter {
    fs: Arc<dyn Filesystem>,
    clock: Arc<dyn Clock>,
    slots: Vec<Slot>,
    sink: Option<CombinedSink>,
    sink_generation: u64,
}

impl RotatingWriter {
    /// Create a writer with no destinations. Call `initialize` before use.
    pub fn new(fs: Arc<dyn Filesystem>, clock: Arc<dyn Clock>) -> Self {
        Self {
            fs,
            clock,
            slots: Vec::new(),
            sink: None,
            sink_generation: 0,
        }
    }

    /// Create a writer on the real filesystem and the UTC wall clock.
    pub fn with_std() -> Self {
        Self::new(Arc::new(StdFilesystem::new()), Arc::new(SystemClock))
    }

    /// Create a real writer initialized from a configuration.
    pub fn from_config(config: &RollingFileConfig) -> Self {
        RotatingWriterBuilder::from_config(config).build()
    }

    /// Set up one empty slot per template. An empty list means stdout only.
    ///
    /// Performs no file I/O and discards any previous slots.
    pub fn initialize<I, S>(&mut self, templates: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let destinations: Vec<Destination> = templates
            .into_iter()
            .map(|t| Destination::parse(t.as_ref()))
            .collect();
        self.initialize_destinations(destinations);
    }

    /// Same as `initialize`, for already parsed destinations.
    ///
    /// Handles still open from a previous cycle are closed first; close
    /// failures are logged since initialization itself cannot fail.
    pub fn initialize_destinations(&mut self, mut destinations: Vec<Destination>) {
        if destinations.is_empty() {
            destinations.push(Destination::Stdout);
        }

        if self.open_count() > 0 {
            warn!(open = self.open_count(), "re-initializing writer with open destinations");
            if let Err(agg) = self.shutdown() {
                for e in agg.iter() {
                    warn!(target = %e.target, error = %e.error, "failed to close destination on re-initialize");
                }
            }
        }

        self.slots = destinations.into_iter().map(Slot::new).collect();
        self.sink = None;
        info!(destinations = self.slots.len(), "rotating writer initialized");
    }

    /// Resolve every template against the clock and rotate where needed.
    pub fn reconcile(&mut self) -> Result<(), AggregateError> {
        let now = self.clock.now();
        self.reconcile_at(now)
    }

    /// Resolve every template at `now` and rotate slots whose path changed.
    ///
    /// Every slot is attempted; all failures are returned together once the
    /// pass is complete. A slot that fails to open stays closed until its
    /// template resolves to a different path.
    pub fn reconcile_at(&mut self, now: DateTime<Utc>) -> Result<(), AggregateError> {
        let mut errors = Vec::new();
        let mut changed = false;

        for slot in &mut self.slots {
            if slot.destination.is_stdout() {
                if slot.handle.is_none() {
                    slot.handle = Some(self.fs.stdout());
                    changed = true;
                    debug!("bound stdout destination");
                }
                continue;
            }

            let candidate = match slot.destination.resolve(now) {
                Ok(Some(path)) => path,
                Ok(None) => continue,
                Err(e) => {
                    warn!(template = slot.destination.template(), error = %e, "cannot resolve destination");
                    errors.push(SingleIoError::new(
                        Stage::Resolve,
                        slot.destination.template(),
                        e,
                    ));
                    continue;
                }
            };

            if slot.resolved.as_ref() == Some(&candidate) {
                continue;
            }

            if let Some(old) = slot.handle.take() {
                changed = true;
                let old_label = slot.label();
                debug!(from = %old_label, to = %candidate.display(), "rotating destination");
                if let Err(e) = old.close() {
                    warn!(path = %old_label, error = %e, "failed to close rotated destination");
                    errors.push(SingleIoError::new(Stage::Close, old_label, e));
                }
            }

            match self.fs.open_append_or_create(&candidate) {
                Ok(handle) => {
                    debug!(path = %candidate.display(), "opened destination");
                    slot.handle = Some(handle);
                    changed = true;
                }
                Err(e) => {
                    warn!(path = %candidate.display(), error = %e, "failed to open destination");
                    errors.push(SingleIoError::new(
                        Stage::Open,
                        candidate.display().to_string(),
                        e,
                    ));
                }
            }
            slot.resolved = Some(candidate);
        }

        if changed || self.sink.is_none() {
            if changed {
                self.warn_shared_paths();
            }
            self.sink = Some(CombinedSink::from_slots(&self.slots));
            self.sink_generation += 1;
        }

        AggregateError::from_errors(errors)
    }

    fn warn_shared_paths(&self) {
        let open: Vec<&Path> = self
            .slots
            .iter()
            .filter(|s| s.handle.is_some())
            .filter_map(|s| s.resolved.as_deref())
            .collect();
        for (i, path) in open.iter().enumerate() {
            if open[..i].contains(path) {
                warn!(path = %path.display(), "several destinations resolve to the same file");
            }
        }
    }

    /// Write one batch of already serialized lines.
    ///
    /// Reconciles first; reconcile failures are logged and the batch still
    /// goes to every destination that is open. Each line gets one `\n` and is
    /// flushed to every destination before the next line. The first failing
    /// line aborts the rest of the batch.
    pub fn write_lines<S: AsRef<str>>(&mut self, lines: &[S]) -> Result<(), WriteError> {
        if lines.is_empty() {
            return Ok(());
        }

        self.reconcile_logged();

        for line in lines {
            self.broadcast_line(line.as_ref())?;
        }
        Ok(())
    }

    /// Serialize and write one batch of records.
    ///
    /// A record that fails to serialize aborts the batch before any of its
    /// lines are written; earlier records stay written.
    pub fn write_records<R, S>(&mut self, records: &[R], serializer: &S) -> Result<(), WriteError>
    where
        S: LineSerializer<R> + ?Sized,
    {
        if records.is_empty() {
            return Ok(());
        }

        self.reconcile_logged();

        for record in records {
            let lines = serializer.serialize(record)?;
            for line in &lines {
                self.broadcast_line(line)?;
            }
        }
        Ok(())
    }

    fn reconcile_logged(&mut self) {
        if let Err(agg) = self.reconcile() {
            for e in agg.iter() {
                warn!(stage = %e.stage, target = %e.target, error = %e.error, "destination unavailable for batch");
            }
        }
    }

    fn broadcast_line(&mut self, line: &str) -> Result<(), WriteError> {
        let Some(sink) = &self.sink else {
            return Ok(());
        };

        let mut buf = Vec::with_capacity(line.len() + 1);
        buf.extend_from_slice(line.as_bytes());
        buf.push(b'\n');

        let mut first_error = None;
        for &idx in &sink.members {
            let slot = &mut self.slots[idx];
            let Some(handle) = slot.handle.as_mut() else {
                continue;
            };
            let result = handle.write_all(&buf).and_then(|()| handle.flush());
            if let Err(e) = result {
                let target = slot.label();
                warn!(target = %target, error = %e, "write failed");
                if first_error.is_none() {
                    first_error = Some((target, e));
                }
            }
        }

        match first_error {
            None => Ok(()),
            Some((target, source)) => Err(WriteError::Line {
                line: line.to_string(),
                target,
                source,
            }),
        }
    }

    /// Close every open destination.
    ///
    /// Stdout is flushed, not closed. Every slot is attempted and all close
    /// failures are returned together. Afterwards every slot is unopened.
    pub fn shutdown(&mut self) -> Result<(), AggregateError> {
        let mut errors = Vec::new();
        let mut closed = 0usize;

        for slot in &mut self.slots {
            if let Some(handle) = slot.handle.take() {
                let label = slot.label();
                closed += 1;
                if let Err(e) = handle.close() {
                    warn!(target = %label, error = %e, "failed to close destination");
                    errors.push(SingleIoError::new(Stage::Close, label, e));
                }
            }
            slot.resolved = None;
        }
        self.sink = None;

        info!(closed, failed = errors.len(), "rotating writer shut down");
        AggregateError::from_errors(errors)
    }

    /// Configured templates, in slot order.
    pub fn templates(&self) -> Vec<&str> {
        self.slots.iter().map(|s| s.destination.template()).collect()
    }

    pub fn destinations(&self) -> impl Iterator<Item = &Destination> {
        self.slots.iter().map(|s| &s.destination)
    }

    /// Path each slot last resolved to.
    ///
    /// The stdout slot has no filesystem path; its fixed sentinel is `None`
    /// for the writer's whole lifetime rather than a `"stdout"` path, which
    /// would be indistinguishable from a file of that name.
    /// `templates()` still reports `"stdout"` for it.
    pub fn resolved_paths(&self) -> Vec<Option<&Path>> {
        self.slots.iter().map(|s| s.resolved.as_deref()).collect()
    }

    pub fn slot_states(&self) -> Vec<SlotState> {
        self.slots.iter().map(Slot::state).collect()
    }

    /// Number of slots currently holding an open handle.
    pub fn open_count(&self) -> usize {
        self.slots.iter().filter(|s| s.handle.is_some()).count()
    }

    /// The current fan-out target, absent before the first reconcile.
    pub fn sink(&self) -> Option<&CombinedSink> {
        self.sink.as_ref()
    }

    /// Incremented every time the combined sink is rebuilt.
    pub fn sink_generation(&self) -> u64 {
        self.sink_generation
    }
}
