//! Output handle and filesystem trait definitions.

use std::fmt::Debug;
use std::io::{self, Write};
use std::path::Path;

/// An open, writable destination owned by exactly one writer slot.
///
/// Unlike dropping a `File`, `close` reports the failure so the writer can
/// surface it.
pub trait OutputHandle: Write + Send + Debug {
    /// Release the handle.
    fn close(self: Box<Self>) -> io::Result<()>;
}

/// Trait for the filesystem collaborator of a `RotatingWriter`.
///
/// Implementors hand out the process standard output and open resolved
/// destination paths.
pub trait Filesystem: Send + Sync + Debug {
    /// Bind a handle to standard output.
    ///
    /// Closing the returned handle must flush only; the process stream is
    /// never closed by the writer.
    fn stdout(&self) -> Box<dyn OutputHandle>;

    /// Open `path` for appending, creating it first if it does not exist.
    ///
    /// Existing content is never truncated and parent directories are never
    /// created.
    fn open_append_or_create(&self, path: &Path) -> io::Result<Box<dyn OutputHandle>>;
}
