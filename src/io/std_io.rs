//! Standard I/O implementations backed by the real filesystem and stdout.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{Filesystem, OutputHandle};

/// Handle bound to the process standard output.
#[derive(Debug)]
pub struct StdoutHandle {
    inner: io::Stdout,
}

impl StdoutHandle {
    /// Create a new stdout handle.
    pub fn new() -> Self {
        Self {
            inner: io::stdout(),
        }
    }
}

impl Default for StdoutHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl Write for StdoutHandle {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write(buf)
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        // Hold the lock so a line is never interleaved with other stdout users.
        self.inner.lock().write_all(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

impl OutputHandle for StdoutHandle {
    fn close(mut self: Box<Self>) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Handle for an appended-to file.
#[derive(Debug)]
pub struct FileHandle {
    path: PathBuf,
    file: File,
}

impl FileHandle {
    /// Get the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Write for FileHandle {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

impl OutputHandle for FileHandle {
    fn close(mut self: Box<Self>) -> io::Result<()> {
        self.file.flush()?;
        match self.file.sync_all() {
            // Character devices and FIFOs (`/dev/null`, pipes) cannot be synced.
            Err(e)
                if matches!(
                    e.kind(),
                    io::ErrorKind::InvalidInput | io::ErrorKind::Unsupported
                ) =>
            {
                debug!(path = %self.path.display(), error = %e, "destination cannot be synced");
                Ok(())
            }
            result => result,
        }
    }
}

/// Filesystem collaborator using `std::fs` and the real stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdFilesystem;

impl StdFilesystem {
    pub fn new() -> Self {
        Self
    }
}

impl Filesystem for StdFilesystem {
    fn stdout(&self) -> Box<dyn OutputHandle> {
        Box::new(StdoutHandle::new())
    }

    fn open_append_or_create(&self, path: &Path) -> io::Result<Box<dyn OutputHandle>> {
        let existed = path.exists();
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        debug!(path = %path.display(), existed, "opened destination file");
        Ok(Box::new(FileHandle {
            path: path.to_path_buf(),
            file,
        }))
    }
}
