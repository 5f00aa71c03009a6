//! In-memory filesystem for testing.

use std::collections::{HashMap, HashSet};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::{Filesystem, OutputHandle};

#[derive(Debug, Default)]
struct State {
    files: HashMap<PathBuf, Vec<u8>>,
    stdout: Vec<u8>,
    opens: HashMap<PathBuf, usize>,
    closes: HashMap<PathBuf, usize>,
    stdout_binds: usize,
    stdout_closes: usize,
    fail_open: HashSet<PathBuf>,
    fail_close: HashSet<PathBuf>,
    fail_write: HashSet<PathBuf>,
}

/// In-memory filesystem collaborator.
///
/// Clones share the same state, so a test can keep one clone for
/// inspection while the writer owns another. Failures can be injected per
/// path for open, close and write.
#[derive(Debug, Clone, Default)]
pub struct InMemoryFilesystem {
    state: Arc<Mutex<State>>,
}

impl InMemoryFilesystem {
    /// Create a new empty filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Seed a file with existing content.
    pub fn insert(&self, path: impl Into<PathBuf>, data: impl Into<Vec<u8>>) {
        self.lock().files.insert(path.into(), data.into());
    }

    /// Get the contents of a file as bytes, if it exists.
    pub fn contents(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        self.lock().files.get(path.as_ref()).cloned()
    }

    /// Get the contents of a file as a string, if it exists.
    pub fn contents_string(&self, path: impl AsRef<Path>) -> Option<String> {
        self.contents(path)
            .map(|b| String::from_utf8_lossy(&b).into_owned())
    }

    /// Everything written to the in-memory standard output.
    pub fn stdout_string(&self) -> String {
        String::from_utf8_lossy(&self.lock().stdout).into_owned()
    }

    pub fn exists(&self, path: impl AsRef<Path>) -> bool {
        self.lock().files.contains_key(path.as_ref())
    }

    /// Paths of every file, sorted.
    pub fn paths(&self) -> Vec<PathBuf> {
        let mut paths: Vec<_> = self.lock().files.keys().cloned().collect();
        paths.sort();
        paths
    }

    /// Number of successful opens of `path`.
    pub fn open_count(&self, path: impl AsRef<Path>) -> usize {
        self.lock().opens.get(path.as_ref()).copied().unwrap_or(0)
    }

    /// Number of close calls on handles for `path`, failed ones included.
    pub fn close_count(&self, path: impl AsRef<Path>) -> usize {
        self.lock().closes.get(path.as_ref()).copied().unwrap_or(0)
    }

    /// Total successful opens across all paths.
    pub fn total_opens(&self) -> usize {
        self.lock().opens.values().sum()
    }

    /// Total close calls across all paths.
    pub fn total_closes(&self) -> usize {
        self.lock().closes.values().sum()
    }

    /// Number of times a stdout handle was handed out.
    pub fn stdout_binds(&self) -> usize {
        self.lock().stdout_binds
    }

    /// Number of times a stdout handle was closed (flushed).
    pub fn stdout_closes(&self) -> usize {
        self.lock().stdout_closes
    }

    /// Make opening `path` fail until cleared.
    pub fn fail_open(&self, path: impl Into<PathBuf>) {
        self.lock().fail_open.insert(path.into());
    }

    /// Make closing handles for `path` fail until cleared.
    pub fn fail_close(&self, path: impl Into<PathBuf>) {
        self.lock().fail_close.insert(path.into());
    }

    /// Make writes to `path` fail until cleared.
    pub fn fail_write(&self, path: impl Into<PathBuf>) {
        self.lock().fail_write.insert(path.into());
    }

    /// Remove every injected failure for `path`.
    pub fn clear_failures(&self, path: impl AsRef<Path>) {
        let mut state = self.lock();
        let path = path.as_ref();
        state.fail_open.remove(path);
        state.fail_close.remove(path);
        state.fail_write.remove(path);
    }
}

impl Filesystem for InMemoryFilesystem {
    fn stdout(&self) -> Box<dyn OutputHandle> {
        self.lock().stdout_binds += 1;
        Box::new(InMemoryHandle {
            state: self.state.clone(),
            path: None,
        })
    }

    fn open_append_or_create(&self, path: &Path) -> io::Result<Box<dyn OutputHandle>> {
        let mut state = self.lock();
        if state.fail_open.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("injected open failure for {}", path.display()),
            ));
        }
        state.files.entry(path.to_path_buf()).or_default();
        *state.opens.entry(path.to_path_buf()).or_default() += 1;
        Ok(Box::new(InMemoryHandle {
            state: self.state.clone(),
            path: Some(path.to_path_buf()),
        }))
    }
}

/// Write handle for the in-memory filesystem. `None` path means stdout.
struct InMemoryHandle {
    state: Arc<Mutex<State>>,
    path: Option<PathBuf>,
}

impl InMemoryHandle {
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for InMemoryHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryHandle")
            .field("path", &self.path)
            .finish()
    }
}

impl Write for InMemoryHandle {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        let mut state = self.lock();
        match &self.path {
            None => state.stdout.extend_from_slice(data),
            Some(path) => {
                if state.fail_write.contains(path) {
                    return Err(io::Error::new(
                        io::ErrorKind::StorageFull,
                        format!("injected write failure for {}", path.display()),
                    ));
                }
                state.files.entry(path.clone()).or_default().extend_from_slice(data);
            }
        }
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl OutputHandle for InMemoryHandle {
    fn close(self: Box<Self>) -> io::Result<()> {
        let mut state = self.lock();
        let Some(path) = &self.path else {
            state.stdout_closes += 1;
            return Ok(());
        };
        *state.closes.entry(path.clone()).or_default() += 1;
        if state.fail_close.contains(path) {
            return Err(io::Error::other(format!(
                "injected close failure for {}",
                path.display()
            )));
        }
        Ok(())
    }
}
