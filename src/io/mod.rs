//! I/O abstractions for writer destinations.
//!
//! This module provides:
//! - `OutputHandle`: An open destination that reports close failures
//! - `Filesystem`: The collaborator that binds stdout and opens resolved paths
//! - Standard implementations for files and stdout
//! - An in-memory implementation for testing

mod memory;
mod output;
mod std_io;

pub use memory::InMemoryFilesystem;
pub use output::{Filesystem, OutputHandle};
pub use std_io::{FileHandle, StdFilesystem, StdoutHandle};
