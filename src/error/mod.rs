//! Error types for rotating writer operations.
//!
//! This module provides:
//! - `Stage`: Indicates where an error occurred in the slot lifecycle
//! - `SingleIoError`: A single destination error with context
//! - `AggregateError`: Every per-destination failure of one reconcile or shutdown pass
//! - `WriteError`: Failure of a write batch

use std::fmt;
use std::io;

use thiserror::Error;

use crate::format::FormatError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// The template could not be rendered against the current time
    Resolve,
    /// Error while opening or creating the resolved path
    Open,
    Close,
    Write,
    Serialize,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Resolve => write!(f, "Resolve"),
            Stage::Open => write!(f, "Open"),
            Stage::Close => write!(f, "Close"),
            Stage::Write => write!(f, "Write"),
            Stage::Serialize => write!(f, "Serialize"),
        }
    }
}

#[derive(Debug)]
pub struct SingleIoError {
    /// Stage where the error occurred
    pub stage: Stage,
    /// Identifier of the destination (resolved path, template, or "stdout")
    pub target: String,
    /// The underlying error
    pub error: Box<dyn std::error::Error + Send + Sync>,
}

impl SingleIoError {
    pub fn new(
        stage: Stage,
        target: impl Into<String>,
        error: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self {
            stage,
            target: target.into(),
            error: error.into(),
        }
    }
}

impl fmt::Display for SingleIoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.stage, self.target, self.error)
    }
}

impl std::error::Error for SingleIoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.error.as_ref())
    }
}

/// An aggregate of destination errors.
///
/// Returned by `reconcile` and `shutdown` once every slot has been attempted.
#[derive(Debug, Error)]
pub struct AggregateError {
    /// Collection of individual errors, in slot order
    pub errors: Vec<SingleIoError>,
}

impl fmt::Display for AggregateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "I/O encountered {} error(s):", self.errors.len())?;
        for (i, e) in self.errors.iter().enumerate() {
            writeln!(f, "  #{}: {}", i + 1, e)?;
        }
        Ok(())
    }
}

impl AggregateError {
    /// Create a new aggregate error with a single error.
    pub fn single(error: SingleIoError) -> Self {
        Self {
            errors: vec![error],
        }
    }

    /// Turn a collected error list into a result: empty means success.
    pub(crate) fn from_errors(errors: Vec<SingleIoError>) -> Result<(), Self> {
        if errors.is_empty() {
            Ok(())
        } else {
            Err(Self { errors })
        }
    }

    /// Check if there are no errors.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get the number of errors.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SingleIoError> {
        self.errors.iter()
    }

    /// Stages of the collected errors, in order.
    pub fn stages(&self) -> Vec<Stage> {
        self.errors.iter().map(|e| e.stage).collect()
    }
}

impl From<SingleIoError> for AggregateError {
    fn from(error: SingleIoError) -> Self {
        Self::single(error)
    }
}

/// Failure of a write batch. Lines written before the failure stay written.
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("FAILED to write message: {line}, {target}: {source}")]
    Line {
        /// Content of the offending line, without terminator
        line: String,
        /// First destination that rejected the line
        target: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to serialize record: {source}")]
    Serialize {
        #[from]
        source: FormatError,
    },
}

impl WriteError {
    pub fn stage(&self) -> Stage {
        match self {
            WriteError::Line { .. } => Stage::Write,
            WriteError::Serialize { .. } => Stage::Serialize,
        }
    }
}

#[cfg(feature = "miette")]
mod miette_impl;

#[cfg(feature = "miette")]
pub use miette_impl::*;
