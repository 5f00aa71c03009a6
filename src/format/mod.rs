//! Line serializers for records written through a `RotatingWriter`.
//!
//! This module provides:
//! - `FormatKind`: The `data_format` names a writer understands
//! - `FormatError`: Errors that can occur while serializing a record
//! - `LineSerializer`: Turns one record into zero or more output lines
//! - `PlaintextSerializer` and (with the `json` feature) `JsonLinesSerializer`

use thiserror::Error;

mod plaintext;
pub use plaintext::PlaintextSerializer;

#[cfg(feature = "json")]
mod json;
#[cfg(feature = "json")]
pub use json::JsonLinesSerializer;

/// Represents the supported line formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FormatKind {
    /// `Display` output, one line per text line
    #[default]
    Plaintext,
    /// One compact JSON document per record
    Json,
}

impl std::fmt::Display for FormatKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormatKind::Plaintext => write!(f, "plaintext"),
            FormatKind::Json => write!(f, "json"),
        }
    }
}

impl FormatKind {
    /// Parse a format kind from a string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "plaintext" | "text" | "txt" => Some(FormatKind::Plaintext),
            "json" | "jsonl" | "ndjson" => Some(FormatKind::Json),
            _ => None,
        }
    }

    /// Whether the crate was built with support for this format.
    pub fn is_enabled(&self) -> bool {
        match self {
            FormatKind::Plaintext => true,
            FormatKind::Json => cfg!(feature = "json"),
        }
    }
}

/// Error types for format operations.
#[derive(Debug, Error)]
pub enum FormatError {
    /// The requested format name is not known
    #[error("Unknown format: {0}")]
    UnknownFormat(String),

    /// Format feature not enabled
    #[error("Format '{0}' is not enabled. Enable the corresponding feature.")]
    NotEnabled(FormatKind),

    /// Serialization error
    #[error("Serde error: {0}")]
    Serde(Box<dyn std::error::Error + Send + Sync>),

    /// Other format-specific error
    #[error("Format error: {0}")]
    Other(Box<dyn std::error::Error + Send + Sync>),
}

/// Serializer collaborator: produces the already-formatted lines for a record.
///
/// Returned lines must not carry their own terminator; the writer appends
/// exactly one `\n` per line.
pub trait LineSerializer<R: ?Sized> {
    fn serialize(&self, record: &R) -> Result<Vec<String>, FormatError>;
}

impl<R: ?Sized, S: LineSerializer<R> + ?Sized> LineSerializer<R> for &S {
    fn serialize(&self, record: &R) -> Result<Vec<String>, FormatError> {
        (**self).serialize(record)
    }
}

/// Check that a configured `data_format` names a format this build supports.
pub fn resolve_format(name: &str) -> Result<FormatKind, FormatError> {
    let kind = FormatKind::from_str(name).ok_or_else(|| FormatError::UnknownFormat(name.into()))?;
    if kind.is_enabled() {
        Ok(kind)
    } else {
        Err(FormatError::NotEnabled(kind))
    }
}
