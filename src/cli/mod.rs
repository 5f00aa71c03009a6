//! CLI integration helpers for rollingio.
//!
//! This module converts command line destination tokens into the strings a
//! `RotatingWriter` is initialized with.
//!
//! # Example with sarge
//!
//! ```rust,ignore
//! use rollingio::cli::OutputArgs;
//! use sarge::prelude::*;
//!
//! let mut reader = ArgumentReader::new();
//! let output_ref = reader.add::<OutputArgs>(tag::both('o', "output"));
//! let args = reader.parse()?;
//! let outputs = output_ref.get(&args).and_then(Result::ok).unwrap_or_default();
//!
//! let writer = RotatingWriterBuilder::new()
//!     .with_output_args(&outputs)
//!     .build();
//! ```

use crate::builder::RotatingWriterBuilder;
use crate::config::{RollingFileConfig, STDOUT_SENTINEL};

#[cfg(feature = "sarge")]
mod sarge;

/// Destination arguments collected from the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputArgs(pub Vec<String>);

impl OutputArgs {
    /// Create new empty output arguments.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a raw destination token.
    pub fn with_output(mut self, token: &str) -> Self {
        self.0.push(normalize_output(token));
        self
    }

    /// Parse a comma separated list of tokens.
    pub fn parse_list(value: &str) -> Self {
        let outputs = value
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(normalize_output)
            .collect();
        Self(outputs)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check if writing to stdout.
    pub fn is_stdout(&self) -> bool {
        self.0.iter().any(|s| s == STDOUT_SENTINEL)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Configured files followed by these arguments.
    ///
    /// An empty config file list adds nothing here; the stdout default is
    /// left to the writer, which applies it only when the merged list is
    /// empty.
    pub fn merged_with(&self, config: &RollingFileConfig) -> Vec<String> {
        config.files.iter().chain(&self.0).cloned().collect()
    }
}

/// Map a command line token to a destination template.
///
/// `-` and `stdout` (any case) select standard output. A leading `@` forces
/// the rest of the token to be treated as a path, so `@stdout` is a file.
pub fn normalize_output(token: &str) -> String {
    if let Some(path) = token.strip_prefix('@') {
        return path.to_string();
    }

    if token == "-" || token.eq_ignore_ascii_case(STDOUT_SENTINEL) {
        return STDOUT_SENTINEL.to_string();
    }

    token.to_string()
}

impl RotatingWriterBuilder {
    /// Add every destination from parsed output arguments.
    pub fn with_output_args(self, args: &OutputArgs) -> Self {
        args.0
            .iter()
            .fold(self, |builder, raw| builder.add_destination(raw))
    }
}
