//! # rollingio
//!
//! A rotating multi-destination line writer.
//!
//! ## Overview
//!
//! rollingio provides:
//! - **Fan-out**: Every line goes to every configured destination, in order
//! - **Time-templated paths**: File names may contain strftime directives
//!   (`%Y`, `%m`, `%d`, `%H`, ...) resolved in UTC before each batch
//! - **Rotation**: When a template resolves to a new path the old file is
//!   closed and the new one is created or appended to
//! - **Standard output**: The `"stdout"` destination is bound once and never
//!   closed by the writer
//! - **Error aggregation**: One failing destination never blocks the others;
//!   reconcile and shutdown report every failure together
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rollingio::RotatingWriterBuilder;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut writer = RotatingWriterBuilder::new()
//!         .add_destination("stdout")
//!         .add_destination("/tmp/out-%Y%m%d")
//!         .build();
//!
//!     writer.reconcile()?;
//!     writer.write_lines(&["A", "B"])?;
//!     writer.shutdown()?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - `toml` - Load `RollingFileConfig` from TOML (enabled by default)
//! - `json` - JSON config loading and the `JsonLinesSerializer`
//! - `yaml` - YAML config loading
//! - `miette` - Pretty error reporting with miette
//! - `sarge` - The `rollingio_tee` command line tool
//!
//! ## Write semantics
//!
//! - Each batch reconciles first. Destinations whose template still resolves
//!   to the same path are left alone; no file is reopened or truncated.
//! - A destination that failed to open is skipped by later batches until its
//!   template resolves to a different path.
//! - Files are opened in append mode and every line is flushed to every
//!   destination before the next line is written.
//! - A failed write aborts the rest of the batch. Nothing is rolled back.
//! - The writer is synchronous and expects a single caller.

// Core modules
pub mod builder;
pub mod cli;
pub mod clock;
pub mod config;
pub mod error;
pub mod format;
pub mod io;
pub mod writer;

// Re-exports for convenience
pub use builder::RotatingWriterBuilder;
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{
    ConfigError, DESCRIPTION, Destination, ResolveError, RollingFileConfig, SAMPLE_CONFIG,
    STDOUT_SENTINEL,
};
pub use error::{AggregateError, SingleIoError, Stage, WriteError};
#[cfg(feature = "json")]
pub use format::JsonLinesSerializer;
pub use format::{FormatError, FormatKind, LineSerializer, PlaintextSerializer};
pub use io::{
    FileHandle, Filesystem, InMemoryFilesystem, OutputHandle, StdFilesystem, StdoutHandle,
};
pub use writer::{CombinedSink, RotatingWriter, SlotState};

// Miette re-exports
#[cfg(feature = "miette")]
pub use error::IoDiagnostic;

// Internal test modules (see src/tests)
#[cfg(test)]
mod tests;
