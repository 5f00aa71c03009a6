//! Configuration types for writer destinations.
//!
//! This module provides:
//! - `Destination`: A parsed destination template (stdout or timestamped file)
//! - `RollingFileConfig`: The deserializable output configuration
//! - `DESCRIPTION` and `SAMPLE_CONFIG`: Static plugin metadata

mod destination;
mod plugin;

pub use destination::{Destination, ResolveError, STDOUT_SENTINEL};
pub use plugin::{ConfigError, DESCRIPTION, RollingFileConfig, SAMPLE_CONFIG};
