//! Builder for creating RotatingWriter instances.

use std::sync::Arc;

use crate::clock::{Clock, SystemClock};
use crate::config::{Destination, RollingFileConfig};
use crate::io::{Filesystem, StdFilesystem};
use crate::writer::RotatingWriter;

pub struct RotatingWriterBuilder {
    destinations: Vec<Destination>,
    fs: Arc<dyn Filesystem>,
    clock: Arc<dyn Clock>,
}

impl RotatingWriterBuilder {
    pub fn new() -> Self {
        Self {
            destinations: Vec::new(),
            fs: Arc::new(StdFilesystem::new()),
            clock: Arc::new(SystemClock),
        }
    }

    /// Start from the destinations of a configuration.
    pub fn from_config(config: &RollingFileConfig) -> Self {
        Self::new().add_destinations(config.destinations())
    }

    pub fn add_destination(mut self, raw: impl AsRef<str>) -> Self {
        self.destinations.push(Destination::parse(raw.as_ref()));
        self
    }

    pub fn destinations_from_args(mut self, args: &[String]) -> Self {
        self.destinations = args.iter().map(|a| Destination::parse(a)).collect();
        self
    }

    pub fn add_destinations(mut self, destinations: impl IntoIterator<Item = Destination>) -> Self {
        self.destinations.extend(destinations);
        self
    }

    pub fn with_filesystem(mut self, fs: Arc<dyn Filesystem>) -> Self {
        self.fs = fs;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Build an initialized writer. No destination is opened yet.
    pub fn build(self) -> RotatingWriter {
        let mut writer = RotatingWriter::new(self.fs, self.clock);
        writer.initialize_destinations(self.destinations);
        writer
    }
}

impl Default for RotatingWriterBuilder {
    fn default() -> Self {
        Self::new()
    }
}
