//! Plugin configuration for the rolling file output.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use super::{Destination, STDOUT_SENTINEL};
use crate::format::{FormatError, FormatKind, resolve_format};

/// Human readable description of the output.
pub const DESCRIPTION: &str =
    "Send metrics to file(s), allowing strftime time directives in file names";

/// Annotated example configuration in TOML.
pub const SAMPLE_CONFIG: &str = r#"
  ## Files to write to, "stdout" is a specially handled file.
  ## Paths may contain strftime directives, resolved in UTC before each batch.
  files = ["stdout", "/tmp/metrics.out", "/tmp/metrics-%Y%m%d-%H%M%S"]

  ## Data format to output: "plaintext" or "json".
  data_format = "plaintext"
"#;

/// Error loading a `RollingFileConfig`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("unsupported config file extension: '{0}'")]
    UnsupportedExtension(String),
    #[error("failed to parse config: {0}")]
    Parse(Box<dyn std::error::Error + Send + Sync>),
    #[error(transparent)]
    Format(#[from] FormatError),
}

/// Configuration for the rolling file output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RollingFileConfig {
    /// Destination templates, in fan-out order
    #[serde(default)]
    pub files: Vec<String>,
    /// Line format: "plaintext" or "json"
    #[serde(default)]
    pub data_format: Option<String>,
}

impl RollingFileConfig {
    /// Create a new empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a destination template.
    pub fn add_file(mut self, template: impl Into<String>) -> Self {
        self.files.push(template.into());
        self
    }

    /// Set the data format.
    pub fn with_data_format(mut self, format: impl Into<String>) -> Self {
        self.data_format = Some(format.into());
        self
    }

    /// Destinations in configured order; an empty list means stdout only.
    pub fn destinations(&self) -> Vec<Destination> {
        if self.files.is_empty() {
            return vec![Destination::parse(STDOUT_SENTINEL)];
        }
        self.files.iter().map(|f| Destination::parse(f)).collect()
    }

    /// The configured line format, defaulting to plaintext.
    pub fn format_kind(&self) -> Result<FormatKind, FormatError> {
        match &self.data_format {
            None => Ok(FormatKind::Plaintext),
            Some(name) => resolve_format(name),
        }
    }

    #[cfg(feature = "toml")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::Parse(Box::new(e)))
    }

    #[cfg(feature = "json")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(s).map_err(|e| ConfigError::Parse(Box::new(e)))
    }

    #[cfg(feature = "yaml")]
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(s).map_err(|e| ConfigError::Parse(Box::new(e)))
    }

    /// Load a configuration file, picking the parser from its extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let config = match ext.as_str() {
            #[cfg(feature = "toml")]
            "toml" => Self::from_toml_str(&content)?,
            #[cfg(feature = "json")]
            "json" => Self::from_json_str(&content)?,
            #[cfg(feature = "yaml")]
            "yaml" | "yml" => Self::from_yaml_str(&content)?,
            _ => return Err(ConfigError::UnsupportedExtension(ext)),
        };

        // Reject unknown formats at load time rather than on the first batch.
        config.format_kind()?;
        Ok(config)
    }
}
