//! Destination templates.

use std::fmt::{self, Write as _};
use std::path::PathBuf;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};
use thiserror::Error;

/// The configured name that selects standard output.
pub const STDOUT_SENTINEL: &str = "stdout";

/// Failure to render a template against a point in time.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("invalid time directive in template '{template}'")]
    InvalidDirective { template: String },
    #[error("template '{template}' rendered an empty path")]
    EmptyPath { template: String },
    #[error("failed to render template '{template}'")]
    Render {
        template: String,
        #[source]
        source: fmt::Error,
    },
}

/// One configured output target.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Destination {
    /// The process standard output. Bound once, never rotated or closed.
    Stdout,
    /// A filesystem path that may embed strftime directives (`%Y`, `%m`, ...).
    TimestampedFile { template: String },
}

impl Destination {
    /// Parse a configured destination string.
    ///
    /// Only the exact string `"stdout"` selects standard output; anything else
    /// is a path template.
    pub fn parse(raw: &str) -> Self {
        if raw == STDOUT_SENTINEL {
            Destination::Stdout
        } else {
            Destination::TimestampedFile {
                template: raw.to_string(),
            }
        }
    }

    /// The configured string this destination was parsed from.
    pub fn template(&self) -> &str {
        match self {
            Destination::Stdout => STDOUT_SENTINEL,
            Destination::TimestampedFile { template } => template,
        }
    }

    pub fn is_stdout(&self) -> bool {
        matches!(self, Destination::Stdout)
    }

    /// Render the template at `now` (UTC).
    ///
    /// Returns `None` for stdout, which has no path.
    pub fn resolve(&self, now: DateTime<Utc>) -> Result<Option<PathBuf>, ResolveError> {
        match self {
            Destination::Stdout => Ok(None),
            Destination::TimestampedFile { template } => {
                render(template, now).map(|p| Some(PathBuf::from(p)))
            }
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.template())
    }
}

impl From<&str> for Destination {
    fn from(raw: &str) -> Self {
        Destination::parse(raw)
    }
}

fn render(template: &str, now: DateTime<Utc>) -> Result<String, ResolveError> {
    let items: Vec<Item<'_>> = StrftimeItems::new(template).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return Err(ResolveError::InvalidDirective {
            template: template.to_string(),
        });
    }

    let mut path = String::with_capacity(template.len() + 8);
    write!(path, "{}", now.format_with_items(items.iter())).map_err(|source| {
        ResolveError::Render {
            template: template.to_string(),
            source,
        }
    })?;

    if path.is_empty() {
        return Err(ResolveError::EmptyPath {
            template: template.to_string(),
        });
    }
    Ok(path)
}
