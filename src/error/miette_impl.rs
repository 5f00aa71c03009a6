//! Miette integration for pretty error reporting.

use miette::{Diagnostic, Severity};
use thiserror::Error;

use super::{AggregateError, SingleIoError, Stage, WriteError};

/// A diagnostic wrapper for writer errors compatible with miette.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
pub struct IoDiagnostic {
    /// The error message
    pub message: String,

    #[source]
    /// The underlying error source
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,

    #[help]
    /// Help text for the user
    pub help: Option<String>,

    #[diagnostic(severity)]
    /// Severity level
    pub severity: Severity,
}

fn help_for(stage: Stage) -> &'static str {
    match stage {
        Stage::Resolve => "Check the time directives in the destination template",
        Stage::Open => "Check that the parent directory exists and is writable",
        Stage::Close => "The previous file may not have been fully persisted",
        Stage::Write => "Remaining lines of the batch were not written",
        Stage::Serialize => "Check the configured data_format",
    }
}

impl From<SingleIoError> for IoDiagnostic {
    fn from(e: SingleIoError) -> Self {
        IoDiagnostic {
            message: format!("[{}] on '{}'", e.stage, e.target),
            help: Some(help_for(e.stage).into()),
            source: Some(e.error),
            severity: Severity::Error,
        }
    }
}

impl From<AggregateError> for IoDiagnostic {
    fn from(agg: AggregateError) -> Self {
        let count = agg.len();
        match agg.errors.into_iter().next() {
            Some(first) if count == 1 => IoDiagnostic::from(first),
            Some(first) => {
                let mut diag = IoDiagnostic::from(first);
                diag.message = format!("{} (and {} more)", diag.message, count - 1);
                diag
            }
            None => IoDiagnostic {
                message: "Unknown I/O error".into(),
                source: None,
                help: None,
                severity: Severity::Error,
            },
        }
    }
}

impl From<WriteError> for IoDiagnostic {
    fn from(e: WriteError) -> Self {
        let stage = e.stage();
        IoDiagnostic {
            message: e.to_string(),
            source: Some(Box::new(e)),
            help: Some(help_for(stage).into()),
            severity: Severity::Error,
        }
    }
}

impl From<AggregateError> for miette::Report {
    fn from(agg: AggregateError) -> Self {
        miette::Report::new(IoDiagnostic::from(agg))
    }
}
