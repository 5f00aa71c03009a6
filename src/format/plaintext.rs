//! Plaintext line serializer.

use std::fmt::Display;

use super::{FormatError, LineSerializer};

/// Plaintext serializer.
///
/// Renders the record with `Display` and emits one line per text line, so a
/// multi-line record never smuggles raw terminators into the output.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaintextSerializer;

impl<R: Display + ?Sized> LineSerializer<R> for PlaintextSerializer {
    fn serialize(&self, record: &R) -> Result<Vec<String>, FormatError> {
        let text = record.to_string();
        if text.is_empty() {
            return Ok(Vec::new());
        }
        Ok(text.lines().map(str::to_owned).collect())
    }
}
