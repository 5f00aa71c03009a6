//! JSON lines serializer.

use serde::Serialize;

use super::{FormatError, LineSerializer};

/// JSON lines serializer using serde_json.
///
/// Each record becomes exactly one compact JSON document.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonLinesSerializer;

impl<R: Serialize + ?Sized> LineSerializer<R> for JsonLinesSerializer {
    fn serialize(&self, record: &R) -> Result<Vec<String>, FormatError> {
        let line = serde_json::to_string(record).map_err(|e| FormatError::Serde(Box::new(e)))?;
        Ok(vec![line])
    }
}
