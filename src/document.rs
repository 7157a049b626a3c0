use serde_json::Value;

use crate::DocumentError;

/// Turns raw text into a JSON tree. `None`, empty and whitespace-only input
/// are rejected before the parser runs.
pub fn parse_document(text: Option<&str>) -> Result<Value, DocumentError> {
    let text = match text {
        Some(text) if !text.trim().is_empty() => text,
        _ => return Err(DocumentError::Empty),
    };
    serde_json::from_str(text).map_err(DocumentError::Malformed)
}
