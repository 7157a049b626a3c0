use std::fmt::Display;

use serde::de::Error;

/// Document-level failures. Both are terminal: no field is looked at.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("input must not be null or empty")]
    Empty,
    #[error("failed to parse JSON text")]
    Malformed(#[source] serde_json::Error),
}

/// Failure while turning a validated [`FieldValue`](crate::FieldValue) into the
/// concrete type of a field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssignError {
    #[error("invalid record access sequence")]
    InvalidRecordAccess,
    #[error("{0}")]
    InvalidConversion(String),
    #[error("expected a record, found {0}")]
    NotARecord(&'static str),
    #[error("missing field `{0}`")]
    MissingField(&'static str),
    #[error("{field}: {source}")]
    Field {
        field: &'static str,
        source: Box<AssignError>,
    },
}

impl Error for AssignError {
    fn custom<T>(msg: T) -> Self
    where
        T: Display,
    {
        AssignError::InvalidConversion(format!("{msg}"))
    }
}

pub(crate) fn property_error(field_name: &str, reason: impl Display) -> String {
    format!("Property {field_name}: {reason}.")
}

pub(crate) fn missing_mapping_error(field_name: &str) -> String {
    format!("Attribute of property {field_name}: not found.")
}
