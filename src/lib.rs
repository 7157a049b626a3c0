//! Schema-driven JSON deserialization that reports every invalid field at
//! once instead of stopping at the first one.
//!
//! A target type is declared with [`json_schema!`]; [`deserialize`]
//! then parses the text, runs the matching type parser for each field and
//! returns either the populated value or the full list of messages.

mod datatype;
mod deserialize;
mod document;
mod engine;
mod errors;
mod list_access;
mod map_access;
mod options;
pub mod parsers;
mod phone;
mod result;
mod schema;

pub use datatype::FieldValue;
pub use deserialize::{deserialize_record, from_field_value};
pub use document::parse_document;
pub use engine::{deserialize, deserialize_with, ParseContext};
pub use errors::{AssignError, DocumentError};
pub use options::DeserializeOptions;
pub use phone::{normalize as normalize_phone_number, PhoneFormat};
pub use result::{DeserializeResult, FieldErrors};
pub use schema::{
    Deserializable, FieldDescriptor, FieldKind, FieldSpec, NestedSchema, Schema, SchemaBuilder,
    Setter, Validator,
};

#[doc(hidden)]
pub mod __private {
    pub use serde;
}
