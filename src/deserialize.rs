use serde::de::{DeserializeOwned, Error, Visitor};
use serde::{forward_to_deserialize_any, Deserialize, Deserializer};

use crate::engine::build_record;
use crate::list_access::FieldListAccess;
use crate::map_access::FieldRecordAccess;
use crate::{AssignError, Deserializable, FieldValue};

/// Feeds a validated [`FieldValue`] to serde so setters can produce the
/// concrete field type.
pub(crate) struct FieldValueDeserializer {
    pub(crate) data: FieldValue,
}

impl<'de> serde::Deserializer<'de> for FieldValueDeserializer {
    type Error = AssignError;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        match self.data {
            FieldValue::String(v) => visitor.visit_string(v),
            FieldValue::Integer(v) => visitor.visit_i32(v),
            FieldValue::Double(v) => visitor.visit_f64(v),
            FieldValue::Array(v) => {
                let size_hint = Some(v.len());
                visitor.visit_seq(FieldListAccess {
                    data: v.into_iter(),
                    size_hint,
                })
            }
            FieldValue::Object(v) => {
                let size_hint = Some(v.len());
                visitor.visit_map(FieldRecordAccess {
                    data: v.into_iter(),
                    leftover: None,
                    size_hint,
                })
            }
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        visitor.visit_some(self)
    }

    fn deserialize_newtype_struct<V>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct seq tuple
        tuple_struct map struct enum identifier ignored_any
    }
}

pub fn from_field_value<T>(data: FieldValue) -> Result<T, AssignError>
where
    T: DeserializeOwned,
{
    T::deserialize(FieldValueDeserializer { data })
}

/// `serde::Deserialize` body for schema types: reads the record, then runs
/// `T`'s own setters on it.
///
/// [`json_schema!`](crate::json_schema) uses this for every struct it
/// declares. Types that build their [`Schema`](crate::Schema) by hand call it
/// from their own `Deserialize` impl.
pub fn deserialize_record<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserializable,
{
    let record = FieldValue::deserialize(deserializer)?;
    build_record(record).map_err(D::Error::custom)
}
