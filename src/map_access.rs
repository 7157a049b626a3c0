use serde::de::value::StringDeserializer;
use serde::de::{DeserializeSeed, IntoDeserializer, MapAccess};

use crate::deserialize::FieldValueDeserializer;
use crate::{AssignError, FieldValue};

pub(crate) struct FieldRecordAccess<I>
where
    I: Iterator<Item = (String, FieldValue)>,
{
    pub(crate) data: I,
    pub(crate) leftover: Option<FieldValue>,
    pub(crate) size_hint: Option<usize>,
}

impl<'de, I> MapAccess<'de> for FieldRecordAccess<I>
where
    I: Iterator<Item = (String, FieldValue)>,
{
    type Error = AssignError;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>, Self::Error>
    where
        K: DeserializeSeed<'de>,
    {
        if let Some((name, value)) = self.data.next() {
            self.leftover = Some(value);
            let v = seed.deserialize(record_key(name))?;
            Ok(Some(v))
        } else {
            Ok(None)
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value, Self::Error>
    where
        V: DeserializeSeed<'de>,
    {
        if let Some(leftover) = self.leftover.take() {
            seed.deserialize(FieldValueDeserializer { data: leftover })
        } else {
            Err(AssignError::InvalidRecordAccess)
        }
    }

    fn size_hint(&self) -> Option<usize> {
        self.size_hint
    }

    fn next_entry_seed<K, V>(
        &mut self,
        kseed: K,
        vseed: V,
    ) -> Result<Option<(K::Value, V::Value)>, Self::Error>
    where
        K: DeserializeSeed<'de>,
        V: DeserializeSeed<'de>,
    {
        if let Some((name, value)) = self.data.next() {
            self.leftover = None;
            let va = kseed.deserialize(record_key(name))?;
            let vb = vseed.deserialize(FieldValueDeserializer { data: value })?;
            Ok(Some((va, vb)))
        } else {
            Ok(None)
        }
    }
}

fn record_key(name: String) -> StringDeserializer<AssignError> {
    name.into_deserializer()
}
