use serde::de::{DeserializeSeed, SeqAccess};

use crate::deserialize::FieldValueDeserializer;
use crate::{AssignError, FieldValue};

pub(crate) struct FieldListAccess<I>
where
    I: Iterator<Item = FieldValue>,
{
    pub(crate) data: I,
    pub(crate) size_hint: Option<usize>,
}

impl<'de, I> SeqAccess<'de> for FieldListAccess<I>
where
    I: Iterator<Item = FieldValue>,
{
    type Error = AssignError;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>, Self::Error>
    where
        T: DeserializeSeed<'de>,
    {
        if let Some(data) = self.data.next() {
            if let Some(remaining) = self.size_hint.as_mut() {
                *remaining = remaining.saturating_sub(1);
            }
            Ok(Some(seed.deserialize(FieldValueDeserializer { data })?))
        } else {
            Ok(None)
        }
    }

    fn size_hint(&self) -> Option<usize> {
        self.size_hint
    }
}
