//! Static per-type field schemas.
//!
//! A deserializable type declares, once, the ordered list of its fields: the
//! Rust field name, the JSON key it is read from, the [`FieldKind`] that picks
//! a type parser, optional validators, and a setter. The [`json_schema!`]
//! macro writes that declaration and caches it in a `OnceLock` per type.
//!
//! [`json_schema!`]: crate::json_schema

use std::fmt;

use crate::{AssignError, DeserializeOptions, DeserializeResult, FieldValue};

/// Assigns a validated value to one field of `T`.
pub type Setter<T> = fn(&mut T, FieldValue) -> Result<(), AssignError>;

/// Extra check run on a value that passed its type parser.
pub type Validator = fn(&FieldValue) -> Result<(), String>;

#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    String,
    PhoneNumber,
    Integer,
    Double,
    Array(Box<FieldKind>),
    Object(NestedSchema),
}

impl FieldKind {
    pub fn array(element: FieldKind) -> Self {
        FieldKind::Array(Box::new(element))
    }

    pub fn object<T: Deserializable>() -> Self {
        FieldKind::Object(NestedSchema::of::<T>())
    }
}

/// Type-erased handle on the schema of a nested type.
///
/// Holds a function pointer so that self-referential types do not force
/// their schema to be built while it is being declared.
#[derive(Clone, Copy)]
pub struct NestedSchema {
    type_name: &'static str,
    fields: fn() -> &'static [FieldSpec],
}

impl NestedSchema {
    pub fn of<T: Deserializable>() -> Self {
        NestedSchema {
            type_name: std::any::type_name::<T>(),
            fields: fields_of::<T>,
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn fields(&self) -> &'static [FieldSpec] {
        (self.fields)()
    }
}

fn fields_of<T: Deserializable>() -> &'static [FieldSpec] {
    T::schema().fields()
}

impl fmt::Debug for NestedSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NestedSchema").field(&self.type_name).finish()
    }
}

impl PartialEq for NestedSchema {
    fn eq(&self, other: &Self) -> bool {
        self.type_name == other.type_name
    }
}

/// The type-independent part of a field declaration.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub field_name: &'static str,
    /// `None` means the field was declared without a JSON key.
    pub json_key: Option<&'static str>,
    pub kind: FieldKind,
    pub validators: Vec<Validator>,
}

impl FieldSpec {
    pub fn new(field_name: &'static str, json_key: Option<&'static str>, kind: FieldKind) -> Self {
        FieldSpec {
            field_name,
            json_key,
            kind,
            validators: Vec::new(),
        }
    }

    pub fn check(mut self, validator: Validator) -> Self {
        self.validators.push(validator);
        self
    }
}

/// One field of `T` together with its setter.
pub struct FieldDescriptor<'s, T> {
    pub spec: &'s FieldSpec,
    pub setter: Setter<T>,
}

impl<T> FieldDescriptor<'_, T> {
    pub fn field_name(&self) -> &'static str {
        self.spec.field_name
    }

    pub fn json_key(&self) -> Option<&'static str> {
        self.spec.json_key
    }

    pub fn kind(&self) -> &FieldKind {
        &self.spec.kind
    }
}

pub struct Schema<T> {
    type_name: &'static str,
    fields: Vec<FieldSpec>,
    setters: Vec<Setter<T>>,
}

impl<T> Schema<T> {
    pub fn builder(type_name: &'static str) -> SchemaBuilder<T> {
        SchemaBuilder {
            schema: Schema {
                type_name,
                fields: Vec::new(),
                setters: Vec::new(),
            },
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn descriptors(&self) -> impl Iterator<Item = FieldDescriptor<'_, T>> {
        self.fields
            .iter()
            .zip(self.setters.iter().copied())
            .map(|(spec, setter)| FieldDescriptor { spec, setter })
    }
}

impl<T> fmt::Debug for Schema<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("type_name", &self.type_name)
            .field("fields", &self.fields)
            .finish()
    }
}

pub struct SchemaBuilder<T> {
    schema: Schema<T>,
}

impl<T> SchemaBuilder<T> {
    pub fn field(mut self, spec: FieldSpec, setter: Setter<T>) -> Self {
        self.schema.fields.push(spec);
        self.schema.setters.push(setter);
        self
    }

    pub fn build(self) -> Schema<T> {
        self.schema
    }
}

/// A type that can be produced by [`deserialize`](crate::deserialize).
pub trait Deserializable: Default + Sized + 'static {
    fn schema() -> &'static Schema<Self>;

    fn from_json<'a>(text: impl Into<Option<&'a str>>) -> DeserializeResult<Self> {
        crate::deserialize(text)
    }

    fn from_json_with<'a>(
        text: impl Into<Option<&'a str>>,
        options: &DeserializeOptions,
    ) -> DeserializeResult<Self> {
        crate::deserialize_with(text, options)
    }
}

/// Declares a struct together with its schema, implements [`Deserializable`]
/// for it and gives it a `serde::Deserialize` impl that goes through the same
/// schema, so it can be nested in other schema types.
///
/// ```ignore
/// json_schema! {
///     #[derive(Debug, Default, PartialEq)]
///     pub struct Room {
///         pub name: String = "name" => FieldKind::String,
///         pub area: f64 = "area" => FieldKind::Double => positive,
///         pub windows: i32 = "windows" => FieldKind::Integer,
///         pub legacy_id: i32 => FieldKind::Integer,
///     }
/// }
/// ```
///
/// Every field of the struct is a schema field. A field written without
/// `= "key"` has no JSON mapping and is reported as such on every call. The
/// struct must implement `Default`, and each field type `serde::Deserialize`.
#[macro_export]
macro_rules! json_schema {
    (
        $(#[$attr:meta])*
        $vis:vis struct $ty:ident {
            $(
                $(#[$field_attr:meta])*
                $field_vis:vis $field:ident : $field_ty:ty $(= $key:literal)? => $kind:expr $(=> $check:expr)*
            ),* $(,)?
        }
    ) => {
        $(#[$attr])*
        $vis struct $ty {
            $(
                $(#[$field_attr])*
                $field_vis $field: $field_ty,
            )*
        }

        impl $crate::Deserializable for $ty {
            fn schema() -> &'static $crate::Schema<Self> {
                static SCHEMA: ::std::sync::OnceLock<$crate::Schema<$ty>> =
                    ::std::sync::OnceLock::new();
                SCHEMA.get_or_init(|| {
                    $crate::Schema::<$ty>::builder(stringify!($ty))
                        $(
                            .field(
                                $crate::FieldSpec::new(
                                    stringify!($field),
                                    $crate::__json_key!($($key)?),
                                    $kind,
                                )
                                $(.check($check))*,
                                |target: &mut $ty, value| {
                                    target.$field = $crate::from_field_value::<$field_ty>(value)?;
                                    Ok(())
                                },
                            )
                        )*
                        .build()
                })
            }
        }

        impl<'de> $crate::__private::serde::Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> ::std::result::Result<Self, D::Error>
            where
                D: $crate::__private::serde::Deserializer<'de>,
            {
                $crate::deserialize_record(deserializer)
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __json_key {
    () => {
        None
    };
    ($key:literal) => {
        Some($key)
    };
}
