use std::borrow::Cow;
use std::fmt::{Display, Write};

use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::document::parse_document;
use crate::errors::{missing_mapping_error, property_error};
use crate::parsers::find_parser;
use crate::{
    AssignError, Deserializable, DeserializeOptions, DeserializeResult, FieldKind, FieldSpec,
    FieldValue,
};

/// Per-call state handed to the type parsers: the options in force, the
/// error list being accumulated and the array indices currently entered.
pub struct ParseContext<'o> {
    options: &'o DeserializeOptions,
    errors: Vec<String>,
    elements: Vec<usize>,
}

impl<'o> ParseContext<'o> {
    pub(crate) fn new(options: &'o DeserializeOptions) -> Self {
        ParseContext {
            options,
            errors: Vec::new(),
            elements: Vec::new(),
        }
    }

    pub fn options(&self) -> &DeserializeOptions {
        self.options
    }

    /// Records `Property <field>: <reason>.`, or `Property <field>[i]: ...`
    /// while inside an array element.
    pub fn reject(&mut self, field_name: &str, reason: impl Display) {
        let message = property_error(&self.qualified(field_name), reason);
        debug!(field = field_name, %message, "field rejected");
        self.errors.push(message);
    }

    pub(crate) fn errors(&self) -> &[String] {
        &self.errors
    }

    pub(crate) fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub(crate) fn enter_element(&mut self, index: usize) {
        self.elements.push(index);
    }

    pub(crate) fn leave_element(&mut self) {
        self.elements.pop();
    }

    /// Inner fields of a nested record report under their own names, so the
    /// element path is set aside while the record is read.
    pub(crate) fn detach_elements(&mut self) -> Vec<usize> {
        std::mem::take(&mut self.elements)
    }

    pub(crate) fn attach_elements(&mut self, elements: Vec<usize>) {
        self.elements = elements;
    }

    fn qualified<'n>(&self, field_name: &'n str) -> Cow<'n, str> {
        if self.elements.is_empty() {
            return Cow::Borrowed(field_name);
        }
        let mut name = field_name.to_owned();
        for index in &self.elements {
            let _ = write!(name, "[{index}]");
        }
        Cow::Owned(name)
    }
}

pub fn deserialize<'a, T>(text: impl Into<Option<&'a str>>) -> DeserializeResult<T>
where
    T: Deserializable,
{
    deserialize_with(text, &DeserializeOptions::default())
}

/// Maps `text` onto `T`, checking every declared field independently.
///
/// Input and syntax problems end the call with a single error. After that,
/// every field is visited and every failure is kept, in schema order.
pub fn deserialize_with<'a, T>(
    text: impl Into<Option<&'a str>>,
    options: &DeserializeOptions,
) -> DeserializeResult<T>
where
    T: Deserializable,
{
    let schema = T::schema();
    let document = match parse_document(text.into()) {
        Ok(document) => document,
        Err(err) => {
            debug!(target_type = schema.type_name(), error = %err, "document rejected");
            return DeserializeResult::failure(vec![err.to_string()]);
        }
    };

    let object = document.as_object();
    let mut ctx = ParseContext::new(options);
    let mut target = T::default();

    for descriptor in schema.descriptors() {
        let Some(value) = read_field(descriptor.spec, object, &mut ctx) else {
            continue;
        };
        if let Err(err) = (descriptor.setter)(&mut target, value) {
            ctx.reject(descriptor.field_name(), err);
        }
    }

    debug!(
        target_type = schema.type_name(),
        errors = ctx.errors.len(),
        "document processed"
    );
    if ctx.errors.is_empty() {
        DeserializeResult::success(target)
    } else {
        DeserializeResult::failure(ctx.errors)
    }
}

/// Validates a nested object against `fields` and returns it as a record.
/// Inner failures land in `ctx` as if they were top-level fields.
pub(crate) fn read_record(
    fields: &[FieldSpec],
    node: &Value,
    ctx: &mut ParseContext<'_>,
) -> Option<FieldValue> {
    let object = node.as_object();
    let mut record = Vec::with_capacity(fields.len());
    let mut complete = true;

    for spec in fields {
        match read_field(spec, object, ctx) {
            Some(value) => record.push((spec.field_name.to_owned(), value)),
            None => complete = false,
        }
    }

    complete.then_some(FieldValue::Object(record))
}

/// Builds `T` from a record produced by [`read_record`], running `T`'s own
/// setters in schema order. Used for nested values, so a type is assembled
/// the same way at every depth.
pub(crate) fn build_record<T>(record: FieldValue) -> Result<T, AssignError>
where
    T: Deserializable,
{
    let mut entries = match record {
        FieldValue::Object(entries) => entries,
        other => return Err(AssignError::NotARecord(other.kind_name())),
    };
    let mut target = T::default();

    for descriptor in T::schema().descriptors() {
        let field = descriptor.field_name();
        let position = entries
            .iter()
            .position(|(name, _)| name == field)
            .ok_or(AssignError::MissingField(field))?;
        let (_, value) = entries.swap_remove(position);
        (descriptor.setter)(&mut target, value).map_err(|source| AssignError::Field {
            field,
            source: Box::new(source),
        })?;
    }
    Ok(target)
}

/// Runs the type parser for `kind` on `node`, reporting under `spec`'s name.
pub(crate) fn parse_value(
    spec: &FieldSpec,
    kind: &FieldKind,
    node: &Value,
    ctx: &mut ParseContext<'_>,
) -> Option<FieldValue> {
    let Some(parser) = find_parser(kind) else {
        ctx.reject(spec.field_name, "no type parser for this field kind");
        return None;
    };
    trace!(field = spec.field_name, parser = parser.name(), "dispatching");
    parser.parse(spec, kind, node, ctx)
}

fn read_field(
    spec: &FieldSpec,
    object: Option<&Map<String, Value>>,
    ctx: &mut ParseContext<'_>,
) -> Option<FieldValue> {
    let Some(json_key) = spec.json_key else {
        let message = missing_mapping_error(spec.field_name);
        debug!(field = spec.field_name, "field has no json key");
        ctx.errors.push(message);
        return None;
    };
    let Some(node) = object.and_then(|object| object.get(json_key)) else {
        ctx.reject(spec.field_name, "not found in JSON");
        return None;
    };

    let value = parse_value(spec, &spec.kind, node, ctx)?;
    for validator in &spec.validators {
        if let Err(reason) = validator(&value) {
            ctx.reject(spec.field_name, reason);
            return None;
        }
    }
    Some(value)
}
