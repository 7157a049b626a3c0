//! Type parsers: one strategy per [`FieldKind`], tried in a fixed order.

use std::sync::LazyLock;

use serde_json::Value;
use tracing::debug;

use crate::engine::{parse_value, read_record, ParseContext};
use crate::{phone, FieldKind, FieldSpec, FieldValue};

/// Converts a JSON node into a [`FieldValue`] for one kind of field.
///
/// On failure `parse` records exactly one message in `ctx` (nested parsers
/// may record the messages of their inner fields instead) and returns `None`.
pub trait TypeParser: Send + Sync {
    fn name(&self) -> &'static str;

    fn can_handle(&self, kind: &FieldKind) -> bool;

    fn parse(
        &self,
        spec: &FieldSpec,
        kind: &FieldKind,
        node: &Value,
        ctx: &mut ParseContext<'_>,
    ) -> Option<FieldValue>;
}

static PARSERS: LazyLock<Vec<Box<dyn TypeParser>>> = LazyLock::new(|| {
    let parsers: Vec<Box<dyn TypeParser>> = vec![
        Box::new(StringParser),
        Box::new(PhoneNumberParser),
        Box::new(IntegerParser),
        Box::new(DoubleParser),
        Box::new(ArrayParser),
        Box::new(ObjectParser),
    ];
    parsers
});

/// First registered parser that claims `kind`.
pub fn find_parser(kind: &FieldKind) -> Option<&'static dyn TypeParser> {
    PARSERS
        .iter()
        .find(|parser| parser.can_handle(kind))
        .map(|parser| &**parser)
}

pub struct StringParser;

impl TypeParser for StringParser {
    fn name(&self) -> &'static str {
        "string"
    }

    fn can_handle(&self, kind: &FieldKind) -> bool {
        matches!(kind, FieldKind::String)
    }

    fn parse(
        &self,
        spec: &FieldSpec,
        _kind: &FieldKind,
        node: &Value,
        ctx: &mut ParseContext<'_>,
    ) -> Option<FieldValue> {
        let Some(text) = node.as_str() else {
            ctx.reject(spec.field_name, "not a string");
            return None;
        };
        let trimmed = text.trim();
        if trimmed.is_empty() {
            ctx.reject(
                spec.field_name,
                "strings must not be empty or whitespace-only",
            );
            return None;
        }
        let text = if ctx.options().trim_strings {
            trimmed
        } else {
            text
        };
        Some(FieldValue::String(text.to_owned()))
    }
}

pub struct PhoneNumberParser;

impl TypeParser for PhoneNumberParser {
    fn name(&self) -> &'static str {
        "phone-number"
    }

    fn can_handle(&self, kind: &FieldKind) -> bool {
        matches!(kind, FieldKind::PhoneNumber)
    }

    fn parse(
        &self,
        spec: &FieldSpec,
        _kind: &FieldKind,
        node: &Value,
        ctx: &mut ParseContext<'_>,
    ) -> Option<FieldValue> {
        let format = ctx.options().phone_format;
        match node.as_str().and_then(|text| phone::normalize(text, format)) {
            Some(number) => Some(FieldValue::String(number)),
            None => {
                ctx.reject(spec.field_name, "not a valid phone number");
                None
            }
        }
    }
}

pub struct IntegerParser;

impl TypeParser for IntegerParser {
    fn name(&self) -> &'static str {
        "integer"
    }

    fn can_handle(&self, kind: &FieldKind) -> bool {
        matches!(kind, FieldKind::Integer)
    }

    fn parse(
        &self,
        spec: &FieldSpec,
        _kind: &FieldKind,
        node: &Value,
        ctx: &mut ParseContext<'_>,
    ) -> Option<FieldValue> {
        match node.as_i64().and_then(|v| i32::try_from(v).ok()) {
            Some(v) => Some(FieldValue::Integer(v)),
            None => {
                ctx.reject(spec.field_name, "not an integer");
                None
            }
        }
    }
}

pub struct DoubleParser;

impl TypeParser for DoubleParser {
    fn name(&self) -> &'static str {
        "double"
    }

    fn can_handle(&self, kind: &FieldKind) -> bool {
        matches!(kind, FieldKind::Double)
    }

    fn parse(
        &self,
        spec: &FieldSpec,
        _kind: &FieldKind,
        node: &Value,
        ctx: &mut ParseContext<'_>,
    ) -> Option<FieldValue> {
        match node.as_f64() {
            Some(v) => Some(FieldValue::Double(v)),
            None => {
                ctx.reject(spec.field_name, "not a floating-point number");
                None
            }
        }
    }
}

pub struct ArrayParser;

impl TypeParser for ArrayParser {
    fn name(&self) -> &'static str {
        "array"
    }

    fn can_handle(&self, kind: &FieldKind) -> bool {
        matches!(kind, FieldKind::Array(_))
    }

    fn parse(
        &self,
        spec: &FieldSpec,
        kind: &FieldKind,
        node: &Value,
        ctx: &mut ParseContext<'_>,
    ) -> Option<FieldValue> {
        let FieldKind::Array(element) = kind else {
            return None;
        };
        let Some(items) = node.as_array() else {
            ctx.reject(
                spec.field_name,
                "expected an array in JSON, but found a different type",
            );
            return None;
        };

        let mut values = Vec::with_capacity(items.len());
        let mut complete = true;
        for (index, item) in items.iter().enumerate() {
            ctx.enter_element(index);
            let parsed = parse_value(spec, element, item, ctx);
            ctx.leave_element();
            match parsed {
                Some(value) => values.push(value),
                None => {
                    debug!(field = spec.field_name, index, "array element rejected");
                    complete = false;
                }
            }
        }
        complete.then_some(FieldValue::Array(values))
    }
}

/// Catch-all for nested types: validates the node against the nested schema.
pub struct ObjectParser;

impl TypeParser for ObjectParser {
    fn name(&self) -> &'static str {
        "object"
    }

    fn can_handle(&self, kind: &FieldKind) -> bool {
        matches!(kind, FieldKind::Object(_))
    }

    fn parse(
        &self,
        spec: &FieldSpec,
        kind: &FieldKind,
        node: &Value,
        ctx: &mut ParseContext<'_>,
    ) -> Option<FieldValue> {
        let FieldKind::Object(nested) = kind else {
            return None;
        };
        if !node.is_object() {
            ctx.reject(
                spec.field_name,
                "expected an object in JSON, but found a different type",
            );
            return None;
        }
        debug!(field = spec.field_name, nested = nested.type_name(), "descending");
        let elements = ctx.detach_elements();
        let record = read_record(nested.fields(), node, ctx);
        ctx.attach_elements(elements);
        record
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::DeserializeOptions;

    fn fixture_kinds() -> Vec<FieldKind> {
        vec![
            FieldKind::String,
            FieldKind::PhoneNumber,
            FieldKind::Integer,
            FieldKind::Double,
            FieldKind::array(FieldKind::Integer),
        ]
    }

    #[test]
    fn exactly_one_parser_claims_each_kind() {
        for kind in fixture_kinds() {
            let claims = PARSERS.iter().filter(|p| p.can_handle(&kind)).count();
            assert_eq!(1, claims, "{kind:?}");
        }
    }

    #[test]
    fn registry_order_is_fixed() {
        let names: Vec<_> = PARSERS.iter().map(|p| p.name()).collect();

        assert_eq!(
            vec!["string", "phone-number", "integer", "double", "array", "object"],
            names
        );
    }

    #[test]
    fn integer_rejects_fractions_and_overflow() {
        let options = DeserializeOptions::default();
        let mut ctx = ParseContext::new(&options);
        let spec = FieldSpec::new("windows", Some("windows"), FieldKind::Integer);

        assert_eq!(
            Some(FieldValue::Integer(-4)),
            IntegerParser.parse(&spec, &spec.kind, &json!(-4), &mut ctx)
        );
        assert_eq!(None, IntegerParser.parse(&spec, &spec.kind, &json!(2.5), &mut ctx));
        assert_eq!(
            None,
            IntegerParser.parse(&spec, &spec.kind, &json!(3_000_000_000_i64), &mut ctx)
        );
        assert_eq!(2, ctx.error_count());
    }

    #[test]
    fn double_accepts_integral_numbers() {
        let options = DeserializeOptions::default();
        let mut ctx = ParseContext::new(&options);
        let spec = FieldSpec::new("area", Some("area"), FieldKind::Double);

        assert_eq!(
            Some(FieldValue::Double(20.0)),
            DoubleParser.parse(&spec, &spec.kind, &json!(20), &mut ctx)
        );
        assert_eq!(None, DoubleParser.parse(&spec, &spec.kind, &json!("20"), &mut ctx));
        assert_eq!(1, ctx.error_count());
    }

    #[test]
    fn string_trims_unless_disabled() {
        let spec = FieldSpec::new("name", Some("name"), FieldKind::String);
        let trimming = DeserializeOptions::default();
        let keeping = DeserializeOptions::default().with_trim_strings(false);

        let mut ctx = ParseContext::new(&trimming);
        assert_eq!(
            Some(FieldValue::String("Hall".to_owned())),
            StringParser.parse(&spec, &spec.kind, &json!("  Hall "), &mut ctx)
        );
        let mut ctx = ParseContext::new(&keeping);
        assert_eq!(
            Some(FieldValue::String("  Hall ".to_owned())),
            StringParser.parse(&spec, &spec.kind, &json!("  Hall "), &mut ctx)
        );
        assert_eq!(None, StringParser.parse(&spec, &spec.kind, &json!(" \t"), &mut ctx));
        assert_eq!(1, ctx.error_count());
    }

    #[test]
    fn array_reports_every_bad_element() {
        let options = DeserializeOptions::default();
        let mut ctx = ParseContext::new(&options);
        let spec = FieldSpec::new("floors", Some("floors"), FieldKind::array(FieldKind::Integer));

        assert_eq!(
            None,
            ArrayParser.parse(&spec, &spec.kind, &json!([1, "two", 3, "four"]), &mut ctx)
        );
        assert_eq!(
            [
                "Property floors[1]: not an integer.",
                "Property floors[3]: not an integer.",
            ],
            ctx.errors()
        );
    }

    #[test]
    fn nested_arrays_report_the_full_element_path() {
        let options = DeserializeOptions::default();
        let mut ctx = ParseContext::new(&options);
        let kind = FieldKind::array(FieldKind::array(FieldKind::Double));
        let spec = FieldSpec::new("grid", Some("grid"), kind);

        assert_eq!(
            None,
            ArrayParser.parse(&spec, &spec.kind, &json!([[1.0], 2.0, [3.0, "x"]]), &mut ctx)
        );
        assert_eq!(
            [
                "Property grid[1]: expected an array in JSON, but found a different type.",
                "Property grid[2][1]: not a floating-point number.",
            ],
            ctx.errors()
        );
    }
}
