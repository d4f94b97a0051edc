//! Annotation value normalization into JSON-safe values.

use crate::source::{simple_name, AnnotationValue};
use serde_json::{Number, Value};

/// Recursively rewrite a raw annotation value into plain JSON.
///
/// Lists keep their order, wrappers are unwrapped, enum constants become
/// `Type.CONSTANT`, class literals and nested annotations collapse to their
/// string form. Anything else is passed through unchanged.
pub fn normalize(value: &AnnotationValue) -> Value {
    match value {
        AnnotationValue::List(items) => Value::Array(items.iter().map(normalize).collect()),
        AnnotationValue::Wrapped(inner) => normalize(inner),
        AnnotationValue::EnumConstant {
            enclosing_type,
            name,
        } => Value::String(format!("{}.{}", simple_name(enclosing_type), name)),
        AnnotationValue::Type(type_ref) => Value::String(type_ref.clone()),
        // Nested usages are intentionally not expanded.
        AnnotationValue::Annotation(usage) => Value::String(usage.to_string()),
        AnnotationValue::Boolean(b) => Value::Bool(*b),
        AnnotationValue::Integer(n) => Value::Number((*n).into()),
        // NaN and infinities have no JSON form; keep their textual spelling.
        AnnotationValue::Float(n) => Number::from_f64(*n)
            .map(Value::Number)
            .unwrap_or_else(|| Value::String(n.to_string())),
        AnnotationValue::Char(c) => Value::String(c.to_string()),
        AnnotationValue::String(s) => Value::String(s.clone()),
        AnnotationValue::Other(raw) => raw.clone(),
    }
}
