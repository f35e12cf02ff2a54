//! Structural checks on the raw input collections.
//!
//! Validation runs on the untyped JSON before anything is deserialized or
//! drawn, so every problem can be reported with its element index and field
//! name. A failure is a hard stop for the run.

use serde_json::Value;
use std::fmt;
use thiserror::Error;
use vitae_types::MAX_PACKED_COLOR;

const TEXT_REQUIRED: [&str; 4] = ["text", "x", "y", "size"];
const RECT_REQUIRED: [&str; 5] = ["x", "y", "width", "height", "fill_color"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Text,
    Shapes,
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Collection::Text => f.write_str("text"),
            Collection::Shapes => f.write_str("shapes"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    Empty,
    NotAnObject { index: usize },
    MissingFields { index: usize, fields: Vec<&'static str> },
    WrongType { index: usize, field: &'static str, expected: &'static str },
    ColorOutOfRange { index: usize, value: String },
    FillColor { index: usize, found: String },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::Empty => f.write_str("collection is empty"),
            ValidationIssue::NotAnObject { index } => write!(f, "element {} is not an object", index),
            ValidationIssue::MissingFields { index, fields } => {
                write!(f, "element {} missing fields: {}", index, fields.join(", "))
            }
            ValidationIssue::WrongType { index, field, expected } => {
                write!(f, "element {}: '{}' must be {}", index, field, expected)
            }
            ValidationIssue::ColorOutOfRange { index, value } => {
                write!(f, "element {}: 'color' {} is not a 24-bit color", index, value)
            }
            ValidationIssue::FillColor { index, found } => {
                write!(f, "element {}: 'fill_color' must be a list of 3 numbers, got {}", index, found)
            }
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
#[error("{collection} validation failed with {} issue(s): {}", .issues.len(), summarize(.issues))]
pub struct ValidationError {
    pub collection: Collection,
    pub issues: Vec<ValidationIssue>,
}

fn summarize(issues: &[ValidationIssue]) -> String {
    issues.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}

pub struct DataValidator;

impl DataValidator {
    /// An empty collection, or any element missing `text`/`x`/`y`/`size` or
    /// carrying a field of the wrong type, fails the whole collection.
    pub fn validate_text(elements: &[Value]) -> Result<(), ValidationError> {
        let mut issues = Vec::new();
        if elements.is_empty() {
            issues.push(ValidationIssue::Empty);
        }

        for (index, element) in elements.iter().enumerate() {
            let Some(obj) = element.as_object() else {
                issues.push(ValidationIssue::NotAnObject { index });
                continue;
            };

            let missing: Vec<&'static str> =
                TEXT_REQUIRED.into_iter().filter(|f| !obj.contains_key(*f)).collect();
            if !missing.is_empty() {
                issues.push(ValidationIssue::MissingFields { index, fields: missing });
            }

            check_type(&mut issues, index, obj.get("text"), "text", "a string", Value::is_string);
            for field in ["x", "y", "size"] {
                check_type(&mut issues, index, obj.get(field), field, "numeric", Value::is_number);
            }
            check_type(&mut issues, index, obj.get("font"), "font", "a string", Value::is_string);
            check_type(&mut issues, index, obj.get("bold"), "bold", "a boolean", Value::is_boolean);
            check_type(&mut issues, index, obj.get("italic"), "italic", "a boolean", Value::is_boolean);

            if let Some(color) = obj.get("color") {
                if !(color.is_u64() || color.is_i64()) {
                    issues.push(ValidationIssue::WrongType { index, field: "color", expected: "an integer" });
                } else if !color.as_u64().is_some_and(|c| c <= u64::from(MAX_PACKED_COLOR)) {
                    issues.push(ValidationIssue::ColorOutOfRange { index, value: color.to_string() });
                }
            }
        }

        finish(Collection::Text, elements.len(), issues)
    }

    /// Shapes are optional decoration, so an empty collection is valid.
    /// Rectangles need `x`/`y`/`width`/`height` and a 3-number `fill_color`.
    /// Other shape types are accepted here and skipped at render time.
    pub fn validate_shapes(shapes: &[Value]) -> Result<(), ValidationError> {
        if shapes.is_empty() {
            log::warn!("Shapes data is empty (non-critical)");
            return Ok(());
        }

        let mut issues = Vec::new();
        for (index, shape) in shapes.iter().enumerate() {
            let Some(obj) = shape.as_object() else {
                issues.push(ValidationIssue::NotAnObject { index });
                continue;
            };

            let kind = match obj.get("type") {
                None => {
                    issues.push(ValidationIssue::MissingFields { index, fields: vec!["type"] });
                    continue;
                }
                Some(Value::String(kind)) => kind.as_str(),
                Some(_) => {
                    issues.push(ValidationIssue::WrongType { index, field: "type", expected: "a string" });
                    continue;
                }
            };
            if kind != "rect" {
                log::warn!("Shape {}: unsupported type '{}' will not be drawn", index, kind);
                continue;
            }

            let missing: Vec<&'static str> =
                RECT_REQUIRED.into_iter().filter(|f| !obj.contains_key(*f)).collect();
            if !missing.is_empty() {
                issues.push(ValidationIssue::MissingFields { index, fields: missing });
            }
            for field in ["x", "y", "width", "height"] {
                check_type(&mut issues, index, obj.get(field), field, "numeric", Value::is_number);
            }
            if let Some(fill) = obj.get("fill_color") {
                let ok = fill
                    .as_array()
                    .is_some_and(|channels| channels.len() == 3 && channels.iter().all(Value::is_number));
                if !ok {
                    issues.push(ValidationIssue::FillColor { index, found: fill.to_string() });
                }
            }
        }

        finish(Collection::Shapes, shapes.len(), issues)
    }
}

fn check_type(
    issues: &mut Vec<ValidationIssue>,
    index: usize,
    value: Option<&Value>,
    field: &'static str,
    expected: &'static str,
    predicate: fn(&Value) -> bool,
) {
    if let Some(v) = value
        && !predicate(v)
    {
        issues.push(ValidationIssue::WrongType { index, field, expected });
    }
}

fn finish(collection: Collection, len: usize, issues: Vec<ValidationIssue>) -> Result<(), ValidationError> {
    if issues.is_empty() {
        log::info!("{} validation passed: {} elements", collection, len);
        return Ok(());
    }
    for issue in &issues {
        log::error!("{} validation: {}", collection, issue);
    }
    Err(ValidationError { collection, issues })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn text(v: Value) -> Result<(), ValidationError> {
        DataValidator::validate_text(v.as_array().unwrap())
    }

    fn shapes(v: Value) -> Result<(), ValidationError> {
        DataValidator::validate_shapes(v.as_array().unwrap())
    }

    #[test]
    fn empty_text_collection_is_rejected() {
        let err = text(json!([])).unwrap_err();
        assert_eq!(err.issues, vec![ValidationIssue::Empty]);
    }

    #[test]
    fn each_missing_text_field_is_rejected() {
        for field in TEXT_REQUIRED {
            let mut el = json!({"text": "Name", "x": 1, "y": 2, "size": 10});
            el.as_object_mut().unwrap().remove(field);
            let err = text(json!([el])).unwrap_err();
            assert_eq!(
                err.issues,
                vec![ValidationIssue::MissingFields { index: 0, fields: vec![field] }]
            );
        }
    }

    #[test]
    fn issues_name_index_and_field() {
        let err = text(json!([
            {"text": "ok", "x": 1, "y": 2, "size": 10},
            {"text": 5, "x": "1", "y": 2, "size": 10, "bold": "yes"},
            "not an object"
        ]))
        .unwrap_err();
        assert_eq!(err.collection, Collection::Text);
        assert_eq!(
            err.issues,
            vec![
                ValidationIssue::WrongType { index: 1, field: "text", expected: "a string" },
                ValidationIssue::WrongType { index: 1, field: "x", expected: "numeric" },
                ValidationIssue::WrongType { index: 1, field: "bold", expected: "a boolean" },
                ValidationIssue::NotAnObject { index: 2 },
            ]
        );
        assert!(err.to_string().contains("element 1: 'x' must be numeric"));
    }

    #[test]
    fn color_must_fit_in_24_bits() {
        assert!(text(json!([{"text": "a", "x": 1, "y": 2, "size": 10, "color": 0xFFFFFF}])).is_ok());
        let err = text(json!([{"text": "a", "x": 1, "y": 2, "size": 10, "color": 0x1000000}])).unwrap_err();
        assert!(matches!(err.issues[0], ValidationIssue::ColorOutOfRange { index: 0, .. }));
        let err = text(json!([{"text": "a", "x": 1, "y": 2, "size": 10, "color": -1}])).unwrap_err();
        assert!(matches!(err.issues[0], ValidationIssue::ColorOutOfRange { index: 0, .. }));
        let err = text(json!([{"text": "a", "x": 1, "y": 2, "size": 10, "color": 1.5}])).unwrap_err();
        assert!(matches!(err.issues[0], ValidationIssue::WrongType { field: "color", .. }));
    }

    #[test]
    fn empty_shapes_are_valid() {
        assert!(shapes(json!([])).is_ok());
    }

    #[test]
    fn fill_color_needs_exactly_three_numbers() {
        let rect = |fill: Value| json!([{"type": "rect", "x": 0, "y": 0, "width": 5, "height": 5, "fill_color": fill}]);
        assert!(shapes(rect(json!([0.1, 0.2, 0.3]))).is_ok());
        for bad in [json!([0.1, 0.2]), json!([0.1, 0.2, 0.3, 0.4]), json!("blue"), json!([0.1, "g", 0.3])] {
            let err = shapes(rect(bad)).unwrap_err();
            assert!(matches!(err.issues[0], ValidationIssue::FillColor { index: 0, .. }));
        }
    }

    #[test]
    fn rect_missing_fields_are_listed() {
        let err = shapes(json!([{"type": "rect", "x": 0}])).unwrap_err();
        assert_eq!(
            err.issues,
            vec![ValidationIssue::MissingFields {
                index: 0,
                fields: vec!["y", "width", "height", "fill_color"]
            }]
        );
    }

    #[test]
    fn shape_without_type_is_rejected_but_unknown_type_passes() {
        assert!(shapes(json!([{"x": 0}])).is_err());
        assert!(shapes(json!([{"type": "circle", "r": 4}])).is_ok());
    }
}
