// Schema detection
//
// Pure, stateless inference of a flat field-level schema from a JSON sample.
// Only top-level keys are inspected; arrays and nested objects are typed as-is
// without descending into their elements.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SchemaError;

/// Longest sample rendering kept verbatim; longer values are truncated.
const MAX_SAMPLE_LEN: usize = 50;
const TRUNCATED_SAMPLE_LEN: usize = 47;

/// Inferred type of a top-level field
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Number,
    Boolean,
    Array,
    Object,
    Timestamp,
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldType::String => write!(f, "string"),
            FieldType::Number => write!(f, "number"),
            FieldType::Boolean => write!(f, "boolean"),
            FieldType::Array => write!(f, "array"),
            FieldType::Object => write!(f, "object"),
            FieldType::Timestamp => write!(f, "timestamp"),
        }
    }
}

/// One detected field of a sample object
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub nullable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample: Option<String>,
}

/// Result of one detection call; fields appear in first-seen key order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Schema {
    pub name: String,
    pub fields: Vec<Field>,
}

/// Infer a schema from a raw JSON sample.
///
/// The input must be a single JSON object; top-level arrays and scalars are
/// rejected. One `Field` is produced per top-level key, in the order the keys
/// appear in the document.
pub fn detect_from_json(data: &[u8]) -> Result<Schema, SchemaError> {
    let value: Value = serde_json::from_slice(data)?;
    let obj = value.as_object().ok_or(SchemaError::NotAnObject)?;

    let fields = obj
        .iter()
        .map(|(key, value)| Field {
            name: key.clone(),
            field_type: infer_type(value),
            nullable: value.is_null(),
            sample: sample_of(value),
        })
        .collect();

    Ok(Schema {
        name: "detected_schema".to_string(),
        fields,
    })
}

fn infer_type(value: &Value) -> FieldType {
    match value {
        // Null carries no type information; default to string
        Value::Null => FieldType::String,
        Value::String(s) => {
            if is_timestamp(s) {
                FieldType::Timestamp
            } else {
                FieldType::String
            }
        }
        Value::Number(_) => FieldType::Number,
        Value::Bool(_) => FieldType::Boolean,
        Value::Array(_) => FieldType::Array,
        Value::Object(_) => FieldType::Object,
    }
}

/// Formats tried in order: RFC3339, date-time, bare date.
fn is_timestamp(s: &str) -> bool {
    DateTime::parse_from_rfc3339(s).is_ok()
        || NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").is_ok()
        || NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
}

fn sample_of(value: &Value) -> Option<String> {
    if value.is_null() {
        return None;
    }
    // Strings render bare; everything else renders as compact JSON
    let rendered = match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    if rendered.chars().count() > MAX_SAMPLE_LEN {
        let truncated: String = rendered.chars().take(TRUNCATED_SAMPLE_LEN).collect();
        Some(format!("{truncated}..."))
    } else {
        Some(rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_scalar_types() {
        let schema =
            detect_from_json(br#"{"name":"Alice","age":30,"active":true}"#).unwrap();

        assert_eq!(schema.name, "detected_schema");
        assert_eq!(schema.fields.len(), 3);

        assert_eq!(schema.fields[0].name, "name");
        assert_eq!(schema.fields[0].field_type, FieldType::String);
        assert!(!schema.fields[0].nullable);
        assert_eq!(schema.fields[0].sample.as_deref(), Some("Alice"));

        assert_eq!(schema.fields[1].name, "age");
        assert_eq!(schema.fields[1].field_type, FieldType::Number);
        assert!(!schema.fields[1].nullable);

        assert_eq!(schema.fields[2].name, "active");
        assert_eq!(schema.fields[2].field_type, FieldType::Boolean);
        assert!(!schema.fields[2].nullable);
    }

    #[test]
    fn detects_timestamps_in_each_format() {
        for input in [
            br#"{"ts":"2024-01-15T10:00:00Z"}"#.as_slice(),
            br#"{"ts":"2024-01-15 10:00:00"}"#.as_slice(),
            br#"{"ts":"2024-01-15"}"#.as_slice(),
        ] {
            let schema = detect_from_json(input).unwrap();
            assert_eq!(schema.fields[0].field_type, FieldType::Timestamp);
        }
    }

    #[test]
    fn non_timestamp_string_stays_string() {
        let schema = detect_from_json(br#"{"s":"2024-13-99"}"#).unwrap();
        assert_eq!(schema.fields[0].field_type, FieldType::String);
    }

    #[test]
    fn null_is_nullable_string_with_no_sample() {
        let schema = detect_from_json(br#"{"x":null}"#).unwrap();
        let field = &schema.fields[0];
        assert_eq!(field.field_type, FieldType::String);
        assert!(field.nullable);
        assert_eq!(field.sample, None);
    }

    #[test]
    fn arrays_and_objects_are_not_descended() {
        let schema = detect_from_json(br#"{"a":[1,2],"o":{"k":"v"}}"#).unwrap();
        assert_eq!(schema.fields[0].field_type, FieldType::Array);
        assert_eq!(schema.fields[0].sample.as_deref(), Some("[1,2]"));
        assert_eq!(schema.fields[1].field_type, FieldType::Object);
    }

    #[test]
    fn long_samples_are_truncated_with_ellipsis() {
        let long = "x".repeat(80);
        let input = format!(r#"{{"s":"{long}"}}"#);
        let schema = detect_from_json(input.as_bytes()).unwrap();
        let sample = schema.fields[0].sample.as_deref().unwrap();
        assert_eq!(sample.len(), 50);
        assert!(sample.ends_with("..."));
        assert_eq!(&sample[..47], &long[..47]);
    }

    #[test]
    fn field_order_follows_document_key_order() {
        let schema = detect_from_json(br#"{"z":1,"a":2,"m":3}"#).unwrap();
        let names: Vec<_> = schema.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["z", "a", "m"]);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = detect_from_json(br#"{"a":"#).unwrap_err();
        assert!(matches!(err, SchemaError::Parse(_)));
    }

    #[test]
    fn non_object_top_level_is_rejected() {
        for input in [br#"[1,2,3]"#.as_slice(), br#""scalar""#.as_slice(), b"42".as_slice()] {
            let err = detect_from_json(input).unwrap_err();
            assert!(matches!(err, SchemaError::NotAnObject));
        }
    }
}
