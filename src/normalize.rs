//! Empty-value normalization.
//!
//! The platform's in-browser event API and its REST API disagree on how an
//! empty field looks: one omits `value`, the other sends `""`, `null` or `[]`
//! depending on the field type. [`normalize_field`] maps every such form onto
//! one canonical empty value per type, so that emptiness checks behave the
//! same regardless of where a record came from.
//!
//! A field is a JSON object `{"type": <tag>, "value": <value>}`. A missing
//! `value` key is the "undefined" state.
//!
//! # Example
//!
//! ```rust
//! use fieldnorm::normalize_field;
//! use serde_json::json;
//!
//! assert_eq!(
//!     normalize_field(&json!({"type": "single-line-text"})),
//!     json!({"type": "single-line-text", "value": ""})
//! );
//! assert_eq!(
//!     normalize_field(&json!({"type": "number", "value": ""})),
//!     json!({"type": "number", "value": null})
//! );
//! ```

use serde_json::{Map, Value};

use crate::field_type::FieldType;

/// How a field type canonicalizes its empty value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyRule {
    /// A missing value becomes `""`. `null` is kept.
    EmptyString,
    /// A missing value or `""` becomes `null`.
    NullOnBlank,
    /// A missing value becomes `null`. `""` is kept.
    NullOnUndefined,
    /// A missing value or `null` becomes `[]`.
    EmptyArray,
    /// The value is never touched.
    Untouched,
}

impl EmptyRule {
    /// Returns the rule for a known field type.
    pub fn for_type(field_type: FieldType) -> EmptyRule {
        match field_type {
            FieldType::SingleLineText
            | FieldType::MultiLineText
            | FieldType::Link
            | FieldType::Lookup => EmptyRule::EmptyString,
            FieldType::Number
            | FieldType::DateTime
            | FieldType::DropDown
            | FieldType::RadioButton => EmptyRule::NullOnBlank,
            FieldType::Date | FieldType::Time => EmptyRule::NullOnUndefined,
            FieldType::CheckBox
            | FieldType::MultiSelect
            | FieldType::UserSelect
            | FieldType::OrganizationSelect
            | FieldType::GroupSelect
            | FieldType::File
            | FieldType::Category
            | FieldType::StatusAssignee => EmptyRule::EmptyArray,
            FieldType::RichText
            | FieldType::Calculation
            | FieldType::Status
            | FieldType::Creator
            | FieldType::RecordNumber
            | FieldType::CreatedTime
            | FieldType::Modifier
            | FieldType::UpdatedTime
            | FieldType::RecordId
            | FieldType::Revision
            | FieldType::Subtable => EmptyRule::Untouched,
        }
    }

    /// Applies the rule to a field's value; `None` is a missing value.
    ///
    /// Returns `None` only when the value was missing and stays missing.
    pub fn apply(&self, value: Option<&Value>) -> Option<Value> {
        match (self, value) {
            (EmptyRule::EmptyString, None) => Some(Value::String(String::new())),
            (EmptyRule::NullOnBlank, None) => Some(Value::Null),
            (EmptyRule::NullOnBlank, Some(Value::String(s))) if s.is_empty() => Some(Value::Null),
            (EmptyRule::NullOnUndefined, None) => Some(Value::Null),
            (EmptyRule::EmptyArray, None | Some(Value::Null)) => Some(Value::Array(Vec::new())),
            (_, value) => value.cloned(),
        }
    }
}

/// Canonicalizes the empty value of a single field.
///
/// Total over any JSON value: non-objects, objects without a string `type`,
/// and unrecognized tags come back unchanged. Every property other than
/// `value` is copied as is. Subtable rows are not visited; see
/// [`normalize_field_deep`].
pub fn normalize_field(field: &Value) -> Value {
    match field_parts(field) {
        Some((object, tag)) => match FieldType::from_tag(tag) {
            Some(field_type) => with_value(object, EmptyRule::for_type(field_type)),
            None => {
                tracing::debug!(field_type = tag, "unclassified field type passed through");
                field.clone()
            }
        },
        None => field.clone(),
    }
}

/// Like [`normalize_field`], and additionally normalizes every field of every
/// row of a `subtable` field.
///
/// Rows that are not objects, or whose `value` is not an object, are kept as
/// they are.
pub fn normalize_field_deep(field: &Value) -> Value {
    let normalized = normalize_field(field);
    match field_parts(&normalized) {
        Some((object, tag)) if tag == FieldType::Subtable.as_str() => {
            match object.get("value") {
                Some(Value::Array(rows)) => {
                    let rows = rows.iter().map(normalize_row).collect();
                    let mut object = object.clone();
                    object.insert("value".to_string(), Value::Array(rows));
                    Value::Object(object)
                }
                _ => normalized,
            }
        }
        _ => normalized,
    }
}

fn normalize_row(row: &Value) -> Value {
    match row.as_object() {
        Some(object) => match object.get("value") {
            Some(Value::Object(fields)) => {
                let fields: Map<String, Value> = fields
                    .iter()
                    .map(|(code, field)| (code.clone(), normalize_field(field)))
                    .collect();
                let mut object = object.clone();
                object.insert("value".to_string(), Value::Object(fields));
                Value::Object(object)
            }
            _ => row.clone(),
        },
        None => row.clone(),
    }
}

fn field_parts(field: &Value) -> Option<(&Map<String, Value>, &str)> {
    let object = field.as_object()?;
    let tag = object.get("type")?.as_str()?;
    Some((object, tag))
}

fn with_value(object: &Map<String, Value>, rule: EmptyRule) -> Value {
    let mut out = object.clone();
    if let Some(value) = rule.apply(object.get("value")) {
        out.insert("value".to_string(), value);
    }
    Value::Object(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_values() -> Vec<Option<Value>> {
        vec![
            None,
            Some(Value::Null),
            Some(json!("")),
            Some(json!("text")),
            Some(json!([])),
            Some(json!(["a"])),
            Some(json!({"code": "u1", "name": "User"})),
            Some(json!(0)),
        ]
    }

    fn field(tag: &str, value: Option<Value>) -> Value {
        match value {
            Some(v) => json!({"type": tag, "value": v}),
            None => json!({"type": tag}),
        }
    }

    #[test]
    fn test_string_family_missing_becomes_empty_string() {
        for tag in ["single-line-text", "multi-line-text", "link", "lookup"] {
            assert_eq!(normalize_field(&field(tag, None))["value"], json!(""));
            assert_eq!(normalize_field(&field(tag, Some(Value::Null)))["value"], Value::Null);
            assert_eq!(normalize_field(&field(tag, Some(json!("x"))))["value"], json!("x"));
        }
    }

    #[test]
    fn test_null_on_blank_family() {
        for tag in ["number", "datetime", "dropdown", "radio-button"] {
            assert_eq!(normalize_field(&field(tag, None))["value"], Value::Null);
            assert_eq!(normalize_field(&field(tag, Some(json!(""))))["value"], Value::Null);
            assert_eq!(normalize_field(&field(tag, Some(json!("12"))))["value"], json!("12"));
        }
    }

    #[test]
    fn test_null_on_undefined_keeps_blank_string() {
        for tag in ["date", "time"] {
            assert_eq!(normalize_field(&field(tag, None))["value"], Value::Null);
            assert_eq!(normalize_field(&field(tag, Some(json!(""))))["value"], json!(""));
        }
    }

    #[test]
    fn test_array_family() {
        for tag in [
            "checkbox",
            "multi-select",
            "user-select",
            "organization-select",
            "group-select",
            "file",
            "category",
            "status-assignee",
        ] {
            assert_eq!(normalize_field(&field(tag, None))["value"], json!([]));
            assert_eq!(normalize_field(&field(tag, Some(Value::Null)))["value"], json!([]));
            assert_eq!(normalize_field(&field(tag, Some(json!(""))))["value"], json!(""));
        }
    }

    #[test]
    fn test_untouched_types_keep_missing_value() {
        for tag in ["rich-text", "calculation", "status", "creator", "subtable"] {
            for value in sample_values() {
                let input = field(tag, value);
                assert_eq!(normalize_field(&input), input);
            }
        }
    }

    #[test]
    fn test_non_objects_are_identity() {
        for input in [Value::Null, json!("x"), json!(3), json!([1, 2]), json!(true)] {
            assert_eq!(normalize_field(&input), input);
        }
    }

    #[test]
    fn test_objects_without_string_type_are_identity() {
        let input = json!({"value": ""});
        assert_eq!(normalize_field(&input), input);
        let input = json!({"type": 5});
        assert_eq!(normalize_field(&input), input);
    }

    #[test]
    fn test_other_properties_preserved() {
        let input = json!({"type": "number", "label": "Qty", "value": ""});
        assert_eq!(
            normalize_field(&input),
            json!({"type": "number", "label": "Qty", "value": null})
        );
    }

    #[test]
    fn test_idempotent_for_every_type() {
        for field_type in FieldType::ALL {
            for value in sample_values() {
                let once = normalize_field(&field(field_type.as_str(), value));
                assert_eq!(normalize_field(&once), once, "{}", field_type);
                assert_eq!(once["type"], json!(field_type.as_str()));
            }
        }
    }

    #[test]
    fn test_deep_normalizes_rows() {
        let input = json!({
            "type": "subtable",
            "value": [
                {"id": "1", "value": {
                    "qty": {"type": "number", "value": ""},
                    "tags": {"type": "checkbox"}
                }},
                "garbage",
                {"id": "3"}
            ]
        });

        let output = normalize_field_deep(&input);
        let rows = output["value"].as_array().unwrap();
        assert_eq!(rows[0]["value"]["qty"]["value"], Value::Null);
        assert_eq!(rows[0]["value"]["tags"]["value"], json!([]));
        assert_eq!(rows[1], json!("garbage"));
        assert_eq!(rows[2], json!({"id": "3"}));
    }

    #[test]
    fn test_shallow_leaves_rows_alone() {
        let input = json!({
            "type": "subtable",
            "value": [{"id": "1", "value": {"qty": {"type": "number", "value": ""}}}]
        });
        assert_eq!(normalize_field(&input), input);
    }

    #[test]
    fn test_deep_matches_shallow_for_non_subtables() {
        let input = json!({"type": "dropdown", "value": ""});
        assert_eq!(normalize_field_deep(&input), normalize_field(&input));
    }
}
