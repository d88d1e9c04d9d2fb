//! Integration tests for empty-value normalization.

use fieldnorm::{decode_record, normalize_field, validate_record_for_write, FieldType};
use indexmap::indexmap;
use serde_json::{json, Value};

fn samples() -> Vec<Option<Value>> {
    vec![
        None,
        Some(json!(null)),
        Some(json!("")),
        Some(json!("x")),
        Some(json!([])),
        Some(json!(["a"])),
        Some(json!({"code": "u1", "name": "Ann"})),
        Some(json!(0)),
    ]
}

fn field(tag: &str, value: Option<Value>) -> Value {
    match value {
        Some(value) => json!({"type": tag, "value": value}),
        None => json!({"type": tag}),
    }
}

#[test]
fn test_normalize_is_idempotent() {
    for field_type in FieldType::ALL {
        for value in samples() {
            let once = normalize_field(&field(field_type.as_str(), value));
            let twice = normalize_field(&once);
            assert_eq!(once, twice, "{}", field_type);
        }
    }
}

#[test]
fn test_normalize_preserves_type_and_extra_properties() {
    for field_type in FieldType::ALL {
        let input = json!({"type": field_type.as_str(), "label": "L", "value": ""});
        let output = normalize_field(&input);
        assert_eq!(output["type"], json!(field_type.as_str()));
        assert_eq!(output["label"], json!("L"));
    }
}

#[test]
fn test_string_family() {
    for tag in ["single-line-text", "multi-line-text", "link", "lookup"] {
        assert_eq!(normalize_field(&field(tag, None))["value"], json!(""));
        assert_eq!(normalize_field(&field(tag, Some(json!(null))))["value"], json!(null));
        assert_eq!(normalize_field(&field(tag, Some(json!("hi"))))["value"], json!("hi"));
    }
}

#[test]
fn test_null_on_blank_family() {
    for tag in ["number", "datetime", "dropdown", "radio-button"] {
        assert_eq!(normalize_field(&field(tag, None))["value"], json!(null));
        assert_eq!(normalize_field(&field(tag, Some(json!(""))))["value"], json!(null));
        assert_eq!(normalize_field(&field(tag, Some(json!("1"))))["value"], json!("1"));
    }
}

#[test]
fn test_date_and_time_keep_empty_string() {
    for tag in ["date", "time"] {
        assert_eq!(normalize_field(&field(tag, None))["value"], json!(null));
        assert_eq!(normalize_field(&field(tag, Some(json!(""))))["value"], json!(""));
    }
}

#[test]
fn test_array_family() {
    let tags = [
        "checkbox",
        "multi-select",
        "user-select",
        "organization-select",
        "group-select",
        "file",
        "category",
        "status-assignee",
    ];
    for tag in tags {
        assert_eq!(normalize_field(&field(tag, None))["value"], json!([]));
        assert_eq!(normalize_field(&field(tag, Some(json!(null))))["value"], json!([]));
        assert_eq!(normalize_field(&field(tag, Some(json!(["a"]))))["value"], json!(["a"]));
    }
}

#[test]
fn test_untouched_types_keep_missing_value() {
    for tag in ["rich-text", "calculation", "creator", "status", "record-id", "subtable"] {
        assert_eq!(normalize_field(&field(tag, None)), json!({"type": tag}));
        assert_eq!(
            normalize_field(&field(tag, Some(json!("")))),
            json!({"type": tag, "value": ""})
        );
    }
}

#[test]
fn test_non_fields_pass_through() {
    for value in [json!(null), json!("text"), json!([1, 2]), json!({"value": ""}), json!({"type": 3})] {
        assert_eq!(normalize_field(&value), value);
    }
    let unknown = json!({"type": "spreadsheet"});
    assert_eq!(normalize_field(&unknown), unknown);
}

#[test]
fn test_normalize_then_validate_record() {
    let raw = indexmap! {
        "x".to_string() => json!({"type": "checkbox", "value": null}),
        "y".to_string() => json!({"type": "radio-button", "value": "opt1"}),
    };

    let record = decode_record(&raw);
    assert_eq!(record["x"], json!({"type": "checkbox", "value": []}));
    assert_eq!(record["y"], json!({"type": "radio-button", "value": "opt1"}));
    assert!(validate_record_for_write(&record).is_ok());
}

#[test]
fn test_blank_radio_button_is_caught_after_normalization() {
    let raw = indexmap! {
        "choice".to_string() => json!({"type": "radio-button", "value": ""}),
    };

    let record = decode_record(&raw);
    assert_eq!(record["choice"]["value"], json!(null));

    let err = validate_record_for_write(&record).unwrap_err();
    assert_eq!(err.field_code.as_deref(), Some("choice"));
}
