//! Write-time validation.
//!
//! Some field types cannot be cleared through the write API: a radio button
//! always has a selection, and a record's categories and process-management
//! assignees cannot be emptied. This module rejects such values before they
//! are sent, and knows which literal clears every other type.
//!
//! Validation expects normalized fields; run [`normalize_field`] or
//! [`decode_record`] first.
//!
//! [`normalize_field`]: crate::normalize_field
//! [`decode_record`]: crate::decode_record

use serde_json::Value;

use crate::decode::Record;
use crate::error::{ValidationError, ValidationErrors};
use crate::field_type::FieldType;
use crate::path::FieldPath;

/// Whether the platform refuses an empty value for `tag` on write.
///
/// True exactly for `radio-button`, `category` and `status-assignee`.
/// Unknown tags are never required.
pub fn is_non_empty_required(tag: &str) -> bool {
    FieldType::from_tag(tag).is_some_and(|t| t.is_non_empty_required())
}

/// Rejects an empty value in a field whose type does not allow one.
///
/// A `radio-button` is empty when its value is `null` or `""`; a `category`
/// or `status-assignee` when its value is an empty array. Every other field,
/// including anything that is not a `{type, value}` object, passes.
///
/// # Example
///
/// ```rust
/// use fieldnorm::validate_for_write;
/// use serde_json::json;
///
/// assert!(validate_for_write(&json!({"type": "radio-button", "value": "x"})).is_ok());
///
/// let err = validate_for_write(&json!({"type": "category", "value": []})).unwrap_err();
/// assert_eq!(err.message, "category field cannot have an empty value");
/// ```
pub fn validate_for_write(field: &Value) -> Result<(), ValidationError> {
    let Some(tag) = field.get("type").and_then(Value::as_str) else {
        return Ok(());
    };
    if !is_non_empty_required(tag) {
        return Ok(());
    }

    let empty = match (FieldType::from_tag(tag), field.get("value")) {
        (Some(FieldType::RadioButton), Some(Value::Null)) => true,
        (Some(FieldType::RadioButton), Some(Value::String(s))) => s.is_empty(),
        (Some(FieldType::Category | FieldType::StatusAssignee), Some(Value::Array(items))) => {
            items.is_empty()
        }
        _ => false,
    };

    if empty {
        Err(ValidationError::empty_value(tag))
    } else {
        Ok(())
    }
}

/// Returns the literal that clears a field of type `tag` on write.
///
/// - `""` for single-line-text, multi-line-text, rich-text, link, lookup
/// - `null` for number, date, time, datetime, dropdown
/// - `[]` for checkbox, multi-select, user-select, organization-select,
///   group-select, file
/// - an error for radio-button, category, status-assignee
/// - `""` for everything else, typically read-only fields
///
/// ```rust
/// use fieldnorm::empty_value_for_write;
/// use serde_json::json;
///
/// assert_eq!(empty_value_for_write("dropdown").unwrap(), json!(null));
/// assert_eq!(empty_value_for_write("file").unwrap(), json!([]));
/// assert!(empty_value_for_write("radio-button").is_err());
/// ```
pub fn empty_value_for_write(tag: &str) -> Result<Value, ValidationError> {
    let Some(field_type) = FieldType::from_tag(tag) else {
        return Ok(Value::String(String::new()));
    };

    match field_type {
        FieldType::RadioButton | FieldType::Category | FieldType::StatusAssignee => {
            Err(ValidationError::empty_value(tag))
        }
        FieldType::Number
        | FieldType::Date
        | FieldType::Time
        | FieldType::DateTime
        | FieldType::DropDown => Ok(Value::Null),
        FieldType::CheckBox
        | FieldType::MultiSelect
        | FieldType::UserSelect
        | FieldType::OrganizationSelect
        | FieldType::GroupSelect
        | FieldType::File => Ok(Value::Array(Vec::new())),
        FieldType::SingleLineText
        | FieldType::MultiLineText
        | FieldType::RichText
        | FieldType::Link
        | FieldType::Lookup
        | FieldType::Calculation
        | FieldType::RecordNumber
        | FieldType::Creator
        | FieldType::CreatedTime
        | FieldType::Modifier
        | FieldType::UpdatedTime
        | FieldType::Status
        | FieldType::RecordId
        | FieldType::Revision
        | FieldType::Subtable => Ok(Value::String(String::new())),
    }
}

/// Validates every field of a record, stopping at the first offending one.
///
/// Fields are checked in insertion order. The returned error keeps the
/// field's `field_type`, sets `field_code`, and prefixes the message with
/// `Field "<code>": `. Fields after the offending one are not looked at.
///
/// ```rust
/// use fieldnorm::validate_record_for_write;
/// use indexmap::indexmap;
/// use serde_json::json;
///
/// let record = indexmap! {
///     "a".to_string() => json!({"type": "radio-button", "value": null}),
///     "b".to_string() => json!({"type": "category", "value": []}),
/// };
///
/// let err = validate_record_for_write(&record).unwrap_err();
/// assert_eq!(err.field_type, "radio-button");
/// assert_eq!(err.message, "Field \"a\": radio-button field cannot have an empty value");
/// ```
pub fn validate_record_for_write(record: &Record) -> Result<(), ValidationError> {
    RecordWriteValidator::new()
        .validate(record)
        .map_err(|errors| errors.first().clone())
}

/// How [`RecordWriteValidator`] reacts to an offending field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteValidationMode {
    /// Stop at the first offending field.
    #[default]
    FailFast,
    /// Check every field and report all offending ones.
    CollectAll,
}

/// Configurable record write validation.
///
/// Defaults match [`validate_record_for_write`]: fail fast, top-level fields
/// only.
///
/// # Example
///
/// ```rust
/// use fieldnorm::{RecordWriteValidator, WriteValidationMode};
/// use indexmap::indexmap;
/// use serde_json::json;
///
/// let record = indexmap! {
///     "a".to_string() => json!({"type": "radio-button", "value": ""}),
///     "b".to_string() => json!({"type": "category", "value": []}),
/// };
///
/// let errors = RecordWriteValidator::new()
///     .mode(WriteValidationMode::CollectAll)
///     .validate(&record)
///     .unwrap_err();
/// assert_eq!(errors.field_codes(), vec!["a", "b"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RecordWriteValidator {
    mode: WriteValidationMode,
    descend_into_subtables: bool,
}

impl RecordWriteValidator {
    /// Creates a fail-fast validator that only checks top-level fields.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the failure mode.
    pub fn mode(mut self, mode: WriteValidationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Also validates the fields of every subtable row.
    ///
    /// Errors from rows are keyed by their path, e.g. `items[0].choice`.
    pub fn descend_into_subtables(mut self, descend: bool) -> Self {
        self.descend_into_subtables = descend;
        self
    }

    /// Validates `record` according to the configuration.
    pub fn validate(&self, record: &Record) -> Result<(), ValidationErrors> {
        let mut errors = Vec::new();

        for (code, field) in record {
            let path = FieldPath::field(code);
            if self.check(field, &path, &mut errors) {
                break;
            }
            if self.descend_into_subtables && self.check_rows(field, &path, &mut errors) {
                break;
            }
        }

        match ValidationErrors::from_vec(errors) {
            Some(errors) => Err(errors),
            None => Ok(()),
        }
    }

    /// Returns true when validation should stop.
    fn check(&self, field: &Value, path: &FieldPath, errors: &mut Vec<ValidationError>) -> bool {
        match validate_for_write(field) {
            Ok(()) => false,
            Err(error) => {
                let error = error.for_field(path.to_string());
                tracing::debug!(
                    field_code = %path,
                    field_type = %error.field_type,
                    "rejected empty value for write"
                );
                errors.push(error);
                self.mode == WriteValidationMode::FailFast
            }
        }
    }

    fn check_rows(&self, field: &Value, path: &FieldPath, errors: &mut Vec<ValidationError>) -> bool {
        if field.get("type").and_then(Value::as_str) != Some(FieldType::Subtable.as_str()) {
            return false;
        }
        let Some(rows) = field.get("value").and_then(Value::as_array) else {
            return false;
        };

        for (index, row) in rows.iter().enumerate() {
            let Some(cells) = row.get("value").and_then(Value::as_object) else {
                continue;
            };
            for (code, cell) in cells {
                if self.check(cell, &path.row_field(index, code), errors) {
                    return true;
                }
            }
        }
        false
    }
}
