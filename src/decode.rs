//! Record decoding: normalization followed by structural checks.
//!
//! [`decode_record`] is the lightweight pass: it normalizes each top-level
//! field and nothing else. [`decode_field`] and [`decode_record_checked`] are
//! the strict path: they normalize (including subtable rows) and then check
//! every value against its type's decode schema, accumulating all structural
//! errors.
//!
//! Normalization always runs first so legitimately missing or blank values
//! are canonical before their shape is checked.

use std::sync::OnceLock;

use indexmap::IndexMap;
use rayon::prelude::*;
use serde_json::Value;
use stillwater::Validation;

use crate::error::{SchemaError, SchemaErrors};
use crate::field_type::FieldType;
use crate::normalize::{normalize_field, normalize_field_deep};
use crate::path::FieldPath;
use crate::schema::{Schema, ValueValidator};
use crate::ValidationResult;

/// A record: field codes mapped to `{type, value}` fields, in insertion order.
pub type Record = IndexMap<String, Value>;

/// One value schema per field type.
///
/// Built once; [`DecodeSchemaSet::shared`] returns a process-wide instance.
/// The set holds no mutable state and can be used from any thread.
///
/// # Example
///
/// ```rust
/// use fieldnorm::{DecodeSchemaSet, FieldPath, FieldType, ValueValidator};
/// use serde_json::json;
///
/// let set = DecodeSchemaSet::shared();
///
/// let schema = set.value_schema(FieldType::CheckBox).unwrap();
/// assert!(schema.validate_value(&json!(["a", "b"]), &FieldPath::root()).is_success());
/// assert!(schema.validate_value(&json!(null), &FieldPath::root()).is_failure());
/// ```
pub struct DecodeSchemaSet {
    schemas: IndexMap<FieldType, Box<dyn ValueValidator>>,
}

impl DecodeSchemaSet {
    /// Builds the schema for every field type.
    pub fn new() -> Self {
        let schemas = FieldType::ALL
            .into_iter()
            .map(|field_type| (field_type, value_schema_for(field_type)))
            .collect();
        Self { schemas }
    }

    /// Returns the process-wide schema set.
    pub fn shared() -> &'static DecodeSchemaSet {
        static SHARED: OnceLock<DecodeSchemaSet> = OnceLock::new();
        SHARED.get_or_init(DecodeSchemaSet::new)
    }

    /// Returns the value schema for a field type.
    pub fn value_schema(&self, field_type: FieldType) -> Option<&dyn ValueValidator> {
        self.schemas.get(&field_type).map(|schema| schema.as_ref())
    }

    /// Normalizes `field` (subtable rows included) and checks its structure.
    ///
    /// Errors are located relative to `path`.
    pub fn decode_field(&self, field: &Value, path: &FieldPath) -> ValidationResult<Value> {
        let normalized = normalize_field_deep(field);
        Schema::field().validate_in(self, &normalized, path)
    }

    /// Decodes every field of `raw`, accumulating all structural errors.
    pub fn decode_record(&self, raw: &Record) -> ValidationResult<Record> {
        let mut errors: Vec<SchemaError> = Vec::new();
        let mut decoded = Record::with_capacity(raw.len());

        for (code, field) in raw {
            match self.decode_field(field, &FieldPath::field(code)) {
                Validation::Success(value) => {
                    tracing::trace!(field_code = %code, "decoded field");
                    decoded.insert(code.clone(), value);
                }
                Validation::Failure(e) => errors.extend(e),
            }
        }

        if errors.is_empty() {
            Validation::Success(decoded)
        } else {
            Validation::Failure(SchemaErrors::from_vec(errors))
        }
    }
}

impl Default for DecodeSchemaSet {
    fn default() -> Self {
        Self::new()
    }
}

fn entity() -> crate::schema::ObjectSchema {
    Schema::object()
        .field("code", Schema::string())
        .field("name", Schema::string())
}

fn value_schema_for(field_type: FieldType) -> Box<dyn ValueValidator> {
    match field_type {
        FieldType::SingleLineText
        | FieldType::MultiLineText
        | FieldType::RichText
        | FieldType::Calculation
        | FieldType::Link
        | FieldType::Lookup
        | FieldType::RecordNumber
        | FieldType::CreatedTime
        | FieldType::UpdatedTime
        | FieldType::Status
        | FieldType::RecordId
        | FieldType::Revision => Box::new(Schema::string()),
        FieldType::Number
        | FieldType::RadioButton
        | FieldType::DropDown
        | FieldType::Date
        | FieldType::Time
        | FieldType::DateTime => Box::new(Schema::nullable(Schema::string())),
        FieldType::CheckBox | FieldType::MultiSelect | FieldType::Category => {
            Box::new(Schema::array(Schema::string()))
        }
        FieldType::UserSelect
        | FieldType::OrganizationSelect
        | FieldType::GroupSelect
        | FieldType::StatusAssignee => Box::new(Schema::array(entity())),
        FieldType::Creator | FieldType::Modifier => Box::new(entity()),
        FieldType::File => Box::new(Schema::array(
            Schema::object()
                .field("contentType", Schema::string())
                .field("fileKey", Schema::string())
                .field("name", Schema::string())
                .field("size", Schema::string()),
        )),
        FieldType::Subtable => Box::new(Schema::array(
            Schema::object()
                .field("id", Schema::string())
                .field(
                    "value",
                    Schema::object().additional_properties(Schema::row_field()),
                ),
        )),
    }
}

/// Normalizes every top-level field of `raw`.
///
/// Each value goes through [`normalize_field`] under its original key.
/// Subtable rows are not visited and no structural check is made; use
/// [`decode_record_checked`] for that.
///
/// ```rust
/// use fieldnorm::decode_record;
/// use indexmap::indexmap;
/// use serde_json::json;
///
/// let raw = indexmap! {
///     "x".to_string() => json!({"type": "checkbox", "value": null}),
///     "y".to_string() => json!({"type": "radio-button", "value": "opt1"}),
/// };
/// let decoded = decode_record(&raw);
///
/// assert_eq!(decoded["x"], json!({"type": "checkbox", "value": []}));
/// assert_eq!(decoded["y"], json!({"type": "radio-button", "value": "opt1"}));
/// ```
pub fn decode_record(raw: &Record) -> Record {
    raw.iter()
        .map(|(code, field)| (code.clone(), normalize_field(field)))
        .collect()
}

/// Normalizes and structurally checks a single field.
pub fn decode_field(field: &Value) -> ValidationResult<Value> {
    DecodeSchemaSet::shared().decode_field(field, &FieldPath::root())
}

/// Normalizes (subtable rows included) and structurally checks a record,
/// reporting every malformed field.
pub fn decode_record_checked(raw: &Record) -> ValidationResult<Record> {
    DecodeSchemaSet::shared().decode_record(raw)
}

/// [`decode_record_checked`] over many records in parallel.
///
/// Results are in the same order as `raws`.
pub fn par_decode_records(raws: &[Record]) -> Vec<ValidationResult<Record>> {
    let set = DecodeSchemaSet::shared();
    raws.par_iter().map(|raw| set.decode_record(raw)).collect()
}

/// Converts a raw JSON record payload into a [`Record`].
///
/// Fails with `invalid_type` at the record root if `raw` is not an object.
pub fn record_from_json(raw: &Value) -> ValidationResult<Record> {
    match raw.as_object() {
        Some(object) => Validation::Success(
            object
                .iter()
                .map(|(code, field)| (code.clone(), field.clone()))
                .collect(),
        ),
        None => Validation::Failure(SchemaErrors::single(
            SchemaError::new(FieldPath::root(), "expected record object")
                .with_code("invalid_type")
                .with_got(crate::schema::value_type_name(raw))
                .with_expected("object"),
        )),
    }
}
