//! Polymorphic `{type, value}` field schema.
//!
//! A field's value shape depends on its own `type` tag, so the schema reads
//! the tag first and then dispatches to that type's value schema from the
//! shared [`DecodeSchemaSet`](crate::DecodeSchemaSet).

use serde_json::{Map, Value};
use stillwater::Validation;

use crate::decode::DecodeSchemaSet;
use crate::error::{SchemaError, SchemaErrors};
use crate::field_type::FieldType;
use crate::path::FieldPath;

use super::traits::{SchemaLike, ValueValidator};
use super::value_type_name;

/// Where a field sits, which decides which tags are legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldScope {
    /// A top-level record field; every known tag is legal.
    Record,
    /// A field of a subtable row; only subtable-legal tags are.
    SubtableRow,
}

/// A schema for one `{type, value}` field.
///
/// Unknown tags are rejected with code `unknown_field_type`; tags illegal in
/// the scope with `not_allowed_in_subtable`. Properties besides `type` and
/// `value` are kept.
pub struct FieldSchema {
    scope: FieldScope,
}

impl FieldSchema {
    /// Creates a field schema for the given scope.
    pub fn new(scope: FieldScope) -> Self {
        Self { scope }
    }

    /// Returns the scope this schema checks against.
    pub fn scope(&self) -> FieldScope {
        self.scope
    }

    /// Checks a field, taking value schemas from the shared set.
    pub fn validate(&self, value: &Value, path: &FieldPath) -> Validation<Value, SchemaErrors> {
        self.validate_in(DecodeSchemaSet::shared(), value, path)
    }

    /// Checks a field, taking its value schema from `set`.
    pub fn validate_in(
        &self,
        set: &DecodeSchemaSet,
        value: &Value,
        path: &FieldPath,
    ) -> Validation<Value, SchemaErrors> {
        let Some(object) = value.as_object() else {
            return Validation::Failure(SchemaErrors::single(
                SchemaError::new(path.clone(), "expected field object")
                    .with_code("invalid_type")
                    .with_got(value_type_name(value))
                    .with_expected("object"),
            ));
        };

        let field_type = match self.resolve_type(object, path) {
            Ok(field_type) => field_type,
            Err(error) => return Validation::Failure(SchemaErrors::single(error)),
        };

        let value_path = path.push_key("value");
        let Some(field_value) = object.get("value") else {
            return Validation::Failure(SchemaErrors::single(
                SchemaError::new(value_path, "required property 'value' is missing")
                    .with_code("required"),
            ));
        };

        let Some(schema) = set.value_schema(field_type) else {
            return Validation::Success(value.clone());
        };

        schema.validate_value(field_value, &value_path).map(|checked| {
            let mut out = object.clone();
            out.insert("value".to_string(), checked);
            Value::Object(out)
        })
    }

    fn resolve_type(
        &self,
        object: &Map<String, Value>,
        path: &FieldPath,
    ) -> Result<FieldType, SchemaError> {
        let type_path = path.push_key("type");
        let tag = match object.get("type") {
            Some(Value::String(tag)) => tag,
            Some(other) => {
                return Err(SchemaError::new(type_path, "field type must be a string")
                    .with_code("invalid_type")
                    .with_got(value_type_name(other))
                    .with_expected("string"));
            }
            None => {
                return Err(
                    SchemaError::new(type_path, "required property 'type' is missing")
                        .with_code("required"),
                );
            }
        };

        let Some(field_type) = FieldType::from_tag(tag) else {
            return Err(
                SchemaError::new(type_path, format!("unknown field type '{}'", tag))
                    .with_code("unknown_field_type")
                    .with_got(tag.clone()),
            );
        };

        if self.scope == FieldScope::SubtableRow && !field_type.is_subtable_legal() {
            return Err(SchemaError::new(
                type_path,
                format!("{} fields are not allowed in a subtable", field_type),
            )
            .with_code("not_allowed_in_subtable")
            .with_got(tag.clone()));
        }

        Ok(field_type)
    }
}

impl SchemaLike for FieldSchema {
    type Output = Value;

    fn validate(&self, value: &Value, path: &FieldPath) -> Validation<Value, SchemaErrors> {
        FieldSchema::validate(self, value, path)
    }

    fn validate_to_value(&self, value: &Value, path: &FieldPath) -> Validation<Value, SchemaErrors> {
        FieldSchema::validate(self, value, path)
    }
}
