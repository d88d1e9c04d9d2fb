//! Array schema validation.

use serde_json::Value;
use stillwater::Validation;

use crate::error::{SchemaError, SchemaErrors};
use crate::path::FieldPath;

use super::traits::SchemaLike;
use super::value_type_name;

/// A schema for arrays whose items all share one schema.
///
/// Errors from every item are accumulated, each located at its index.
pub struct ArraySchema<S> {
    item_schema: S,
}

impl<S: SchemaLike> ArraySchema<S> {
    /// Creates an array schema with the given item schema.
    pub fn new(item_schema: S) -> Self {
        Self { item_schema }
    }

    /// Checks a value against this schema.
    pub fn validate(&self, value: &Value, path: &FieldPath) -> Validation<Vec<Value>, SchemaErrors> {
        let Some(items) = value.as_array() else {
            return Validation::Failure(SchemaErrors::single(
                SchemaError::new(path.clone(), "expected array")
                    .with_code("invalid_type")
                    .with_got(value_type_name(value))
                    .with_expected("array"),
            ));
        };

        let mut errors = Vec::new();
        let mut validated = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            match self.item_schema.validate_to_value(item, &path.push_index(index)) {
                Validation::Success(v) => validated.push(v),
                Validation::Failure(e) => errors.extend(e),
            }
        }

        if errors.is_empty() {
            Validation::Success(validated)
        } else {
            Validation::Failure(SchemaErrors::from_vec(errors))
        }
    }
}

impl<S: SchemaLike> SchemaLike for ArraySchema<S> {
    type Output = Vec<Value>;

    fn validate(&self, value: &Value, path: &FieldPath) -> Validation<Vec<Value>, SchemaErrors> {
        ArraySchema::validate(self, value, path)
    }

    fn validate_to_value(&self, value: &Value, path: &FieldPath) -> Validation<Value, SchemaErrors> {
        ArraySchema::validate(self, value, path).map(Value::Array)
    }
}
