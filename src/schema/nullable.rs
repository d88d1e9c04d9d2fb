//! Nullable schema combinator.

use serde_json::Value;
use stillwater::Validation;

use crate::error::SchemaErrors;
use crate::path::FieldPath;

use super::traits::SchemaLike;

/// Accepts `null`, otherwise defers to the inner schema.
///
/// Used for the nullable-scalar family (number, date, dropdown, ...), whose
/// canonical empty value is `null`.
pub struct NullableSchema<S> {
    inner: S,
}

impl<S: SchemaLike> NullableSchema<S> {
    /// Wraps `inner`.
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    /// Checks a value against this schema.
    pub fn validate(&self, value: &Value, path: &FieldPath) -> Validation<Value, SchemaErrors> {
        if value.is_null() {
            Validation::Success(Value::Null)
        } else {
            self.inner.validate_to_value(value, path)
        }
    }
}

impl<S: SchemaLike> SchemaLike for NullableSchema<S> {
    type Output = Value;

    fn validate(&self, value: &Value, path: &FieldPath) -> Validation<Value, SchemaErrors> {
        NullableSchema::validate(self, value, path)
    }

    fn validate_to_value(&self, value: &Value, path: &FieldPath) -> Validation<Value, SchemaErrors> {
        NullableSchema::validate(self, value, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::StringSchema;
    use serde_json::json;

    #[test]
    fn test_null_passes() {
        let schema = NullableSchema::new(StringSchema::new());
        let result = schema.validate(&json!(null), &FieldPath::root());
        assert_eq!(result.into_result().unwrap(), Value::Null);
    }

    #[test]
    fn test_inner_errors_surface() {
        let schema = NullableSchema::new(StringSchema::new());
        let errors = schema
            .validate(&json!([]), &FieldPath::root())
            .into_result()
            .unwrap_err();
        assert_eq!(errors.first().code, "invalid_type");
        assert_eq!(errors.first().got.as_deref(), Some("array"));
    }
}
