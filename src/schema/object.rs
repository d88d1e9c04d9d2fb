//! Object schema validation.
//!
//! [`ObjectSchema`] checks JSON objects with declared fields: user entities,
//! file descriptors, subtable rows and the fields of a row.

use indexmap::IndexMap;
use serde_json::{Map, Value};
use stillwater::Validation;

use crate::error::{SchemaError, SchemaErrors};
use crate::path::FieldPath;

use super::traits::SchemaLike;
use super::value_type_name;

type BoxedSchema = Box<dyn SchemaLike<Output = Value>>;

/// A schema for JSON objects.
///
/// Declared properties are required. Undeclared ones are kept as they are,
/// or checked against the schema given to
/// [`ObjectSchema::additional_properties`]. Properties are checked in the
/// input's key order and missing ones reported after them, in declaration
/// order. The output keeps the input's key order.
///
/// # Example
///
/// ```rust
/// use fieldnorm::{FieldPath, Schema};
/// use serde_json::json;
///
/// let row = Schema::object()
///     .field("id", Schema::string())
///     .field("value", Schema::object());
///
/// let result = row.validate(&json!({"id": "48", "value": {}}), &FieldPath::root());
/// assert!(result.is_success());
///
/// let result = row.validate(&json!({"value": {}}), &FieldPath::root());
/// assert!(result.is_failure());
/// ```
pub struct ObjectSchema {
    properties: IndexMap<String, BoxedSchema>,
    additional_properties: Option<BoxedSchema>,
}

impl ObjectSchema {
    /// Creates an object schema with no declared properties.
    pub fn new() -> Self {
        Self {
            properties: IndexMap::new(),
            additional_properties: None,
        }
    }

    /// Declares a required property.
    pub fn field<S>(mut self, name: impl Into<String>, schema: S) -> Self
    where
        S: SchemaLike + 'static,
    {
        self.properties
            .insert(name.into(), Box::new(SchemaWrapper(schema)));
        self
    }

    /// Checks every undeclared property against `schema`.
    ///
    /// ```rust
    /// use fieldnorm::{FieldPath, Schema};
    /// use serde_json::json;
    ///
    /// // Every entry of a row's value must be a valid subtable field.
    /// let fields = Schema::object().additional_properties(Schema::row_field());
    ///
    /// let result = fields.validate(
    ///     &json!({"qty": {"type": "number", "value": "3"}}),
    ///     &FieldPath::root(),
    /// );
    /// assert!(result.is_success());
    /// ```
    pub fn additional_properties<S>(mut self, schema: S) -> Self
    where
        S: SchemaLike + 'static,
    {
        self.additional_properties = Some(Box::new(SchemaWrapper(schema)));
        self
    }

    /// Checks a value against this schema.
    pub fn validate(
        &self,
        value: &Value,
        path: &FieldPath,
    ) -> Validation<Map<String, Value>, SchemaErrors> {
        let Some(obj) = value.as_object() else {
            return Validation::Failure(SchemaErrors::single(
                SchemaError::new(path.clone(), "expected object")
                    .with_code("invalid_type")
                    .with_got(value_type_name(value))
                    .with_expected("object"),
            ));
        };

        let mut errors = Vec::new();
        let mut validated = Map::new();

        for (key, property) in obj {
            let schema = self
                .properties
                .get(key)
                .or(self.additional_properties.as_ref());
            let Some(schema) = schema else {
                validated.insert(key.clone(), property.clone());
                continue;
            };
            match schema.validate(property, &path.push_key(key)) {
                Validation::Success(v) => {
                    validated.insert(key.clone(), v);
                }
                Validation::Failure(e) => errors.extend(e),
            }
        }

        for name in self.properties.keys().filter(|name| !obj.contains_key(*name)) {
            errors.push(
                SchemaError::new(
                    path.push_key(name),
                    format!("required property '{}' is missing", name),
                )
                .with_code("required"),
            );
        }

        if errors.is_empty() {
            Validation::Success(validated)
        } else {
            Validation::Failure(SchemaErrors::from_vec(errors))
        }
    }
}

impl Default for ObjectSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaLike for ObjectSchema {
    type Output = Map<String, Value>;

    fn validate(&self, value: &Value, path: &FieldPath) -> Validation<Self::Output, SchemaErrors> {
        ObjectSchema::validate(self, value, path)
    }

    fn validate_to_value(&self, value: &Value, path: &FieldPath) -> Validation<Value, SchemaErrors> {
        ObjectSchema::validate(self, value, path).map(Value::Object)
    }
}

/// Adapts any `SchemaLike` to `Value` output so properties with different
/// schema types can share one map.
struct SchemaWrapper<S>(S);

impl<S: SchemaLike> SchemaLike for SchemaWrapper<S> {
    type Output = Value;

    fn validate(&self, value: &Value, path: &FieldPath) -> Validation<Value, SchemaErrors> {
        self.0.validate_to_value(value, path)
    }

    fn validate_to_value(&self, value: &Value, path: &FieldPath) -> Validation<Value, SchemaErrors> {
        self.0.validate_to_value(value, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::StringSchema;
    use serde_json::json;

    fn unwrap_failure<T: std::fmt::Debug, E>(v: Validation<T, E>) -> E {
        v.into_result().unwrap_err()
    }

    fn entity() -> ObjectSchema {
        ObjectSchema::new()
            .field("code", StringSchema::new())
            .field("name", StringSchema::new())
    }

    #[test]
    fn test_entity_accepted() {
        let result = entity().validate(&json!({"code": "u1", "name": "Ann"}), &FieldPath::root());
        assert!(result.is_success());
    }

    #[test]
    fn test_rejects_non_object() {
        let errors = unwrap_failure(entity().validate(&json!("u1"), &FieldPath::root()));
        assert_eq!(errors.first().code, "invalid_type");
        assert_eq!(errors.first().got.as_deref(), Some("string"));
    }

    #[test]
    fn test_missing_properties_in_declaration_order() {
        let path = FieldPath::field("creator").push_key("value");
        let errors = unwrap_failure(entity().validate(&json!({}), &path));

        let paths: Vec<_> = errors.iter().map(|e| e.path.to_string()).collect();
        assert_eq!(paths, vec!["creator.value.code", "creator.value.name"]);
        assert_eq!(errors.with_code("required").len(), 2);
    }

    #[test]
    fn test_declared_property_error_reported_once() {
        let errors = unwrap_failure(
            entity().validate(&json!({"code": 1, "name": "Ann"}), &FieldPath::root()),
        );
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.first().path.to_string(), "code");
    }

    #[test]
    fn test_undeclared_properties_kept() {
        let result = entity().validate(
            &json!({"code": "u1", "name": "Ann", "email": "ann@example.com"}),
            &FieldPath::root(),
        );
        let obj = result.into_result().unwrap();
        assert_eq!(obj.get("email"), Some(&json!("ann@example.com")));
    }

    #[test]
    fn test_output_keeps_input_key_order() {
        let result = entity().validate(
            &json!({"name": "Ann", "zone": "x", "code": "u1"}),
            &FieldPath::root(),
        );
        let keys: Vec<_> = result.into_result().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["name", "zone", "code"]);
    }

    #[test]
    fn test_additional_properties_validated() {
        let schema = ObjectSchema::new().additional_properties(StringSchema::new());
        let errors = unwrap_failure(schema.validate(
            &json!({"a": "x", "b": 2, "c": "y"}),
            &FieldPath::root(),
        ));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.first().path.to_string(), "b");
    }
}
