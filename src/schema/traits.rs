//! Traits for schema polymorphism.
//!
//! [`SchemaLike`] lets the different schema types (string, object, array,
//! nullable, field) be nested inside one another when describing a field
//! type's value shape.

use serde_json::Value;
use stillwater::Validation;

use crate::error::SchemaErrors;
use crate::path::FieldPath;

/// A schema that checks the structure of a JSON value.
///
/// The `Send + Sync` bounds let a built schema set be shared between threads.
///
/// # Example
///
/// ```rust
/// use fieldnorm::{FieldPath, Schema, SchemaLike};
/// use serde_json::json;
///
/// let entity = Schema::object()
///     .field("code", Schema::string())
///     .field("name", Schema::string());
///
/// let result = SchemaLike::validate(&entity, &json!({"code": "u1", "name": "Ann"}), &FieldPath::root());
/// assert!(result.is_success());
/// ```
pub trait SchemaLike: Send + Sync {
    /// The output type produced by successful validation.
    type Output;

    /// Checks `value`, reporting errors relative to `path`.
    fn validate(&self, value: &Value, path: &FieldPath) -> Validation<Self::Output, SchemaErrors>;

    /// Checks `value` and returns the result as a plain JSON value.
    fn validate_to_value(&self, value: &Value, path: &FieldPath)
        -> Validation<Value, SchemaErrors>;
}

/// A type-erased schema producing JSON values.
///
/// Every [`SchemaLike`] is a `ValueValidator`; the decode schema set stores
/// one boxed `ValueValidator` per field type.
pub trait ValueValidator: Send + Sync {
    /// Checks `value` and returns the result as a plain JSON value.
    fn validate_value(&self, value: &Value, path: &FieldPath) -> Validation<Value, SchemaErrors>;
}

impl<S: SchemaLike> ValueValidator for S {
    fn validate_value(&self, value: &Value, path: &FieldPath) -> Validation<Value, SchemaErrors> {
        self.validate_to_value(value, path)
    }
}
