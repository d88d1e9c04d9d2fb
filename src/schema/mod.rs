//! Structural schemas for field values.
//!
//! These builders describe the shape the platform's APIs return for each
//! field type. They check a value and accumulate every mismatch rather than
//! stopping at the first one.
//!
//! # Example
//!
//! ```rust
//! use fieldnorm::{FieldPath, Schema};
//! use serde_json::json;
//!
//! let users = Schema::array(
//!     Schema::object()
//!         .field("code", Schema::string())
//!         .field("name", Schema::string()),
//! );
//!
//! let result = users.validate(&json!([{"code": "u1", "name": "Ann"}]), &FieldPath::root());
//! assert!(result.is_success());
//!
//! let result = users.validate(&json!([{"code": 1}]), &FieldPath::root());
//! assert!(result.is_failure());
//! ```

mod array;
mod field;
mod nullable;
mod object;
mod string;
mod traits;

use serde_json::Value;

pub use array::ArraySchema;
pub use field::{FieldSchema, FieldScope};
pub use nullable::NullableSchema;
pub use object::ObjectSchema;
pub use string::StringSchema;
pub use traits::{SchemaLike, ValueValidator};

/// Entry point for building schemas.
pub struct Schema;

impl Schema {
    /// A schema accepting strings.
    pub fn string() -> StringSchema {
        StringSchema::new()
    }

    /// A schema accepting JSON objects with declared fields.
    pub fn object() -> ObjectSchema {
        ObjectSchema::new()
    }

    /// A schema accepting arrays whose items all pass `item`.
    pub fn array<S: SchemaLike>(item: S) -> ArraySchema<S> {
        ArraySchema::new(item)
    }

    /// A schema accepting `null` or anything `inner` accepts.
    ///
    /// ```rust
    /// use fieldnorm::{FieldPath, Schema};
    /// use serde_json::json;
    ///
    /// let schema = Schema::nullable(Schema::string());
    /// assert!(schema.validate(&json!(null), &FieldPath::root()).is_success());
    /// assert!(schema.validate(&json!("2024-01-31"), &FieldPath::root()).is_success());
    /// assert!(schema.validate(&json!(20240131), &FieldPath::root()).is_failure());
    /// ```
    pub fn nullable<S: SchemaLike>(inner: S) -> NullableSchema<S> {
        NullableSchema::new(inner)
    }

    /// A schema for a whole `{type, value}` field at record level.
    pub fn field() -> FieldSchema {
        FieldSchema::new(FieldScope::Record)
    }

    /// A schema for a `{type, value}` field inside a subtable row.
    pub fn row_field() -> FieldSchema {
        FieldSchema::new(FieldScope::SubtableRow)
    }
}

/// Returns the JSON type name for a value.
pub(crate) fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
