//! # fieldnorm
//!
//! Empty-value normalization, structural decoding and write validation for
//! the fields of a record-oriented SaaS platform.
//!
//! ## Overview
//!
//! The platform exposes records through an in-browser event API and a REST
//! API, and the two disagree on how an empty field looks. This crate
//! reconciles them and guards writes:
//!
//! - [`normalize_field`] maps every empty form onto one canonical value per
//!   field type. It never fails.
//! - [`decode_field`] / [`decode_record_checked`] normalize and then check
//!   each value's structure, accumulating every mismatch as [`SchemaErrors`].
//! - [`validate_for_write`] / [`validate_record_for_write`] reject empty
//!   values for the types that cannot be cleared, as [`ValidationError`].
//! - [`empty_value_for_write`] returns the literal that clears a field.
//!
//! Everything is a pure function over `serde_json` values; nothing is cached
//! besides the immutable decode schema set.
//!
//! ## Example
//!
//! ```rust
//! use fieldnorm::{decode_record, validate_record_for_write};
//! use indexmap::indexmap;
//! use serde_json::json;
//!
//! let raw = indexmap! {
//!     "x".to_string() => json!({"type": "checkbox", "value": null}),
//!     "y".to_string() => json!({"type": "radio-button", "value": "opt1"}),
//! };
//!
//! let record = decode_record(&raw);
//! assert_eq!(record["x"]["value"], json!([]));
//! assert!(validate_record_for_write(&record).is_ok());
//! ```

pub mod decode;
pub mod error;
pub mod field_code;
pub mod field_type;
pub mod normalize;
pub mod path;
pub mod schema;
pub mod write;

pub use decode::{
    decode_field, decode_record, decode_record_checked, par_decode_records, record_from_json,
    DecodeSchemaSet, Record,
};
pub use error::{SchemaError, SchemaErrors, ValidationError, ValidationErrors};
pub use field_code::validate_field_code;
pub use field_type::{classify, Classification, Family, FieldType, FieldTypeInfo};
pub use normalize::{normalize_field, normalize_field_deep, EmptyRule};
pub use path::{FieldPath, PathSegment};
pub use schema::{Schema, SchemaLike, ValueValidator};
pub use write::{
    empty_value_for_write, is_non_empty_required, validate_for_write, validate_record_for_write,
    RecordWriteValidator, WriteValidationMode,
};

/// Result of a structural check: the checked value, or every mismatch found.
pub type ValidationResult<T> = stillwater::Validation<T, SchemaErrors>;
