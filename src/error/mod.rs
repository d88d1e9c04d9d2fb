//! Error types.
//!
//! Structural decode failures ([`SchemaError`], [`SchemaErrors`]) and write
//! validation failures ([`ValidationError`], [`ValidationErrors`]) are kept
//! apart: the first means the payload is malformed, the second that a
//! well-formed value is not writable.

mod schema_error;
mod validation_error;

pub use schema_error::{SchemaError, SchemaErrors};
pub use validation_error::{ValidationError, ValidationErrors};
