//! Write validation error types.
//!
//! A [`ValidationError`] is raised when a field holds a value the platform
//! refuses on write. It is a different kind of failure from
//! [`SchemaError`](crate::SchemaError), which reports malformed payloads.

use std::fmt::{self, Display};

use stillwater::prelude::*;

/// A field value that cannot be written back to the platform.
///
/// `field_type` is the tag of the offending field and is preserved when the
/// error is re-raised for a record. `field_code` is only set for record-level
/// errors.
///
/// # Example
///
/// ```rust
/// use fieldnorm::ValidationError;
///
/// let error = ValidationError::empty_value("radio-button").for_field("choice");
///
/// assert_eq!(error.field_type, "radio-button");
/// assert_eq!(error.field_code.as_deref(), Some("choice"));
/// assert_eq!(
///     error.to_string(),
///     "Field \"choice\": radio-button field cannot have an empty value"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Tag of the offending field.
    pub field_type: String,
    /// Human-readable error message.
    pub message: String,
    /// Field code (or subtable path) of the offending field, when known.
    pub field_code: Option<String>,
}

impl ValidationError {
    /// Creates an error for `field_type` with a custom message.
    pub fn new(field_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field_type: field_type.into(),
            message: message.into(),
            field_code: None,
        }
    }

    /// The error raised for an illegal empty value, or for a type that has no
    /// legal empty value at all.
    pub fn empty_value(field_type: impl Into<String>) -> Self {
        let field_type = field_type.into();
        let message = format!("{} field cannot have an empty value", field_type);
        Self::new(field_type, message)
    }

    /// Re-raises this error for the field stored under `code`.
    ///
    /// The message gains a `Field "<code>": ` prefix; `field_type` is kept.
    pub fn for_field(self, code: impl Into<String>) -> Self {
        let code = code.into();
        Self {
            message: format!("Field \"{}\": {}", code, self.message),
            field_type: self.field_type,
            field_code: Some(code),
        }
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<ValidationError>();
    assert_sync::<ValidationError>();
};

/// Every write validation failure of a record, in field order.
///
/// Produced by [`RecordWriteValidator`](crate::RecordWriteValidator); in
/// fail-fast mode it holds exactly one error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationErrors(NonEmptyVec<ValidationError>);

impl ValidationErrors {
    /// Creates a collection holding one error.
    pub fn single(error: ValidationError) -> Self {
        Self(NonEmptyVec::singleton(error))
    }

    /// Returns the number of errors.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; the collection is never empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns an iterator over the errors.
    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    /// Returns the first error, which is what fail-fast validation reports.
    pub fn first(&self) -> &ValidationError {
        self.0.head()
    }

    /// Returns the field codes of all offending fields.
    pub fn field_codes(&self) -> Vec<&str> {
        self.0
            .iter()
            .filter_map(|e| e.field_code.as_deref())
            .collect()
    }

    /// Converts the collection into a `Vec`.
    pub fn into_vec(self) -> Vec<ValidationError> {
        self.0.into_vec()
    }

    /// Returns `None` for an empty vec.
    pub fn from_vec(errors: Vec<ValidationError>) -> Option<Self> {
        NonEmptyVec::from_vec(errors).map(Self)
    }
}

impl Semigroup for ValidationErrors {
    fn combine(self, other: Self) -> Self {
        ValidationErrors(self.0.combine(other.0))
    }
}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.len() == 1 {
            return write!(f, "{}", self.first());
        }
        writeln!(f, "{} fields cannot be written:", self.len())?;
        for error in self.iter() {
            writeln!(f, "  - {}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        Self::single(error)
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}
