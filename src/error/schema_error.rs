//! Structural decode error types.
//!
//! [`SchemaError`] describes one place where a payload does not have the
//! shape its field type declares; [`SchemaErrors`] accumulates them.

use std::fmt::{self, Display};

use stillwater::prelude::*;

use crate::path::FieldPath;

/// A single structural decode failure.
///
/// - **path**: where in the record payload the mismatch is
/// - **message**: human-readable description
/// - **got** / **expected**: optional detail on the mismatch
/// - **code**: machine-readable error code (`invalid_type`, `required`, ...)
///
/// # Example
///
/// ```rust
/// use fieldnorm::{FieldPath, SchemaError};
///
/// let error = SchemaError::new(FieldPath::field("qty").push_key("value"), "expected string")
///     .with_code("invalid_type")
///     .with_got("number")
///     .with_expected("string");
///
/// assert_eq!(error.to_string(), "qty.value: expected string (expected: string) (got: number)");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaError {
    /// Location of the offending value.
    pub path: FieldPath,
    /// Human-readable error message.
    pub message: String,
    /// The value or value type actually found.
    pub got: Option<String>,
    /// What the field type declares instead.
    pub expected: Option<String>,
    /// Machine-readable error code.
    pub code: String,
}

impl SchemaError {
    /// Creates a new error with code `invalid_value`.
    pub fn new(path: FieldPath, message: impl Into<String>) -> Self {
        Self {
            path,
            message: message.into(),
            got: None,
            expected: None,
            code: "invalid_value".to_string(),
        }
    }

    /// Sets the error code.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    /// Sets the "got" detail.
    pub fn with_got(mut self, got: impl Into<String>) -> Self {
        self.got = Some(got.into());
        self
    }

    /// Sets the "expected" detail.
    pub fn with_expected(mut self, expected: impl Into<String>) -> Self {
        self.expected = Some(expected.into());
        self
    }
}

impl Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_root() {
            write!(f, "(record): {}", self.message)?;
        } else {
            write!(f, "{}: {}", self.path, self.message)?;
        }

        if let Some(ref expected) = self.expected {
            write!(f, " (expected: {})", expected)?;
        }
        if let Some(ref got) = self.got {
            write!(f, " (got: {})", got)?;
        }

        Ok(())
    }
}

impl std::error::Error for SchemaError {}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<SchemaError>();
    assert_sync::<SchemaError>();
};

/// A non-empty collection of structural decode errors.
///
/// Used as the failure side of [`crate::ValidationResult`]. Collections from
/// sibling fields are merged with [`Semigroup::combine`]:
///
/// ```rust
/// use fieldnorm::{FieldPath, SchemaError, SchemaErrors};
/// use stillwater::prelude::*;
///
/// let a = SchemaErrors::single(SchemaError::new(FieldPath::field("a"), "expected string"));
/// let b = SchemaErrors::single(SchemaError::new(FieldPath::field("b"), "expected array"));
///
/// assert_eq!(a.combine(b).len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaErrors(NonEmptyVec<SchemaError>);

impl SchemaErrors {
    /// Creates a collection holding one error.
    pub fn single(error: SchemaError) -> Self {
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
    pub fn iter(&self) -> impl Iterator<Item = &SchemaError> {
        self.0.iter()
    }

    /// Returns the first error.
    pub fn first(&self) -> &SchemaError {
        self.0.head()
    }

    /// Returns all errors at exactly `path`.
    pub fn at_path(&self, path: &FieldPath) -> Vec<&SchemaError> {
        self.0.iter().filter(|e| &e.path == path).collect()
    }

    /// Returns all errors carrying `code`.
    pub fn with_code(&self, code: &str) -> Vec<&SchemaError> {
        self.0.iter().filter(|e| e.code == code).collect()
    }

    /// Returns all errors located under the top-level field `code`.
    pub fn for_field(&self, code: &str) -> Vec<&SchemaError> {
        self.0
            .iter()
            .filter(|e| e.path.field_code() == Some(code))
            .collect()
    }

    /// Returns the distinct top-level field codes that have errors, in first
    /// occurrence order.
    pub fn field_codes(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = Vec::new();
        for code in self.0.iter().filter_map(|e| e.path.field_code()) {
            if !codes.contains(&code) {
                codes.push(code);
            }
        }
        codes
    }

    /// Converts the collection into a `Vec`.
    pub fn into_vec(self) -> Vec<SchemaError> {
        self.0.into_vec()
    }

    /// Builds a collection from a vec of errors.
    ///
    /// # Panics
    ///
    /// Panics if `errors` is empty.
    pub fn from_vec(errors: Vec<SchemaError>) -> Self {
        Self(NonEmptyVec::from_vec(errors).expect("SchemaErrors requires at least one error"))
    }
}

impl Semigroup for SchemaErrors {
    fn combine(self, other: Self) -> Self {
        SchemaErrors(self.0.combine(other.0))
    }
}

impl Display for SchemaErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Decoding failed with {} error(s):", self.len())?;
        for (i, error) in self.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, error)?;
        }
        Ok(())
    }
}

impl std::error::Error for SchemaErrors {}

impl IntoIterator for SchemaErrors {
    type Item = SchemaError;
    type IntoIter = std::vec::IntoIter<SchemaError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<SchemaErrors>();
    assert_sync::<SchemaErrors>();
};
