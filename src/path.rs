//! Locations of values inside records and subtable rows.
//!
//! This module provides [`FieldPath`] and [`PathSegment`] for pointing at a
//! value in a record payload, such as `items[0].value.choice`.

use std::fmt::{self, Display};

/// A segment of a [`FieldPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// An object key: a field code, or a property like `value` or `code`.
    Key(String),
    /// A position in an array, e.g. a subtable row or a list entry.
    Index(usize),
}

/// A path to a value in a record payload.
///
/// Paths are immutable; every `push_*` returns a new path so a base path can
/// be shared between sibling fields.
///
/// # Example
///
/// ```rust
/// use fieldnorm::FieldPath;
///
/// let path = FieldPath::field("items")
///     .push_key("value")
///     .push_index(0)
///     .push_key("value")
///     .push_key("choice");
///
/// assert_eq!(path.to_string(), "items.value[0].value.choice");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    /// Creates an empty path pointing at the record itself.
    pub fn root() -> Self {
        Self::default()
    }

    /// Creates a path to a top-level field of a record.
    pub fn field(code: impl Into<String>) -> Self {
        Self {
            segments: vec![PathSegment::Key(code.into())],
        }
    }

    /// Returns a new path with an object key appended.
    pub fn push_key(&self, key: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Key(key.into()));
        Self { segments }
    }

    /// Returns a new path with an array index appended.
    pub fn push_index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Index(index));
        Self { segments }
    }

    /// Path of a field inside a subtable row, as used in write-validation
    /// messages: `table[row].code`.
    pub fn row_field(&self, row: usize, code: impl Into<String>) -> Self {
        self.push_index(row).push_key(code)
    }

    /// Returns true if this path has no segments.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the number of segments in this path.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true if this path has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns an iterator over the path segments.
    pub fn segments(&self) -> impl Iterator<Item = &PathSegment> {
        self.segments.iter()
    }

    /// Returns the field code this path starts at, if any.
    pub fn field_code(&self) -> Option<&str> {
        match self.segments.first() {
            Some(PathSegment::Key(code)) => Some(code),
            _ => None,
        }
    }
}

impl Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Key(key) => {
                    if i > 0 {
                        write!(f, ".")?;
                    }
                    write!(f, "{}", key)?;
                }
                PathSegment::Index(idx) => write!(f, "[{}]", idx)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_path_is_empty() {
        let path = FieldPath::root();
        assert!(path.is_root());
        assert!(path.is_empty());
        assert_eq!(path.to_string(), "");
        assert_eq!(path.field_code(), None);
    }

    #[test]
    fn test_field_path() {
        let path = FieldPath::field("customer");
        assert_eq!(path.to_string(), "customer");
        assert_eq!(path.len(), 1);
        assert_eq!(path.field_code(), Some("customer"));
    }

    #[test]
    fn test_row_field_path() {
        let path = FieldPath::field("items").row_field(2, "qty");
        assert_eq!(path.to_string(), "items[2].qty");
        assert_eq!(path.field_code(), Some("items"));
    }

    #[test]
    fn test_value_property_path() {
        let path = FieldPath::field("creator").push_key("value").push_key("code");
        assert_eq!(path.to_string(), "creator.value.code");
    }

    #[test]
    fn test_path_immutability() {
        let base = FieldPath::field("items").push_key("value");
        let first = base.push_index(0);
        let second = base.push_index(1);

        assert_eq!(base.to_string(), "items.value");
        assert_eq!(first.to_string(), "items.value[0]");
        assert_eq!(second.to_string(), "items.value[1]");
    }

    #[test]
    fn test_segments_iterator() {
        let path = FieldPath::field("a").push_index(1).push_key("b");
        let segments: Vec<_> = path.segments().collect();
        assert_eq!(
            segments,
            vec![
                &PathSegment::Key("a".to_string()),
                &PathSegment::Index(1),
                &PathSegment::Key("b".to_string()),
            ]
        );
    }

    #[test]
    fn test_leading_index_has_no_field_code() {
        let path = FieldPath::root().push_index(3);
        assert_eq!(path.to_string(), "[3]");
        assert_eq!(path.field_code(), None);
    }
}
