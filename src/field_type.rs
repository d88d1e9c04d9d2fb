//! The closed set of field type tags and their classification.
//!
//! Every field in a record payload carries a `type` tag. [`FieldType`] is the
//! closed enumeration of the tags this crate understands, and [`classify`]
//! maps any tag string, known or not, to its metadata.

use std::fmt::{self, Display};
use std::str::FromStr;

/// A field type tag.
///
/// The wire form of each variant is the kebab-case string returned by
/// [`FieldType::as_str`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldType {
    SingleLineText,
    MultiLineText,
    RichText,
    Number,
    Calculation,
    RadioButton,
    CheckBox,
    MultiSelect,
    DropDown,
    Date,
    Time,
    DateTime,
    Link,
    UserSelect,
    OrganizationSelect,
    GroupSelect,
    File,
    Lookup,
    RecordNumber,
    Creator,
    CreatedTime,
    Modifier,
    UpdatedTime,
    Status,
    StatusAssignee,
    Category,
    RecordId,
    Revision,
    Subtable,
}

/// The structural family of a field's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    /// A plain string.
    ScalarString,
    /// A string, or null when empty.
    NullableScalar,
    /// An array of strings or of fixed objects.
    Array,
    /// A single fixed object, e.g. a user entity.
    FixedObject,
    /// Rows of nested fields whose shapes depend on their own tags.
    PolymorphicUnion,
}

impl FieldType {
    /// Every field type, in declaration order.
    pub const ALL: [FieldType; 29] = [
        FieldType::SingleLineText,
        FieldType::MultiLineText,
        FieldType::RichText,
        FieldType::Number,
        FieldType::Calculation,
        FieldType::RadioButton,
        FieldType::CheckBox,
        FieldType::MultiSelect,
        FieldType::DropDown,
        FieldType::Date,
        FieldType::Time,
        FieldType::DateTime,
        FieldType::Link,
        FieldType::UserSelect,
        FieldType::OrganizationSelect,
        FieldType::GroupSelect,
        FieldType::File,
        FieldType::Lookup,
        FieldType::RecordNumber,
        FieldType::Creator,
        FieldType::CreatedTime,
        FieldType::Modifier,
        FieldType::UpdatedTime,
        FieldType::Status,
        FieldType::StatusAssignee,
        FieldType::Category,
        FieldType::RecordId,
        FieldType::Revision,
        FieldType::Subtable,
    ];

    /// Returns the wire tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::SingleLineText => "single-line-text",
            FieldType::MultiLineText => "multi-line-text",
            FieldType::RichText => "rich-text",
            FieldType::Number => "number",
            FieldType::Calculation => "calculation",
            FieldType::RadioButton => "radio-button",
            FieldType::CheckBox => "checkbox",
            FieldType::MultiSelect => "multi-select",
            FieldType::DropDown => "dropdown",
            FieldType::Date => "date",
            FieldType::Time => "time",
            FieldType::DateTime => "datetime",
            FieldType::Link => "link",
            FieldType::UserSelect => "user-select",
            FieldType::OrganizationSelect => "organization-select",
            FieldType::GroupSelect => "group-select",
            FieldType::File => "file",
            FieldType::Lookup => "lookup",
            FieldType::RecordNumber => "record-number",
            FieldType::Creator => "creator",
            FieldType::CreatedTime => "created-time",
            FieldType::Modifier => "modifier",
            FieldType::UpdatedTime => "updated-time",
            FieldType::Status => "status",
            FieldType::StatusAssignee => "status-assignee",
            FieldType::Category => "category",
            FieldType::RecordId => "record-id",
            FieldType::Revision => "revision",
            FieldType::Subtable => "subtable",
        }
    }

    /// Looks up a wire tag. Tags are case-sensitive.
    pub fn from_tag(tag: &str) -> Option<FieldType> {
        FieldType::ALL.into_iter().find(|t| t.as_str() == tag)
    }

    /// Returns the structural family of this type's value.
    pub fn family(&self) -> Family {
        match self {
            FieldType::SingleLineText
            | FieldType::MultiLineText
            | FieldType::RichText
            | FieldType::Calculation
            | FieldType::Link
            | FieldType::Lookup
            | FieldType::RecordNumber
            | FieldType::CreatedTime
            | FieldType::UpdatedTime
            | FieldType::Status
            | FieldType::RecordId
            | FieldType::Revision => Family::ScalarString,
            FieldType::Number
            | FieldType::RadioButton
            | FieldType::DropDown
            | FieldType::Date
            | FieldType::Time
            | FieldType::DateTime => Family::NullableScalar,
            FieldType::CheckBox
            | FieldType::MultiSelect
            | FieldType::UserSelect
            | FieldType::OrganizationSelect
            | FieldType::GroupSelect
            | FieldType::File
            | FieldType::StatusAssignee
            | FieldType::Category => Family::Array,
            FieldType::Creator | FieldType::Modifier => Family::FixedObject,
            FieldType::Subtable => Family::PolymorphicUnion,
        }
    }

    /// Whether a field of this type may appear inside a subtable row.
    pub fn is_subtable_legal(&self) -> bool {
        matches!(
            self,
            FieldType::SingleLineText
                | FieldType::MultiLineText
                | FieldType::RichText
                | FieldType::Number
                | FieldType::Calculation
                | FieldType::RadioButton
                | FieldType::CheckBox
                | FieldType::MultiSelect
                | FieldType::DropDown
                | FieldType::Date
                | FieldType::Time
                | FieldType::DateTime
                | FieldType::Link
                | FieldType::UserSelect
                | FieldType::OrganizationSelect
                | FieldType::GroupSelect
                | FieldType::Lookup
        )
    }

    /// Whether the platform refuses an empty value for this type on write.
    pub fn is_non_empty_required(&self) -> bool {
        matches!(
            self,
            FieldType::RadioButton | FieldType::Category | FieldType::StatusAssignee
        )
    }

    /// Returns the full metadata record for this type.
    pub fn info(&self) -> FieldTypeInfo {
        FieldTypeInfo {
            field_type: *self,
            family: self.family(),
            subtable_legal: self.is_subtable_legal(),
            non_empty_required: self.is_non_empty_required(),
        }
    }
}

impl Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = UnknownFieldType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldType::from_tag(s).ok_or_else(|| UnknownFieldType(s.to_string()))
    }
}

/// Returned by [`FieldType::from_str`] for a tag outside the closed set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown field type '{0}'")]
pub struct UnknownFieldType(pub String);

/// Classification data for one field type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldTypeInfo {
    pub field_type: FieldType,
    pub family: Family,
    pub subtable_legal: bool,
    pub non_empty_required: bool,
}

/// Result of [`classify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Known(FieldTypeInfo),
    /// A tag outside the closed set, e.g. one added by a newer platform
    /// release.
    Unclassified,
}

impl Classification {
    /// Returns the metadata for known tags.
    pub fn info(&self) -> Option<&FieldTypeInfo> {
        match self {
            Classification::Known(info) => Some(info),
            Classification::Unclassified => None,
        }
    }
}

/// Classifies any tag string. Never fails.
///
/// ```rust
/// use fieldnorm::field_type::{classify, Classification, Family};
///
/// let info = *classify("checkbox").info().unwrap();
/// assert_eq!(info.family, Family::Array);
/// assert!(info.subtable_legal);
///
/// assert_eq!(classify("spreadsheet"), Classification::Unclassified);
/// ```
pub fn classify(tag: &str) -> Classification {
    match FieldType::from_tag(tag) {
        Some(field_type) => Classification::Known(field_type.info()),
        None => Classification::Unclassified,
    }
}
