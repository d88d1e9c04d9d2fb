//! Field-code validation.
//!
//! Field codes are the keys of a record. The platform restricts them to
//! letters, digits and a few symbols, forbids a leading digit, caps their
//! length and reserves the words of its query language.
//!
//! # Example
//!
//! ```rust
//! use fieldnorm::validate_field_code;
//!
//! assert!(validate_field_code("customer_name").is_success());
//! assert!(validate_field_code("顧客名").is_success());
//!
//! let errors = validate_field_code("1st place!").into_result().unwrap_err();
//! assert_eq!(errors.len(), 2);
//! ```

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;
use stillwater::Validation;

use crate::error::{SchemaError, SchemaErrors};
use crate::path::FieldPath;
use crate::schema::{Schema, StringSchema};
use crate::ValidationResult;

/// Maximum number of characters in a field code.
pub const MAX_FIELD_CODE_LEN: usize = 128;

/// Letters, digits, `_`, `・`, `＿`, `$`, `￥`.
const FIELD_CODE_CHARS: &str = r"^[\p{L}\p{N}_・＿$￥]*$";

/// Anything but a leading ASCII or full-width digit; empty codes are left to
/// the length rule.
const LEADING_DIGIT: &str = r"^(?:[^0-9０-９]|$)";

/// Query keywords and functions; compared case-insensitively.
pub const RESERVED_WORDS: &[&str] = &[
    "and",
    "or",
    "not",
    "in",
    "like",
    "is",
    "empty",
    "order",
    "by",
    "asc",
    "desc",
    "limit",
    "offset",
    "true",
    "false",
    "LOGINUSER",
    "PRIMARY_ORGANIZATION",
    "NOW",
    "TODAY",
    "YESTERDAY",
    "TOMORROW",
    "FROM_TODAY",
    "THIS_WEEK",
    "LAST_WEEK",
    "NEXT_WEEK",
    "THIS_MONTH",
    "LAST_MONTH",
    "NEXT_MONTH",
    "THIS_YEAR",
    "LAST_YEAR",
    "NEXT_YEAR",
];

/// Compiles one of the constant patterns above.
///
/// # Panics
///
/// Panics if `pattern` is not a valid regex; only the constants above are
/// passed in.
fn constant_regex(pattern: &str) -> Regex {
    Regex::new(pattern).expect("field code patterns are valid regexes")
}

fn code_schema() -> &'static StringSchema {
    static SCHEMA: OnceLock<StringSchema> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        Schema::string()
            .min_len(1)
            .error("field code must not be empty")
            .max_len(MAX_FIELD_CODE_LEN)
            .pattern(constant_regex(FIELD_CODE_CHARS))
            .error("field code may only contain letters, digits, _, ・, ＿, $ and ￥")
            .pattern(constant_regex(LEADING_DIGIT))
            .error("field code must not start with a digit")
            .code("leading_digit")
    })
}

/// Returns true if `code` is a reserved query word.
pub fn is_reserved_word(code: &str) -> bool {
    RESERVED_WORDS.iter().any(|w| w.eq_ignore_ascii_case(code))
}

/// Checks a field code, reporting every rule it breaks.
///
/// Error codes: `min_length`, `max_length`, `pattern`, `leading_digit`,
/// `reserved_word`. Errors are located at the code itself.
pub fn validate_field_code(code: &str) -> ValidationResult<String> {
    let path = FieldPath::field(code);
    let checked = code_schema().validate(&Value::String(code.to_string()), &path);

    if !is_reserved_word(code) {
        return checked;
    }

    let reserved = SchemaError::new(path, format!("'{}' is a reserved word", code))
        .with_code("reserved_word")
        .with_got(code.to_string());
    match checked {
        Validation::Success(_) => Validation::Failure(SchemaErrors::single(reserved)),
        Validation::Failure(errors) => {
            let mut errors = errors.into_vec();
            errors.push(reserved);
            Validation::Failure(SchemaErrors::from_vec(errors))
        }
    }
}
