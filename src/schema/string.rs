//! String schema validation.
//!
//! [`StringSchema`] checks that a value is a string and applies optional
//! constraints: length bounds and regex patterns.

use regex::Regex;
use serde_json::Value;
use stillwater::Validation;

use crate::error::{SchemaError, SchemaErrors};
use crate::path::FieldPath;

use super::traits::SchemaLike;
use super::value_type_name;

#[derive(Clone)]
enum StringConstraint {
    MinLength {
        min: usize,
        message: Option<String>,
        code: Option<String>,
    },
    MaxLength {
        max: usize,
        message: Option<String>,
        code: Option<String>,
    },
    Pattern {
        regex: Regex,
        message: Option<String>,
        code: Option<String>,
    },
}

/// A schema for string values.
///
/// All constraint violations are reported, not just the first.
///
/// # Example
///
/// ```rust
/// use fieldnorm::{FieldPath, Schema};
/// use regex::Regex;
/// use serde_json::json;
///
/// let lowercase = Regex::new(r"^[a-z]+$").unwrap();
/// let schema = Schema::string().max_len(3).pattern(lowercase);
///
/// let result = schema.validate(&json!("ABCD"), &FieldPath::root());
/// assert_eq!(result.into_result().unwrap_err().len(), 2);
/// ```
#[derive(Clone)]
pub struct StringSchema {
    constraints: Vec<StringConstraint>,
}

impl StringSchema {
    /// Creates a string schema with no constraints.
    pub fn new() -> Self {
        Self {
            constraints: Vec::new(),
        }
    }

    /// Requires at least `min` characters.
    pub fn min_len(mut self, min: usize) -> Self {
        self.constraints.push(StringConstraint::MinLength {
            min,
            message: None,
            code: None,
        });
        self
    }

    /// Allows at most `max` characters (Unicode scalar values).
    pub fn max_len(mut self, max: usize) -> Self {
        self.constraints.push(StringConstraint::MaxLength {
            max,
            message: None,
            code: None,
        });
        self
    }

    /// Requires a match of the compiled `regex`.
    pub fn pattern(mut self, regex: Regex) -> Self {
        self.constraints.push(StringConstraint::Pattern {
            regex,
            message: None,
            code: None,
        });
        self
    }

    /// Sets the message of the most recent constraint.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        if let Some(last) = self.constraints.last_mut() {
            *last.message_mut() = Some(message.into());
        }
        self
    }

    /// Sets the error code of the most recent constraint.
    pub fn code(mut self, code: impl Into<String>) -> Self {
        if let Some(last) = self.constraints.last_mut() {
            *last.code_mut() = Some(code.into());
        }
        self
    }

    /// Checks a value against this schema.
    pub fn validate(&self, value: &Value, path: &FieldPath) -> Validation<String, SchemaErrors> {
        let Some(s) = value.as_str() else {
            return Validation::Failure(SchemaErrors::single(
                SchemaError::new(path.clone(), "expected string")
                    .with_code("invalid_type")
                    .with_got(value_type_name(value))
                    .with_expected("string"),
            ));
        };

        let errors: Vec<SchemaError> = self
            .constraints
            .iter()
            .filter_map(|c| check_constraint(c, s, path))
            .collect();

        if errors.is_empty() {
            Validation::Success(s.to_string())
        } else {
            Validation::Failure(SchemaErrors::from_vec(errors))
        }
    }
}

impl StringConstraint {
    fn message_mut(&mut self) -> &mut Option<String> {
        match self {
            StringConstraint::MinLength { message, .. }
            | StringConstraint::MaxLength { message, .. }
            | StringConstraint::Pattern { message, .. } => message,
        }
    }

    fn code_mut(&mut self) -> &mut Option<String> {
        match self {
            StringConstraint::MinLength { code, .. }
            | StringConstraint::MaxLength { code, .. }
            | StringConstraint::Pattern { code, .. } => code,
        }
    }
}

impl Default for StringSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaLike for StringSchema {
    type Output = String;

    fn validate(&self, value: &Value, path: &FieldPath) -> Validation<String, SchemaErrors> {
        StringSchema::validate(self, value, path)
    }

    fn validate_to_value(&self, value: &Value, path: &FieldPath) -> Validation<Value, SchemaErrors> {
        StringSchema::validate(self, value, path).map(Value::String)
    }
}

fn check_constraint(
    constraint: &StringConstraint,
    value: &str,
    path: &FieldPath,
) -> Option<SchemaError> {
    match constraint {
        StringConstraint::MinLength { min, message, code } => {
            let len = value.chars().count();
            if len >= *min {
                return None;
            }
            let msg = message
                .clone()
                .unwrap_or_else(|| format!("length must be at least {}, got {}", min, len));
            Some(
                SchemaError::new(path.clone(), msg)
                    .with_code(code.clone().unwrap_or_else(|| "min_length".to_string()))
                    .with_expected(format!("at least {} characters", min))
                    .with_got(format!("{} characters", len)),
            )
        }
        StringConstraint::MaxLength { max, message, code } => {
            let len = value.chars().count();
            if len <= *max {
                return None;
            }
            let msg = message
                .clone()
                .unwrap_or_else(|| format!("length must be at most {}, got {}", max, len));
            Some(
                SchemaError::new(path.clone(), msg)
                    .with_code(code.clone().unwrap_or_else(|| "max_length".to_string()))
                    .with_expected(format!("at most {} characters", max))
                    .with_got(format!("{} characters", len)),
            )
        }
        StringConstraint::Pattern {
            regex,
            message,
            code,
        } => {
            if regex.is_match(value) {
                return None;
            }
            let pattern_str = regex.as_str();
            let msg = message
                .clone()
                .unwrap_or_else(|| format!("must match pattern '{}'", pattern_str));
            Some(
                SchemaError::new(path.clone(), msg)
                    .with_code(code.clone().unwrap_or_else(|| "pattern".to_string()))
                    .with_expected(format!("string matching '{}'", pattern_str))
                    .with_got(value.to_string()),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn unwrap_failure<T: std::fmt::Debug, E>(v: Validation<T, E>) -> E {
        v.into_result().unwrap_err()
    }

    #[test]
    fn test_rejects_non_strings() {
        let schema = StringSchema::new();
        for value in [json!(null), json!(1), json!([]), json!({}), json!(false)] {
            let errors = unwrap_failure(schema.validate(&value, &FieldPath::root()));
            assert_eq!(errors.first().code, "invalid_type");
            assert_eq!(errors.first().expected.as_deref(), Some("string"));
        }
    }

    #[test]
    fn test_accepts_empty_string() {
        let result = StringSchema::new().validate(&json!(""), &FieldPath::root());
        assert_eq!(result.into_result().unwrap(), "");
    }

    #[test]
    fn test_max_len_counts_chars() {
        let schema = StringSchema::new().max_len(3);
        assert!(schema.validate(&json!("日本語"), &FieldPath::root()).is_success());
        let errors = unwrap_failure(schema.validate(&json!("日本語版"), &FieldPath::root()));
        assert_eq!(errors.first().code, "max_length");
    }

    #[test]
    fn test_min_len() {
        let schema = StringSchema::new().min_len(1);
        let errors = unwrap_failure(schema.validate(&json!(""), &FieldPath::root()));
        assert_eq!(errors.first().code, "min_length");
    }

    #[test]
    fn test_custom_message_and_code() {
        let schema = StringSchema::new()
            .pattern(Regex::new(r"^\D").unwrap())
            .error("must not start with a digit")
            .code("leading_digit");

        let errors = unwrap_failure(schema.validate(&json!("1abc"), &FieldPath::root()));
        assert_eq!(errors.first().message, "must not start with a digit");
        assert_eq!(errors.first().code, "leading_digit");
    }

    #[test]
    fn test_path_is_reported() {
        let path = FieldPath::field("title").push_key("value");
        let errors = unwrap_failure(StringSchema::new().validate(&json!(1), &path));
        assert_eq!(errors.first().path.to_string(), "title.value");
    }
}
