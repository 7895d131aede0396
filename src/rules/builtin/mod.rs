mod compare;
mod presence;

use serde_json::Value;
use thiserror::Error;

use crate::domain::Check;
use crate::rules::traits::{BoxError, Predicate};

/// Errors raised when a check meets a value it cannot judge.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CheckError {
    #[error("Field '{field}' is {found}, expected {expected}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        found: &'static str,
    },
}

/// Message raised by a policy rule that was given one.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct Violation {
    pub rule: String,
    pub message: String,
}

/// A built-in check applied to the value at a JSON pointer.
///
/// A field that does not resolve fails every check.
#[derive(Debug, Clone)]
pub struct FieldCheck {
    field: String,
    check: Check,
}

impl FieldCheck {
    /// Create a check on the value at `field`.
    pub fn new(field: impl Into<String>, check: Check) -> Self {
        FieldCheck {
            field: field.into(),
            check,
        }
    }

    /// JSON pointer of the checked value.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// The check applied.
    pub fn check(&self) -> &Check {
        &self.check
    }

    fn judge(&self, value: &Value) -> Result<bool, CheckError> {
        match &self.check {
            Check::Required => Ok(true),
            Check::NotNull => Ok(presence::is_not_null(value)),
            Check::NonEmpty => Ok(presence::is_non_empty(value)),
            Check::Equals(expected) => Ok(value == expected),
            Check::OneOf(allowed) => Ok(allowed.contains(value)),
            Check::Min(min) => compare::number(&self.field, value).map(|n| n >= *min),
            Check::Max(max) => compare::number(&self.field, value).map(|n| n <= *max),
            Check::MinLength(min) => compare::length(&self.field, value).map(|n| n >= *min),
            Check::MaxLength(max) => compare::length(&self.field, value).map(|n| n <= *max),
        }
    }
}

impl Predicate<Value> for FieldCheck {
    fn evaluate(&self, data: &Value) -> Result<bool, BoxError> {
        match data.pointer(&self.field) {
            Some(value) => Ok(self.judge(value)?),
            None => Ok(false),
        }
    }
}

/// Name of a JSON value's type, for error messages.
pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc() -> Value {
        json!({
            "email": "a@b.c",
            "age": 20,
            "nickname": null,
            "tags": ["x", "y"],
            "role": "member",
            "address": {"city": "Lima"}
        })
    }

    fn eval(field: &str, check: Check) -> bool {
        FieldCheck::new(field, check).evaluate(&doc()).unwrap()
    }

    #[test]
    fn test_presence_checks() {
        assert!(eval("/email", Check::Required));
        assert!(eval("/nickname", Check::Required));
        assert!(!eval("/nickname", Check::NotNull));
        assert!(!eval("/phone", Check::Required));
        assert!(eval("/address/city", Check::NonEmpty));
        assert!(eval("", Check::NonEmpty));
    }

    #[test]
    fn test_value_checks() {
        assert!(eval("/role", Check::Equals(json!("member"))));
        assert!(!eval("/role", Check::Equals(json!("admin"))));
        assert!(eval("/role", Check::OneOf(vec![json!("admin"), json!("member")])));
        assert!(!eval("/role", Check::OneOf(vec![json!("guest")])));
    }

    #[test]
    fn test_bounds() {
        assert!(eval("/age", Check::Min(18.0)));
        assert!(eval("/age", Check::Max(20.0)));
        assert!(!eval("/age", Check::Max(19.5)));
        assert!(eval("/tags", Check::MinLength(2)));
        assert!(!eval("/tags", Check::MaxLength(1)));
        assert!(eval("/email", Check::MaxLength(5)));
        assert!(!eval("/missing", Check::Min(0.0)));
    }

    #[test]
    fn test_type_mismatch_is_an_error() {
        let check = FieldCheck::new("/email", Check::Min(1.0));

        let err = check.evaluate(&doc()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Field '/email' is a string, expected a number"
        );
        assert!(err.downcast_ref::<CheckError>().is_some());
    }

    #[test]
    fn test_violation_message() {
        let violation = Violation {
            rule: "has_email".to_string(),
            message: "email is required".to_string(),
        };

        assert_eq!(violation.to_string(), "email is required");
    }
}
