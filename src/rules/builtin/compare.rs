use serde_json::Value;

use super::{type_name, CheckError};

/// Numeric view of a value.
pub(super) fn number(field: &str, value: &Value) -> Result<f64, CheckError> {
    value.as_f64().ok_or_else(|| mismatch(field, "a number", value))
}

/// Character count of a string, or element count of an array.
pub(super) fn length(field: &str, value: &Value) -> Result<usize, CheckError> {
    match value {
        Value::String(s) => Ok(s.chars().count()),
        Value::Array(items) => Ok(items.len()),
        other => Err(mismatch(field, "a string or an array", other)),
    }
}

fn mismatch(field: &str, expected: &'static str, found: &Value) -> CheckError {
    CheckError::TypeMismatch {
        field: field.to_string(),
        expected,
        found: type_name(found),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_number() {
        assert_eq!(number("/n", &json!(3)).unwrap(), 3.0);
        assert_eq!(number("/n", &json!(-1.5)).unwrap(), -1.5);
        assert!(matches!(
            number("/n", &json!("3")),
            Err(CheckError::TypeMismatch { found: "a string", .. })
        ));
    }

    #[test]
    fn test_length_counts_characters() {
        assert_eq!(length("/s", &json!("añb")).unwrap(), 3);
        assert_eq!(length("/a", &json!([1, 2])).unwrap(), 2);
        assert!(length("/o", &json!({"k": 1})).is_err());
    }
}
