use serde_json::Value;

pub(super) fn is_not_null(value: &Value) -> bool {
    !value.is_null()
}

/// Null and empty containers are empty; scalars are not.
pub(super) fn is_non_empty(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
        Value::Bool(_) | Value::Number(_) => true,
    }
}
