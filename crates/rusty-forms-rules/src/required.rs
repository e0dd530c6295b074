//! Presence check

use crate::Value;

/// Field must hold something
///
/// - `Null` and the literal strings `"undefined"` / `"null"` are absent
/// - strings need at least one non-whitespace character
/// - arrays and objects need at least one item
/// - any other value (numbers, booleans, a single file) is present
pub fn required(value: &Value, _args: &[String]) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) if s == "undefined" || s == "null" => false,
        Value::String(s) => s.chars().any(|c| !c.is_whitespace()),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
        Value::Bool(_) | Value::Number(_) | Value::File(_) => true,
    }
}
