// src/utils/json.rs

use serde_json::Value;

/// Truthiness of a JSON value, as the exported data's producers read it.
///
/// `null`, `false`, `0`, `NaN` and `""` are falsy; everything else,
/// including empty arrays and objects, is truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Renders a scalar JSON value as display text. Strings are used verbatim,
/// anything else falls back to its JSON form.
pub fn display_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Display text for an optional value, or `fallback` when the value is
/// absent or falsy.
pub fn display_or(value: Option<&Value>, fallback: &str) -> String {
    match value {
        Some(v) if is_truthy(v) => display_text(v),
        _ => fallback.to_string(),
    }
}
