//! Decoders for individual option values.

use serde_json::Value;

pub(super) fn boolean(value: &Value) -> Option<bool> {
    value.as_bool()
}

pub(super) fn string(value: &Value) -> Option<String> {
    value.as_str().map(str::to_owned)
}

pub(super) fn float(value: &Value) -> Option<f32> {
    value.as_f64().map(|v| v as f32)
}

pub(super) fn integer(value: &Value) -> Option<i64> {
    value.as_i64()
}

pub(super) fn float_pair(value: &Value) -> Option<[f32; 2]> {
    match value.as_array()?.as_slice() {
        [a, b] => Some([float(a)?, float(b)?]),
        _ => None,
    }
}

/// A number or `null`; `null` decodes to `Some(None)`.
pub(super) fn nullable_number(value: &Value) -> Option<Option<f64>> {
    match value {
        Value::Null => Some(None),
        other => other.as_f64().map(Some),
    }
}
