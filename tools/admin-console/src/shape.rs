use serde_json::Value;

const WRAPPER_KEYS: [&str; 4] = ["content", "items", "data", "results"];

/// Extract the list out of a response that may or may not wrap it.
///
/// Accepts a bare array, an object with one of the usual wrapper keys, or any
/// object with an array-valued key (first in document order). Anything else is empty.
pub fn normalize_to_array(value: Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        Value::Object(mut map) => {
            for key in WRAPPER_KEYS {
                if matches!(map.get(key), Some(Value::Array(_))) {
                    if let Some(Value::Array(items)) = map.remove(key) {
                        return items;
                    }
                }
            }
            map.into_iter()
                .find_map(|(_, v)| match v {
                    Value::Array(items) => Some(items),
                    _ => None,
                })
                .unwrap_or_default()
        }
        _ => Vec::new(),
    }
}
