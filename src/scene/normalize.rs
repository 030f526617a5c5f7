use serde_json::{Map, Value};

/// Copy of `value` with every object key converted from camelCase to snake_case.
///
/// Each ASCII uppercase letter becomes `_` followed by its lowercase form, so
/// `fillColor` becomes `fill_color` and keys already in snake_case are unchanged. Arrays
/// are walked recursively; scalar values are never touched.
pub fn to_snake_case_keys(value: &Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(items.iter().map(to_snake_case_keys).collect()),
        Value::Object(map) => {
            let mut out = Map::with_capacity(map.len());
            for (key, v) in map {
                out.insert(snake_case_key(key), to_snake_case_keys(v));
            }
            Value::Object(out)
        }
        scalar => scalar.clone(),
    }
}

/// Snake-case form of a single key.
fn snake_case_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for ch in key.chars() {
        if ch.is_ascii_uppercase() {
            out.push('_');
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/scene/normalize.rs"]
mod tests;
