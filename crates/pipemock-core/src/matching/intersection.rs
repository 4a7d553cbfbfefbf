//! Subset checks shared by query, header and payload matching.

use serde_json::Value;
use std::collections::HashMap;

/// Check if subset JSON value is contained in target JSON value.
///
/// Objects match key by key, arrays match when every subset element matches
/// some target element, everything else compares by equality.
/// `None`, `Null` or an empty object as subset matches any target.
pub fn object_intersects(target: Option<&Value>, subset: Option<&Value>) -> bool {
    match (target, subset) {
        (_, None | Some(Value::Null)) => true,
        (_, Some(Value::Object(fields))) if fields.is_empty() => true,
        (None | Some(Value::Null), Some(_)) => false,
        (Some(target), Some(subset)) => value_intersects(target, subset),
    }
}

fn value_intersects(target: &Value, subset: &Value) -> bool {
    match (target, subset) {
        (Value::Object(t), Value::Object(s)) => s
            .iter()
            .all(|(k, sv)| t.get(k).is_some_and(|tv| value_intersects(tv, sv))),
        (Value::Array(t), Value::Array(s)) => s
            .iter()
            .all(|sv| t.iter().any(|tv| value_intersects(tv, sv))),
        _ => target == subset,
    }
}

/// Trimmed items of a comma-separated value.
fn list_items(value: &str) -> impl Iterator<Item = &str> {
    value.split(',').map(str::trim)
}

/// Every expected key is present in `actual` and the two comma-separated
/// lists share at least one item. `None` or empty expected matches anything.
pub fn hashmap_intersects(
    expected: Option<&HashMap<String, String>>,
    actual: Option<&HashMap<String, String>>,
) -> bool {
    let Some(expected) = expected.filter(|e| !e.is_empty()) else {
        return true;
    };
    let Some(actual) = actual else {
        return false;
    };

    expected.iter().all(|(key, wanted)| match actual.get(key) {
        Some(present) => list_items(wanted).any(|w| list_items(present).any(|p| p == w)),
        None => false,
    })
}

/// JSON object view of a string map for expression matching.
/// Values holding a comma-separated list become arrays of strings.
pub fn hashmap_to_value(map: &HashMap<String, String>) -> Value {
    let mut object = serde_json::Map::with_capacity(map.len());
    for (key, value) in map {
        let value = if value.contains(',') {
            list_items(value).map(Value::from).collect()
        } else {
            Value::from(value.as_str())
        };
        object.insert(key.clone(), value);
    }
    Value::Object(object)
}
