//! Slash-separated path lookup into a model value.

use serde_json::Value;

/// Walk a `/`-separated path into `model`.
///
/// Objects are entered by key, arrays by numeric index. The segment
/// `length` on an array yields its element count. Any missing or
/// non-indexable intermediate yields `None`, never an error.
pub fn lookup(model: &Value, path: &str) -> Option<Value> {
    let mut current = model;

    for segment in path.split('/') {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => {
                if segment == "length" {
                    return Some(Value::from(items.len()));
                }
                let index: usize = segment.parse().ok()?;
                items.get(index)?
            }
            _ => return None,
        };
    }

    Some(current.clone())
}
