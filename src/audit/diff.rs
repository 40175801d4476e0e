//! Change summaries for audit entries

use serde_json::{Map, Value};

/// Bookkeeping fields that change on every write and add nothing to a summary
const IGNORED_FIELDS: &[&str] = &["updated_at"];

const MAX_STRING_LEN: usize = 40;

/// Summarize top-level field changes between two record snapshots
///
/// Returns `None` when nothing but bookkeeping fields changed. Fields are
/// listed in key order.
pub fn generate_diff(before: &Value, after: &Value) -> Option<String> {
    let changes = match (before, after) {
        (Value::Object(b), Value::Object(a)) => object_changes(b, a),
        _ if before != after => vec![format!("{} -> {}", format_value(before), format_value(after))],
        _ => Vec::new(),
    };

    (!changes.is_empty()).then(|| changes.join(", "))
}

fn object_changes(before: &Map<String, Value>, after: &Map<String, Value>) -> Vec<String> {
    let mut keys: Vec<&String> = before.keys().chain(after.keys()).collect();
    keys.sort();
    keys.dedup();

    keys.into_iter()
        .filter(|k| !IGNORED_FIELDS.contains(&k.as_str()))
        .filter_map(|key| match (before.get(key), after.get(key)) {
            (Some(b), Some(a)) if b != a => {
                Some(format!("{}: {} -> {}", key, format_value(b), format_value(a)))
            }
            (Some(b), None) => Some(format!("{}: {} -> (removed)", key, format_value(b))),
            (None, Some(a)) => Some(format!("{}: (added) -> {}", key, format_value(a))),
            _ => None,
        })
        .collect()
}

fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) if s.chars().count() > MAX_STRING_LEN => {
            let head: String = s.chars().take(MAX_STRING_LEN - 3).collect();
            format!("\"{}...\"", head)
        }
        Value::String(s) => format!("\"{}\"", s),
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(obj) => format!("{{{} fields}}", obj.len()),
    }
}
