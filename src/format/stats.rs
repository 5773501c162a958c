//! Document statistics.

use crate::value::Value;
use serde::Serialize;

/// JsonStats counts the nodes of a document by type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonStats {
    pub objects: usize,
    pub arrays: usize,
    pub strings: usize,
    pub numbers: usize,
    pub booleans: usize,
    pub nulls: usize,
    /// Object members summed over every object.
    pub total_keys: usize,
    /// 0 for a scalar document, 1 + deepest child for containers.
    pub max_depth: usize,
    /// Length of the minified text.
    pub size_bytes: usize,
}

/// Collects statistics for `value`.
pub fn statistics(value: &Value) -> JsonStats {
    let mut stats = JsonStats {
        size_bytes: value.to_json_string().len(),
        ..JsonStats::default()
    };
    stats.max_depth = walk(value, &mut stats);
    stats
}

fn walk(value: &Value, stats: &mut JsonStats) -> usize {
    match value {
        Value::Null => stats.nulls += 1,
        Value::Bool(_) => stats.booleans += 1,
        Value::Int(_) | Value::Float(_) => stats.numbers += 1,
        Value::String(_) => stats.strings += 1,
        Value::List(items) => {
            stats.arrays += 1;
            return 1 + items.iter().map(|item| walk(item, stats)).max().unwrap_or(0);
        }
        Value::Map(map) => {
            stats.objects += 1;
            stats.total_keys += map.len();
            return 1 + map.iter().map(|(_, v)| walk(v, stats)).max().unwrap_or(0);
        }
    }
    0
}
