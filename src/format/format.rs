//! Text formatting.

use crate::error::Result;
use crate::value::{from_json, to_json, to_json_pretty, Map, Value};
use serde::de::IgnoredAny;
use thiserror::Error;

/// Default indentation width for pretty output.
pub const DEFAULT_INDENT: usize = 2;

/// JsonSyntaxError locates the first syntax error in a JSON text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct JsonSyntaxError {
    pub line: usize,
    pub column: usize,
    pub message: String,
}

/// Re-indents JSON text with `indent` spaces per level.
pub fn pretty(text: &str, indent: usize) -> Result<String> {
    let value = from_json(text)?;
    Ok(to_json_pretty(&value, indent)?)
}

/// Removes all insignificant whitespace from JSON text.
pub fn minify(text: &str) -> Result<String> {
    let value = from_json(text)?;
    Ok(to_json(&value)?)
}

/// Checks that `text` is a single well-formed JSON document.
pub fn validate_json(text: &str) -> std::result::Result<(), JsonSyntaxError> {
    serde_json::from_str::<IgnoredAny>(text)
        .map(|_| ())
        .map_err(|e| JsonSyntaxError {
            line: e.line(),
            column: e.column(),
            message: e.to_string(),
        })
}

/// Returns a copy of `value` with the keys of every object sorted.
pub fn sort_keys(value: &Value) -> Value {
    match value {
        Value::Map(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            Value::Map(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.clone(), sort_keys(v)))
                    .collect::<Map>(),
            )
        }
        Value::List(items) => Value::List(items.iter().map(sort_keys).collect()),
        other => other.clone(),
    }
}
