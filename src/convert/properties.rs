//! Properties files.

use crate::error::{Error, Result};
use crate::flatten::{unflatten, FlatMap, FlattenOptions};
use crate::value::{to_yaml, Value};
use indexmap::IndexMap;

/// Parses `key=value` / `key: value` lines.
///
/// Blank lines and lines starting with `#` or `!` are skipped. A value
/// ending in `\` continues on the next line.
pub fn parse_properties(text: &str) -> Result<IndexMap<String, String>> {
    let mut properties = IndexMap::new();
    let mut lines = text.lines().enumerate();

    while let Some((idx, raw)) = lines.next() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
            continue;
        }
        let Some(pos) = line.find(['=', ':']) else {
            return Err(Error::properties(idx + 1, format!("expected key=value, found {:?}", line)));
        };
        let key = line[..pos].trim();
        if key.is_empty() {
            return Err(Error::properties(idx + 1, "missing key before separator"));
        }

        let mut value = line[pos + 1..].trim().to_string();
        while value.ends_with('\\') {
            value.pop();
            match lines.next() {
                Some((_, next)) => value.push_str(next.trim()),
                None => break,
            }
        }
        properties.insert(key.to_string(), value);
    }
    Ok(properties)
}

/// Converts properties text into an equivalent YAML document.
///
/// Keys are unflattened with `.` and bracket notation. Values that read as
/// booleans or numbers become typed scalars.
pub fn properties_to_yaml(text: &str) -> Result<String> {
    let flat: FlatMap = parse_properties(text)?
        .into_iter()
        .map(|(k, v)| {
            let value = scalar_from_text(&v);
            (k, value)
        })
        .collect();
    let doc = unflatten(&flat, &FlattenOptions::default());
    Ok(to_yaml(&doc)?)
}

fn scalar_from_text(text: &str) -> Value {
    match text {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => {
            if let Ok(i) = text.parse::<i64>() {
                Value::Int(i)
            } else if let Some(f) = text.parse::<f64>().ok().filter(|f| f.is_finite()) {
                Value::Float(f)
            } else {
                Value::String(text.to_string())
            }
        }
    }
}
