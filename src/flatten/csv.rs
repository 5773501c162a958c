//! CSV export of flat maps.

use super::FlatMap;
use crate::csv::{parse_records, write_record};
use crate::error::{Error, Result};
use crate::value::{from_json, Value};

const HEADER: [&str; 3] = ["Key", "Value", "Type"];

/// Writes a flat map as `Key,Value,Type` rows.
///
/// Strings are written raw; every other value as compact JSON.
pub fn convert_to_csv(flat: &FlatMap) -> String {
    let mut out = String::new();
    write_record(&mut out, &HEADER);
    for (key, value) in flat {
        let text = match value {
            Value::String(s) => s.clone(),
            other => other.to_json_string(),
        };
        write_record(&mut out, &[key.as_str(), text.as_str(), value.type_name()]);
    }
    out
}

/// Reads rows written by [`convert_to_csv`] back into a flat map.
///
/// The header row is skipped. A missing or unknown type falls back to
/// parsing the value as JSON and then to the raw text.
pub fn convert_from_csv(csv: &str) -> Result<FlatMap> {
    let mut flat = FlatMap::new();
    for (i, record) in parse_records(csv)?.into_iter().enumerate() {
        if i == 0 && is_header(&record.fields) {
            continue;
        }
        if record.fields.len() < 2 {
            return Err(Error::csv(record.line, "expected at least Key and Value columns"));
        }
        let mut fields = record.fields.into_iter();
        let key = fields.next().unwrap_or_default();
        let raw = fields.next().unwrap_or_default();
        let type_name = fields.next().unwrap_or_default();
        flat.insert(key, typed_value(&raw, type_name.trim()));
    }
    Ok(flat)
}

fn is_header(fields: &[String]) -> bool {
    fields.len() >= 2 && fields[0].trim() == HEADER[0] && fields[1].trim() == HEADER[1]
}

fn typed_value(raw: &str, type_name: &str) -> Value {
    match type_name {
        "null" | "undefined" => Value::Null,
        "string" => Value::String(raw.to_string()),
        "number" => match from_json(raw.trim()) {
            Ok(v) if v.is_number() => v,
            _ => Value::String(raw.to_string()),
        },
        "boolean" => Value::Bool(raw.trim() == "true"),
        _ => from_json(raw).unwrap_or_else(|_| Value::String(raw.to_string())),
    }
}
