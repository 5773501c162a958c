//! Schema inference.

use super::node::{SchemaItems, SchemaNode, StringFormat, SCHEMA_DRAFT};
use crate::value::{classify, Value};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use url::Url;

static EMAIL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex"));

const NAIVE_DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// SchemaOptions controls what the generator emits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SchemaOptions {
    /// List members with non-null values as required.
    pub required: bool,
    /// Value of `additionalProperties` on every object.
    pub additional_properties: bool,
    /// Attach the sample value as `examples` on leaves.
    pub examples: bool,
    /// Detect `email`, `uri` and `date-time` string formats.
    pub formats: bool,
    /// Title stamped on the root schema.
    pub title: Option<String>,
}

impl Default for SchemaOptions {
    fn default() -> Self {
        SchemaOptions {
            required: true,
            additional_properties: false,
            examples: false,
            formats: true,
            title: None,
        }
    }
}

/// Generates a schema describing `value`.
///
/// Only the root carries `$schema` and the title.
pub fn generate_json_schema(value: &Value, opts: &SchemaOptions) -> SchemaNode {
    let mut root = infer(value, opts);
    root.schema = Some(SCHEMA_DRAFT.to_string());
    root.title = opts.title.clone();
    root
}

fn infer(value: &Value, opts: &SchemaOptions) -> SchemaNode {
    let mut node = SchemaNode::new(classify(value));
    match value {
        Value::Map(map) => {
            node.properties = Some(map.iter().map(|(k, v)| (k.clone(), infer(v, opts))).collect());
            if opts.required {
                let required: Vec<String> = map
                    .iter()
                    .filter(|(_, v)| !v.is_null())
                    .map(|(k, _)| k.clone())
                    .collect();
                if !required.is_empty() {
                    node.required = Some(required);
                }
            }
            node.additional_properties = Some(opts.additional_properties);
        }
        Value::List(items) => {
            let mut distinct: Vec<SchemaNode> = Vec::new();
            for item in items {
                let schema = infer(item, opts);
                if !distinct.contains(&schema) {
                    distinct.push(schema);
                }
            }
            node.items = match distinct.len() {
                0 => None,
                1 => distinct.pop().map(|s| SchemaItems::Single(Box::new(s))),
                _ => Some(SchemaItems::Tuple(distinct)),
            };
        }
        Value::String(s) if opts.formats => node.format = detect_format(s),
        Value::Int(_) | Value::Float(_) => {
            if let Some(v) = value.as_f64().filter(|v| v.is_finite()) {
                node.minimum = Some(Value::from_f64((v - v.abs()).floor()));
                node.maximum = Some(Value::from_f64((v + v.abs()).ceil()));
            }
        }
        _ => {}
    }
    if opts.examples && !value.is_container() {
        node.examples = Some(vec![value.clone()]);
    }
    node
}

/// Guesses the format of a string sample.
///
/// A date-time must both parse and contain a `-`, which keeps plain numbers
/// out.
pub fn detect_format(s: &str) -> Option<StringFormat> {
    if EMAIL.is_match(s) {
        Some(StringFormat::Email)
    } else if Url::parse(s).is_ok() {
        Some(StringFormat::Uri)
    } else if s.contains('-') && parses_as_date(s) {
        Some(StringFormat::DateTime)
    } else {
        None
    }
}

fn parses_as_date(s: &str) -> bool {
    DateTime::parse_from_rfc3339(s).is_ok()
        || DateTime::parse_from_rfc2822(s).is_ok()
        || NAIVE_DATE_TIME_FORMATS
            .iter()
            .any(|f| NaiveDateTime::parse_from_str(s, f).is_ok())
        || NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
}
