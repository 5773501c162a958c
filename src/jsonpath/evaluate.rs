//! Expression evaluation.

use super::validate::{validate_json_path, JsonPathError};
use crate::path::{Path, PathElement};
use crate::value::Value;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static BRACKET_SELECTOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[(\d+|\*)\]").expect("valid regex"));

/// PathResult is one match of an expression.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathResult {
    pub path: String,
    pub value: Value,
}

/// Evaluates `expression` against `doc`.
///
/// Never fails: selectors that match nothing, out-of-range indices and
/// missing members simply contribute no results. An empty expression or a
/// bare `$` selects the whole document.
///
/// Result paths select their node again, except below keys that are empty,
/// equal to `*`, or contain `.`, `[` or `]`.
pub fn evaluate_json_path(doc: &Value, expression: &str) -> Vec<PathResult> {
    let expression = expression.trim();
    if expression.is_empty() || expression == "$" {
        return vec![PathResult {
            path: "$".to_string(),
            value: doc.clone(),
        }];
    }

    let normalized = BRACKET_SELECTOR.replace_all(expression, ".$1");
    let rewritten: &str = &normalized;
    let body = rewritten
        .strip_prefix("$.")
        .or_else(|| rewritten.strip_prefix('$'))
        .unwrap_or(rewritten);
    // `$..[0]` normalizes to `$...0`; one empty segment marks one descent.
    let mut segments: Vec<&str> = body.split('.').collect();
    segments.dedup_by(|a, b| a.is_empty() && b.is_empty());

    let mut results = Vec::new();
    traverse(doc, &Path::root(), &segments, &mut results);
    debug!("evaluated {:?}: {} results", expression, results.len());
    results
}

/// Validates `expression` and evaluates it.
pub fn query(doc: &Value, expression: &str) -> Result<Vec<PathResult>, JsonPathError> {
    validate_json_path(expression)?;
    Ok(evaluate_json_path(doc, expression))
}

fn traverse(current: &Value, path: &Path, segments: &[&str], out: &mut Vec<PathResult>) {
    let Some((segment, rest)) = segments.split_first() else {
        out.push(PathResult {
            path: path.to_string(),
            value: current.clone(),
        });
        return;
    };

    match (*segment, current) {
        ("*", Value::List(items)) => {
            for (i, item) in items.iter().enumerate() {
                traverse(item, &path.with(PathElement::index(i)), rest, out);
            }
        }
        ("*", Value::Map(map)) => {
            for (key, child) in map.iter() {
                traverse(child, &path.with(PathElement::key(key.as_str())), rest, out);
            }
        }
        ("*", _) => {}
        ("", _) => descend(current, path, rest, out),
        (index, Value::List(items)) if is_index(index) => {
            let child = index.parse::<usize>().ok().and_then(|i| items.get(i).map(|item| (i, item)));
            if let Some((i, item)) = child {
                traverse(item, &path.with(PathElement::index(i)), rest, out);
            }
        }
        ("length", Value::List(items)) => {
            let length = Value::Int(items.len() as i64);
            traverse(&length, &path.with(PathElement::key("length")), rest, out);
        }
        (key, Value::Map(map)) => {
            if let Some(child) = map.get(key) {
                traverse(child, &path.with(PathElement::key(key)), rest, out);
            }
        }
        _ => {}
    }
}

/// Applies `rest` at `node` and at every descendant, in pre-order. A
/// trailing `..` with nothing after it matches nothing.
fn descend(node: &Value, path: &Path, rest: &[&str], out: &mut Vec<PathResult>) {
    if rest.is_empty() {
        return;
    }
    traverse(node, path, rest, out);
    match node {
        Value::List(items) => {
            for (i, item) in items.iter().enumerate() {
                descend(item, &path.with(PathElement::index(i)), rest, out);
            }
        }
        Value::Map(map) => {
            for (key, child) in map.iter() {
                descend(child, &path.with(PathElement::key(key.as_str())), rest, out);
            }
        }
        _ => {}
    }
}

fn is_index(segment: &str) -> bool {
    !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit())
}
