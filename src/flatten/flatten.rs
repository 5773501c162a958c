//! Flattening and unflattening.

use crate::path::PathElement;
use crate::value::{Map, Value};
use indexmap::IndexMap;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Trailing `[n]` groups of a bracket-notation key part, e.g. `items[2][0]`.
static BRACKET_PART: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.*?)((?:\[\d+\])+)$").expect("valid regex"));
static BRACKET_INDEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[(\d+)\]").expect("valid regex"));

/// Largest array index unflatten will materialize.
const MAX_INDEX: usize = 1 << 20;

/// Nesting depth above which `_` is suggested as the separator.
const DEEP_NESTING: usize = 5;

/// How array positions are written into flat keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArrayNotation {
    /// `items[0]`
    #[default]
    Bracket,
    /// `items.0` (using the configured separator)
    Dot,
}

/// FlattenOptions controls how keys are built and parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FlattenOptions {
    pub separator: String,
    pub array_notation: ArrayNotation,
    /// Store arrays as single leaf values instead of descending into them.
    pub preserve_arrays: bool,
    /// Store nested empty objects and arrays as leaf values. When false they
    /// produce no entries.
    pub preserve_empty: bool,
}

impl Default for FlattenOptions {
    fn default() -> Self {
        FlattenOptions {
            separator: ".".to_string(),
            array_notation: ArrayNotation::Bracket,
            preserve_arrays: false,
            preserve_empty: false,
        }
    }
}

/// FlatMap maps composite keys to leaf values in traversal order.
pub type FlatMap = IndexMap<String, Value>;

/// Flattens a document.
///
/// A scalar document yields a single entry under the empty key. An empty
/// top-level container yields an empty map.
pub fn flatten(value: &Value, opts: &FlattenOptions) -> FlatMap {
    let mut out = FlatMap::new();
    flatten_into(value, "", opts, true, &mut out);
    debug!("flattened document into {} entries", out.len());
    out
}

fn flatten_into(value: &Value, prefix: &str, opts: &FlattenOptions, is_root: bool, out: &mut FlatMap) {
    match value {
        Value::Map(map) => {
            if map.is_empty() {
                if !is_root && opts.preserve_empty {
                    out.insert(prefix.to_string(), value.clone());
                }
                return;
            }
            for (key, child) in map.iter() {
                let child_key = join_key(prefix, key, opts);
                flatten_into(child, &child_key, opts, false, out);
            }
        }
        Value::List(items) => {
            if opts.preserve_arrays {
                out.insert(prefix.to_string(), value.clone());
                return;
            }
            if items.is_empty() {
                if !is_root && opts.preserve_empty {
                    out.insert(prefix.to_string(), value.clone());
                }
                return;
            }
            for (i, item) in items.iter().enumerate() {
                let child_key = index_key(prefix, i, opts);
                flatten_into(item, &child_key, opts, false, out);
            }
        }
        scalar => {
            out.insert(prefix.to_string(), scalar.clone());
        }
    }
}

fn join_key(prefix: &str, key: &str, opts: &FlattenOptions) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}{}{}", prefix, opts.separator, key)
    }
}

fn index_key(prefix: &str, index: usize, opts: &FlattenOptions) -> String {
    match opts.array_notation {
        ArrayNotation::Bracket => format!("{}[{}]", prefix, index),
        ArrayNotation::Dot => join_key(prefix, &index.to_string(), opts),
    }
}

/// Splits a flat key into path segments.
///
/// Bracket notation turns `name[2][0]` into a key followed by two indices.
/// Dot notation treats every all-digit part as an index. Anything else is
/// kept as a plain key.
pub fn parse_flat_key(key: &str, opts: &FlattenOptions) -> Vec<PathElement> {
    if key.is_empty() {
        return Vec::new();
    }
    let parts: Vec<&str> = if opts.separator.is_empty() {
        vec![key]
    } else {
        key.split(opts.separator.as_str()).collect()
    };

    let mut segments = Vec::with_capacity(parts.len());
    for part in parts {
        match opts.array_notation {
            ArrayNotation::Bracket => push_bracket_part(part, &mut segments),
            ArrayNotation::Dot => segments.push(dot_segment(part)),
        }
    }
    segments
}

fn push_bracket_part(part: &str, segments: &mut Vec<PathElement>) {
    let Some(caps) = BRACKET_PART.captures(part) else {
        segments.push(PathElement::key(part));
        return;
    };
    let indices: Option<Vec<usize>> = BRACKET_INDEX
        .captures_iter(&caps[2])
        .map(|c| c[1].parse::<usize>().ok())
        .collect();
    let Some(indices) = indices else {
        segments.push(PathElement::key(part));
        return;
    };
    if !caps[1].is_empty() {
        segments.push(PathElement::key(&caps[1]));
    }
    segments.extend(indices.into_iter().map(PathElement::Index));
}

fn dot_segment(part: &str) -> PathElement {
    if !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit()) {
        if let Ok(i) = part.parse::<usize>() {
            return PathElement::Index(i);
        }
    }
    PathElement::key(part)
}

/// Rebuilds a document from a flat map.
///
/// The container created for each segment is chosen by looking at the next
/// segment: an index creates an array, anything else an object. Entries that
/// cannot be placed are dropped.
pub fn unflatten(flat: &FlatMap, opts: &FlattenOptions) -> Value {
    let mut root: Option<Value> = None;
    let mut dropped = 0usize;

    for (key, value) in flat {
        let segments = parse_flat_key(key, opts);
        let Some(first) = segments.first() else {
            if root.is_none() {
                root = Some(value.clone());
            } else {
                debug!("dropping root entry {:?}: document already started", key);
                dropped += 1;
            }
            continue;
        };
        if segments.iter().any(|s| matches!(s, PathElement::Index(i) if *i > MAX_INDEX)) {
            debug!("dropping flat entry {:?}: index above {}", key, MAX_INDEX);
            dropped += 1;
            continue;
        }
        let target = root.get_or_insert_with(|| container_for(first));
        if !insert_at(target, &segments, value) {
            debug!("dropping flat entry {:?}: conflicts with existing structure", key);
            dropped += 1;
        }
    }

    debug!("unflattened {} entries ({} dropped)", flat.len(), dropped);
    root.unwrap_or_else(|| Value::Map(Map::new()))
}

fn container_for(next: &PathElement) -> Value {
    match next {
        PathElement::Index(_) => Value::List(Vec::new()),
        PathElement::Key(_) => Value::Map(Map::new()),
    }
}

fn insert_at(root: &mut Value, segments: &[PathElement], value: &Value) -> bool {
    let Some((last, parents)) = segments.split_last() else {
        return false;
    };
    let mut current = root;
    for (i, segment) in parents.iter().enumerate() {
        let Some(slot) = child_slot(current, segment) else {
            return false;
        };
        if slot.is_null() {
            *slot = container_for(&segments[i + 1]);
        }
        current = slot;
    }
    match child_slot(current, last) {
        Some(slot) => {
            *slot = value.clone();
            true
        }
        None => false,
    }
}

fn child_slot<'a>(container: &'a mut Value, segment: &PathElement) -> Option<&'a mut Value> {
    match (container, segment) {
        (Value::Map(map), PathElement::Key(k)) => Some(map.entry_or_insert_with(k, || Value::Null)),
        (Value::Map(map), PathElement::Index(i)) => {
            Some(map.entry_or_insert_with(&i.to_string(), || Value::Null))
        }
        (Value::List(items), PathElement::Index(i)) => {
            if items.len() <= *i {
                items.resize(*i + 1, Value::Null);
            }
            items.get_mut(*i)
        }
        _ => None,
    }
}

/// Suggests options for a document: `_` as separator for deeply nested
/// documents, bracket notation when any array is present.
pub fn suggest_optimal_options(value: &Value) -> FlattenOptions {
    let separator = if max_depth(value) > DEEP_NESTING { "_" } else { "." };
    let array_notation = if contains_array(value) {
        ArrayNotation::Bracket
    } else {
        ArrayNotation::Dot
    };
    FlattenOptions {
        separator: separator.to_string(),
        array_notation,
        ..FlattenOptions::default()
    }
}

/// Nesting depth: 0 for scalars, 1 + the deepest child for containers.
pub fn max_depth(value: &Value) -> usize {
    match value {
        Value::Map(map) => 1 + map.iter().map(|(_, v)| max_depth(v)).max().unwrap_or(0),
        Value::List(items) => 1 + items.iter().map(max_depth).max().unwrap_or(0),
        _ => 0,
    }
}

fn contains_array(value: &Value) -> bool {
    match value {
        Value::List(_) => true,
        Value::Map(map) => map.iter().any(|(_, v)| contains_array(v)),
        _ => false,
    }
}
