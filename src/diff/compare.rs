//! Structural comparison.

use crate::path::{Path, PathElement};
use crate::value::Value;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

/// DiffType classifies a single difference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffType {
    Added,
    Removed,
    Modified,
    Unchanged,
}

impl DiffType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiffType::Added => "added",
            DiffType::Removed => "removed",
            DiffType::Modified => "modified",
            DiffType::Unchanged => "unchanged",
        }
    }
}

impl fmt::Display for DiffType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// DiffItem is one entry of a comparison result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffItem {
    #[serde(rename = "type")]
    pub kind: DiffType,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl DiffItem {
    /// Creates an added item.
    pub fn added(path: impl Into<String>, new_value: Value) -> Self {
        DiffItem {
            kind: DiffType::Added,
            path: path.into(),
            old_value: None,
            new_value: Some(new_value),
            message: None,
        }
    }

    /// Creates a removed item.
    pub fn removed(path: impl Into<String>, old_value: Value) -> Self {
        DiffItem {
            kind: DiffType::Removed,
            path: path.into(),
            old_value: Some(old_value),
            new_value: None,
            message: None,
        }
    }

    /// Creates a modified item.
    pub fn modified(path: impl Into<String>, old_value: Value, new_value: Value, message: String) -> Self {
        DiffItem {
            kind: DiffType::Modified,
            path: path.into(),
            old_value: Some(old_value),
            new_value: Some(new_value),
            message: Some(message),
        }
    }

    /// Creates an unchanged item.
    pub fn unchanged(path: impl Into<String>, value: Value) -> Self {
        DiffItem {
            kind: DiffType::Unchanged,
            path: path.into(),
            old_value: Some(value.clone()),
            new_value: Some(value),
            message: None,
        }
    }

    /// Returns true unless the item is unchanged.
    pub fn is_change(&self) -> bool {
        self.kind != DiffType::Unchanged
    }
}

/// Compares two documents, reporting differences in pre-order.
///
/// Null counts as missing: a null on the left is reported as an addition and
/// a null on the right as a removal. Object members are visited in the left
/// document's key order followed by keys only present on the right.
pub fn compare_json(left: &Value, right: &Value) -> Vec<DiffItem> {
    compare_json_at(left, right, &Path::root())
}

/// Like [`compare_json`], but reports paths below `root`. Used to compare
/// sub-documents while keeping their location in the enclosing document.
pub fn compare_json_at(left: &Value, right: &Value, root: &Path) -> Vec<DiffItem> {
    let mut items = Vec::new();
    compare(left, right, root, &mut items);
    debug!("compared documents at {}: {} diff items", root, items.len());
    items
}

fn compare(left: &Value, right: &Value, path: &Path, out: &mut Vec<DiffItem>) {
    match (left, right) {
        (Value::Null, Value::Null) => out.push(DiffItem::unchanged(path.to_string(), Value::Null)),
        (Value::Null, r) => out.push(DiffItem::added(path.to_string(), r.clone())),
        (l, Value::Null) => out.push(DiffItem::removed(path.to_string(), l.clone())),
        (l, r) if l.type_name() != r.type_name() => {
            let message = format!("Type changed from {} to {}", l.type_name(), r.type_name());
            out.push(DiffItem::modified(path.to_string(), l.clone(), r.clone(), message));
        }
        (Value::List(l), Value::List(r)) => {
            for i in 0..l.len().max(r.len()) {
                let child = path.with(PathElement::index(i));
                match (l.get(i), r.get(i)) {
                    (Some(a), Some(b)) => compare(a, b, &child, out),
                    (None, Some(b)) => out.push(DiffItem::added(child.to_string(), b.clone())),
                    (Some(a), None) => out.push(DiffItem::removed(child.to_string(), a.clone())),
                    (None, None) => {}
                }
            }
        }
        (Value::Map(l), Value::Map(r)) => {
            for (key, a) in l.iter() {
                let child = path.with(PathElement::key(key.as_str()));
                match r.get(key) {
                    Some(b) => compare(a, b, &child, out),
                    None => out.push(DiffItem::removed(child.to_string(), a.clone())),
                }
            }
            for (key, b) in r.iter().filter(|(k, _)| !l.has(k)) {
                let child = path.with(PathElement::key(key.as_str()));
                out.push(DiffItem::added(child.to_string(), b.clone()));
            }
        }
        (l, r) if l.loosely_equals(r) => out.push(DiffItem::unchanged(path.to_string(), l.clone())),
        (l, r) => {
            let message = format!("Value changed from {} to {}", l, r);
            out.push(DiffItem::modified(path.to_string(), l.clone(), r.clone(), message));
        }
    }
}
