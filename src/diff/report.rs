//! Reports derived from a list of diff items.

use super::{DiffItem, DiffType};
use crate::csv::write_record;
use serde::Serialize;
use std::fmt;

/// DiffSummary counts items per type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DiffSummary {
    pub added: usize,
    pub removed: usize,
    pub modified: usize,
    pub unchanged: usize,
    pub total: usize,
}

impl DiffSummary {
    /// Returns true if nothing was added, removed or modified.
    pub fn is_same(&self) -> bool {
        self.added == 0 && self.removed == 0 && self.modified == 0
    }
}

impl fmt::Display for DiffSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} added, {} removed, {} modified, {} unchanged",
            self.added, self.removed, self.modified, self.unchanged
        )
    }
}

/// Counts items per type.
pub fn summarize(items: &[DiffItem]) -> DiffSummary {
    let mut summary = DiffSummary {
        total: items.len(),
        ..DiffSummary::default()
    };
    for item in items {
        match item.kind {
            DiffType::Added => summary.added += 1,
            DiffType::Removed => summary.removed += 1,
            DiffType::Modified => summary.modified += 1,
            DiffType::Unchanged => summary.unchanged += 1,
        }
    }
    summary
}

/// Drops unchanged items.
pub fn filter_changes(items: &[DiffItem]) -> Vec<DiffItem> {
    items.iter().filter(|item| item.is_change()).cloned().collect()
}

/// Renders items as unified-diff style lines.
///
/// A modified item produces a `-` line followed by a `+` line.
pub fn to_unified_text(items: &[DiffItem]) -> String {
    let mut lines = Vec::with_capacity(items.len());
    for item in items {
        let old = item.old_value.as_ref().map(|v| v.to_json_string()).unwrap_or_default();
        let new = item.new_value.as_ref().map(|v| v.to_json_string()).unwrap_or_default();
        match item.kind {
            DiffType::Added => lines.push(format!("+ {}: {}", item.path, new)),
            DiffType::Removed => lines.push(format!("- {}: {}", item.path, old)),
            DiffType::Modified => {
                lines.push(format!("- {}: {}", item.path, old));
                lines.push(format!("+ {}: {}", item.path, new));
            }
            DiffType::Unchanged => lines.push(format!("  {}: {}", item.path, old)),
        }
    }
    lines.join("\n")
}

/// Writes items as `Type,Path,Old Value,New Value,Message` rows.
pub fn to_csv(items: &[DiffItem]) -> String {
    let mut out = String::new();
    write_record(&mut out, &["Type", "Path", "Old Value", "New Value", "Message"]);
    for item in items {
        let old = item.old_value.as_ref().map(|v| v.to_json_string()).unwrap_or_default();
        let new = item.new_value.as_ref().map(|v| v.to_json_string()).unwrap_or_default();
        let message = item.message.as_deref().unwrap_or_default();
        write_record(&mut out, &[item.kind.as_str(), item.path.as_str(), old.as_str(), new.as_str(), message]);
    }
    out
}

/// Percentage of unchanged items. An empty comparison scores 100.
pub fn similarity_score(items: &[DiffItem]) -> f64 {
    if items.is_empty() {
        return 100.0;
    }
    let unchanged = items.iter().filter(|item| !item.is_change()).count();
    unchanged as f64 / items.len() as f64 * 100.0
}
