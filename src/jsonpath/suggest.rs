//! Expression suggestions for a document.

use crate::path::{Path, PathElement};
use crate::value::Value;
use std::collections::VecDeque;

/// Maximum number of suggestions returned.
pub const MAX_SUGGESTIONS: usize = 50;

/// Array elements sampled per array.
const SAMPLED_INDICES: usize = 3;

/// Lists candidate expressions for `doc`, breadth first.
///
/// Objects contribute one path per member. Arrays contribute `[*]`,
/// `.length` and their first three indices.
pub fn get_json_path_suggestions(doc: &Value) -> Vec<String> {
    let mut suggestions = vec!["$".to_string()];
    let mut queue: VecDeque<Path> = VecDeque::from([Path::root()]);

    while let Some(path) = queue.pop_front() {
        let Some(value) = path.lookup(doc) else {
            continue;
        };
        match value {
            Value::Map(map) => {
                for (key, child) in map.iter() {
                    let child_path = path.with(PathElement::key(key.as_str()));
                    if !offer(&mut suggestions, child_path.to_string()) {
                        return suggestions;
                    }
                    if child.is_container() {
                        queue.push_back(child_path);
                    }
                }
            }
            Value::List(items) => {
                if !offer(&mut suggestions, format!("{}[*]", path))
                    || !offer(&mut suggestions, format!("{}.length", path))
                {
                    return suggestions;
                }
                for (i, item) in items.iter().take(SAMPLED_INDICES).enumerate() {
                    let child_path = path.with(PathElement::index(i));
                    if !offer(&mut suggestions, child_path.to_string()) {
                        return suggestions;
                    }
                    if item.is_container() {
                        queue.push_back(child_path);
                    }
                }
            }
            _ => {}
        }
    }
    suggestions
}

fn offer(suggestions: &mut Vec<String>, path: String) -> bool {
    if suggestions.len() >= MAX_SUGGESTIONS {
        return false;
    }
    suggestions.push(path);
    true
}
