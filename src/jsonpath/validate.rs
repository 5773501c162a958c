//! Expression syntax checks.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

static BRACKET_CONTENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^\[\]]*)\]").expect("valid regex"));

/// JsonPathError describes why an expression was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JsonPathError {
    #[error("JSONPath expression is empty")]
    Empty,

    #[error("JSONPath expression must start with '$'")]
    MissingRoot,

    #[error("unbalanced brackets: {open} '[' against {close} ']'")]
    UnbalancedBrackets { open: usize, close: usize },

    #[error("unsupported selector '[{0}]': only array indices and '*' are allowed")]
    UnsupportedSelector(String),
}

/// Checks that `expression` starts at the root and that its brackets are
/// balanced and hold either an index or `*`.
pub fn validate_json_path(expression: &str) -> Result<(), JsonPathError> {
    let expression = expression.trim();
    if expression.is_empty() {
        return Err(JsonPathError::Empty);
    }
    if !expression.starts_with('$') {
        return Err(JsonPathError::MissingRoot);
    }

    let open = expression.matches('[').count();
    let close = expression.matches(']').count();
    if open != close {
        return Err(JsonPathError::UnbalancedBrackets { open, close });
    }

    for caps in BRACKET_CONTENT.captures_iter(expression) {
        let content = caps[1].trim();
        let is_index = !content.is_empty() && content.bytes().all(|b| b.is_ascii_digit());
        if !is_index && content != "*" {
            return Err(JsonPathError::UnsupportedSelector(content.to_string()));
        }
    }
    Ok(())
}
