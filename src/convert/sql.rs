//! Filling `?` placeholders from prepared-statement logs.
//!
//! Statement loggers print the SQL and its bound parameters on separate
//! lines:
//!
//! ```text
//! ==>  Preparing: SELECT * FROM users WHERE id = ? AND name = ?
//! ==> Parameters: 42(Long), Ann(String)
//! ```
//!
//! [`fill_from_log`] turns that pair back into an executable statement.

use crate::error::{Error, Result};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

const PREPARING: &str = "Preparing:";
const PARAMETERS: &str = "Parameters:";

static TYPED_PARAM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(([A-Za-z][\w.]*)\)(?:, |,|$)").expect("valid regex"));

/// Types whose values are written into the statement unquoted.
const RAW_TYPES: &[&str] = &[
    "Integer", "Long", "Short", "Byte", "Double", "Float", "BigDecimal", "BigInteger", "Boolean", "int", "long",
    "short", "byte", "double", "float", "boolean",
];

/// A bound parameter and its logged type, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SqlParam {
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
}

impl SqlParam {
    pub fn typed(value: impl Into<String>, type_name: impl Into<String>) -> Self {
        SqlParam {
            value: value.into(),
            type_name: Some(type_name.into()),
        }
    }

    pub fn untyped(value: impl Into<String>) -> Self {
        SqlParam {
            value: value.into(),
            type_name: None,
        }
    }

    /// Renders the parameter as an SQL literal.
    pub fn to_literal(&self) -> String {
        match self.type_name.as_deref() {
            None if self.value == "null" => "NULL".to_string(),
            None if is_numeric(&self.value) => self.value.clone(),
            Some(t) if RAW_TYPES.contains(&simple_name(t)) => self.value.clone(),
            _ => quote(&self.value),
        }
    }
}

/// Parses a parameter list such as `42(Long), null, Ann(String)`.
///
/// A leading `Parameters:` marker is skipped. Entries without a `(Type)`
/// suffix are kept untyped.
pub fn parse_parameters(text: &str) -> Vec<SqlParam> {
    let text = match text.find(PARAMETERS) {
        Some(pos) => &text[pos + PARAMETERS.len()..],
        None => text,
    };
    let text = text.trim();

    let mut params = Vec::new();
    let mut start = 0;
    for caps in TYPED_PARAM.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        let mut value = &text[start..whole.start()];
        while let Some(rest) = value.strip_prefix("null, ") {
            params.push(SqlParam::untyped("null"));
            value = rest;
        }
        params.push(SqlParam::typed(value, &caps[1]));
        start = whole.end();
    }
    let rest = text[start..].trim();
    if !rest.is_empty() {
        params.extend(rest.split(", ").map(|v| SqlParam::untyped(v.trim())));
    }
    params
}

/// Replaces each `?` outside quoted text with the next parameter literal.
pub fn fill_placeholders(sql: &str, params: &[SqlParam]) -> Result<String> {
    let mut out = String::with_capacity(sql.len() + params.len() * 8);
    let mut next = params.iter();
    let mut used = 0;
    let mut quote: Option<char> = None;

    for c in sql.chars() {
        match (c, quote) {
            ('\'' | '"' | '`', None) => {
                quote = Some(c);
                out.push(c);
            }
            (c, Some(q)) if c == q => {
                quote = None;
                out.push(c);
            }
            ('?', None) => {
                let param = next.next().ok_or_else(|| {
                    Error::sql(format!("more placeholders than the {} parameters given", params.len()))
                })?;
                out.push_str(&param.to_literal());
                used += 1;
            }
            _ => out.push(c),
        }
    }

    if used < params.len() {
        return Err(Error::sql(format!("{} placeholders for {} parameters", used, params.len())));
    }
    Ok(out)
}

/// Fills the statement from a log excerpt with `Preparing:` and `Parameters:`
/// lines. The first statement in the excerpt is used.
pub fn fill_from_log(log: &str) -> Result<String> {
    let mut sql = None;
    let mut params = None;
    for line in log.lines() {
        if sql.is_none() {
            if let Some(pos) = line.find(PREPARING) {
                sql = Some(line[pos + PREPARING.len()..].trim());
                continue;
            }
        } else if params.is_none() && line.contains(PARAMETERS) {
            params = Some(parse_parameters(line));
            break;
        }
    }

    let sql = sql.ok_or_else(|| Error::sql(format!("no '{}' line found", PREPARING)))?;
    let params = params.unwrap_or_default();
    debug!("filling {} parameters", params.len());
    fill_placeholders(sql, &params)
}

fn is_numeric(value: &str) -> bool {
    value.parse::<f64>().map(|f| f.is_finite()).unwrap_or(false)
}

fn simple_name(type_name: &str) -> &str {
    type_name.rsplit('.').next().unwrap_or(type_name)
}

fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}
