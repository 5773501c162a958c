//! Environment variable conversion.
//!
//! Property keys such as `app.redis.value-key` or `list[0].name` are mapped
//! onto names usable as container environment variables. Entries can be
//! collected from properties text, YAML/JSON documents or Spring `@Value`
//! annotations and rendered as a dotenv file or a Kubernetes `env:` list.

use crate::convert::properties::parse_properties;
use crate::error::Result;
use crate::flatten::{flatten, FlatMap, FlattenOptions};
use crate::value::{from_yaml, Value};
use indexmap::IndexSet;
use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Longest name accepted by [`validate_env_name`].
pub const MAX_ENV_NAME_LEN: usize = 63;

static INDEX_SUFFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[(\d+)\]").expect("valid regex"));
static NON_ENV_CHAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9_]").expect("valid regex"));
static SPRING_VALUE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"@Value\(\s*(?:value\s*=\s*)?"\$\{([^}:]+)(?::([^}]*))?\}"\s*\)"#).expect("valid regex")
});

/// Maps a property key onto an environment variable name.
///
/// `[n]` becomes `_n`, every other character outside `[A-Za-z0-9_]` becomes
/// `_`, and the result is uppercased.
pub fn property_key_to_env_var(key: &str) -> String {
    let key = INDEX_SUFFIX.replace_all(key.trim(), "_$1");
    NON_ENV_CHAR.replace_all(&key, "_").to_uppercase()
}

/// Reasons an environment variable name is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvNameError {
    #[error("name is empty")]
    Empty,

    #[error("name is {len} characters, the limit is 63")]
    TooLong { len: usize },

    #[error("name cannot start with {0:?}")]
    InvalidStart(char),

    #[error("name contains {0:?}")]
    InvalidChar(char),
}

/// Checks a name against `^[A-Za-z_][A-Za-z0-9_]*$` and the length limit.
pub fn validate_env_name(name: &str) -> std::result::Result<(), EnvNameError> {
    let mut chars = name.chars();
    let first = chars.next().ok_or(EnvNameError::Empty)?;
    if !(first.is_ascii_alphabetic() || first == '_') {
        return Err(EnvNameError::InvalidStart(first));
    }
    if let Some(bad) = chars.find(|c| !(c.is_ascii_alphanumeric() || *c == '_')) {
        return Err(EnvNameError::InvalidChar(bad));
    }
    let len = name.chars().count();
    if len > MAX_ENV_NAME_LEN {
        return Err(EnvNameError::TooLong { len });
    }
    Ok(())
}

/// Returns true if `name` passes [`validate_env_name`].
pub fn is_valid_k8s_env_name(name: &str) -> bool {
    validate_env_name(name).is_ok()
}

/// A converted environment variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvEntry {
    pub name: String,
    pub value: String,
    pub source_key: String,
    pub valid: bool,
}

impl EnvEntry {
    /// Creates an entry for a source key, deriving and checking the name.
    pub fn new(source_key: impl Into<String>, value: impl Into<String>) -> Self {
        let source_key = source_key.into();
        let name = property_key_to_env_var(&source_key);
        let valid = match validate_env_name(&name) {
            Ok(()) => true,
            Err(err) => {
                warn!("{} -> {}: {}", source_key, name, err);
                false
            }
        };
        EnvEntry {
            name,
            value: value.into(),
            source_key,
            valid,
        }
    }
}

/// Output layout for [`render_env`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvFormat {
    /// `NAME=value` lines.
    #[default]
    Dotenv,
    /// A YAML list of `name`/`value` pairs for a Kubernetes container.
    K8s,
}

impl FromStr for EnvFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dotenv" | "env" => Ok(EnvFormat::Dotenv),
            "k8s" | "kubernetes" => Ok(EnvFormat::K8s),
            other => Err(format!("unknown env format {:?}, expected dotenv or k8s", other)),
        }
    }
}

impl fmt::Display for EnvFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnvFormat::Dotenv => write!(f, "dotenv"),
            EnvFormat::K8s => write!(f, "k8s"),
        }
    }
}

/// Converts properties text (`key=value` lines) into environment entries.
pub fn properties_to_env(text: &str) -> Result<Vec<EnvEntry>> {
    let properties = parse_properties(text)?;
    Ok(properties.into_iter().map(|(k, v)| EnvEntry::new(k, v)).collect())
}

/// Converts a YAML (or JSON) document into environment entries.
///
/// The document is flattened with `.` and bracket notation first.
pub fn yaml_to_env(text: &str) -> Result<Vec<EnvEntry>> {
    let doc = from_yaml(text)?;
    Ok(entries_from_flat(&flatten(&doc, &FlattenOptions::default())))
}

fn entries_from_flat(flat: &FlatMap) -> Vec<EnvEntry> {
    flat.iter().map(|(k, v)| EnvEntry::new(k.as_str(), env_value(v))).collect()
}

fn env_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_json_string(),
    }
}

/// Collects `@Value("${key:default}")` placeholders from Java source.
///
/// The default (empty if absent) becomes the value. A key seen twice keeps
/// its first occurrence.
pub fn spring_annotations_to_env(source: &str) -> Vec<EnvEntry> {
    let mut seen = IndexSet::new();
    let mut entries = Vec::new();
    for caps in SPRING_VALUE.captures_iter(source) {
        let key = caps[1].trim();
        if !seen.insert(key.to_string()) {
            debug!("skipping repeated placeholder {}", key);
            continue;
        }
        let default = caps.get(2).map(|m| m.as_str()).unwrap_or("");
        entries.push(EnvEntry::new(key, default));
    }
    entries
}

#[derive(Serialize)]
struct K8sEnvVar<'a> {
    name: &'a str,
    value: &'a str,
}

/// Renders entries in the requested layout.
pub fn render_env(entries: &[EnvEntry], format: EnvFormat) -> Result<String> {
    match format {
        EnvFormat::Dotenv => {
            let mut out = String::new();
            for entry in entries {
                out.push_str(&entry.name);
                out.push('=');
                out.push_str(&dotenv_value(&entry.value));
                out.push('\n');
            }
            Ok(out)
        }
        EnvFormat::K8s => {
            let vars: Vec<K8sEnvVar<'_>> = entries
                .iter()
                .map(|e| K8sEnvVar {
                    name: &e.name,
                    value: &e.value,
                })
                .collect();
            Ok(serde_yaml::to_string(&vars)?)
        }
    }
}

fn dotenv_value(value: &str) -> String {
    let needs_quotes = value
        .chars()
        .any(|c| c.is_whitespace() || matches!(c, '#' | '"' | '\'' | '\\' | '$'));
    if !needs_quotes {
        return value.to_string();
    }
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_property_key_to_env_var() {
        assert_eq!(property_key_to_env_var("app.redis.value-key"), "APP_REDIS_VALUE_KEY");
        assert_eq!(property_key_to_env_var("list[0].name"), "LIST_0_NAME");
        assert_eq!(property_key_to_env_var("a[1][2]"), "A_1_2");
        assert_eq!(property_key_to_env_var("  server.port "), "SERVER_PORT");
        assert_eq!(property_key_to_env_var("Already_OK"), "ALREADY_OK");
    }

    #[test]
    fn test_validate_env_name() {
        assert!(!is_valid_k8s_env_name("123bad"));
        assert!(is_valid_k8s_env_name("_ok_1"));
        assert_eq!(validate_env_name(""), Err(EnvNameError::Empty));
        assert_eq!(validate_env_name("1A"), Err(EnvNameError::InvalidStart('1')));
        assert_eq!(validate_env_name("A-B"), Err(EnvNameError::InvalidChar('-')));
        assert_eq!(validate_env_name(&"A".repeat(63)), Ok(()));
        assert_eq!(
            validate_env_name(&"A".repeat(64)),
            Err(EnvNameError::TooLong { len: 64 })
        );
    }

    #[test]
    fn test_properties_to_env() {
        let entries = properties_to_env("app.name=demo\n# skip\n0.bad=x\n").unwrap();
        assert_eq!(
            entries,
            vec![
                EnvEntry {
                    name: "APP_NAME".into(),
                    value: "demo".into(),
                    source_key: "app.name".into(),
                    valid: true,
                },
                EnvEntry {
                    name: "0_BAD".into(),
                    value: "x".into(),
                    source_key: "0.bad".into(),
                    valid: false,
                },
            ]
        );
    }

    #[test]
    fn test_yaml_to_env() {
        let yaml = "server:\n  port: 8080\n  hosts:\n    - a\n    - b\nfeature:\n  enabled: true\n  note: null\n";
        let entries = yaml_to_env(yaml).unwrap();
        let pairs: Vec<(&str, &str)> = entries.iter().map(|e| (e.name.as_str(), e.value.as_str())).collect();
        assert_eq!(
            pairs,
            vec![
                ("SERVER_PORT", "8080"),
                ("SERVER_HOSTS_0", "a"),
                ("SERVER_HOSTS_1", "b"),
                ("FEATURE_ENABLED", "true"),
                ("FEATURE_NOTE", ""),
            ]
        );
        assert_eq!(entries[1].source_key, "server.hosts[0]");
        assert!(yaml_to_env("a: [").is_err());
    }

    #[test]
    fn test_spring_annotations_to_env() {
        let source = r##"
            @Value("${app.timeout:30}")
            private int timeout;
            @Value(value = "${app.name}")
            private String name;
            @Value("${app.timeout:99}")
            private int again;
            @Value("#{systemProperties['x']}")
            private String spel;
        "##;
        let entries = spring_annotations_to_env(source);
        let pairs: Vec<(&str, &str)> = entries.iter().map(|e| (e.name.as_str(), e.value.as_str())).collect();
        assert_eq!(pairs, vec![("APP_TIMEOUT", "30"), ("APP_NAME", "")]);
    }

    #[test]
    fn test_render_dotenv() {
        let entries = vec![
            EnvEntry::new("a.b", "plain"),
            EnvEntry::new("c", "two words"),
            EnvEntry::new("d", "say \"hi\""),
        ];
        assert_eq!(
            render_env(&entries, EnvFormat::Dotenv).unwrap(),
            "A_B=plain\nC=\"two words\"\nD=\"say \\\"hi\\\"\"\n"
        );
    }

    #[test]
    fn test_render_k8s() {
        let entries = vec![EnvEntry::new("server.port", "8080")];
        let text = render_env(&entries, EnvFormat::K8s).unwrap();
        assert_eq!(text, "- name: SERVER_PORT\n  value: '8080'\n");
    }

    #[test]
    fn test_env_format_from_str() {
        assert_eq!("K8S".parse::<EnvFormat>(), Ok(EnvFormat::K8s));
        assert_eq!("dotenv".parse::<EnvFormat>(), Ok(EnvFormat::Dotenv));
        assert!("xml".parse::<EnvFormat>().is_err());
    }
}
