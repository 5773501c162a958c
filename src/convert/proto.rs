//! Java records to protobuf.

use crate::error::{Error, Result};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

static RECORD_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\brecord\s+([A-Za-z_]\w*)\s*(?:<[^>]*>)?\s*\(").expect("valid regex"));
static COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)/\*.*?\*/|//[^\n]*").expect("valid regex"));
static ANNOTATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"@[\w.]+(?:\s*\([^)]*\))?\s*").expect("valid regex"));

const TIMESTAMP_IMPORT: &str = "google/protobuf/timestamp.proto";
const DURATION_IMPORT: &str = "google/protobuf/duration.proto";

/// Header options for the generated `.proto` file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProtoOptions {
    pub package: Option<String>,
    pub java_package: Option<String>,
    pub java_multiple_files: bool,
}

struct Record {
    name: String,
    components: Vec<(String, String)>,
}

/// Converts every `record` declaration in `source` into a proto3 message.
///
/// Components are numbered from 1 in declaration order and renamed to
/// snake_case. Time types pull in the well-known type imports.
pub fn java_records_to_proto(source: &str, opts: &ProtoOptions) -> Result<String> {
    let source = COMMENT.replace_all(source, "");
    let records = parse_records(&source)?;
    if records.is_empty() {
        return Err(Error::java("no record declaration found"));
    }

    let mut imports = BTreeSet::new();
    let mut messages = Vec::with_capacity(records.len());
    for record in &records {
        let mut message = format!("message {} {{\n", record.name);
        for (number, (java_type, name)) in record.components.iter().enumerate() {
            let proto_type = field_type(java_type, &mut imports);
            message.push_str(&format!("  {} {} = {};\n", proto_type, to_snake_case(name), number + 1));
        }
        message.push('}');
        messages.push(message);
    }

    let mut out = String::from("syntax = \"proto3\";\n");
    if let Some(package) = &opts.package {
        out.push_str(&format!("\npackage {};\n", package));
    }
    if !imports.is_empty() {
        out.push('\n');
        for import in &imports {
            out.push_str(&format!("import \"{}\";\n", import));
        }
    }
    if opts.java_package.is_some() || opts.java_multiple_files {
        out.push('\n');
        if let Some(java_package) = &opts.java_package {
            out.push_str(&format!("option java_package = \"{}\";\n", java_package));
        }
        if opts.java_multiple_files {
            out.push_str("option java_multiple_files = true;\n");
        }
    }
    for message in messages {
        out.push('\n');
        out.push_str(&message);
        out.push('\n');
    }
    Ok(out)
}

fn parse_records(source: &str) -> Result<Vec<Record>> {
    let mut records = Vec::new();
    for caps in RECORD_HEADER.captures_iter(source) {
        let name = caps[1].to_string();
        let open = caps.get(0).map_or(0, |m| m.end());
        let close = matching_paren(source, open)
            .ok_or_else(|| Error::java(format!("unterminated component list for record {}", name)))?;

        let mut components = Vec::new();
        for raw in split_top_level(&source[open..close]) {
            let component = ANNOTATION.replace_all(raw, "");
            let component = component.trim().trim_start_matches("final ").trim();
            if component.is_empty() {
                continue;
            }
            let (java_type, field) = component
                .rsplit_once(char::is_whitespace)
                .ok_or_else(|| Error::java(format!("cannot parse component {:?} of record {}", component, name)))?;
            components.push((java_type.trim().to_string(), field.to_string()));
        }
        debug!("record {} has {} components", name, components.len());
        records.push(Record { name, components });
    }
    Ok(records)
}

/// Returns the byte offset of the `)` closing a list that starts at `start`.
fn matching_paren(source: &str, start: usize) -> Option<usize> {
    let mut depth = 1usize;
    for (offset, c) in source[start..].char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(start + offset);
                }
            }
            _ => {}
        }
    }
    None
}

/// Splits on commas that are not nested in `<>` or `()`.
fn split_top_level(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut start = 0;
    for (i, c) in text.char_indices() {
        match c {
            '<' | '(' => depth += 1,
            '>' | ')' => depth -= 1,
            ',' if depth == 0 => {
                parts.push(&text[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);
    parts
}

fn field_type(java: &str, imports: &mut BTreeSet<&'static str>) -> String {
    let java = java.trim();
    if let Some(element) = java.strip_suffix("[]").or_else(|| java.strip_suffix("...")) {
        let element = element.trim();
        if element == "byte" {
            return "bytes".to_string();
        }
        return format!("repeated {}", scalar_type(element, imports));
    }
    if let Some((outer, args)) = generic_parts(java) {
        match simple_name(outer) {
            "List" | "Set" | "Collection" | "Iterable" | "SortedSet" | "LinkedList" | "ArrayList" | "HashSet" => {
                let element = args.first().copied().unwrap_or("Object");
                return format!("repeated {}", scalar_type(element, imports));
            }
            "Map" | "HashMap" | "LinkedHashMap" | "TreeMap" | "SortedMap" if args.len() == 2 => {
                return format!(
                    "map<{}, {}>",
                    scalar_type(args[0], imports),
                    scalar_type(args[1], imports)
                );
            }
            "Optional" => {
                let element = args.first().copied().unwrap_or("Object");
                return format!("optional {}", scalar_type(element, imports));
            }
            _ => {}
        }
    }
    scalar_type(java, imports)
}

fn scalar_type(java: &str, imports: &mut BTreeSet<&'static str>) -> String {
    let java = java.trim();
    let name = match generic_parts(java) {
        Some((outer, _)) => simple_name(outer),
        None => simple_name(java),
    };
    let proto = match name {
        "String" | "UUID" | "BigDecimal" | "BigInteger" | "char" | "Character" | "CharSequence" => "string",
        "int" | "Integer" | "short" | "Short" | "byte" | "Byte" => "int32",
        "long" | "Long" => "int64",
        "double" | "Double" => "double",
        "float" | "Float" => "float",
        "boolean" | "Boolean" => "bool",
        "Instant" | "LocalDateTime" | "LocalDate" | "LocalTime" | "OffsetDateTime" | "ZonedDateTime" | "Date"
        | "Timestamp" => {
            imports.insert(TIMESTAMP_IMPORT);
            "google.protobuf.Timestamp"
        }
        "Duration" => {
            imports.insert(DURATION_IMPORT);
            "google.protobuf.Duration"
        }
        other => return other.to_string(),
    };
    proto.to_string()
}

fn generic_parts(java: &str) -> Option<(&str, Vec<&str>)> {
    let open = java.find('<')?;
    let close = java.rfind('>')?;
    if close < open {
        return None;
    }
    let args = split_top_level(&java[open + 1..close])
        .into_iter()
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .collect();
    Some((java[..open].trim(), args))
}

fn simple_name(java: &str) -> &str {
    java.rsplit('.').next().unwrap_or(java)
}

fn to_snake_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c.is_ascii_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_lower = chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase());
            if prev.is_ascii_lowercase() || prev.is_ascii_digit() || (prev.is_ascii_uppercase() && next_lower) {
                out.push('_');
            }
        }
        out.push(c.to_ascii_lowercase());
    }
    out
}
