//! Schema document types.

use crate::value::{Kind, Value};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Draft identifier stamped on generated root schemas.
pub const SCHEMA_DRAFT: &str = "https://json-schema.org/draft/2020-12/schema";

/// SchemaNode is one level of a generated JSON Schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaNode {
    #[serde(rename = "$schema", default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(rename = "type")]
    pub kind: Kind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<IndexMap<String, SchemaNode>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<SchemaItems>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<StringFormat>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub examples: Option<Vec<Value>>,
}

/// Array element schemas: one shared schema, or the distinct schemas seen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchemaItems {
    Single(Box<SchemaNode>),
    Tuple(Vec<SchemaNode>),
}

/// Detected string formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StringFormat {
    #[serde(rename = "email")]
    Email,
    #[serde(rename = "uri")]
    Uri,
    #[serde(rename = "date-time")]
    DateTime,
}

impl SchemaNode {
    /// Creates a node with only its type set.
    pub fn new(kind: Kind) -> Self {
        SchemaNode {
            schema: None,
            title: None,
            kind,
            properties: None,
            required: None,
            additional_properties: None,
            items: None,
            format: None,
            minimum: None,
            maximum: None,
            examples: None,
        }
    }

    /// Converts the schema into a document value.
    pub fn to_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self).map(Value::from)
    }

    /// Serializes the schema as indented JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
