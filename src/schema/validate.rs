//! Shallow schema checks.

use crate::value::Value;
use thiserror::Error;

/// SchemaError describes why a schema document was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("schema must be a JSON object, got {0}")]
    NotAnObject(&'static str),

    #[error("schema is missing the '$schema' keyword")]
    MissingSchemaKeyword,

    #[error("schema is missing the 'type' keyword")]
    MissingType,
}

/// Checks that `schema` is an object carrying `$schema` and `type`.
///
/// This is a sanity check, not meta-schema validation.
pub fn validate_json_schema(schema: &Value) -> Result<(), SchemaError> {
    let map = schema
        .as_map()
        .ok_or_else(|| SchemaError::NotAnObject(schema.type_name()))?;
    if !map.has("$schema") {
        return Err(SchemaError::MissingSchemaKeyword);
    }
    if !map.has("type") {
        return Err(SchemaError::MissingType);
    }
    Ok(())
}
