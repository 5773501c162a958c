//! # Hexta Devtools
//!
//! Structural operations on JSON and YAML documents, and a handful of text
//! converters for configuration and code that travels alongside them.
//!
//! Every operation works on the ordered [`Value`] tree, so member order from
//! the input is kept in flat keys, diff reports, query results and schemas.
//!
//! ## Modules
//!
//! - [`value`] - In-memory representation of JSON/YAML documents and the kind classifier
//! - [`path`] - `$.key[index]` locations shared by the differ and the JSONPath evaluator
//! - [`flatten`] - Nested documents to flat key/value maps and back, plus a CSV form
//! - [`diff`] - Positional structural comparison and its reports
//! - [`jsonpath`] - A restricted JSONPath evaluator, validator and suggester
//! - [`schema`] - JSON Schema inference from a sample document
//! - [`format`] - Pretty-printing, minifying, syntax checks and statistics
//! - [`convert`] - Environment variable, protobuf and SQL converters
//! - [`config`] - Defaults loaded from a YAML configuration file

pub mod config;
pub mod convert;
mod csv;
pub mod diff;
pub mod error;
pub mod flatten;
pub mod format;
pub mod jsonpath;
pub mod path;
pub mod schema;
pub mod value;

pub use config::Config;
pub use diff::{compare_json, DiffItem, DiffSummary, DiffType};
pub use error::{Error, Result};
pub use flatten::{flatten, unflatten, ArrayNotation, FlatMap, FlattenOptions};
pub use jsonpath::{evaluate_json_path, JsonPathError, PathResult};
pub use path::{Path, PathElement};
pub use schema::{generate_json_schema, SchemaNode, SchemaOptions};
pub use value::{classify, Kind, Map, Value};
