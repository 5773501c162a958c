//! Value module - In-memory representation of JSON/YAML documents.
//!
//! This module provides the tagged value type every traversal works on, and
//! the classifier that maps a value to its JSON-Schema kind.

mod classify;
mod value;

pub use classify::*;
pub use value::*;
