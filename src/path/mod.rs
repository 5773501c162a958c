//! Path module - Locations of nodes inside a document.
//!
//! Paths are rendered in the `$.key[index]` notation shared by the differ and
//! the JSONPath evaluator.

mod path;

pub use path::*;
