//! Schema module - JSON Schema inference from a sample document.
//!
//! The generated schema mirrors the shape of the sample. It is a heuristic
//! description of one value, not a statistically derived contract.

mod infer;
mod node;
mod validate;

#[cfg(test)]
mod schema_test;

pub use infer::*;
pub use node::*;
pub use validate::*;
