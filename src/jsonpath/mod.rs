//! JSONPath module - A restricted JSONPath evaluator.
//!
//! Supported: `$` root, `.key` members, `[n]` indices, `*` / `[*]` wildcards,
//! `..` recursive descent and `.length` on arrays. Filters, slices, unions
//! and quoted member names are not supported.

mod evaluate;
mod suggest;
mod validate;

#[cfg(test)]
mod jsonpath_test;

pub use evaluate::*;
pub use suggest::*;
pub use validate::*;
