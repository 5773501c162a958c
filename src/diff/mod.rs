//! Diff module - Positional structural comparison of two documents.
//!
//! The differ walks both documents together and reports one item per leaf,
//! missing member or type change. Arrays are aligned by index only.

mod compare;
mod report;


pub use compare::*;
pub use report::*;
