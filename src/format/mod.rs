//! Format module - Pretty-printing, minifying, syntax checks and statistics
//! for JSON text.

mod format;
mod stats;

pub use format::*;
pub use stats::*;
