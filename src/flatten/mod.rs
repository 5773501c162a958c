//! Flatten module - Bidirectional mapping between nested documents and flat
//! key/value maps.
//!
//! Keys encode the path to each leaf using a configurable separator and
//! array notation. The flat form can also be exported to and read back from
//! a three-column CSV.

mod csv;
mod flatten;


pub use csv::*;
pub use flatten::*;
