//! Data models for the character dataset.
//!
//! Field names follow the JSON served by the site (`camelCase`), so the same
//! types decode the network payload and the cached copy.

mod character;
mod dataset;
mod filter;

pub use character::*;
pub use dataset::*;
pub use filter::*;
