//! Library entry for structpack-cli used by integration tests and embedding.

pub mod commands;
pub mod convert;

// Re-export commonly used items
pub use crate::commands::{calcsize, pack, unpack};
pub use crate::convert::{json_to_values, value_to_json};
