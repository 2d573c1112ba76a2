//! # Rulesync Validator
//!
//! Cross-checks a set of instruction files for consistency:
//!
//! - **Latest-update propagation**: the tail of the most recently
//!   modified file should appear, at least in similar wording, in every
//!   sibling.
//! - **Topic coverage**: a topic covered by other files but absent from
//!   one of them is reported as missing guidance.
//!
//! Issues are advisory strings; validation never mutates files.

mod recent;
mod validate;

pub use recent::extract_recent_instructions;
pub use validate::{validate, ValidateOptions};
