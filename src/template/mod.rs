//! Path-template parsing and manipulation.
//!
//! This module provides the path-templating DSL: templates such as
//! `/users/:id/:?tab` are parsed into typed segments, matched against
//! concrete paths to extract arguments, and rendered back into concrete
//! paths from argument values.

mod error;
mod segment;
mod template;

// Re-export public items
pub use error::Error;
pub use segment::Segment;
pub use template::{split_path, PathArgs, PathTemplate};
