//! Error types for the path-template engine.

use thiserror::Error;

/// Errors that can occur while building a template or generating a path.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// Optional arguments appear in a different order than the action declares them.
    #[error("optional arguments in \"{path}\" must appear in the order {expected:?}")]
    ArgumentsOrder {
        /// The offending template, rendered as a path string.
        path: String,
        /// The declared optional-parameter order.
        expected: Vec<String>,
    },

    /// A required argument had no value during path generation.
    #[error("no value assigned for required argument \"{argument}\" in template \"{template}\"")]
    ArgumentNotAssigned {
        /// The argument that was left without a value.
        argument: String,
        /// The template the path was generated from.
        template: String,
    },
}
