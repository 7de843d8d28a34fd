//! Error types for the router.

use thiserror::Error;

use crate::router::validator::ValidationError;
use crate::template::Error as TemplateError;

/// Errors that can occur while mounting controllers or generating paths.
///
/// Mount-time variants are configuration errors and should halt
/// application startup; lookup misses are not errors at all and are
/// represented as `None` by the lookup methods.
#[derive(Debug, Error)]
pub enum Error {
    /// The HTTP method string is not one the router supports.
    #[error("Invalid HTTP method: {0}")]
    InvalidMethod(String),

    /// A mount refinement referenced an action the controller does not
    /// declare.
    #[error("controller \"{controller}\" has no action \"{action}\"")]
    UnknownAction {
        /// The controller being mounted.
        controller: String,
        /// The unknown action name.
        action: String,
    },

    /// A route's path template does not fit the action's parameter list.
    #[error("cannot route {controller}#{action} at \"{path}\": {source}")]
    InvalidRoute {
        /// The controller being mounted.
        controller: String,
        /// The action being routed.
        action: String,
        /// The offending path template.
        path: String,
        /// The underlying mismatch.
        #[source]
        source: ValidationError,
    },

    /// Template construction or path generation failed.
    #[error("Template error: {0}")]
    Template(#[from] TemplateError),

    /// Reverse lookup for a controller/action pair with no registered
    /// route.
    #[error("no route registered for {controller}#{action}")]
    NoRoute {
        /// The controller asked about.
        controller: String,
        /// The action asked about.
        action: String,
    },
}
