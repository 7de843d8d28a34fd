//! Template-versus-action argument validation.

use thiserror::Error;

use crate::router::route::Action;
use crate::template::PathTemplate;

/// Mismatches between a path template's argument set and an action's
/// declared parameters. Always a mount-time failure, never per-request.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The path declares required arguments the action does not take as
    /// required. A declared-optional parameter in a required slot lands
    /// here too.
    #[error("path declares required arguments {names:?} the action does not take as required")]
    ExtraRequired {
        /// The offending argument names.
        names: Vec<String>,
    },

    /// The path declares optional arguments the action does not take as
    /// optional.
    #[error("path declares optional arguments {names:?} the action does not take as optional")]
    ExtraOptional {
        /// The offending argument names.
        names: Vec<String>,
    },

    /// The action requires parameters the path does not provide.
    #[error("action requires arguments {names:?} the path does not provide")]
    MissingRequired {
        /// The missing parameter names.
        names: Vec<String>,
    },
}

/// Check that a template's argument set exactly matches an action's
/// declared parameter set. Argument names matter, not their positions in
/// the path.
pub(crate) fn validate(template: &PathTemplate, action: &Action) -> Result<(), ValidationError> {
    let template_required = template.required_names();
    let template_optional = template.optional_names();

    let extra_required: Vec<String> = template_required
        .iter()
        .filter(|name| !action.required.iter().any(|declared| declared == *name))
        .map(|name| name.to_string())
        .collect();
    if !extra_required.is_empty() {
        return Err(ValidationError::ExtraRequired {
            names: extra_required,
        });
    }

    let extra_optional: Vec<String> = template_optional
        .iter()
        .filter(|name| !action.optional.iter().any(|declared| declared == *name))
        .map(|name| name.to_string())
        .collect();
    if !extra_optional.is_empty() {
        return Err(ValidationError::ExtraOptional {
            names: extra_optional,
        });
    }

    let missing_required: Vec<String> = action
        .required
        .iter()
        .filter(|declared| !template_required.contains(&declared.as_str()))
        .cloned()
        .collect();
    if !missing_required.is_empty() {
        return Err(ValidationError::MissingRequired {
            names: missing_required,
        });
    }

    Ok(())
}
