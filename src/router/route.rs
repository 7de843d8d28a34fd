//! Routes and handler descriptions.

use std::fmt;

/// The (controller, action) pair a matched path resolves to.
///
/// Equality is structural: two routes are the same route when they name
/// the same controller and action, regardless of where the instances came
/// from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Route {
    /// The controller's name.
    pub controller: String,
    /// The action's name.
    pub action: String,
}

impl Route {
    /// Create a new route.
    pub fn new(controller: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            controller: controller.into(),
            action: action.into(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.controller, self.action)
    }
}

/// A handler action and its declared parameter list.
///
/// Required parameters come first, then optional ones; both lists are
/// ordered, and the optional order constrains the order of optional
/// segments in any path routed to the action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    /// The action's name.
    pub name: String,
    /// Ordered required parameter names.
    pub required: Vec<String>,
    /// Ordered optional parameter names.
    pub optional: Vec<String>,
}

impl Action {
    /// Create an action with no declared parameters.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: Vec::new(),
            optional: Vec::new(),
        }
    }

    /// Append a required parameter.
    pub fn required(mut self, name: impl Into<String>) -> Self {
        self.required.push(name.into());
        self
    }

    /// Append an optional parameter.
    pub fn optional(mut self, name: impl Into<String>) -> Self {
        self.optional.push(name.into());
        self
    }
}

/// A handler: a named controller and the actions it exposes.
///
/// Applications describe their controllers with these values; the router
/// never inspects handler code itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Controller {
    /// The controller's name, also its default mount prefix.
    pub name: String,
    /// The actions the controller exposes, in declaration order.
    pub actions: Vec<Action>,
}

impl Controller {
    /// Create a controller with no actions.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            actions: Vec::new(),
        }
    }

    /// Append an action.
    pub fn action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    /// Look up a declared action by name.
    pub fn find_action(&self, name: &str) -> Option<&Action> {
        self.actions.iter().find(|action| action.name == name)
    }
}
