//! A route-matching and path-template engine.
//!
//! This library resolves HTTP method + path pairs to application-defined
//! controller actions, and generates concrete paths back from those
//! actions. It is a pure in-memory engine with no I/O and no server: an
//! HTTP server hands it the method and path, and it answers with a route
//! and extracted arguments.
//!
//! # Features
//!
//! - Path templates with static, required (`:name`), and optional
//!   (`:?name`) segments
//! - A backtracking trie so optional segments can be omitted anywhere in
//!   a path, with deterministic precedence (static beats argument)
//! - REST-convention defaults when mounting controllers, plus explicit
//!   per-verb refinements and nested mounts
//! - Mount-time validation of templates against declared action
//!   parameters, with descriptive errors
//! - Reverse lookup: generate a concrete path from a controller, action,
//!   and argument values
//! - `Allow:` header support for method mismatches, and lock-free hot
//!   re-mounting through [`SharedRouter`]
//!
//! # Examples
//!
//! ## Mounting and matching
//!
//! ```
//! use routrie::{Action, Controller, Method, Router};
//!
//! let items = Controller::new("items")
//!     .action(Action::new("index"))
//!     .action(Action::new("show").required("id"));
//!
//! let mut router = Router::new();
//! router.mount(&items, Some("/items"), |_| Ok(())).unwrap();
//!
//! let found = router.find_route(Method::GET, "/items/42").unwrap();
//! assert_eq!(found.route.action, "show");
//! assert_eq!(found.arguments["id"].as_deref(), Some("42"));
//!
//! // A structural match with the wrong method is a 405, not a 404:
//! assert!(router.find_route(Method::POST, "/items/42").is_none());
//! assert_eq!(router.allow_header("/items/42").unwrap(), "GET, OPTIONS");
//! ```
//!
//! ## Optional arguments
//!
//! ```
//! use routrie::{Action, Controller, Method, Router};
//!
//! let docs = Controller::new("docs")
//!     .action(Action::new("page").optional("lang").optional("page"));
//!
//! let mut router = Router::new();
//! router
//!     .mount(&docs, Some("/"), |scope| {
//!         scope.get("/:?lang/docs/:?page", "page")
//!     })
//!     .unwrap();
//!
//! let found = router.find_route(Method::GET, "/en/docs").unwrap();
//! assert_eq!(found.arguments["lang"].as_deref(), Some("en"));
//! assert_eq!(found.arguments["page"], None);
//! ```
//!
//! ## Reverse lookup
//!
//! ```
//! use routrie::{Action, Controller, PathArgs, Router};
//!
//! let items = Controller::new("items")
//!     .action(Action::new("show").required("id"));
//!
//! let mut router = Router::new();
//! router.mount(&items, Some("/items"), |_| Ok(())).unwrap();
//!
//! let mut args = PathArgs::new();
//! args.insert("id".to_string(), Some("7".to_string()));
//! assert_eq!(router.path_to("items", "show", &args).unwrap(), "/items/7");
//! ```
//!
//! See the `demos` directory for a complete walkthrough.

// Export the template module
pub mod template;

// Export the router module
pub mod router;

// Re-export commonly used items for convenience
pub use router::{
    Action, Controller, Error as RouterError, Method, MountScope, Route, RouteEntry, RouteMatch,
    RouteTable, Router, SharedRouter, ValidationError,
};
pub use template::{split_path, Error as TemplateError, PathArgs, PathTemplate, Segment};
