//! Route registration, matching, and reverse lookup.
//!
//! This module provides the routing core: controllers are mounted under
//! path prefixes, their actions become entries in a backtracking trie, and
//! incoming method+path pairs resolve to a route with extracted arguments.
//! A reverse index supports generating concrete paths back from
//! controller/action pairs.

mod core;
mod error;
mod method;
mod route;
mod shared;
mod table;
mod validator;
mod tests;

// Re-export public items
pub use self::core::{MountScope, RouteEntry, RouteMatch, Router};
pub use error::Error;
pub use method::Method;
pub use route::{Action, Controller, Route};
pub use shared::SharedRouter;
pub use table::RouteTable;
pub use validator::ValidationError;
