//! Router orchestration: mounting, forward matching, reverse lookup.

use std::collections::HashMap;

use log::{debug, info};
use serde::Serialize;

use crate::router::error::Error;
use crate::router::method::Method;
use crate::router::route::{Action, Controller, Route};
use crate::router::table::RouteTable;
use crate::router::validator;
use crate::template::{split_path, PathArgs, PathTemplate};

/// A successful forward match: the route plus its extracted arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteMatch {
    /// The matched route.
    pub route: Route,
    /// Argument values extracted from the path; unsupplied optional
    /// arguments are `None`.
    pub arguments: PathArgs,
}

/// One line of the route listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteEntry {
    /// The HTTP method.
    pub method: Method,
    /// The registered path, with argument markers.
    pub path: String,
    /// The controller the path routes to.
    pub controller: String,
    /// The action the path routes to.
    pub action: String,
}

/// The route-matching core.
///
/// A router owns two structures: the trie of registered paths and a
/// reverse index from controller/action to the assigned template. Both
/// are built by [`mount`](Router::mount) calls at application-definition
/// time and are read-only afterwards, so lookups are safe to call
/// concurrently without locking. For hot re-mounting under live traffic,
/// build a fresh router and swap it in through
/// [`SharedRouter`](crate::router::SharedRouter).
#[derive(Debug, Clone, Default)]
pub struct Router {
    table: RouteTable,
    reverse: HashMap<String, HashMap<String, PathTemplate>>,
}

impl Router {
    /// Create an empty router.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount a controller's actions under a path prefix.
    ///
    /// The prefix defaults to `/<controller name>`. The closure receives a
    /// [`MountScope`] for explicit per-action routes and nested mounts;
    /// after it returns, REST defaults apply to every still-unrouted
    /// action: `index` GET `/`, `create` POST `/`, `show` GET `/:id`,
    /// `update` PUT `/:id`, `delete` DELETE `/:id`, and anything else GET
    /// at its adapted default path.
    ///
    /// # Errors
    ///
    /// Fails when a refinement names an unknown action, when a template's
    /// optional arguments are misordered, or when a template's argument
    /// set does not match the action's declared parameters. All of these
    /// are configuration errors and should halt application startup.
    pub fn mount<F>(
        &mut self,
        controller: &Controller,
        prefix: Option<&str>,
        refine: F,
    ) -> Result<(), Error>
    where
        F: FnOnce(&mut MountScope<'_>) -> Result<(), Error>,
    {
        let prefix = match prefix {
            Some(path) => PathTemplate::parse(path),
            None => PathTemplate::parse(&format!("/{}", controller.name)),
        };
        self.mount_at(controller, prefix, refine)
    }

    fn mount_at<F>(
        &mut self,
        controller: &Controller,
        prefix: PathTemplate,
        refine: F,
    ) -> Result<(), Error>
    where
        F: FnOnce(&mut MountScope<'_>) -> Result<(), Error>,
    {
        let mut scope = MountScope {
            router: self,
            controller,
            prefix: prefix.clone(),
            refined: Vec::new(),
        };
        refine(&mut scope)?;
        let refined = scope.refined;

        // REST defaults for every action the closure left unrouted.
        for action in &controller.actions {
            if refined.iter().any(|name| name == &action.name) {
                continue;
            }
            let (method, default_path) = rest_default(&action.name);
            self.register(controller, action, method, default_path, &prefix)?;
        }

        info!("mounted {name} at {prefix}", name = controller.name);
        Ok(())
    }

    /// Register one route: adapt the template, validate it against the
    /// action, drop any previous route for the same controller and
    /// action, then insert into the trie and the reverse index.
    fn register(
        &mut self,
        controller: &Controller,
        action: &Action,
        method: Method,
        explicit: Option<&str>,
        prefix: &PathTemplate,
    ) -> Result<(), Error> {
        let local =
            PathTemplate::adapt(explicit, &action.name, &action.required, &action.optional)?;
        validator::validate(&local, action).map_err(|source| Error::InvalidRoute {
            controller: controller.name.clone(),
            action: action.name.clone(),
            path: local.to_string(),
            source,
        })?;

        let full = prefix.join(&local);
        let route = Route::new(&controller.name, &action.name);

        // Re-registration overwrites: prune the old trie entry first so
        // the same logical action never has orphaned duplicates.
        let already_routed = self
            .reverse
            .get(&controller.name)
            .is_some_and(|actions| actions.contains_key(&action.name));
        if already_routed {
            self.table.remove_route(&route);
        }

        self.table.insert(full.segments(), method, route.clone());
        self.reverse
            .entry(controller.name.clone())
            .or_default()
            .insert(action.name.clone(), full.clone());

        debug!("route {method} {full} -> {route}");
        Ok(())
    }

    /// Resolve a method and concrete path to a route and its extracted
    /// arguments. `None` means no route matches; use
    /// [`allowed_methods`](Router::allowed_methods) on the same path to
    /// distinguish a method mismatch (405) from a structural miss (404).
    pub fn find_route(&self, method: Method, path: &str) -> Option<RouteMatch> {
        let parts = split_path(path);
        let node = self.table.navigate(&parts)?;
        let route = node.route_for(method)?.clone();
        let template = self.reverse.get(&route.controller)?.get(&route.action)?;
        let arguments = template.extract_arguments(&parts);
        Some(RouteMatch { route, arguments })
    }

    /// The methods allowed at a path, in canonical order with OPTIONS
    /// appended. `None` when the path matches no routed node.
    pub fn allowed_methods(&self, path: &str) -> Option<Vec<Method>> {
        self.table.allowed_methods(&split_path(path))
    }

    /// The `Allow:` header value for a path, e.g. `"GET, OPTIONS"`.
    pub fn allow_header(&self, path: &str) -> Option<String> {
        let methods = self.allowed_methods(path)?;
        Some(
            methods
                .iter()
                .map(Method::to_string)
                .collect::<Vec<_>>()
                .join(", "),
        )
    }

    /// The most specific still-matchable ancestor route for a path,
    /// found by popping trailing segments. Useful for default error
    /// bodies.
    pub fn find_nearest_route(&self, path: &str) -> Option<&Route> {
        self.table.find_nearest_route(&split_path(path))
    }

    /// The template registered for a controller/action pair.
    pub fn path_of(&self, controller: &str, action: &str) -> Option<&PathTemplate> {
        self.reverse.get(controller)?.get(action)
    }

    /// Generate a concrete path for a controller/action pair from
    /// argument values.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::NoRoute`] when the pair has no registered
    /// route, or with the underlying template error when a required
    /// argument has no value.
    pub fn path_to(
        &self,
        controller: &str,
        action: &str,
        arguments: &PathArgs,
    ) -> Result<String, Error> {
        let template = self.path_of(controller, action).ok_or_else(|| Error::NoRoute {
            controller: controller.to_string(),
            action: action.to_string(),
        })?;
        Ok(template.assign_arguments(arguments)?)
    }

    /// Every registered route, sorted by path and then by canonical
    /// method order.
    pub fn routes(&self) -> Vec<RouteEntry> {
        let mut collected = Vec::new();
        self.table.collect_entries(&mut Vec::new(), &mut collected);
        let mut entries: Vec<RouteEntry> = collected
            .into_iter()
            .map(|(method, path, route)| RouteEntry {
                method,
                path,
                controller: route.controller,
                action: route.action,
            })
            .collect();
        entries.sort_by(|a, b| a.path.cmp(&b.path).then(a.method.cmp(&b.method)));
        entries
    }
}

/// The default method and path for an action name under REST conventions.
fn rest_default(action_name: &str) -> (Method, Option<&'static str>) {
    match action_name {
        "index" => (Method::GET, None),
        "create" => (Method::POST, Some("/")),
        "show" => (Method::GET, Some("/:id")),
        "update" => (Method::PUT, Some("/:id")),
        "delete" => (Method::DELETE, Some("/:id")),
        _ => (Method::GET, None),
    }
}

/// Per-mount registration surface handed to the [`Router::mount`]
/// closure.
///
/// One statically-defined method exists per supported HTTP verb; nested
/// controllers are mounted explicitly with
/// [`mount`](MountScope::mount), inheriting this mount's prefix.
pub struct MountScope<'r> {
    router: &'r mut Router,
    controller: &'r Controller,
    prefix: PathTemplate,
    refined: Vec<String>,
}

impl MountScope<'_> {
    /// Route `GET <path>` to an action.
    pub fn get(&mut self, path: &str, action: &str) -> Result<(), Error> {
        self.refine(Method::GET, path, action)
    }

    /// Route `POST <path>` to an action.
    pub fn post(&mut self, path: &str, action: &str) -> Result<(), Error> {
        self.refine(Method::POST, path, action)
    }

    /// Route `PUT <path>` to an action.
    pub fn put(&mut self, path: &str, action: &str) -> Result<(), Error> {
        self.refine(Method::PUT, path, action)
    }

    /// Route `PATCH <path>` to an action.
    pub fn patch(&mut self, path: &str, action: &str) -> Result<(), Error> {
        self.refine(Method::PATCH, path, action)
    }

    /// Route `DELETE <path>` to an action.
    pub fn delete(&mut self, path: &str, action: &str) -> Result<(), Error> {
        self.refine(Method::DELETE, path, action)
    }

    fn refine(&mut self, method: Method, path: &str, action: &str) -> Result<(), Error> {
        let action = self
            .controller
            .find_action(action)
            .ok_or_else(|| Error::UnknownAction {
                controller: self.controller.name.clone(),
                action: action.to_string(),
            })?
            .clone();
        self.router
            .register(self.controller, &action, method, Some(path), &self.prefix)?;
        self.refined.push(action.name);
        Ok(())
    }

    /// Mount a nested controller inside this mount's prefix. The nested
    /// prefix defaults to `/<controller name>`; routes and reverse-index
    /// entries both receive the full combined prefix.
    pub fn mount<F>(
        &mut self,
        controller: &Controller,
        prefix: Option<&str>,
        refine: F,
    ) -> Result<(), Error>
    where
        F: FnOnce(&mut MountScope<'_>) -> Result<(), Error>,
    {
        let nested = match prefix {
            Some(path) => PathTemplate::parse(path),
            None => PathTemplate::parse(&format!("/{}", controller.name)),
        };
        let full = self.prefix.join(&nested);
        self.router.mount_at(controller, full, refine)
    }
}
