//! The route trie.

use std::collections::HashMap;

use crate::router::method::Method;
use crate::router::route::Route;
use crate::template::Segment;

/// A node in the route trie.
///
/// Each node's keys partition into navigation children (static text or
/// argument placeholders) and terminal endpoints (HTTP method to route);
/// both kinds coexist at one node, so `/users` can terminate at
/// `GET /users` while also continuing to `/users/:id`.
///
/// Argument children keep registration order, which makes sibling
/// precedence during [`navigate`](RouteTable::navigate) deterministic:
/// first registered wins within a class.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    static_children: HashMap<String, RouteTable>,
    arg_children: Vec<(Segment, RouteTable)>,
    endpoints: HashMap<Method, Route>,
}

impl RouteTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a route at the node the template's segments lead to,
    /// creating intermediate nodes as needed. Existing sibling subtrees
    /// are descended into, never overwritten, so neighboring mounts under
    /// a shared prefix deep-merge.
    pub(crate) fn insert(&mut self, segments: &[Segment], method: Method, route: Route) {
        let Some((head, rest)) = segments.split_first() else {
            self.endpoints.insert(method, route);
            return;
        };
        match head {
            Segment::Static(text) => {
                self.static_children
                    .entry(text.clone())
                    .or_default()
                    .insert(rest, method, route);
            }
            Segment::Required(_) | Segment::Optional(_) => {
                if let Some(index) = self.arg_children.iter().position(|(s, _)| s == head) {
                    self.arg_children[index].1.insert(rest, method, route);
                } else {
                    let mut child = RouteTable::new();
                    child.insert(rest, method, route);
                    self.arg_children.push((head.clone(), child));
                }
            }
        }
    }

    /// Find the node a concrete path ends at, if a registered route is
    /// reachable there.
    ///
    /// Recursive descent with backtracking. At each node the candidates
    /// are tried in order: the exact static child, then each optional-
    /// argument child (consuming the segment as the argument before
    /// trying to skip the slot), then each required-argument child. When
    /// the input is exhausted, optional children are dug through without
    /// consuming anything until a node with endpoints appears.
    pub fn navigate(&self, parts: &[&str]) -> Option<&RouteTable> {
        let Some((head, rest)) = parts.split_first() else {
            return self.dig_through_optionals();
        };

        if let Some(child) = self.static_children.get(*head) {
            if let Some(found) = child.navigate(rest) {
                return Some(found);
            }
        }

        for (segment, child) in &self.arg_children {
            if !matches!(segment, Segment::Optional(_)) {
                continue;
            }
            // Argument present at this slot, else the slot is skipped and
            // the segment belongs to whatever follows it.
            if let Some(found) = child.navigate(rest) {
                return Some(found);
            }
            if let Some(found) = child.navigate(parts) {
                return Some(found);
            }
        }

        for (segment, child) in &self.arg_children {
            if !matches!(segment, Segment::Required(_)) {
                continue;
            }
            if let Some(found) = child.navigate(rest) {
                return Some(found);
            }
        }

        None
    }

    /// With no input left, descend through zero or more optional-argument
    /// children to the first node that holds endpoints.
    fn dig_through_optionals(&self) -> Option<&RouteTable> {
        if !self.endpoints.is_empty() {
            return Some(self);
        }
        self.arg_children.iter().find_map(|(segment, child)| {
            matches!(segment, Segment::Optional(_))
                .then(|| child.dig_through_optionals())
                .flatten()
        })
    }

    /// The route registered at this node for the given method.
    pub fn route_for(&self, method: Method) -> Option<&Route> {
        self.endpoints.get(&method)
    }

    /// The most specific still-matchable ancestor route for a path:
    /// repeatedly pop the last segment and retry until some route is
    /// found.
    pub fn find_nearest_route(&self, parts: &[&str]) -> Option<&Route> {
        let mut parts = parts.to_vec();
        loop {
            if let Some(route) = self.navigate(&parts).and_then(RouteTable::first_route) {
                return Some(route);
            }
            parts.pop()?;
        }
    }

    /// The route under the canonically-first method at this node.
    fn first_route(&self) -> Option<&Route> {
        Method::ALL.iter().find_map(|method| self.endpoints.get(method))
    }

    /// The methods allowed at the node a path leads to, in canonical
    /// order, with OPTIONS always appended. `None` when the path matches
    /// no routed node.
    pub fn allowed_methods(&self, parts: &[&str]) -> Option<Vec<Method>> {
        let node = self.navigate(parts)?;
        if node.endpoints.is_empty() {
            return None;
        }
        let mut methods: Vec<Method> = node
            .endpoints
            .keys()
            .copied()
            .filter(|method| *method != Method::OPTIONS)
            .collect();
        methods.sort();
        methods.push(Method::OPTIONS);
        Some(methods)
    }

    /// Remove every endpoint equal to `route`, pruning child nodes left
    /// empty. Used when a re-registration overwrites an earlier route for
    /// the same controller and action.
    pub(crate) fn remove_route(&mut self, route: &Route) {
        self.endpoints.retain(|_, existing| existing != route);
        for child in self.static_children.values_mut() {
            child.remove_route(route);
        }
        for (_, child) in self.arg_children.iter_mut() {
            child.remove_route(route);
        }
        self.static_children.retain(|_, child| !child.is_empty());
        self.arg_children.retain(|(_, child)| !child.is_empty());
    }

    fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
            && self.static_children.is_empty()
            && self.arg_children.is_empty()
    }

    /// Walk the trie, reporting every endpoint with its rendered path.
    pub(crate) fn collect_entries(
        &self,
        prefix: &mut Vec<String>,
        out: &mut Vec<(Method, String, Route)>,
    ) {
        let path = if prefix.is_empty() {
            "/".to_string()
        } else {
            format!("/{}", prefix.join("/"))
        };
        for (method, route) in &self.endpoints {
            out.push((*method, path.clone(), route.clone()));
        }
        for (text, child) in &self.static_children {
            prefix.push(text.clone());
            child.collect_entries(prefix, out);
            prefix.pop();
        }
        for (segment, child) in &self.arg_children {
            prefix.push(segment.to_string());
            child.collect_entries(prefix, out);
            prefix.pop();
        }
    }
}
