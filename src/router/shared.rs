//! Atomic sharing of a built router across request-serving threads.

use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::router::core::Router;

/// A lock-free shared handle to a [`Router`].
///
/// Lookups never take a lock: callers [`load`](SharedRouter::load) a
/// snapshot and query it. Hot re-mounting builds a fresh router and
/// [`replace`](SharedRouter::replace)s the whole table with an atomic
/// pointer swap, so in-flight lookups keep the table they loaded.
pub struct SharedRouter {
    inner: ArcSwap<Router>,
}

impl SharedRouter {
    /// Wrap a built router for sharing.
    pub fn new(router: Router) -> Self {
        Self {
            inner: ArcSwap::from_pointee(router),
        }
    }

    /// A snapshot of the current routing table.
    pub fn load(&self) -> Arc<Router> {
        self.inner.load_full()
    }

    /// Replace the routing table. Concurrent loads see either the old or
    /// the new table, never a mix.
    pub fn replace(&self, router: Router) {
        self.inner.store(Arc::new(router));
    }
}
