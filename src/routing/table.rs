use std::collections::HashMap;
use std::sync::Arc;

use crate::http::request::Method;
use crate::routing::handler::Handler;

/// Handlers keyed by method, then by exact path.
///
/// The table is filled during bootstrap through `&mut self` and then frozen
/// behind an `Arc`, after which only lookups are possible. Lookups need no
/// locking.
#[derive(Default)]
pub struct HandlerTable {
    routes: HashMap<Method, HashMap<String, Arc<dyn Handler>>>,
}

impl HandlerTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` for `(method, path)`.
    ///
    /// The first registration for a pair wins; later ones are ignored and
    /// return `false`.
    pub fn register<H>(&mut self, method: Method, path: impl Into<String>, handler: H) -> bool
    where
        H: Handler + 'static,
    {
        let path = path.into();
        let paths = self.routes.entry(method).or_default();

        if paths.contains_key(&path) {
            tracing::debug!(method = ?method, path = %path, "Route already registered, keeping first handler");
            return false;
        }

        tracing::debug!(method = ?method, path = %path, "Route registered");
        paths.insert(path, Arc::new(handler));
        true
    }

    /// Exact-match lookup; no prefix or pattern matching.
    pub fn lookup(&self, method: Method, path: &str) -> Option<&Arc<dyn Handler>> {
        self.routes.get(&method)?.get(path)
    }

    /// Registered paths for `method`, or `None` if it has none.
    pub fn paths(&self, method: Method) -> Option<Vec<&str>> {
        self.routes
            .get(&method)
            .map(|paths| paths.keys().map(String::as_str).collect())
    }

    /// Total number of registered routes.
    pub fn len(&self) -> usize {
        self.routes.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
