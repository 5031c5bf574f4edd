//! # Web Context Registry
//!
//! Named registration surface for REST controllers. Extensions register
//! their routers into a context alias during initialization; the runtime
//! then folds every context into the final application router. Registration
//! is a one-time side effect — there is no deregistration and no runtime
//! reconfiguration.

use std::collections::BTreeMap;

use axum::Router;

/// Collects routers per named web context until the application router is
/// assembled.
#[derive(Default)]
pub struct WebService {
    contexts: BTreeMap<String, Vec<Router>>,
}

impl WebService {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a controller router into the given context.
    pub fn register_resource(&mut self, context_alias: &str, router: Router) {
        self.contexts
            .entry(context_alias.to_string())
            .or_default()
            .push(router);
        tracing::debug!(context = context_alias, "resource registered");
    }

    /// The aliases that received at least one registration.
    pub fn contexts(&self) -> Vec<&str> {
        self.contexts.keys().map(String::as_str).collect()
    }

    /// Number of routers registered under an alias.
    pub fn registration_count(&self, context_alias: &str) -> usize {
        self.contexts
            .get(context_alias)
            .map(Vec::len)
            .unwrap_or(0)
    }

    /// Fold every registered router into the application router.
    pub fn into_router(self) -> Router {
        self.contexts
            .into_values()
            .flatten()
            .fold(Router::new(), Router::merge)
    }
}

impl std::fmt::Debug for WebService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let counts: BTreeMap<&str, usize> = self
            .contexts
            .iter()
            .map(|(alias, routers)| (alias.as_str(), routers.len()))
            .collect();
        f.debug_struct("WebService").field("contexts", &counts).finish()
    }
}
