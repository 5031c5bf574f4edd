//! # idhub-keypair-api — Key-Pair Management API
//!
//! The management API layer of the identity hub, built on Axum/Tower/Tokio.
//! The [`KeyPairManagementApiExtension`] wires two REST controllers and the
//! key-pair ownership lookup into the hub at startup; handlers delegate all
//! lifecycle logic to the injected [`KeyPairService`](idhub_core::KeyPairService).
//!
//! ## API Surface
//!
//! | Route                                                   | Module                    |
//! |---------------------------------------------------------|---------------------------|
//! | `/v1/participants/:participant/keypairs[/...]`          | [`routes::key_pairs`]     |
//! | `/v1/keypairs`                                          | [`routes::all_key_pairs`] |
//! | `/openapi.json`                                         | [`openapi`]               |
//! | `/health/*`                                             | unauthenticated probes    |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! TraceLayer → AuthMiddleware → Handler
//! ```
//!
//! ## Crate Policy
//!
//! No business logic in route handlers — lifecycle semantics live in
//! `idhub-keypairs`, contracts in `idhub-core`. All errors map to structured
//! HTTP responses via [`ApiError`].

pub mod auth;
pub mod authorization;
pub mod config;
pub mod error;
pub mod extension;
pub mod extractors;
pub mod openapi;
pub mod routes;
pub mod validation;
pub mod web;

use std::sync::Arc;

use axum::middleware::from_fn;
use axum::Router;
use idhub_core::KeyPairService;
use tower_http::trace::TraceLayer;

use crate::auth::AuthConfig;
use crate::authorization::AuthorizationService;
use crate::config::ManagementApiConfig;
use crate::web::WebService;

pub use error::ApiError;
pub use extension::KeyPairManagementApiExtension;

/// Assemble the full application router.
///
/// Runs the extension's one-time initialization against a fresh
/// [`WebService`] and [`AuthorizationService`], then layers authentication
/// and tracing on top. Health probes are mounted outside the auth
/// middleware so they stay accessible without credentials.
pub fn app(config: ManagementApiConfig, key_pairs: Arc<dyn KeyPairService>) -> Router {
    let auth_config = AuthConfig {
        token: config.auth_token().cloned(),
    };

    let authorization = Arc::new(AuthorizationService::new());
    let extension = KeyPairManagementApiExtension::new(config, key_pairs, authorization);

    let mut web = WebService::new();
    extension.initialize(&mut web);

    let api = web
        .into_router()
        .merge(openapi::router())
        .layer(from_fn(auth::auth_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(axum::Extension(auth_config));

    let health = Router::new()
        .route("/health/liveness", axum::routing::get(liveness))
        .route("/health/readiness", axum::routing::get(readiness));

    Router::new().merge(health).merge(api)
}

/// Liveness probe — 200 whenever the process runs.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe — 200 when the application can serve.
async fn readiness() -> &'static str {
    "ready"
}
