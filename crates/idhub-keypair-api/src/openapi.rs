//! # OpenAPI Specification Assembly
//!
//! Assembles the utoipa-documented key-pair routes into a single OpenAPI
//! spec, served at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

/// Assembled OpenAPI spec for the management API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Identity Hub — Key Pair Management API",
        version = "0.1.0",
        description = "Key-pair management for identity hub participants: add, activate, rotate and revoke key pairs, plus an admin-wide listing.",
        license(name = "Apache-2.0")
    ),
    paths(
        crate::routes::key_pairs::find_key_pair,
        crate::routes::key_pairs::list_key_pairs,
        crate::routes::key_pairs::add_key_pair,
        crate::routes::key_pairs::activate_key_pair,
        crate::routes::key_pairs::rotate_key_pair,
        crate::routes::key_pairs::revoke_key_pair,
        crate::routes::all_key_pairs::list_all_key_pairs,
    ),
    components(schemas(
        idhub_core::KeyPairResource,
        idhub_core::KeyPairState,
        idhub_core::KeyDescriptor,
        idhub_core::KeyGeneratorParams,
        idhub_core::KeyAlgorithm,
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
    )),
    tags(
        (name = "keypairs", description = "Key-pair management for identity hub participants"),
    )
)]
pub struct ApiDoc;

/// Build the OpenAPI router, serving the spec at `/openapi.json`.
pub fn router() -> Router {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json — the generated OpenAPI specification.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_contains_all_key_pair_paths() {
        let spec = ApiDoc::openapi();
        let paths: Vec<&String> = spec.paths.paths.keys().collect();

        assert!(paths
            .iter()
            .any(|p| p.as_str() == "/v1/keypairs"));
        assert!(paths
            .iter()
            .any(|p| p.as_str() == "/v1/participants/{participant_context_id}/keypairs"));
        assert!(paths.iter().any(|p| p
            .as_str()
            == "/v1/participants/{participant_context_id}/keypairs/{key_pair_id}/rotate"));
    }

    #[test]
    fn spec_serializes_to_json() {
        let json = serde_json::to_string(&ApiDoc::openapi()).unwrap();
        assert!(json.contains("Key Pair Management"));
        assert!(json.contains("KeyDescriptor"));
    }
}
