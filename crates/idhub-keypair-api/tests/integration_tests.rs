//! # Integration Tests for idhub-keypair-api
//!
//! Drives the assembled application router end to end: key-pair CRUD and
//! lifecycle endpoints, descriptor validation, the admin-wide listing,
//! authentication middleware, ownership-based authorization, and the
//! OpenAPI endpoint.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use idhub_core::{
    KeyAlgorithm, KeyDescriptor, KeyGeneratorParams, KeyId, KeyPairService, ParticipantContextId,
};
use idhub_keypair_api::auth::SecretToken;
use idhub_keypair_api::config::ManagementApiConfig;
use idhub_keypairs::InMemoryKeyPairService;

/// Build the test app with auth disabled, returning the service handle for
/// direct seeding.
fn test_app() -> (axum::Router, Arc<InMemoryKeyPairService>) {
    let service = Arc::new(InMemoryKeyPairService::new());
    let app = idhub_keypair_api::app(ManagementApiConfig::default(), service.clone());
    (app, service)
}

/// Build the test app with bearer authentication enabled.
fn test_app_with_auth(secret: &str) -> (axum::Router, Arc<InMemoryKeyPairService>) {
    let service = Arc::new(InMemoryKeyPairService::new());
    let config = ManagementApiConfig::default().with_auth_token(SecretToken::new(secret));
    let app = idhub_keypair_api::app(config, service.clone());
    (app, service)
}

fn participant(id: &str) -> ParticipantContextId {
    ParticipantContextId::new(id).unwrap()
}

fn descriptor(key_id: &str) -> KeyDescriptor {
    KeyDescriptor {
        key_id: KeyId::new(key_id).unwrap(),
        private_key_alias: format!("{key_id}-alias"),
        group_name: None,
        key_generator_params: Some(KeyGeneratorParams {
            algorithm: KeyAlgorithm::Ed25519,
        }),
        public_key_jwk: None,
        public_key_pem: None,
        active: false,
    }
}

fn descriptor_json(key_id: &str) -> String {
    serde_json::json!({
        "key_id": key_id,
        "private_key_alias": format!("{key_id}-alias"),
        "key_generator_params": { "algorithm": "ED25519" },
    })
    .to_string()
}

async fn body_json(response: axum::http::Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post(uri: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn put_json(uri: &str, body: String) -> Request<Body> {
    Request::builder()
        .method("PUT")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap()
}

fn post_json(uri: &str, body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap()
}

// -- Health Probes ------------------------------------------------------------

#[tokio::test]
async fn liveness_probe() {
    let (app, _) = test_app();
    let response = app.oneshot(get("/health/liveness")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn readiness_probe() {
    let (app, _) = test_app();
    let response = app.oneshot(get("/health/readiness")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

// -- Add ----------------------------------------------------------------------

#[tokio::test]
async fn add_key_pair_returns_created_record() {
    let (app, _) = test_app();
    let response = app
        .oneshot(put_json(
            "/v1/participants/alpha/keypairs",
            descriptor_json("k1"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let record = body_json(response).await;
    assert_eq!(record["participant_context_id"], "alpha");
    assert_eq!(record["key_id"], "k1");
    assert_eq!(record["state"], "CREATED");
    assert_eq!(record["is_default_pair"], false);
    assert!(record["serialized_public_key"]
        .as_str()
        .unwrap()
        .contains("Ed25519"));
}

#[tokio::test]
async fn add_key_pair_with_make_default() {
    let (app, _) = test_app();
    let response = app
        .oneshot(put_json(
            "/v1/participants/alpha/keypairs?make_default=true",
            descriptor_json("k1"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let record = body_json(response).await;
    assert_eq!(record["is_default_pair"], true);
}

#[tokio::test]
async fn add_duplicate_key_id_conflicts() {
    let (app, _) = test_app();
    let first = app
        .clone()
        .oneshot(put_json(
            "/v1/participants/alpha/keypairs",
            descriptor_json("k1"),
        ))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app
        .oneshot(put_json(
            "/v1/participants/alpha/keypairs",
            descriptor_json("k1"),
        ))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn add_invalid_descriptor_is_unprocessable() {
    let (app, _) = test_app();
    // Two material sources: generator params and PEM.
    let body = serde_json::json!({
        "key_id": "k1",
        "private_key_alias": "k1-alias",
        "key_generator_params": { "algorithm": "ED25519" },
        "public_key_pem": "-----BEGIN PUBLIC KEY-----",
    })
    .to_string();

    let response = app
        .oneshot(put_json("/v1/participants/alpha/keypairs", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let error = body_json(response).await;
    assert_eq!(error["error"]["code"], "VALIDATION_ERROR");
    assert!(error["error"]["message"]
        .as_str()
        .unwrap()
        .contains("mutually exclusive"));
}

#[tokio::test]
async fn add_malformed_json_is_bad_request() {
    let (app, _) = test_app();
    let response = app
        .oneshot(put_json(
            "/v1/participants/alpha/keypairs",
            "{not json".to_string(),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// -- Find / List --------------------------------------------------------------

#[tokio::test]
async fn find_key_pair_roundtrip() {
    let (app, service) = test_app();
    let record = service
        .add_key_pair(&participant("alpha"), descriptor("k1"), false)
        .unwrap();

    let uri = format!("/v1/participants/alpha/keypairs/{}", record.id);
    let response = app.oneshot(get(&uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let found = body_json(response).await;
    assert_eq!(found["id"], record.id.as_str());
    assert_eq!(found["key_id"], "k1");
}

#[tokio::test]
async fn find_unknown_key_pair_is_not_found() {
    let (app, _) = test_app();
    let response = app
        .oneshot(get("/v1/participants/alpha/keypairs/no-such-id"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let error = body_json(response).await;
    assert_eq!(error["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn find_scopes_to_the_path_participant() {
    let (app, service) = test_app();
    let record = service
        .add_key_pair(&participant("alpha"), descriptor("k1"), false)
        .unwrap();

    // Addressing an alpha-owned pair under beta's collection misses.
    let uri = format!("/v1/participants/beta/keypairs/{}", record.id);
    let response = app.oneshot(get(&uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_returns_only_the_participants_pairs() {
    let (app, service) = test_app();
    service
        .add_key_pair(&participant("alpha"), descriptor("k1"), false)
        .unwrap();
    service
        .add_key_pair(&participant("alpha"), descriptor("k2"), false)
        .unwrap();
    service
        .add_key_pair(&participant("beta"), descriptor("k3"), false)
        .unwrap();

    let response = app
        .oneshot(get("/v1/participants/alpha/keypairs"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let records = body_json(response).await;
    assert_eq!(records.as_array().unwrap().len(), 2);
}

// -- Lifecycle ----------------------------------------------------------------

#[tokio::test]
async fn activate_then_second_activation_conflicts() {
    let (app, service) = test_app();
    let record = service
        .add_key_pair(&participant("alpha"), descriptor("k1"), false)
        .unwrap();

    let uri = format!("/v1/participants/alpha/keypairs/{}/activate", record.id);
    let response = app.clone().oneshot(post(&uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app.oneshot(post(&uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn rotate_without_successor() {
    let (app, service) = test_app();
    let record = service
        .add_key_pair(&participant("alpha"), descriptor("k1"), false)
        .unwrap();

    let uri = format!(
        "/v1/participants/alpha/keypairs/{}/rotate?duration=1000",
        record.id
    );
    let response = app.clone().oneshot(post(&uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let find = format!("/v1/participants/alpha/keypairs/{}", record.id);
    let found = body_json(app.oneshot(get(&find)).await.unwrap()).await;
    assert_eq!(found["state"], "ROTATED");
    assert_eq!(found["rotation_duration_millis"], 1000);
}

#[tokio::test]
async fn rotate_with_successor_adds_the_new_pair() {
    let (app, service) = test_app();
    let record = service
        .add_key_pair(&participant("alpha"), descriptor("k1"), false)
        .unwrap();

    let uri = format!("/v1/participants/alpha/keypairs/{}/rotate", record.id);
    let response = app
        .clone()
        .oneshot(post_json(&uri, descriptor_json("k2")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let records = body_json(
        app.oneshot(get("/v1/participants/alpha/keypairs"))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(records.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn rotate_with_negative_duration_is_bad_request() {
    let (app, service) = test_app();
    let record = service
        .add_key_pair(&participant("alpha"), descriptor("k1"), false)
        .unwrap();

    let uri = format!(
        "/v1/participants/alpha/keypairs/{}/rotate?duration=-5",
        record.id
    );
    let response = app.oneshot(post(&uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn revoke_then_rotate_conflicts() {
    let (app, service) = test_app();
    let record = service
        .add_key_pair(&participant("alpha"), descriptor("k1"), false)
        .unwrap();

    let revoke = format!("/v1/participants/alpha/keypairs/{}/revoke", record.id);
    let response = app.clone().oneshot(post(&revoke)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let rotate = format!("/v1/participants/alpha/keypairs/{}/rotate", record.id);
    let response = app.oneshot(post(&rotate)).await.unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn lifecycle_operation_on_unknown_id_is_not_found() {
    let (app, _) = test_app();
    let response = app
        .oneshot(post("/v1/participants/alpha/keypairs/no-such-id/activate"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// -- Admin-wide listing -------------------------------------------------------

#[tokio::test]
async fn get_all_pages_across_participants() {
    let (app, service) = test_app();
    service
        .add_key_pair(&participant("alpha"), descriptor("k1"), false)
        .unwrap();
    service
        .add_key_pair(&participant("beta"), descriptor("k2"), false)
        .unwrap();
    service
        .add_key_pair(&participant("gamma"), descriptor("k3"), false)
        .unwrap();

    let page = body_json(
        app.clone()
            .oneshot(get("/v1/keypairs?limit=2"))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(page.as_array().unwrap().len(), 2);

    let rest = body_json(
        app.oneshot(get("/v1/keypairs?offset=2&limit=2"))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(rest.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn get_all_rejects_out_of_range_limits() {
    let (app, _) = test_app();
    let response = app
        .clone()
        .oneshot(get("/v1/keypairs?limit=0"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app.oneshot(get("/v1/keypairs?limit=201")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// -- Authentication & Authorization -------------------------------------------

#[tokio::test]
async fn missing_token_is_unauthorized() {
    let (app, _) = test_app_with_auth("s3cret");
    let response = app.oneshot(get("/v1/keypairs")).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn health_probes_skip_authentication() {
    let (app, _) = test_app_with_auth("s3cret");
    let response = app.oneshot(get("/health/liveness")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn legacy_admin_token_reaches_the_admin_listing() {
    let (app, _) = test_app_with_auth("s3cret");
    let request = Request::builder()
        .uri("/v1/keypairs")
        .header("Authorization", "Bearer s3cret")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn participant_token_cannot_use_the_admin_listing() {
    let (app, _) = test_app_with_auth("s3cret");
    let request = Request::builder()
        .uri("/v1/keypairs")
        .header("Authorization", "Bearer participant:alpha:s3cret")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn participant_lists_own_context_only() {
    let (app, service) = test_app_with_auth("s3cret");
    service
        .add_key_pair(&participant("alpha"), descriptor("k1"), false)
        .unwrap();

    let own = Request::builder()
        .uri("/v1/participants/alpha/keypairs")
        .header("Authorization", "Bearer participant:alpha:s3cret")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(own).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let foreign = Request::builder()
        .uri("/v1/participants/beta/keypairs")
        .header("Authorization", "Bearer participant:alpha:s3cret")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(foreign).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn ownership_lookup_gates_key_pair_access() {
    let (app, service) = test_app_with_auth("s3cret");
    let record = service
        .add_key_pair(&participant("alpha"), descriptor("k1"), false)
        .unwrap();

    let uri = format!("/v1/participants/alpha/keypairs/{}", record.id);

    let owner = Request::builder()
        .uri(&uri)
        .header("Authorization", "Bearer participant:alpha:s3cret")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(owner).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let other = Request::builder()
        .uri(&uri)
        .header("Authorization", "Bearer participant:beta:s3cret")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(other).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// -- OpenAPI ------------------------------------------------------------------

#[tokio::test]
async fn openapi_spec_is_served() {
    let (app, _) = test_app();
    let response = app.oneshot(get("/openapi.json")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let spec = body_json(response).await;
    assert!(spec["paths"]["/v1/keypairs"].is_object());
    assert!(
        spec["paths"]["/v1/participants/{participant_context_id}/keypairs"].is_object()
    );
}
