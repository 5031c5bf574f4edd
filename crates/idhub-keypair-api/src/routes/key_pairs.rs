//! # Key-Pair Resource Controller
//!
//! Participant-scoped key-pair management:
//!
//! - `GET  /v1/participants/:participant_context_id/keypairs` — list
//! - `PUT  /v1/participants/:participant_context_id/keypairs` — add
//! - `GET  /v1/participants/:participant_context_id/keypairs/:key_pair_id` — find
//! - `POST /v1/participants/:participant_context_id/keypairs/:key_pair_id/activate`
//! - `POST /v1/participants/:participant_context_id/keypairs/:key_pair_id/rotate`
//! - `POST /v1/participants/:participant_context_id/keypairs/:key_pair_id/revoke`
//!
//! Routes addressing a key-pair id authorize through the ownership lookup;
//! collection routes require the caller to be the participant itself (or
//! an admin).

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use idhub_core::{
    Criterion, KeyDescriptor, KeyPairId, KeyPairResource, KeyPairService, ParticipantContextId,
    QuerySpec,
};
use serde::Deserialize;

use crate::auth::{require_participant, CallerIdentity};
use crate::authorization::AuthorizationService;
use crate::error::ApiError;
use crate::extractors::{extract_json, extract_optional_json};
use crate::validation::KeyDescriptorValidator;

/// Grace period granted to rotated keys when the request does not name one:
/// seven days.
pub const DEFAULT_ROTATION_GRACE_MILLIS: i64 = 7 * 24 * 60 * 60 * 1000;

/// Dependencies of the key-pair resource controller.
#[derive(Clone)]
pub struct KeyPairApiState {
    /// Ownership checks for key-pair ids.
    pub authorization: Arc<AuthorizationService>,
    /// The injected key-pair service.
    pub key_pairs: Arc<dyn KeyPairService>,
    /// Descriptor validation.
    pub validator: Arc<KeyDescriptorValidator>,
}

/// Build the participant-scoped key-pair router.
pub fn router(state: KeyPairApiState) -> Router {
    Router::new()
        .route(
            "/v1/participants/:participant_context_id/keypairs",
            get(list_key_pairs).put(add_key_pair),
        )
        .route(
            "/v1/participants/:participant_context_id/keypairs/:key_pair_id",
            get(find_key_pair),
        )
        .route(
            "/v1/participants/:participant_context_id/keypairs/:key_pair_id/activate",
            post(activate_key_pair),
        )
        .route(
            "/v1/participants/:participant_context_id/keypairs/:key_pair_id/rotate",
            post(rotate_key_pair),
        )
        .route(
            "/v1/participants/:participant_context_id/keypairs/:key_pair_id/revoke",
            post(revoke_key_pair),
        )
        .with_state(state)
}

// ── Query DTOs ──────────────────────────────────────────────────────

/// Query parameters of the add endpoint.
#[derive(Debug, Deserialize)]
pub struct AddKeyPairQuery {
    /// Make the new pair the participant's default.
    #[serde(default)]
    pub make_default: bool,
}

/// Query parameters of the rotate endpoint.
#[derive(Debug, Deserialize)]
pub struct RotateQuery {
    /// Grace period in milliseconds during which the rotated key stays
    /// resolvable.
    pub duration: Option<i64>,
}

// ── Handlers ────────────────────────────────────────────────────────

/// GET a single key pair by id.
#[utoipa::path(
    get,
    path = "/v1/participants/{participant_context_id}/keypairs/{key_pair_id}",
    params(
        ("participant_context_id" = String, Path, description = "Owning participant context"),
        ("key_pair_id" = String, Path, description = "Key pair resource id"),
    ),
    responses(
        (status = 200, description = "Key pair found", body = KeyPairResource),
        (status = 403, description = "Caller is not the owner", body = crate::error::ErrorBody),
        (status = 404, description = "Key pair not found", body = crate::error::ErrorBody),
    ),
    tag = "keypairs"
)]
pub(crate) async fn find_key_pair(
    State(state): State<KeyPairApiState>,
    caller: CallerIdentity,
    Path((participant_context_id, key_pair_id)): Path<(String, String)>,
) -> Result<Json<KeyPairResource>, ApiError> {
    let participant = ParticipantContextId::new(participant_context_id)?;
    let key_pair_id = KeyPairId::new(key_pair_id)?;

    state
        .authorization
        .is_authorized::<KeyPairResource>(&caller, key_pair_id.as_str())?;

    let query = QuerySpec::builder()
        .filter(Criterion::equal("id", key_pair_id.as_str()))
        .filter(Criterion::equal(
            "participant_context_id",
            participant.as_str(),
        ))
        .build();

    state
        .key_pairs
        .query(&query)?
        .into_iter()
        .next()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("key pair {key_pair_id} not found")))
}

/// GET all key pairs of a participant.
#[utoipa::path(
    get,
    path = "/v1/participants/{participant_context_id}/keypairs",
    params(
        ("participant_context_id" = String, Path, description = "Owning participant context"),
    ),
    responses(
        (status = 200, description = "Key pairs of the participant", body = Vec<KeyPairResource>),
        (status = 403, description = "Caller is not the participant", body = crate::error::ErrorBody),
    ),
    tag = "keypairs"
)]
pub(crate) async fn list_key_pairs(
    State(state): State<KeyPairApiState>,
    caller: CallerIdentity,
    Path(participant_context_id): Path<String>,
) -> Result<Json<Vec<KeyPairResource>>, ApiError> {
    let participant = ParticipantContextId::new(participant_context_id)?;
    require_participant(&caller, &participant)?;

    let query = QuerySpec::builder()
        .filter(Criterion::equal(
            "participant_context_id",
            participant.as_str(),
        ))
        .build();

    Ok(Json(state.key_pairs.query(&query)?))
}

/// PUT a new key pair, described by a validated [`KeyDescriptor`].
#[utoipa::path(
    put,
    path = "/v1/participants/{participant_context_id}/keypairs",
    params(
        ("participant_context_id" = String, Path, description = "Owning participant context"),
        ("make_default" = Option<bool>, Query, description = "Make the new pair the default"),
    ),
    request_body = KeyDescriptor,
    responses(
        (status = 201, description = "Key pair added", body = KeyPairResource),
        (status = 409, description = "Duplicate key id", body = crate::error::ErrorBody),
        (status = 422, description = "Descriptor validation failed", body = crate::error::ErrorBody),
    ),
    tag = "keypairs"
)]
pub(crate) async fn add_key_pair(
    State(state): State<KeyPairApiState>,
    caller: CallerIdentity,
    Path(participant_context_id): Path<String>,
    Query(params): Query<AddKeyPairQuery>,
    body: Result<Json<KeyDescriptor>, JsonRejection>,
) -> Result<(StatusCode, Json<KeyPairResource>), ApiError> {
    let participant = ParticipantContextId::new(participant_context_id)?;
    require_participant(&caller, &participant)?;

    let descriptor = extract_json(body)?;
    state
        .validator
        .validate(&descriptor)
        .map_err(ApiError::Validation)?;

    let record = state
        .key_pairs
        .add_key_pair(&participant, descriptor, params.make_default)?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// POST an activation of a created key pair.
#[utoipa::path(
    post,
    path = "/v1/participants/{participant_context_id}/keypairs/{key_pair_id}/activate",
    params(
        ("participant_context_id" = String, Path, description = "Owning participant context"),
        ("key_pair_id" = String, Path, description = "Key pair resource id"),
    ),
    responses(
        (status = 204, description = "Key pair activated"),
        (status = 404, description = "Key pair not found", body = crate::error::ErrorBody),
        (status = 409, description = "Pair is not in CREATED state", body = crate::error::ErrorBody),
    ),
    tag = "keypairs"
)]
pub(crate) async fn activate_key_pair(
    State(state): State<KeyPairApiState>,
    caller: CallerIdentity,
    Path((_participant_context_id, key_pair_id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    let key_pair_id = KeyPairId::new(key_pair_id)?;
    state
        .authorization
        .is_authorized::<KeyPairResource>(&caller, key_pair_id.as_str())?;

    state.key_pairs.activate(&key_pair_id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST a rotation, with an optional successor descriptor in the body.
#[utoipa::path(
    post,
    path = "/v1/participants/{participant_context_id}/keypairs/{key_pair_id}/rotate",
    params(
        ("participant_context_id" = String, Path, description = "Owning participant context"),
        ("key_pair_id" = String, Path, description = "Key pair resource id"),
        ("duration" = Option<i64>, Query, description = "Grace period in milliseconds"),
    ),
    request_body(content = KeyDescriptor, description = "Successor descriptor (optional body)"),
    responses(
        (status = 204, description = "Key pair rotated"),
        (status = 404, description = "Key pair not found", body = crate::error::ErrorBody),
        (status = 409, description = "Pair cannot be rotated", body = crate::error::ErrorBody),
        (status = 422, description = "Successor validation failed", body = crate::error::ErrorBody),
    ),
    tag = "keypairs"
)]
pub(crate) async fn rotate_key_pair(
    State(state): State<KeyPairApiState>,
    caller: CallerIdentity,
    Path((_participant_context_id, key_pair_id)): Path<(String, String)>,
    Query(params): Query<RotateQuery>,
    body: Result<Json<KeyDescriptor>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let key_pair_id = KeyPairId::new(key_pair_id)?;
    state
        .authorization
        .is_authorized::<KeyPairResource>(&caller, key_pair_id.as_str())?;

    let duration = params.duration.unwrap_or(DEFAULT_ROTATION_GRACE_MILLIS);
    if duration < 0 {
        return Err(ApiError::BadRequest(
            "duration must not be negative".to_string(),
        ));
    }

    let successor = extract_optional_json(body)?;
    if let Some(descriptor) = &successor {
        state
            .validator
            .validate(descriptor)
            .map_err(ApiError::Validation)?;
    }

    state
        .key_pairs
        .rotate_key_pair(&key_pair_id, successor, duration)?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST a revocation, with an optional successor descriptor in the body.
#[utoipa::path(
    post,
    path = "/v1/participants/{participant_context_id}/keypairs/{key_pair_id}/revoke",
    params(
        ("participant_context_id" = String, Path, description = "Owning participant context"),
        ("key_pair_id" = String, Path, description = "Key pair resource id"),
    ),
    request_body(content = KeyDescriptor, description = "Successor descriptor (optional body)"),
    responses(
        (status = 204, description = "Key pair revoked"),
        (status = 404, description = "Key pair not found", body = crate::error::ErrorBody),
        (status = 409, description = "Pair is already revoked", body = crate::error::ErrorBody),
        (status = 422, description = "Successor validation failed", body = crate::error::ErrorBody),
    ),
    tag = "keypairs"
)]
pub(crate) async fn revoke_key_pair(
    State(state): State<KeyPairApiState>,
    caller: CallerIdentity,
    Path((_participant_context_id, key_pair_id)): Path<(String, String)>,
    body: Result<Json<KeyDescriptor>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let key_pair_id = KeyPairId::new(key_pair_id)?;
    state
        .authorization
        .is_authorized::<KeyPairResource>(&caller, key_pair_id.as_str())?;

    let successor = extract_optional_json(body)?;
    if let Some(descriptor) = &successor {
        state
            .validator
            .validate(descriptor)
            .map_err(ApiError::Validation)?;
    }

    state.key_pairs.revoke_key_pair(&key_pair_id, successor)?;
    Ok(StatusCode::NO_CONTENT)
}
