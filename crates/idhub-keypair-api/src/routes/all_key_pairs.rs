//! # Hub-Wide Key-Pair Listing
//!
//! `GET /v1/keypairs` pages across every participant's key pairs. Admin
//! only — participants list their own pairs through the scoped controller.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use idhub_core::{KeyPairResource, KeyPairService, QuerySpec};
use serde::Deserialize;

use crate::auth::{require_admin, CallerIdentity};
use crate::error::ApiError;

/// Default page size when the request does not set one.
pub const DEFAULT_PAGE_LIMIT: usize = 50;
/// Largest admissible page size.
pub const MAX_PAGE_LIMIT: usize = 200;

/// Dependencies of the hub-wide listing controller.
#[derive(Clone)]
pub struct AllKeyPairsApiState {
    /// The injected key-pair service.
    pub key_pairs: Arc<dyn KeyPairService>,
}

/// Build the hub-wide key-pair router.
pub fn router(state: AllKeyPairsApiState) -> Router {
    Router::new()
        .route("/v1/keypairs", get(list_all_key_pairs))
        .with_state(state)
}

/// Paging parameters.
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    /// Records to skip.
    pub offset: Option<usize>,
    /// Page size, capped at [`MAX_PAGE_LIMIT`].
    pub limit: Option<usize>,
}

/// GET a page of all key pairs in the hub.
#[utoipa::path(
    get,
    path = "/v1/keypairs",
    params(
        ("offset" = Option<usize>, Query, description = "Records to skip"),
        ("limit" = Option<usize>, Query, description = "Page size (1..=200)"),
    ),
    responses(
        (status = 200, description = "Page of key pairs", body = Vec<KeyPairResource>),
        (status = 400, description = "Invalid paging parameters", body = crate::error::ErrorBody),
        (status = 403, description = "Admin role required", body = crate::error::ErrorBody),
    ),
    tag = "keypairs"
)]
pub(crate) async fn list_all_key_pairs(
    State(state): State<AllKeyPairsApiState>,
    caller: CallerIdentity,
    Query(page): Query<PageQuery>,
) -> Result<Json<Vec<KeyPairResource>>, ApiError> {
    require_admin(&caller)?;

    let limit = page.limit.unwrap_or(DEFAULT_PAGE_LIMIT);
    if limit == 0 || limit > MAX_PAGE_LIMIT {
        return Err(ApiError::BadRequest(format!(
            "limit must be between 1 and {MAX_PAGE_LIMIT}"
        )));
    }

    // Sorted by id so pages stay stable across requests.
    let query = QuerySpec::builder()
        .offset(page.offset.unwrap_or(0))
        .limit(limit)
        .sort_field("id")
        .build();

    Ok(Json(state.key_pairs.query(&query)?))
}
