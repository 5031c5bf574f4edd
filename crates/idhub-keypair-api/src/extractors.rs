//! # Body Extraction Helpers
//!
//! Handlers take JSON bodies as `Result<Json<T>, JsonRejection>` and run
//! them through these helpers, so malformed input becomes a structured 400
//! instead of Axum's plain-text rejection. Endpoints with an optional body
//! (rotate/revoke successors) use [`extract_optional_json`], which treats a
//! body-less request as `None` and still rejects malformed JSON.

use axum::extract::rejection::JsonRejection;
use axum::Json;

use crate::error::ApiError;

/// Extract a required JSON body, mapping rejections to [`ApiError::BadRequest`].
pub fn extract_json<T>(result: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    result
        .map(|Json(value)| value)
        .map_err(|err| ApiError::BadRequest(err.body_text()))
}

/// Extract an optional JSON body.
///
/// A request without a JSON content type counts as "no body". A request
/// that claims JSON but fails to parse is still a 400.
pub fn extract_optional_json<T>(
    result: Result<Json<T>, JsonRejection>,
) -> Result<Option<T>, ApiError> {
    match result {
        Ok(Json(value)) => Ok(Some(value)),
        Err(JsonRejection::MissingJsonContentType(_)) => Ok(None),
        Err(err) => Err(ApiError::BadRequest(err.body_text())),
    }
}
