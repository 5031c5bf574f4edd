//! # Authentication Middleware
//!
//! Bearer-token authentication for the management context.
//!
//! ## Token Format
//!
//! ```text
//! Bearer {role}:{participant_context_id}:{secret}   — scoped format
//! Bearer {secret}                                   — legacy format (admin)
//! ```
//!
//! Every authenticated request gets a [`CallerIdentity`] injected into the
//! request extensions; handlers extract it via `FromRequestParts`. When no
//! token is configured, authentication is disabled (development mode) and
//! all requests run as admin.

use axum::extract::Request;
use axum::http::request::Parts;
use axum::http::{header, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use idhub_core::ParticipantContextId;
use subtle::ConstantTimeEq;

use crate::error::{ApiError, ErrorBody, ErrorDetail};

// ── Role ────────────────────────────────────────────────────────────────────

/// Caller roles, ordered by privilege: `Participant < Admin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Role {
    /// Can manage resources owned by its bound participant context.
    Participant,
    /// Full access across participant contexts.
    Admin,
}

impl Role {
    /// Return the string representation of this role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Participant => "participant",
            Self::Admin => "admin",
        }
    }
}

// ── CallerIdentity ──────────────────────────────────────────────────────────

/// Identity of the authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerIdentity {
    /// The caller's role.
    pub role: Role,
    /// The caller's participant binding. `None` for admins (they operate
    /// across contexts) and for unbound participant tokens, which can then
    /// access nothing participant-scoped.
    pub participant_context_id: Option<ParticipantContextId>,
}

impl CallerIdentity {
    /// An admin identity without a participant binding.
    pub fn admin() -> Self {
        Self {
            role: Role::Admin,
            participant_context_id: None,
        }
    }

    /// A participant identity bound to the given context.
    pub fn participant(context: ParticipantContextId) -> Self {
        Self {
            role: Role::Participant,
            participant_context_id: Some(context),
        }
    }

    /// Whether the caller holds the admin role.
    pub fn is_admin(&self) -> bool {
        self.role >= Role::Admin
    }

    /// Whether the caller may act for the given participant context.
    ///
    /// Admins may act for anyone; participants only for their own binding.
    pub fn can_act_for(&self, participant: &ParticipantContextId) -> bool {
        self.is_admin() || self.participant_context_id.as_ref() == Some(participant)
    }
}

#[axum::async_trait]
impl<S: Send + Sync> axum::extract::FromRequestParts<S> for CallerIdentity {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CallerIdentity>()
            .cloned()
            .ok_or_else(|| ApiError::Unauthorized("no caller identity in request context".into()))
    }
}

/// Require the admin role. Returns 403 otherwise.
pub fn require_admin(caller: &CallerIdentity) -> Result<(), ApiError> {
    if caller.is_admin() {
        Ok(())
    } else {
        Err(ApiError::Forbidden(format!(
            "admin role required, caller has '{}'",
            caller.role.as_str()
        )))
    }
}

/// Require that the caller may act for the given participant context.
pub fn require_participant(
    caller: &CallerIdentity,
    participant: &ParticipantContextId,
) -> Result<(), ApiError> {
    if caller.can_act_for(participant) {
        Ok(())
    } else {
        Err(ApiError::Forbidden(format!(
            "caller is not bound to participant context '{participant}'"
        )))
    }
}

// ── Secret Token ────────────────────────────────────────────────────────────

/// A bearer secret compared in constant time.
///
/// `Debug` redacts the value to prevent credential leakage in logs.
#[derive(Clone)]
pub struct SecretToken(String);

impl SecretToken {
    /// Wrap a secret value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Constant-time comparison against a provided secret.
    ///
    /// When lengths differ, a dummy comparison keeps timing independent of
    /// where the mismatch occurs.
    pub fn matches(&self, provided: &str) -> bool {
        let expected = self.0.as_bytes();
        let provided = provided.as_bytes();
        if provided.len() != expected.len() {
            let _ = expected.ct_eq(expected);
            return false;
        }
        provided.ct_eq(expected).into()
    }
}

impl std::fmt::Debug for SecretToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SecretToken([REDACTED])")
    }
}

/// Auth configuration injected into request extensions.
#[derive(Debug, Clone, Default)]
pub struct AuthConfig {
    /// The expected bearer secret. `None` disables authentication.
    pub token: Option<SecretToken>,
}

// ── Token Parsing ───────────────────────────────────────────────────────────

/// Parse a bearer token in `{role}:{participant_context_id}:{secret}` or
/// legacy `{secret}` format.
///
/// Legacy tokens carry no role prefix and are treated as admin.
pub fn parse_bearer_token(
    provided: &str,
    expected: &SecretToken,
) -> Result<CallerIdentity, String> {
    let parts: Vec<&str> = provided.splitn(3, ':').collect();

    match parts.len() {
        1 => {
            if expected.matches(provided) {
                Ok(CallerIdentity::admin())
            } else {
                Err("invalid bearer token".into())
            }
        }
        3 => {
            let role_str = parts[0];
            let participant_str = parts[1];
            let secret = parts[2];

            if !expected.matches(secret) {
                return Err("invalid bearer token".into());
            }

            let role = match role_str {
                "admin" => Role::Admin,
                "participant" => Role::Participant,
                other => return Err(format!("unknown role: {other}")),
            };

            let participant_context_id = if participant_str.is_empty() {
                None
            } else {
                Some(
                    ParticipantContextId::new(participant_str)
                        .map_err(|e| format!("invalid participant context id: {e}"))?,
                )
            };

            Ok(CallerIdentity {
                role,
                participant_context_id,
            })
        }
        _ => Err(
            "invalid token format, expected {role}:{participant_context_id}:{secret} or {secret}"
                .into(),
        ),
    }
}

// ── Middleware ──────────────────────────────────────────────────────────────

/// Validate the `Authorization` header and inject the caller identity.
///
/// With no configured token, all requests pass with an admin identity.
pub async fn auth_middleware(mut request: Request, next: Next) -> Response {
    let config = request.extensions().get::<AuthConfig>().cloned();

    match config {
        Some(AuthConfig {
            token: Some(ref expected),
        }) => {
            let auth_header = request
                .headers()
                .get(header::AUTHORIZATION)
                .and_then(|v| v.to_str().ok());

            match auth_header {
                Some(value) if value.starts_with("Bearer ") => {
                    match parse_bearer_token(&value[7..], expected) {
                        Ok(identity) => {
                            request.extensions_mut().insert(identity);
                            next.run(request).await
                        }
                        Err(msg) => {
                            tracing::warn!(reason = %msg, "authentication failed");
                            unauthorized_response(&msg)
                        }
                    }
                }
                Some(_) => {
                    tracing::warn!("authentication failed: non-Bearer authorization scheme");
                    unauthorized_response("authorization header must use Bearer scheme")
                }
                None => {
                    tracing::warn!("authentication failed: missing authorization header");
                    unauthorized_response("missing authorization header")
                }
            }
        }
        _ => {
            // Auth disabled: admin identity for full access.
            request.extensions_mut().insert(CallerIdentity::admin());
            next.run(request).await
        }
    }
}

fn unauthorized_response(message: &str) -> Response {
    let body = ErrorBody {
        error: ErrorDetail {
            code: "UNAUTHORIZED".to_string(),
            message: message.to_string(),
        },
    };
    (StatusCode::UNAUTHORIZED, Json(body)).into_response()
}
