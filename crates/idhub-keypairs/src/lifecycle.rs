//! # Key-Pair Lifecycle
//!
//! Legal transitions for [`KeyPairState`]:
//!
//! ```text
//! CREATED ──activate──▶ ACTIVATED ──rotate──▶ ROTATED
//!    │                      │                    │
//!    └──────rotate──────────┤                    │
//!    └──────revoke──────────┴──────revoke────────┴──▶ REVOKED
//! ```
//!
//! `REVOKED` is terminal. Illegal transitions are structured errors, never
//! panics; the API layer maps them to 409 responses.

use idhub_core::{KeyId, KeyPairId, KeyPairState, ParticipantContextId, ServiceError};
use thiserror::Error;

/// Errors raised by key-pair domain operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyPairError {
    /// The addressed key pair does not exist.
    #[error("key pair {id} not found")]
    NotFound {
        /// The missing resource id.
        id: KeyPairId,
    },

    /// The participant already has a pair under this key id.
    #[error("participant {participant} already has a key pair with key id {key_id}")]
    DuplicateKeyId {
        /// The owning participant.
        participant: ParticipantContextId,
        /// The conflicting key id.
        key_id: KeyId,
    },

    /// The attempted transition is not valid from the current state.
    #[error("invalid transition from {from} to {to}: {reason}")]
    InvalidTransition {
        /// The current state.
        from: KeyPairState,
        /// The attempted target state.
        to: KeyPairState,
        /// Why the transition is rejected.
        reason: String,
    },
}

impl From<KeyPairError> for ServiceError {
    fn from(err: KeyPairError) -> Self {
        match &err {
            KeyPairError::NotFound { .. } => ServiceError::not_found(err.to_string()),
            KeyPairError::DuplicateKeyId { .. } | KeyPairError::InvalidTransition { .. } => {
                ServiceError::conflict(err.to_string())
            }
        }
    }
}

/// Check a transition and return the new state.
pub fn transition(from: KeyPairState, to: KeyPairState) -> Result<KeyPairState, KeyPairError> {
    use KeyPairState::*;

    let legal = match (from, to) {
        (Created, Activated) => true,
        (Created | Activated, Rotated) => true,
        (Created | Activated | Rotated, Revoked) => true,
        _ => false,
    };

    if legal {
        return Ok(to);
    }

    let reason = match to {
        Created => "a pair cannot return to CREATED".to_string(),
        Activated => "only a CREATED pair can be activated".to_string(),
        Rotated => format!("a {from} pair cannot be rotated"),
        Revoked => "the pair is already revoked".to_string(),
    };

    Err(KeyPairError::InvalidTransition { from, to, reason })
}
