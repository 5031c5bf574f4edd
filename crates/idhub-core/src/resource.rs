//! # Participant-Owned Resources
//!
//! The [`ParticipantResource`] trait ties a resource to its owning
//! participant context; the authorization subsystem resolves resources
//! through it without knowing their concrete type. [`KeyPairResource`] is
//! the one resource this workspace manages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::identity::{KeyId, KeyPairId, ParticipantContextId};

/// A resource owned by a participant context.
///
/// Ownership is the unit of authorization: access checks compare the
/// caller's participant binding against `participant_context_id()`.
pub trait ParticipantResource: Send + Sync + std::fmt::Debug {
    /// The participant context that owns this resource.
    fn participant_context_id(&self) -> &ParticipantContextId;
}

/// Lifecycle state of a key pair.
///
/// Transitions move strictly forward: `Created → Activated`, then either
/// `Rotated` (grace period, successor takes over) or `Revoked` (terminal).
/// A rotated pair can still be revoked; a revoked pair accepts nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum KeyPairState {
    /// Record exists, key not yet in use.
    Created,
    /// Key is live and published for the participant.
    Activated,
    /// Key was rotated out; still resolvable during the grace period.
    Rotated,
    /// Key is withdrawn. Terminal state.
    Revoked,
}

impl KeyPairState {
    /// Return the string representation of this state.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "CREATED",
            Self::Activated => "ACTIVATED",
            Self::Rotated => "ROTATED",
            Self::Revoked => "REVOKED",
        }
    }
}

impl std::fmt::Display for KeyPairState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A managed cryptographic key-pair record owned by a participant.
///
/// Only public material and the vault alias of the private half are stored;
/// private key bytes never appear in this type.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct KeyPairResource {
    /// Resource id addressing this record inside the hub.
    pub id: KeyPairId,
    /// Owning participant context.
    pub participant_context_id: ParticipantContextId,
    /// Public key id (`kid`) published in DID documents and JWK sets.
    pub key_id: KeyId,
    /// Optional grouping label (e.g. a key ring name).
    pub group_name: Option<String>,
    /// Whether this is the participant's default signing pair.
    pub is_default_pair: bool,
    /// Current lifecycle state.
    pub state: KeyPairState,
    /// Serialized public key material (JWK or PEM text).
    pub serialized_public_key: String,
    /// Vault alias under which the private half is filed.
    pub private_key_alias: String,
    /// Intended usage duration in milliseconds.
    pub use_duration_millis: i64,
    /// Grace period granted when the pair was rotated, if it was.
    pub rotation_duration_millis: Option<i64>,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record last changed.
    pub updated_at: DateTime<Utc>,
}

impl ParticipantResource for KeyPairResource {
    fn participant_context_id(&self) -> &ParticipantContextId {
        &self.participant_context_id
    }
}
