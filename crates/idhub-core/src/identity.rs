//! # Identity Newtypes
//!
//! Domain-primitive newtypes for identifiers throughout the identity hub.
//! Each identifier is a distinct type — you cannot pass a [`KeyId`] where a
//! [`ParticipantContextId`] is expected.
//!
//! String-based identifiers validate at construction time via `new`;
//! [`KeyPairId`] additionally offers random generation backed by UUIDv4.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::ServiceError;

/// Validate a non-empty identifier string, trimming surrounding whitespace.
fn validated(raw: impl Into<String>, what: &str) -> Result<String, ServiceError> {
    let trimmed = raw.into().trim().to_string();
    if trimmed.is_empty() {
        return Err(ServiceError::bad_request(format!(
            "{what} must not be empty"
        )));
    }
    Ok(trimmed)
}

/// The identifier of the participant context that owns a set of resources.
///
/// Participant contexts partition the hub: every managed resource belongs to
/// exactly one participant, and authorization decisions compare a caller's
/// participant binding against the owning context of the resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = String)]
pub struct ParticipantContextId(String);

impl ParticipantContextId {
    /// Create a validated participant context identifier.
    pub fn new(raw: impl Into<String>) -> Result<Self, ServiceError> {
        validated(raw, "participant context id").map(Self)
    }

    /// Access the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ParticipantContextId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The unique identifier of a [`KeyPairResource`](crate::KeyPairResource).
///
/// Freshly created resources get a random UUIDv4-backed id; identifiers
/// arriving over the wire are accepted as opaque non-empty strings so that
/// externally minted ids survive round-trips.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = String)]
pub struct KeyPairId(String);

impl KeyPairId {
    /// Create a validated key-pair identifier from an existing string.
    pub fn new(raw: impl Into<String>) -> Result<Self, ServiceError> {
        validated(raw, "key pair id").map(Self)
    }

    /// Generate a fresh random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Access the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for KeyPairId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The public key identifier published alongside the key material.
///
/// This is the `kid` that ends up in DID documents and JWK sets, distinct
/// from the resource id that addresses the record inside the hub.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = String)]
pub struct KeyId(String);

impl KeyId {
    /// Create a validated key identifier.
    pub fn new(raw: impl Into<String>) -> Result<Self, ServiceError> {
        validated(raw, "key id").map(Self)
    }

    /// Access the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for KeyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn participant_context_id_accepts_non_empty() {
        let id = ParticipantContextId::new("participant-a").unwrap();
        assert_eq!(id.as_str(), "participant-a");
        assert_eq!(id.to_string(), "participant-a");
    }

    #[test]
    fn participant_context_id_rejects_empty() {
        assert!(ParticipantContextId::new("").is_err());
        assert!(ParticipantContextId::new("   ").is_err());
    }

    #[test]
    fn key_pair_id_trims_whitespace() {
        let id = KeyPairId::new("  kp-1  ").unwrap();
        assert_eq!(id.as_str(), "kp-1");
    }

    #[test]
    fn key_pair_id_random_is_unique() {
        assert_ne!(KeyPairId::random(), KeyPairId::random());
    }

    #[test]
    fn key_id_rejects_empty() {
        assert!(KeyId::new("").is_err());
    }

    #[test]
    fn identifiers_serialize_transparently() {
        let id = KeyId::new("signing-key-1").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"signing-key-1\"");

        let back: KeyId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
