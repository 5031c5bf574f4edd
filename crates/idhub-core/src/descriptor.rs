//! # Key Descriptors
//!
//! A [`KeyDescriptor`] is the client-supplied description of a key pair to
//! add (or rotate to). It either carries public key material directly (JWK
//! or PEM) or asks the service to generate a pair via
//! [`KeyGeneratorParams`]. Structural validation lives in the API layer;
//! this crate only defines the shape.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::identity::KeyId;

/// Key generation algorithms the hub can produce locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum KeyAlgorithm {
    /// Ed25519 signature keys (RFC 8037 `OKP` keys).
    Ed25519,
}

impl KeyAlgorithm {
    /// Return the string representation of this algorithm.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ed25519 => "ED25519",
        }
    }
}

impl std::fmt::Display for KeyAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters for server-side key generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct KeyGeneratorParams {
    /// Algorithm to generate a pair for.
    pub algorithm: KeyAlgorithm,
}

/// Client-supplied description of a key pair.
///
/// Exactly one key-material source must be set: `key_generator_params`,
/// `public_key_jwk`, or `public_key_pem`. The API layer's descriptor
/// validator enforces this before the descriptor reaches a service.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct KeyDescriptor {
    /// Public key id (`kid`) to publish for the new pair.
    pub key_id: KeyId,
    /// Vault alias under which the private half is (or will be) filed.
    pub private_key_alias: String,
    /// Optional grouping label carried onto the resource.
    #[serde(default)]
    pub group_name: Option<String>,
    /// Ask the service to generate the pair.
    #[serde(default)]
    pub key_generator_params: Option<KeyGeneratorParams>,
    /// Provide the public key as a JWK object.
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub public_key_jwk: Option<serde_json::Value>,
    /// Provide the public key as PEM text.
    #[serde(default)]
    pub public_key_pem: Option<String>,
    /// Activate the pair immediately instead of leaving it `CREATED`.
    #[serde(default)]
    pub active: bool,
}

impl KeyDescriptor {
    /// The number of key-material sources set on this descriptor.
    pub fn material_source_count(&self) -> usize {
        [
            self.key_generator_params.is_some(),
            self.public_key_jwk.is_some(),
            self.public_key_pem.is_some(),
        ]
        .iter()
        .filter(|set| **set)
        .count()
    }
}
