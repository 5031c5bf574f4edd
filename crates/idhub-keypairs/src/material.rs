//! # Key Material Resolution
//!
//! Turns a [`KeyDescriptor`] into the serialized public key stored on the
//! resource. Caller-supplied JWK/PEM material passes through unchanged;
//! generator params produce a fresh Ed25519 pair whose public half is
//! serialized as an RFC 8037 `OKP` JWK.
//!
//! The generated private half is dropped at the end of generation — a
//! vault-backed service would file it under the descriptor's
//! `private_key_alias` instead. Nothing in this workspace retains private
//! key bytes.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use ed25519_dalek::SigningKey;
use idhub_core::{KeyAlgorithm, KeyDescriptor, KeyId, ServiceError, ServiceResult};
use rand_core::OsRng;

/// Resolve the serialized public key for a descriptor.
///
/// Exactly one material source must be set; the API layer's validator
/// guarantees this, but the check is repeated here so the service stays
/// safe when called directly.
pub fn resolve_public_key(descriptor: &KeyDescriptor) -> ServiceResult<String> {
    if descriptor.material_source_count() != 1 {
        return Err(ServiceError::bad_request(
            "descriptor must carry exactly one key material source",
        ));
    }

    if let Some(params) = &descriptor.key_generator_params {
        return Ok(match params.algorithm {
            KeyAlgorithm::Ed25519 => generate_ed25519_jwk(&descriptor.key_id),
        });
    }

    if let Some(jwk) = &descriptor.public_key_jwk {
        return serde_json::to_string(jwk)
            .map_err(|e| ServiceError::internal(format!("failed to serialize JWK: {e}")));
    }

    // material_source_count() == 1 leaves only the PEM branch.
    descriptor
        .public_key_pem
        .clone()
        .ok_or_else(|| ServiceError::internal("descriptor material source disappeared"))
}

/// Generate a fresh Ed25519 pair and serialize the public half as a JWK.
fn generate_ed25519_jwk(key_id: &KeyId) -> String {
    let signing_key = SigningKey::generate(&mut OsRng);
    let public = URL_SAFE_NO_PAD.encode(signing_key.verifying_key().to_bytes());

    serde_json::json!({
        "kty": "OKP",
        "crv": "Ed25519",
        "kid": key_id.as_str(),
        "x": public,
    })
    .to_string()
}
