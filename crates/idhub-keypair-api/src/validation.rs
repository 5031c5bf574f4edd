//! # Key Descriptor Validation
//!
//! Structural validation of client-supplied [`KeyDescriptor`]s before they
//! reach a service. The validator is instantiated by the extension and
//! injected into the controllers alongside their service handles.

use idhub_core::KeyDescriptor;
use serde_json::Value;

/// Validates [`KeyDescriptor`]s submitted through the management API.
///
/// All violations are collected, not just the first, so a client can fix a
/// bad request in one round trip.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyDescriptorValidator;

impl KeyDescriptorValidator {
    /// Create a validator.
    pub fn new() -> Self {
        Self
    }

    /// Validate a descriptor, returning the joined violation messages on
    /// failure.
    pub fn validate(&self, descriptor: &KeyDescriptor) -> Result<(), String> {
        let mut violations = Vec::new();

        if descriptor.key_id.as_str().trim().is_empty() {
            violations.push("key_id must not be blank".to_string());
        }
        if descriptor.private_key_alias.trim().is_empty() {
            violations.push("private_key_alias must not be blank".to_string());
        }

        match descriptor.material_source_count() {
            0 => violations.push(
                "one of key_generator_params, public_key_jwk, public_key_pem must be set"
                    .to_string(),
            ),
            1 => {}
            _ => violations.push(
                "key_generator_params, public_key_jwk and public_key_pem are mutually exclusive"
                    .to_string(),
            ),
        }

        if let Some(jwk) = &descriptor.public_key_jwk {
            match jwk {
                Value::Object(map) => {
                    let kty_present = map
                        .get("kty")
                        .and_then(Value::as_str)
                        .map(|kty| !kty.trim().is_empty())
                        .unwrap_or(false);
                    if !kty_present {
                        violations.push("public_key_jwk must carry a non-empty kty".to_string());
                    }
                }
                _ => violations.push("public_key_jwk must be a JSON object".to_string()),
            }
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations.join("; "))
        }
    }
}
