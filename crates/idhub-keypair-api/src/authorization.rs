//! # Authorization Service
//!
//! Ownership-based access control over participant resources. Extensions
//! register a reverse-lookup function per resource type at initialization;
//! [`AuthorizationService::is_authorized`] resolves the addressed resource
//! through it and compares the owning participant context against the
//! caller's binding.
//!
//! The lookup table is written only during initialization and read on every
//! request, so a `parking_lot::RwLock` fits without contention concerns.

use std::any::TypeId;
use std::collections::HashMap;
use std::sync::Arc;

use idhub_core::{ParticipantResource, ServiceError, ServiceResult};
use parking_lot::RwLock;

use crate::auth::CallerIdentity;

/// Reverse lookup from a resource id to the owning resource.
///
/// Returns `Ok(None)` when no resource carries the id (a miss, not a
/// failure) and `Err` when the lookup itself could not be executed.
pub type ResourceLookupFn =
    Arc<dyn Fn(&str) -> ServiceResult<Option<Box<dyn ParticipantResource>>> + Send + Sync>;

/// Registry of per-resource-type lookup functions plus the ownership check.
#[derive(Default)]
pub struct AuthorizationService {
    lookups: RwLock<HashMap<TypeId, ResourceLookupFn>>,
}

impl AuthorizationService {
    /// Create an empty service with no registered lookups.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the lookup function for resource type `T`.
    ///
    /// A later registration for the same type replaces the earlier one.
    pub fn register_lookup<T: 'static>(&self, lookup: ResourceLookupFn) {
        self.lookups.write().insert(TypeId::of::<T>(), lookup);
        tracing::debug!(
            resource_type = std::any::type_name::<T>(),
            "authorization lookup registered"
        );
    }

    /// Whether a lookup is registered for resource type `T`.
    pub fn has_lookup<T: 'static>(&self) -> bool {
        self.lookups.read().contains_key(&TypeId::of::<T>())
    }

    /// Check that `caller` may access the resource of type `T` with the
    /// given id.
    ///
    /// Admins pass unconditionally. Otherwise the registered lookup runs:
    /// a lookup failure propagates as-is, a miss is `NotFound`, and a hit
    /// passes only when the owning participant context matches the
    /// caller's binding.
    pub fn is_authorized<T: 'static>(
        &self,
        caller: &CallerIdentity,
        resource_id: &str,
    ) -> ServiceResult<()> {
        if caller.is_admin() {
            return Ok(());
        }

        let lookup = self
            .lookups
            .read()
            .get(&TypeId::of::<T>())
            .cloned()
            .ok_or_else(|| {
                ServiceError::internal(format!(
                    "no authorization lookup registered for {}",
                    std::any::type_name::<T>()
                ))
            })?;

        match lookup(resource_id)? {
            None => Err(ServiceError::not_found(format!(
                "resource {resource_id} not found"
            ))),
            Some(resource) => {
                let owner = resource.participant_context_id();
                if caller.participant_context_id.as_ref() == Some(owner) {
                    Ok(())
                } else {
                    Err(ServiceError::unauthorized(format!(
                        "caller is not the owner of resource {resource_id}"
                    )))
                }
            }
        }
    }
}

impl std::fmt::Debug for AuthorizationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthorizationService")
            .field("registered_lookups", &self.lookups.read().len())
            .finish()
    }
}
