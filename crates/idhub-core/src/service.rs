//! # Service Contracts
//!
//! The trait seams between the API extensions and the host-owned services.
//! Implementations own persistence and thread safety; the contract is
//! synchronous and object-safe so it can sit behind an `Arc<dyn _>` inside
//! async handlers without holding locks across await points.

use crate::descriptor::KeyDescriptor;
use crate::error::ServiceResult;
use crate::identity::{KeyPairId, ParticipantContextId};
use crate::query::QuerySpec;
use crate::resource::KeyPairResource;

/// Management operations over key-pair resources.
///
/// `query` failures are service-level faults, distinct from an empty result
/// set; lifecycle operations report unknown ids as `NotFound` and illegal
/// transitions as `Conflict`.
pub trait KeyPairService: Send + Sync {
    /// Execute a query and return all matching records.
    fn query(&self, query: &QuerySpec) -> ServiceResult<Vec<KeyPairResource>>;

    /// Add a new key pair for a participant from a validated descriptor.
    ///
    /// Returns the stored record. `make_default` moves the participant's
    /// default-pair flag onto the new record.
    fn add_key_pair(
        &self,
        participant: &ParticipantContextId,
        descriptor: KeyDescriptor,
        make_default: bool,
    ) -> ServiceResult<KeyPairResource>;

    /// Activate a created key pair.
    fn activate(&self, key_pair_id: &KeyPairId) -> ServiceResult<()>;

    /// Rotate a key pair out, optionally adding a successor.
    ///
    /// `duration_millis` is the grace period during which the rotated key
    /// remains resolvable.
    fn rotate_key_pair(
        &self,
        key_pair_id: &KeyPairId,
        successor: Option<KeyDescriptor>,
        duration_millis: i64,
    ) -> ServiceResult<()>;

    /// Revoke a key pair, optionally adding a successor.
    fn revoke_key_pair(
        &self,
        key_pair_id: &KeyPairId,
        successor: Option<KeyDescriptor>,
    ) -> ServiceResult<()>;
}
