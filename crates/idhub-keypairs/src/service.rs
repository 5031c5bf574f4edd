//! # In-Memory Key-Pair Service
//!
//! The reference [`KeyPairService`] implementation: a thread-safe,
//! clone-shared map of key-pair records. All operations are synchronous
//! (the lock is `parking_lot`, not `tokio::sync`) because the lock is
//! never held across `.await` points; `parking_lot::RwLock` is
//! non-poisonable, so a panicking writer does not corrupt the store.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use idhub_core::{
    KeyDescriptor, KeyPairId, KeyPairResource, KeyPairService, KeyPairState,
    ParticipantContextId, QuerySpec, ServiceResult,
};
use parking_lot::RwLock;

use crate::lifecycle::{self, KeyPairError};
use crate::{filter, material};

/// Default intended-usage duration for new pairs: 180 days.
pub const DEFAULT_USE_DURATION_MILLIS: i64 = 180 * 24 * 60 * 60 * 1000;

/// Thread-safe in-memory [`KeyPairService`].
///
/// Clones share the underlying store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryKeyPairService {
    store: Arc<RwLock<HashMap<KeyPairId, KeyPairResource>>>,
}

impl InMemoryKeyPairService {
    /// Create an empty service.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record directly, bypassing descriptor resolution.
    ///
    /// Bootstrap/test helper; returns the previous record under the same id.
    pub fn seed(&self, record: KeyPairResource) -> Option<KeyPairResource> {
        self.store.write().insert(record.id.clone(), record)
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.store.read().len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Insert a new pair built from a descriptor. Requires the write lock.
    fn insert_new(
        map: &mut HashMap<KeyPairId, KeyPairResource>,
        participant: &ParticipantContextId,
        descriptor: KeyDescriptor,
        make_default: bool,
    ) -> ServiceResult<KeyPairResource> {
        let duplicate = map.values().any(|record| {
            record.participant_context_id == *participant && record.key_id == descriptor.key_id
        });
        if duplicate {
            return Err(KeyPairError::DuplicateKeyId {
                participant: participant.clone(),
                key_id: descriptor.key_id.clone(),
            }
            .into());
        }

        let serialized_public_key = material::resolve_public_key(&descriptor)?;
        let now = Utc::now();

        if make_default {
            for record in map.values_mut() {
                if record.participant_context_id == *participant && record.is_default_pair {
                    record.is_default_pair = false;
                    record.updated_at = now;
                }
            }
        }

        let record = KeyPairResource {
            id: KeyPairId::random(),
            participant_context_id: participant.clone(),
            key_id: descriptor.key_id,
            group_name: descriptor.group_name,
            is_default_pair: make_default,
            state: if descriptor.active {
                KeyPairState::Activated
            } else {
                KeyPairState::Created
            },
            serialized_public_key,
            private_key_alias: descriptor.private_key_alias,
            use_duration_millis: DEFAULT_USE_DURATION_MILLIS,
            rotation_duration_millis: None,
            created_at: now,
            updated_at: now,
        };

        map.insert(record.id.clone(), record.clone());
        tracing::debug!(
            key_pair_id = %record.id,
            participant = %record.participant_context_id,
            state = %record.state,
            "key pair added"
        );
        Ok(record)
    }

    /// Snapshot the current state of a pair needed before a transition.
    fn snapshot(
        map: &HashMap<KeyPairId, KeyPairResource>,
        id: &KeyPairId,
    ) -> Result<(ParticipantContextId, KeyPairState, bool), KeyPairError> {
        map.get(id)
            .map(|record| {
                (
                    record.participant_context_id.clone(),
                    record.state,
                    record.is_default_pair,
                )
            })
            .ok_or_else(|| KeyPairError::NotFound { id: id.clone() })
    }
}

impl KeyPairService for InMemoryKeyPairService {
    fn query(&self, query: &QuerySpec) -> ServiceResult<Vec<KeyPairResource>> {
        let snapshot: Vec<KeyPairResource> = self.store.read().values().cloned().collect();
        filter::apply(snapshot, query)
    }

    fn add_key_pair(
        &self,
        participant: &ParticipantContextId,
        descriptor: KeyDescriptor,
        make_default: bool,
    ) -> ServiceResult<KeyPairResource> {
        let mut map = self.store.write();
        Self::insert_new(&mut map, participant, descriptor, make_default)
    }

    fn activate(&self, key_pair_id: &KeyPairId) -> ServiceResult<()> {
        let mut map = self.store.write();
        let (_, current, _) = Self::snapshot(&map, key_pair_id)?;
        let next = lifecycle::transition(current, KeyPairState::Activated)?;

        if let Some(record) = map.get_mut(key_pair_id) {
            record.state = next;
            record.updated_at = Utc::now();
            tracing::debug!(key_pair_id = %record.id, "key pair activated");
        }
        Ok(())
    }

    fn rotate_key_pair(
        &self,
        key_pair_id: &KeyPairId,
        successor: Option<KeyDescriptor>,
        duration_millis: i64,
    ) -> ServiceResult<()> {
        let mut map = self.store.write();
        let (participant, current, was_default) = Self::snapshot(&map, key_pair_id)?;
        let next = lifecycle::transition(current, KeyPairState::Rotated)?;

        // Insert the successor before committing the rotation so a rejected
        // successor (duplicate key id, bad material) leaves the pair intact.
        let has_successor = successor.is_some();
        if let Some(descriptor) = successor {
            Self::insert_new(&mut map, &participant, descriptor, was_default)?;
        }

        if let Some(record) = map.get_mut(key_pair_id) {
            record.state = next;
            record.rotation_duration_millis = Some(duration_millis);
            if has_successor {
                record.is_default_pair = false;
            }
            record.updated_at = Utc::now();
            tracing::debug!(
                key_pair_id = %record.id,
                grace_millis = duration_millis,
                successor = has_successor,
                "key pair rotated"
            );
        }
        Ok(())
    }

    fn revoke_key_pair(
        &self,
        key_pair_id: &KeyPairId,
        successor: Option<KeyDescriptor>,
    ) -> ServiceResult<()> {
        let mut map = self.store.write();
        let (participant, current, was_default) = Self::snapshot(&map, key_pair_id)?;
        let next = lifecycle::transition(current, KeyPairState::Revoked)?;

        let has_successor = successor.is_some();
        if let Some(descriptor) = successor {
            Self::insert_new(&mut map, &participant, descriptor, was_default)?;
        }

        if let Some(record) = map.get_mut(key_pair_id) {
            record.state = next;
            record.is_default_pair = false;
            record.updated_at = Utc::now();
            tracing::debug!(
                key_pair_id = %record.id,
                successor = has_successor,
                "key pair revoked"
            );
        }
        Ok(())
    }
}
