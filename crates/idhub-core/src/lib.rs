#![deny(missing_docs)]

//! # idhub-core — Foundational Types for the Identity Hub
//!
//! This crate defines the types every other crate in the workspace depends
//! on. It has no internal crate dependencies — only `serde`, `serde_json`,
//! `thiserror`, `chrono`, `uuid`, and `utoipa` from the external ecosystem.
//!
//! ## Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** Every identifier is a
//!    distinct type. You cannot pass a [`KeyId`] where a [`KeyPairId`] is
//!    expected.
//!
//! 2. **Contracts at the seams.** The API extensions consume services
//!    through the [`KeyPairService`] trait and never through a concrete
//!    store, so a vault-backed or database-backed implementation can be
//!    swapped in without touching the web layer.
//!
//! 3. **[`ServiceError`] taxonomy.** A lookup miss is `Ok(None)`; a failed
//!    operation is a structured error with `thiserror` — no
//!    `Box<dyn Error>`, no `.unwrap()` outside tests.

pub mod descriptor;
pub mod error;
pub mod identity;
pub mod query;
pub mod resource;
pub mod service;

// Re-export primary types at crate root for ergonomic imports.
pub use descriptor::{KeyAlgorithm, KeyDescriptor, KeyGeneratorParams};
pub use error::{ServiceError, ServiceErrorKind, ServiceResult};
pub use identity::{KeyId, KeyPairId, ParticipantContextId};
pub use query::{Criterion, CriterionOperator, QuerySpec, QuerySpecBuilder, SortOrder};
pub use resource::{KeyPairResource, KeyPairState, ParticipantResource};
pub use service::KeyPairService;
