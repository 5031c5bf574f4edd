//! # idhub-keypairs — Key-Pair Domain Logic
//!
//! The domain crate behind the key-pair management API:
//!
//! - **Lifecycle** — legal state transitions for
//!   [`KeyPairState`](idhub_core::KeyPairState), with structured errors for
//!   illegal ones.
//! - **Key material** — resolving a [`KeyDescriptor`](idhub_core::KeyDescriptor)
//!   into serialized public key material, including server-side Ed25519
//!   generation.
//! - **[`InMemoryKeyPairService`]** — the reference
//!   [`KeyPairService`](idhub_core::KeyPairService) implementation backing
//!   the development runtime and the test suites. Query evaluation for it
//!   lives in [`filter`].
//!
//! Route handlers carry no business logic; everything lifecycle-shaped
//! happens here.

pub mod filter;
pub mod lifecycle;
pub mod material;
pub mod service;

pub use lifecycle::KeyPairError;
pub use service::InMemoryKeyPairService;
