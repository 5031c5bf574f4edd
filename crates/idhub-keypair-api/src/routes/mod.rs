//! # Management API Route Modules
//!
//! - `key_pairs` — participant-scoped key-pair controller: find, list,
//!   add, activate, rotate, revoke.
//! - `all_key_pairs` — hub-wide key-pair listing for admins, paged.
//!
//! Routers are built by the extension with their dependencies baked in and
//! registered into the management web context; handlers delegate all
//! lifecycle logic to the injected [`KeyPairService`](idhub_core::KeyPairService).

pub mod all_key_pairs;
pub mod key_pairs;
