//! # Lookup Registry - Collaborator Wiring Subsystem
//!
//! ## Purpose
//!
//! Holds the process-wide table of collaborator references for one deployed
//! registry instance: the role directory, the producing and consuming asset
//! registries, and their backing stores. The table is written exactly once
//! at wiring time (`init`) and thereafter changes only through the
//! owner-gated `update` path, which also re-points each backing store's
//! registered owner to the replacement registry reference.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | `init` succeeds exactly once | `registry.rs` - `LookupRegistry::init` |
//! | References change only via owner-gated `update` | `registry.rs` - `LookupRegistry::update` |
//! | Rotation re-points store ownership atomically | `registry.rs` - pre-flight `owns_store` check |
//! | Ownership transfers only by the current owner | `registry.rs` - `LookupRegistry::change_owner` |
//!
//! ## Dependency Direction
//!
//! This crate is a leaf: it depends only on `shared-types`. The asset
//! registry crate implements the [`ports::RegistryRotation`] port and
//! depends on this crate, never the other way around.

pub mod errors;
pub mod ports;
pub mod registry;

pub use errors::LookupError;
pub use ports::RegistryRotation;
pub use registry::{LookupRefs, LookupRegistry};
