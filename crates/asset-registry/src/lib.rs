//! # Asset Registry - Role-Gated Asset Tables
//!
//! ## Purpose
//!
//! Tracks physical energy-producing and energy-consuming assets, each backed
//! by a remote metering device, and maintains an auditable, role-gated record
//! of their configuration, ownership, activity state, and cumulative reading
//! history. One registry instance manages one table of one asset kind; a
//! deployment runs a producing and a consuming instance side by side, wired
//! together through the lookup registry.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | Ids are dense and strictly increasing, never reused | `adapters/memory_store.rs` - `append` |
//! | Meter reads (and CO2 offsets) never regress | `service.rs` - `save_read_internal` |
//! | Matcher lists are bounded and duplicate-free | `domain/matcher.rs` - `MatcherSet::insert` |
//! | Readings are accepted only while the asset is active | `service.rs` - `save_read_internal` |
//! | The certificate quantity tracks the latest accepted delta (producing) | `domain/entities.rs` - `Producing::apply_read` |
//!
//! ## Execution Model
//!
//! Mutating operations are check-then-act: every authorization and domain
//! validation runs before any state is touched, and a failed operation
//! leaves no observable change. Operations assume the single-writer,
//! fully-serialized execution model of the deployment; reads are served
//! concurrently from committed snapshots.
//!
//! ## Usage Example
//!
//! ```ignore
//! use asset_registry::prelude::*;
//!
//! let id = registry.create_asset(manager, new_asset, 2)?;
//! registry.save_smart_meter_read(meter, id, 100, false, "read-v1", extra)?;
//! let record = registry.asset(id)?;
//! assert_eq!(record.last_read_wh, 100);
//! ```

pub mod adapters;
pub mod domain;
pub mod errors;
pub mod events;
pub mod ports;
pub mod service;

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::adapters::{InMemoryAssetStore, InMemoryAuditLog, InMemoryRoleDirectory};
    pub use crate::domain::entities::{
        AssetKind, AssetRecord, Consuming, ConsumingDetails, NewAsset, Producing,
        ProducingDetails, ProducingReadExtra,
    };
    pub use crate::domain::matcher::MatcherSet;
    pub use crate::errors::RegistryError;
    pub use crate::events::{AuditEvent, AuditEventKind};
    pub use crate::ports::{AssetStore, AuditSink};
    pub use crate::service::{
        AssetRegistry, ConsumingRegistry, ProducingRegistry, RegistryConfig, RegistryStats,
    };
    pub use shared_types::{AccessGateway, Address, AssetId, Role, RoleSet};
}

pub use domain::entities::{AssetKind, AssetRecord, Consuming, NewAsset, Producing};
pub use errors::RegistryError;
pub use events::{AuditEvent, AuditEventKind};
pub use service::{AssetRegistry, ConsumingRegistry, ProducingRegistry, RegistryConfig};
