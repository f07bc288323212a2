//! Adapters: in-memory implementations of the driven ports, plus the
//! in-memory role directory standing in for the external directory.

pub mod audit_log;
pub mod memory_store;
pub mod role_directory;

pub use audit_log::{AuditEntry, InMemoryAuditLog};
pub use memory_store::InMemoryAssetStore;
pub use role_directory::InMemoryRoleDirectory;
