//! # Asset Store Port
//!
//! The registry's backing table. The store owns the records and their id
//! assignment; the registry owns every rule about how records change.
//!
//! The store also carries a registered owner: the address of the registry
//! instance allowed to drive ownership transfers. The lookup registry's
//! reference rotation re-points this owner to the replacement registry,
//! which is how a rotated-out registry loses write authority over the
//! table it used to manage.

use crate::domain::entities::{AssetKind, AssetRecord};
use crate::errors::RegistryError;
use shared_types::{Address, AssetId};

/// Interface to one asset table.
///
/// ## Implementation Notes
///
/// - `append` assigns ids densely from 0 in insertion order; an id is
///   never reused.
/// - `get`/`put` operate on committed snapshots; callers validate on the
///   copy and commit with a single `put` (check-then-act under the
///   single-writer execution model).
pub trait AssetStore<K: AssetKind>: Send + Sync {
    /// The registry instance registered as this store's owner.
    fn owner(&self) -> Result<Address, RegistryError>;

    /// Transfer store ownership. Fails [`RegistryError::NotOwner`] unless
    /// `caller` is the current owner.
    fn change_owner(&self, caller: Address, new_owner: Address) -> Result<(), RegistryError>;

    /// Append a record, assigning the next dense id. Returns the id.
    fn append(&self, record: AssetRecord<K>) -> Result<AssetId, RegistryError>;

    /// Committed snapshot of a record. Fails [`RegistryError::NotFound`]
    /// for an unknown id.
    fn get(&self, id: AssetId) -> Result<AssetRecord<K>, RegistryError>;

    /// Commit a record. Fails [`RegistryError::NotFound`] for an unknown
    /// id; never changes the table length.
    fn put(&self, id: AssetId, record: AssetRecord<K>) -> Result<(), RegistryError>;

    /// Number of records in the table.
    fn len(&self) -> Result<usize, RegistryError>;

    /// True when no asset has been onboarded.
    fn is_empty(&self) -> Result<bool, RegistryError> {
        Ok(self.len()? == 0)
    }
}
