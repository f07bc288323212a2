//! # Driven Ports
//!
//! Interfaces the lookup registry depends on. The asset registry crate
//! implements these; the dependency arrow points inward.

use crate::errors::LookupError;
use shared_types::Address;

/// Rotation surface of an asset registry, as seen by its owning lookup.
///
/// A rotation re-points the registry's backing store to a replacement
/// logic reference. Only the registry's registered owner (the lookup) may
/// drive it, and only while the registry still owns its store.
pub trait RegistryRotation: Send + Sync {
    /// Identity of this registry instance.
    fn address(&self) -> Address;

    /// True while the registry's backing store is still registered to it.
    ///
    /// Used as a pre-flight check so a paired rotation either commits for
    /// both registries or for neither.
    fn owns_store(&self) -> bool;

    /// Re-point the backing store's registered owner to `new_logic`.
    ///
    /// Fails [`LookupError::NotOwner`] unless `caller` is the registry's
    /// registered owner.
    fn rotate(&self, caller: Address, new_logic: Address) -> Result<(), LookupError>;
}
