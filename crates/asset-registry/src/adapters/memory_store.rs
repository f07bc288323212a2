//! In-memory implementation of the asset store.

use crate::domain::entities::{AssetKind, AssetRecord};
use crate::errors::RegistryError;
use crate::ports::store::AssetStore;
use shared_types::{Address, AssetId};
use std::sync::{Arc, RwLock};

/// Vector-backed asset table guarded by a `RwLock`.
///
/// Ids are vector indices, which makes them dense and non-reusable by
/// construction. Readers always observe a committed table.
pub struct InMemoryAssetStore<K: AssetKind> {
    owner: RwLock<Address>,
    assets: RwLock<Vec<AssetRecord<K>>>,
}

impl<K: AssetKind> InMemoryAssetStore<K> {
    /// Create an empty table registered to `owner` (the registry address).
    pub fn new(owner: Address) -> Self {
        Self {
            owner: RwLock::new(owner),
            assets: RwLock::new(Vec::new()),
        }
    }

    /// Create an empty table wrapped in `Arc` for shared ownership.
    pub fn new_shared(owner: Address) -> Arc<Self> {
        Arc::new(Self::new(owner))
    }

    /// Snapshot of the full table, in id order.
    pub fn snapshot(&self) -> Result<Vec<AssetRecord<K>>, RegistryError> {
        Ok(self
            .assets
            .read()
            .map_err(|_| RegistryError::StorePoisoned)?
            .clone())
    }
}

impl<K: AssetKind> AssetStore<K> for InMemoryAssetStore<K> {
    fn owner(&self) -> Result<Address, RegistryError> {
        Ok(*self.owner.read().map_err(|_| RegistryError::StorePoisoned)?)
    }

    fn change_owner(&self, caller: Address, new_owner: Address) -> Result<(), RegistryError> {
        let mut owner = self
            .owner
            .write()
            .map_err(|_| RegistryError::StorePoisoned)?;
        if caller != *owner {
            return Err(RegistryError::NotOwner { caller });
        }
        *owner = new_owner;
        Ok(())
    }

    fn append(&self, mut record: AssetRecord<K>) -> Result<AssetId, RegistryError> {
        let mut assets = self
            .assets
            .write()
            .map_err(|_| RegistryError::StorePoisoned)?;
        let id = assets.len() as AssetId;
        record.id = id;
        assets.push(record);
        Ok(id)
    }

    fn get(&self, id: AssetId) -> Result<AssetRecord<K>, RegistryError> {
        let assets = self
            .assets
            .read()
            .map_err(|_| RegistryError::StorePoisoned)?;
        assets
            .get(id as usize)
            .cloned()
            .ok_or(RegistryError::NotFound(id))
    }

    fn put(&self, id: AssetId, record: AssetRecord<K>) -> Result<(), RegistryError> {
        let mut assets = self
            .assets
            .write()
            .map_err(|_| RegistryError::StorePoisoned)?;
        let slot = assets
            .get_mut(id as usize)
            .ok_or(RegistryError::NotFound(id))?;
        *slot = record;
        Ok(())
    }

    fn len(&self) -> Result<usize, RegistryError> {
        Ok(self
            .assets
            .read()
            .map_err(|_| RegistryError::StorePoisoned)?
            .len())
    }
}
