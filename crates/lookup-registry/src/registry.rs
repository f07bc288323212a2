//! # Lookup Registry Service
//!
//! One instance per deployment. The wiring process constructs it, calls
//! [`LookupRegistry::init`] exactly once with the collaborator references,
//! and binds the rotation handles that make the owner-gated `update` path
//! able to re-point store ownership.
//!
//! All state lives behind a single `RwLock`; reads observe only committed
//! states and every mutating operation validates before it writes.

use crate::errors::LookupError;
use crate::ports::RegistryRotation;
use serde::{Deserialize, Serialize};
use shared_types::Address;
use std::sync::{Arc, RwLock};
use tracing::{info, warn};

/// The five collaborator references recorded at `init`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LookupRefs {
    /// The external role directory answering `has_role` queries.
    pub role_directory: Address,
    /// The producing-asset registry.
    pub producing_registry: Address,
    /// The consuming-asset registry.
    pub consuming_registry: Address,
    /// Backing store of the producing registry.
    pub producing_store: Address,
    /// Backing store of the consuming registry.
    pub consuming_store: Address,
}

/// Rotation handles bound once after `init`.
///
/// The in-process analog of "an address resolves to deployed logic": the
/// wiring hands over the live handles matching the recorded references.
struct Rotations {
    producing: Arc<dyn RegistryRotation>,
    consuming: Arc<dyn RegistryRotation>,
}

struct LookupState {
    owner: Address,
    initialized: bool,
    refs: LookupRefs,
    rotations: Option<Rotations>,
}

/// Process-wide table of collaborator references with owner-gated updates.
pub struct LookupRegistry {
    address: Address,
    state: RwLock<LookupState>,
}

impl LookupRegistry {
    /// Create an uninitialized lookup with the given identity and owner.
    pub fn new(address: Address, owner: Address) -> Self {
        Self {
            address,
            state: RwLock::new(LookupState {
                owner,
                initialized: false,
                refs: LookupRefs::default(),
                rotations: None,
            }),
        }
    }

    /// Identity of this lookup instance.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Record the collaborator references. Succeeds exactly once.
    pub fn init(&self, caller: Address, refs: LookupRefs) -> Result<(), LookupError> {
        let mut state = self.write()?;
        if caller != state.owner {
            warn!(%caller, "init rejected: caller is not the owner");
            return Err(LookupError::NotOwner { caller });
        }
        if state.initialized {
            warn!(%caller, "init rejected: already initialized");
            return Err(LookupError::AlreadyInitialized);
        }
        state.refs = refs;
        state.initialized = true;
        info!(
            lookup = %self.address,
            role_directory = %refs.role_directory,
            producing_registry = %refs.producing_registry,
            consuming_registry = %refs.consuming_registry,
            "lookup registry initialized"
        );
        Ok(())
    }

    /// Bind the live rotation handles matching the recorded references.
    ///
    /// Performed by the wiring process directly after `init`; each handle's
    /// identity must equal the stored reference.
    pub fn bind_rotations(
        &self,
        producing: Arc<dyn RegistryRotation>,
        consuming: Arc<dyn RegistryRotation>,
    ) -> Result<(), LookupError> {
        let mut state = self.write()?;
        if !state.initialized {
            return Err(LookupError::NotInitialized);
        }
        if state.rotations.is_some() {
            return Err(LookupError::AlreadyBound);
        }
        if producing.address() != state.refs.producing_registry {
            return Err(LookupError::RotationMismatch {
                expected: state.refs.producing_registry,
                got: producing.address(),
            });
        }
        if consuming.address() != state.refs.consuming_registry {
            return Err(LookupError::RotationMismatch {
                expected: state.refs.consuming_registry,
                got: consuming.address(),
            });
        }
        state.rotations = Some(Rotations {
            producing,
            consuming,
        });
        Ok(())
    }

    /// Replace both registry references, re-pointing each backing store's
    /// registered owner to the corresponding new reference.
    ///
    /// The store re-point is a required side effect: both rotations are
    /// pre-flight checked so the pair commits for both registries or for
    /// neither.
    pub fn update(
        &self,
        caller: Address,
        new_producing: Address,
        new_consuming: Address,
    ) -> Result<(), LookupError> {
        let mut state = self.write()?;
        if caller != state.owner {
            warn!(%caller, "update rejected: caller is not the owner");
            return Err(LookupError::NotOwner { caller });
        }
        let rotations = state.rotations.as_ref().ok_or(LookupError::RotationsUnbound)?;

        if !rotations.producing.owns_store() {
            return Err(LookupError::StoreNotOwned {
                registry: rotations.producing.address(),
            });
        }
        if !rotations.consuming.owns_store() {
            return Err(LookupError::StoreNotOwned {
                registry: rotations.consuming.address(),
            });
        }

        // The registries' registered owner is this lookup's address.
        rotations.producing.rotate(self.address, new_producing)?;
        rotations.consuming.rotate(self.address, new_consuming)?;

        state.refs.producing_registry = new_producing;
        state.refs.consuming_registry = new_consuming;
        info!(
            lookup = %self.address,
            %new_producing,
            %new_consuming,
            "registry references rotated"
        );
        Ok(())
    }

    /// Transfer lookup ownership.
    pub fn change_owner(&self, caller: Address, new_owner: Address) -> Result<(), LookupError> {
        let mut state = self.write()?;
        if caller != state.owner {
            warn!(%caller, "change_owner rejected: caller is not the owner");
            return Err(LookupError::NotOwner { caller });
        }
        state.owner = new_owner;
        info!(lookup = %self.address, %new_owner, "lookup ownership transferred");
        Ok(())
    }

    // =========================================================================
    // READ ACCESSORS
    // =========================================================================

    /// Current owner account.
    pub fn owner(&self) -> Result<Address, LookupError> {
        Ok(self.read()?.owner)
    }

    /// Whether `init` has completed.
    pub fn initialized(&self) -> Result<bool, LookupError> {
        Ok(self.read()?.initialized)
    }

    /// Snapshot of the recorded references.
    pub fn refs(&self) -> Result<LookupRefs, LookupError> {
        Ok(self.read()?.refs)
    }

    /// Recorded role directory reference.
    pub fn role_directory(&self) -> Result<Address, LookupError> {
        Ok(self.read()?.refs.role_directory)
    }

    /// Recorded producing registry reference.
    pub fn producing_registry(&self) -> Result<Address, LookupError> {
        Ok(self.read()?.refs.producing_registry)
    }

    /// Recorded consuming registry reference.
    pub fn consuming_registry(&self) -> Result<Address, LookupError> {
        Ok(self.read()?.refs.consuming_registry)
    }

    /// Recorded producing store reference.
    pub fn producing_store(&self) -> Result<Address, LookupError> {
        Ok(self.read()?.refs.producing_store)
    }

    /// Recorded consuming store reference.
    pub fn consuming_store(&self) -> Result<Address, LookupError> {
        Ok(self.read()?.refs.consuming_store)
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, LookupState>, LookupError> {
        self.state.read().map_err(|_| LookupError::StatePoisoned)
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, LookupState>, LookupError> {
        self.state.write().map_err(|_| LookupError::StatePoisoned)
    }
}
