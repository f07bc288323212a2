//! # Centralized Role-Based Access Control
//!
//! This module provides the **single, authoritative implementation** of the
//! role checks performed by every mutating registry operation.
//!
//! ## Design Rationale
//!
//! Role policy is delegated to an external role directory; the registries
//! only ever ask "does account X hold role R". Centralizing the query
//! surface here means:
//! 1. All registries use the SAME capability-check code
//! 2. Policy evolution happens in one place (the directory behind the
//!    gateway), never inside an operation
//! 3. The test suite only needs to stub ONE interface
//!
//! ## Role Model
//!
//! An account may hold any combination of roles; the directory treats the
//! combination as a bitmask union and `has_role` as set membership.

use crate::entities::Address;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

// =============================================================================
// ROLE TAXONOMY
// =============================================================================

/// The roles recognized by the registry surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Administrative rights over the directory itself.
    Admin,
    /// May onboard assets, toggle their activity, and swap smart meters.
    AssetManager,
    /// May manage a single asset's matcher list and market lookup reference.
    AssetOwner,
}

impl Role {
    /// Bit assigned to this role in a [`RoleSet`] mask.
    pub const fn mask(self) -> u8 {
        match self {
            Role::Admin => 1 << 0,
            Role::AssetManager => 1 << 1,
            Role::AssetOwner => 1 << 2,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::Admin => "Admin",
            Role::AssetManager => "AssetManager",
            Role::AssetOwner => "AssetOwner",
        };
        f.write_str(name)
    }
}

/// A bitmask union of [`Role`]s held by one account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RoleSet(u8);

impl RoleSet {
    /// The empty set.
    pub const EMPTY: RoleSet = RoleSet(0);

    /// Build a set from a slice of roles.
    pub fn of(roles: &[Role]) -> Self {
        roles.iter().copied().collect()
    }

    /// Add a role to the set.
    pub fn insert(&mut self, role: Role) {
        self.0 |= role.mask();
    }

    /// Remove a role from the set.
    pub fn remove(&mut self, role: Role) {
        self.0 &= !role.mask();
    }

    /// Set membership test.
    pub fn contains(&self, role: Role) -> bool {
        self.0 & role.mask() != 0
    }

    /// True when no role is held.
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Union of two sets.
    pub fn union(self, other: RoleSet) -> RoleSet {
        RoleSet(self.0 | other.0)
    }

    /// Raw bitmask value.
    pub const fn bits(self) -> u8 {
        self.0
    }
}

impl From<Role> for RoleSet {
    fn from(role: Role) -> Self {
        RoleSet(role.mask())
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
        let mut set = RoleSet::EMPTY;
        for role in iter {
            set.insert(role);
        }
        set
    }
}

// =============================================================================
// ROLE DIRECTORY & GATEWAY
// =============================================================================

/// The external role directory consulted for every role check.
///
/// Implementations answer the pure membership query; they hold no registry
/// state and the registries hold no role state.
pub trait RoleDirectory: Send + Sync {
    /// Does `account` hold `role`?
    fn has_role(&self, account: Address, role: Role) -> bool;
}

/// Capability check used by every mutating registry operation.
///
/// The gateway holds a reference snapshot of the role directory, resolved
/// once at wiring time. Checks are performed before any state is touched
/// (check-then-act): a failed `enforce` means the operation never began.
#[derive(Clone)]
pub struct AccessGateway {
    directory: Arc<dyn RoleDirectory>,
}

impl AccessGateway {
    /// Create a gateway over the given directory reference.
    pub fn new(directory: Arc<dyn RoleDirectory>) -> Self {
        Self { directory }
    }

    /// Delegated membership query.
    pub fn has_role(&self, account: Address, role: Role) -> bool {
        self.directory.has_role(account, role)
    }

    /// Fail with [`AccessError::MissingRole`] unless `account` holds `role`.
    pub fn enforce(&self, account: Address, role: Role) -> Result<(), AccessError> {
        if self.has_role(account, role) {
            Ok(())
        } else {
            Err(AccessError::MissingRole { account, role })
        }
    }
}

impl fmt::Debug for AccessGateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessGateway").finish_non_exhaustive()
    }
}

/// Errors from the access gateway.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    /// The directory does not list the account under the required role.
    #[error("account {account} does not hold the required role {role}")]
    MissingRole { account: Address, role: Role },
}
