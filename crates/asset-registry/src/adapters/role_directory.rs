//! In-memory role directory.
//!
//! Stands in for the external directory during wiring and tests. The real
//! deployment points the gateway at the production directory instead; the
//! registries cannot tell the difference.

use shared_types::{Address, Role, RoleDirectory, RoleSet};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Map-backed role directory with an administrative write surface.
pub struct InMemoryRoleDirectory {
    roles: RwLock<HashMap<Address, RoleSet>>,
}

impl InMemoryRoleDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self {
            roles: RwLock::new(HashMap::new()),
        }
    }

    /// Create an empty directory wrapped in `Arc` for shared ownership.
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Replace the full role set of an account.
    pub fn set_roles(&self, account: Address, roles: RoleSet) {
        if let Ok(mut map) = self.roles.write() {
            map.insert(account, roles);
        }
    }

    /// Add one role to an account.
    pub fn grant(&self, account: Address, role: Role) {
        if let Ok(mut map) = self.roles.write() {
            map.entry(account).or_default().insert(role);
        }
    }

    /// Remove one role from an account.
    pub fn revoke(&self, account: Address, role: Role) {
        if let Ok(mut map) = self.roles.write() {
            if let Some(set) = map.get_mut(&account) {
                set.remove(role);
            }
        }
    }

    /// The role set currently held by an account.
    pub fn roles_of(&self, account: Address) -> RoleSet {
        self.roles
            .read()
            .ok()
            .and_then(|map| map.get(&account).copied())
            .unwrap_or_default()
    }
}

impl Default for InMemoryRoleDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl RoleDirectory for InMemoryRoleDirectory {
    fn has_role(&self, account: Address, role: Role) -> bool {
        // A poisoned directory denies everything; denial is the safe side.
        self.roles
            .read()
            .map(|map| map.get(&account).is_some_and(|set| set.contains(role)))
            .unwrap_or(false)
    }
}
