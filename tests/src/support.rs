//! Deployment fixture.
//!
//! Wires a complete registry stack the way a production deployment does:
//! role directory first, then the lookup, the two registries with their
//! stores and audit logs, then `init` exactly once and the rotation
//! binding. Tests receive handles to every component so they can assert on
//! stores and audit trails directly.

use asset_registry::adapters::{InMemoryAssetStore, InMemoryAuditLog, InMemoryRoleDirectory};
use asset_registry::domain::entities::{Consuming, Producing};
use asset_registry::service::{AssetRegistry, RegistryConfig};
use lookup_registry::{LookupRefs, LookupRegistry};
use rand::Rng;
use shared_types::{AccessGateway, Address, Role, RoleSet};
use std::sync::Arc;

/// Well-known accounts of the deployed fixture.
pub mod accounts {
    /// Deployment account; owns the lookup and holds Admin + AssetManager.
    pub const DEPLOYER: u8 = 0xD0;
    /// Asset owner onboarded with the AssetOwner role.
    pub const ASSET_OWNER: u8 = 0xA1;
    /// Smart meter registered for onboarded assets.
    pub const SMART_METER: u8 = 0xB1;
    /// Matcher account used in matcher lists.
    pub const MATCHER: u8 = 0xC1;
    /// An account the directory knows nothing about.
    pub const STRANGER: u8 = 0x99;
}

/// Component identities of the deployed fixture.
pub mod contracts {
    pub const ROLE_DIRECTORY: u8 = 0x01;
    pub const LOOKUP: u8 = 0x02;
    pub const PRODUCING_REGISTRY: u8 = 0x03;
    pub const CONSUMING_REGISTRY: u8 = 0x04;
    pub const PRODUCING_STORE: u8 = 0x05;
    pub const CONSUMING_STORE: u8 = 0x06;
}

/// Address with a recognizable single-byte tag.
pub fn addr(tag: u8) -> Address {
    let mut bytes = [0u8; 20];
    bytes[19] = tag;
    Address::new(bytes)
}

/// Fresh random address, for tests that only need an unknown account.
pub fn rand_addr() -> Address {
    let mut bytes = [0u8; 20];
    rand::thread_rng().fill(&mut bytes);
    Address::new(bytes)
}

/// A fully wired registry deployment.
pub struct Stack {
    pub deployer: Address,
    pub directory: Arc<InMemoryRoleDirectory>,
    pub lookup: Arc<LookupRegistry>,
    pub producing: Arc<AssetRegistry<Producing>>,
    pub consuming: Arc<AssetRegistry<Consuming>>,
    pub producing_store: Arc<InMemoryAssetStore<Producing>>,
    pub consuming_store: Arc<InMemoryAssetStore<Consuming>>,
    pub producing_audit: Arc<InMemoryAuditLog>,
    pub consuming_audit: Arc<InMemoryAuditLog>,
}

/// Deploy and wire the full stack.
pub fn deploy_stack() -> Stack {
    let deployer = addr(accounts::DEPLOYER);

    let directory = InMemoryRoleDirectory::new_shared();
    directory.set_roles(deployer, RoleSet::of(&[Role::Admin, Role::AssetManager]));
    directory.set_roles(
        addr(accounts::ASSET_OWNER),
        RoleSet::of(&[Role::AssetOwner]),
    );

    let gateway = AccessGateway::new(directory.clone());
    let lookup = Arc::new(LookupRegistry::new(addr(contracts::LOOKUP), deployer));

    let producing_store = InMemoryAssetStore::new_shared(addr(contracts::PRODUCING_REGISTRY));
    let producing_audit = InMemoryAuditLog::new_shared();
    let producing = Arc::new(AssetRegistry::<Producing>::new(
        addr(contracts::PRODUCING_REGISTRY),
        addr(contracts::LOOKUP),
        gateway.clone(),
        producing_store.clone(),
        producing_audit.clone(),
        RegistryConfig::default(),
    ));

    let consuming_store = InMemoryAssetStore::new_shared(addr(contracts::CONSUMING_REGISTRY));
    let consuming_audit = InMemoryAuditLog::new_shared();
    let consuming = Arc::new(AssetRegistry::<Consuming>::new(
        addr(contracts::CONSUMING_REGISTRY),
        addr(contracts::LOOKUP),
        gateway,
        consuming_store.clone(),
        consuming_audit.clone(),
        RegistryConfig::default(),
    ));

    lookup
        .init(
            deployer,
            LookupRefs {
                role_directory: addr(contracts::ROLE_DIRECTORY),
                producing_registry: addr(contracts::PRODUCING_REGISTRY),
                consuming_registry: addr(contracts::CONSUMING_REGISTRY),
                producing_store: addr(contracts::PRODUCING_STORE),
                consuming_store: addr(contracts::CONSUMING_STORE),
            },
        )
        .expect("fixture init");
    lookup
        .bind_rotations(producing.clone(), consuming.clone())
        .expect("fixture rotation binding");

    Stack {
        deployer,
        directory,
        lookup,
        producing,
        consuming,
        producing_store,
        consuming_store,
        producing_audit,
        consuming_audit,
    }
}
