//! # Asset Registry Service
//!
//! One instance manages one asset table of one kind. Every mutating
//! operation takes the caller's address explicitly, authorizes it first
//! (role check through the gateway, or owner / meter identity checks
//! against the record), validates the domain rules, and only then commits:
//! state mutation and audit event together, or nothing at all.
//!
//! ## Authorization Matrix
//!
//! | Operation | Gate |
//! |-----------|------|
//! | `create_asset`, `set_active`, `update_smart_meter` | `AssetManager` role |
//! | `save_smart_meter_read` (+ bundle) | caller == registered smart meter |
//! | `set_market_lookup_contract`, `add_matcher`, `remove_matcher` | caller == asset owner |
//! | `update` (rotation) | caller == registered registry owner |
//! | `asset`, `matchers`, `market_lookup_contract`, `asset_count` | none (pure reads) |

use crate::domain::entities::{AssetKind, AssetRecord, NewAsset};
use crate::domain::invariants;
use crate::domain::matcher::{MatcherSet, DEFAULT_MATCHER_CAPACITY};
use crate::errors::RegistryError;
use crate::events::AuditEvent;
use crate::ports::audit::AuditSink;
use crate::ports::store::AssetStore;
use lookup_registry::errors::LookupError;
use lookup_registry::ports::RegistryRotation;
use shared_types::{AccessGateway, Address, AssetId, Role};
use std::sync::{Arc, RwLock};
use tracing::{debug, info, warn};

/// Registry limits.
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Capacity of each asset's matcher list.
    pub max_matchers: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            max_matchers: DEFAULT_MATCHER_CAPACITY,
        }
    }
}

/// Operation counters, maintained by the service.
#[derive(Debug, Default, Clone)]
pub struct RegistryStats {
    /// Assets onboarded.
    pub assets_created: u64,
    /// Meter readings accepted.
    pub reads_accepted: u64,
    /// Meter readings rejected (sender, activity, or monotonicity).
    pub reads_rejected: u64,
    /// Calls rejected by an authorization gate.
    pub unauthorized_calls: u64,
}

/// The registry service for one asset kind.
pub struct AssetRegistry<K: AssetKind> {
    /// Identity of this registry instance.
    address: Address,
    /// The lookup registry registered as owner; sole driver of rotations.
    owner: Address,
    gateway: AccessGateway,
    store: Arc<dyn AssetStore<K>>,
    audit: Arc<dyn AuditSink>,
    config: RegistryConfig,
    stats: RwLock<RegistryStats>,
}

/// Registry over producing assets.
pub type ProducingRegistry = AssetRegistry<crate::domain::entities::Producing>;
/// Registry over consuming assets.
pub type ConsumingRegistry = AssetRegistry<crate::domain::entities::Consuming>;

impl<K: AssetKind> AssetRegistry<K> {
    /// Create a registry instance.
    ///
    /// `owner` is the address of the owning lookup registry; `gateway` is
    /// the reference snapshot of the role directory resolved at wiring
    /// time.
    pub fn new(
        address: Address,
        owner: Address,
        gateway: AccessGateway,
        store: Arc<dyn AssetStore<K>>,
        audit: Arc<dyn AuditSink>,
        config: RegistryConfig,
    ) -> Self {
        Self {
            address,
            owner,
            gateway,
            store,
            audit,
            config,
            stats: RwLock::new(RegistryStats::default()),
        }
    }

    /// Identity of this registry instance.
    pub fn address(&self) -> Address {
        self.address
    }

    /// The registered owner (the lookup registry's address).
    pub fn owner(&self) -> Address {
        self.owner
    }

    /// Current owner of the backing store.
    pub fn store_owner(&self) -> Result<Address, RegistryError> {
        self.store.owner()
    }

    /// Snapshot of the operation counters.
    pub fn stats(&self) -> RegistryStats {
        match self.stats.read() {
            Ok(stats) => stats.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    // =========================================================================
    // MUTATING OPERATIONS
    // =========================================================================

    /// Onboard a new asset. Requires the `AssetManager` role.
    ///
    /// Assigns the next dense id; the record starts active with a zeroed
    /// reading history. Returns the id.
    pub fn create_asset(
        &self,
        caller: Address,
        asset: NewAsset,
        params: K::CreateParams,
    ) -> Result<AssetId, RegistryError> {
        self.enforce_role(caller, Role::AssetManager)?;

        let matchers =
            MatcherSet::try_from_iter(self.config.max_matchers, asset.matchers.iter().copied())?;
        let record = AssetRecord::new(asset, matchers, K::initial_details(params));

        let id = self.store.append(record)?;
        info!(kind = K::LABEL, asset_id = id, %caller, "asset onboarded");
        self.audit.record(AuditEvent::AssetCreated {
            sender: caller,
            asset_id: id,
        });
        self.bump(|stats| stats.assets_created += 1);
        Ok(id)
    }

    /// Submit a meter reading.
    ///
    /// The caller must be the asset's registered smart meter, the asset
    /// must be active, and the counters must not regress.
    pub fn save_smart_meter_read(
        &self,
        caller: Address,
        id: AssetId,
        new_read_wh: u64,
        meter_down: bool,
        file_hash: &str,
        extra: K::ReadExtra,
    ) -> Result<(), RegistryError> {
        self.save_read_internal(caller, id, new_read_wh, meter_down, file_hash, extra, "single")
    }

    /// Alternate submission channel for bundled reads.
    ///
    /// Behaviorally identical to [`Self::save_smart_meter_read`]; bundled
    /// submissions arrive through a different upstream pipeline but share
    /// the validation and effects.
    pub fn save_smart_meter_read_bundle(
        &self,
        caller: Address,
        id: AssetId,
        new_read_wh: u64,
        meter_down: bool,
        file_hash: &str,
        extra: K::ReadExtra,
    ) -> Result<(), RegistryError> {
        self.save_read_internal(caller, id, new_read_wh, meter_down, file_hash, extra, "bundle")
    }

    fn save_read_internal(
        &self,
        caller: Address,
        id: AssetId,
        new_read_wh: u64,
        meter_down: bool,
        file_hash: &str,
        extra: K::ReadExtra,
        channel: &'static str,
    ) -> Result<(), RegistryError> {
        let mut asset = self.store.get(id)?;

        if caller != asset.smart_meter {
            warn!(kind = K::LABEL, asset_id = id, %caller, "reading rejected: wrong sender");
            self.bump(|stats| stats.reads_rejected += 1);
            return Err(RegistryError::WrongSender { id, caller });
        }
        if !asset.active {
            warn!(kind = K::LABEL, asset_id = id, "reading rejected: asset not active");
            self.bump(|stats| stats.reads_rejected += 1);
            return Err(RegistryError::AssetNotActive(id));
        }
        if new_read_wh < asset.last_read_wh {
            warn!(
                kind = K::LABEL,
                asset_id = id,
                last = asset.last_read_wh,
                submitted = new_read_wh,
                "reading rejected: meter read regression"
            );
            self.bump(|stats| stats.reads_rejected += 1);
            return Err(RegistryError::MeterReadRegression {
                last: asset.last_read_wh,
                submitted: new_read_wh,
            });
        }
        if let Err(err) = K::check_read(&asset.details, &extra) {
            warn!(kind = K::LABEL, asset_id = id, %err, "reading rejected");
            self.bump(|stats| stats.reads_rejected += 1);
            return Err(err);
        }

        let old_read_wh = asset.last_read_wh;
        let delta = new_read_wh - old_read_wh;
        debug_assert!(invariants::check_monotonic_read(old_read_wh, new_read_wh));

        // The audit trail reports the certificate quantity as it stood when
        // the reading arrived; the producing path overwrites it below.
        let certificate_quantity_wh = asset.last_certificate_quantity_wh;

        asset.last_read_wh = new_read_wh;
        asset.last_read_file_hash = file_hash.to_owned();
        let co2 = K::apply_read(&mut asset, delta, &extra);
        self.store.put(id, asset)?;

        info!(
            kind = K::LABEL,
            channel,
            asset_id = id,
            old_read_wh,
            new_read_wh,
            delta,
            meter_down,
            "meter reading accepted"
        );
        self.audit.record(AuditEvent::NewMeterRead {
            asset_id: id,
            old_read_wh,
            new_read_wh,
            certificate_quantity_wh,
            meter_down,
            co2,
        });
        self.bump(|stats| stats.reads_accepted += 1);
        Ok(())
    }

    /// Toggle whether an asset accepts readings. Requires `AssetManager`.
    ///
    /// Setting the current state again is an idempotent success and
    /// records no event.
    pub fn set_active(&self, caller: Address, id: AssetId, active: bool) -> Result<(), RegistryError> {
        self.enforce_role(caller, Role::AssetManager)?;

        let mut asset = self.store.get(id)?;
        if asset.active == active {
            debug!(kind = K::LABEL, asset_id = id, active, "activity state unchanged");
            return Ok(());
        }
        asset.active = active;
        self.store.put(id, asset)?;

        info!(kind = K::LABEL, asset_id = id, active, "activity state toggled");
        self.audit.record(if active {
            AuditEvent::AssetSetActive { asset_id: id }
        } else {
            AuditEvent::AssetSetInactive { asset_id: id }
        });
        Ok(())
    }

    /// Replace the registered smart meter without touching the reading
    /// history. Requires `AssetManager`.
    pub fn update_smart_meter(
        &self,
        caller: Address,
        id: AssetId,
        new_meter: Address,
    ) -> Result<(), RegistryError> {
        self.enforce_role(caller, Role::AssetManager)?;

        let mut asset = self.store.get(id)?;
        let old_meter = asset.smart_meter;
        asset.smart_meter = new_meter;
        self.store.put(id, asset)?;

        info!(kind = K::LABEL, asset_id = id, %old_meter, %new_meter, "smart meter replaced");
        Ok(())
    }

    /// Set the asset's market lookup reference. Caller must be the asset's
    /// owner.
    pub fn set_market_lookup_contract(
        &self,
        caller: Address,
        id: AssetId,
        contract: Address,
    ) -> Result<(), RegistryError> {
        let mut asset = self.store.get(id)?;
        self.require_asset_owner(caller, &asset)?;

        asset.market_lookup = contract;
        self.store.put(id, asset)?;
        info!(kind = K::LABEL, asset_id = id, market_lookup = %contract, "market lookup set");
        Ok(())
    }

    /// Register a matcher account. Caller must be the asset's owner.
    ///
    /// Re-adding a present matcher is an idempotent success; only a *new*
    /// entry beyond capacity fails.
    pub fn add_matcher(
        &self,
        caller: Address,
        id: AssetId,
        account: Address,
    ) -> Result<(), RegistryError> {
        let mut asset = self.store.get(id)?;
        self.require_asset_owner(caller, &asset)?;

        if asset.matchers.insert(account)? {
            self.store.put(id, asset)?;
            info!(kind = K::LABEL, asset_id = id, matcher = %account, "matcher added");
        } else {
            debug!(kind = K::LABEL, asset_id = id, matcher = %account, "matcher already present");
        }
        Ok(())
    }

    /// Remove a matcher account, preserving the order of the rest. Caller
    /// must be the asset's owner. Removing an absent matcher is a no-op.
    pub fn remove_matcher(
        &self,
        caller: Address,
        id: AssetId,
        account: Address,
    ) -> Result<(), RegistryError> {
        let mut asset = self.store.get(id)?;
        self.require_asset_owner(caller, &asset)?;

        if asset.matchers.remove(account) {
            self.store.put(id, asset)?;
            info!(kind = K::LABEL, asset_id = id, matcher = %account, "matcher removed");
        } else {
            debug!(kind = K::LABEL, asset_id = id, matcher = %account, "matcher not present");
        }
        Ok(())
    }

    /// Rotation entry point, driven by the owning lookup registry.
    ///
    /// Re-points the backing store's registered owner to `new_logic`. Any
    /// caller other than the registered owner fails `NotOwner`; this is
    /// not an end-user operation.
    pub fn update(&self, caller: Address, new_logic: Address) -> Result<(), RegistryError> {
        if caller != self.owner {
            warn!(kind = K::LABEL, %caller, "update rejected: caller is not the owner");
            return Err(RegistryError::NotOwner { caller });
        }
        self.store.change_owner(self.address, new_logic)?;
        info!(kind = K::LABEL, registry = %self.address, %new_logic, "backing store re-pointed");
        Ok(())
    }

    // =========================================================================
    // READ OPERATIONS
    // =========================================================================

    /// Committed snapshot of one asset record.
    pub fn asset(&self, id: AssetId) -> Result<AssetRecord<K>, RegistryError> {
        self.store.get(id)
    }

    /// Number of onboarded assets.
    pub fn asset_count(&self) -> Result<usize, RegistryError> {
        self.store.len()
    }

    /// The asset's matcher accounts in insertion order.
    pub fn matchers(&self, id: AssetId) -> Result<Vec<Address>, RegistryError> {
        Ok(self.store.get(id)?.matchers.as_slice().to_vec())
    }

    /// The asset's market lookup reference; `Address::ZERO` when unset.
    pub fn market_lookup_contract(&self, id: AssetId) -> Result<Address, RegistryError> {
        Ok(self.store.get(id)?.market_lookup)
    }

    // =========================================================================
    // HELPERS
    // =========================================================================

    fn enforce_role(&self, caller: Address, role: Role) -> Result<(), RegistryError> {
        self.gateway.enforce(caller, role).map_err(|err| {
            warn!(kind = K::LABEL, %caller, %role, "role check failed");
            self.bump(|stats| stats.unauthorized_calls += 1);
            RegistryError::from(err)
        })
    }

    fn require_asset_owner(
        &self,
        caller: Address,
        asset: &AssetRecord<K>,
    ) -> Result<(), RegistryError> {
        if caller != asset.owner {
            warn!(
                kind = K::LABEL,
                asset_id = asset.id,
                %caller,
                "owner check failed"
            );
            self.bump(|stats| stats.unauthorized_calls += 1);
            return Err(RegistryError::Unauthorized { account: caller });
        }
        Ok(())
    }

    fn bump(&self, f: impl FnOnce(&mut RegistryStats)) {
        // Counters are advisory; recover rather than fail an operation.
        let mut stats = match self.stats.write() {
            Ok(stats) => stats,
            Err(poisoned) => poisoned.into_inner(),
        };
        f(&mut stats);
    }
}

impl<K: AssetKind> RegistryRotation for AssetRegistry<K> {
    fn address(&self) -> Address {
        self.address
    }

    fn owns_store(&self) -> bool {
        self.store
            .owner()
            .map(|owner| owner == self.address)
            .unwrap_or(false)
    }

    fn rotate(&self, caller: Address, new_logic: Address) -> Result<(), LookupError> {
        self.update(caller, new_logic).map_err(|err| match err {
            RegistryError::StorePoisoned => LookupError::StatePoisoned,
            _ => LookupError::NotOwner { caller },
        })
    }
}
