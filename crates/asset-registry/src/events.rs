//! # Audit Event Schema
//!
//! Typed payloads of the append-only audit trail. External observers
//! (matching and settlement processes) consume these; the field names in
//! the serialized form are part of the contract and pinned by tests.
//!
//! Exactly one event is recorded per successful state-changing operation,
//! after the state commit. Failed operations record nothing.

use crate::domain::entities::Co2Reading;
use serde::{Deserialize, Serialize};
use shared_types::{Address, AssetId};

/// One entry of the audit trail.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditEvent {
    /// A new asset was onboarded.
    AssetCreated {
        /// The asset manager who performed the onboarding.
        sender: Address,
        /// Assigned id.
        asset_id: AssetId,
    },

    /// A meter reading was accepted.
    NewMeterRead {
        asset_id: AssetId,
        /// Counter before this reading.
        old_read_wh: u64,
        /// Counter submitted with this reading.
        new_read_wh: u64,
        /// Certificate quantity recorded on the asset when the reading was
        /// accepted (for producing assets: the delta of the *previous*
        /// accepted reading, as the quantity is emitted before this
        /// reading's delta is written back).
        certificate_quantity_wh: u64,
        /// The meter flagged itself as degraded.
        meter_down: bool,
        /// CO2 section, present for producing assets only.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        co2: Option<Co2Reading>,
    },

    /// An asset transitioned from inactive to active.
    AssetSetActive { asset_id: AssetId },

    /// An asset transitioned from active to inactive.
    AssetSetInactive { asset_id: AssetId },
}

impl AuditEvent {
    /// Operation kind of this event, the key consumers filter by.
    pub fn kind(&self) -> AuditEventKind {
        match self {
            AuditEvent::AssetCreated { .. } => AuditEventKind::AssetCreated,
            AuditEvent::NewMeterRead { .. } => AuditEventKind::NewMeterRead,
            AuditEvent::AssetSetActive { .. } => AuditEventKind::AssetSetActive,
            AuditEvent::AssetSetInactive { .. } => AuditEventKind::AssetSetInactive,
        }
    }

    /// The asset this event concerns.
    pub fn asset_id(&self) -> AssetId {
        match self {
            AuditEvent::AssetCreated { asset_id, .. }
            | AuditEvent::NewMeterRead { asset_id, .. }
            | AuditEvent::AssetSetActive { asset_id }
            | AuditEvent::AssetSetInactive { asset_id } => *asset_id,
        }
    }
}

/// Operation kinds of the audit trail.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditEventKind {
    AssetCreated,
    NewMeterRead,
    AssetSetActive,
    AssetSetInactive,
}
