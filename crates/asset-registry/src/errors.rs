//! # Error Types
//!
//! All error kinds surfaced by asset registry operations. Every validation
//! failure aborts the operation with no partial mutation; there is no local
//! recovery or retry inside the registry.

use shared_types::{AccessError, Address, AssetId};
use thiserror::Error;

/// Errors from asset registry operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Role check or asset-owner check failed.
    #[error("account {account} is not authorized for this operation")]
    Unauthorized { account: Address },

    /// Caller is not the registered owner (rotation surface only).
    #[error("caller {caller} is not the registered owner")]
    NotOwner { caller: Address },

    /// A reading was submitted by an account other than the asset's
    /// registered smart meter.
    #[error("reading for asset {id} rejected: {caller} is not the registered smart meter")]
    WrongSender { id: AssetId, caller: Address },

    /// Unknown asset id.
    #[error("asset {0} not found")]
    NotFound(AssetId),

    /// Readings are only accepted while the asset is active.
    #[error("asset {0} is not active")]
    AssetNotActive(AssetId),

    /// Submitted Wh counter is below the last accepted one.
    #[error("meter read regression: submitted {submitted} Wh below last accepted {last} Wh")]
    MeterReadRegression { last: u64, submitted: u64 },

    /// Submitted CO2 offset counter is below the last accepted one.
    #[error("CO2 offset regression: submitted {submitted} below last accepted {last}")]
    Co2ReadRegression { last: u64, submitted: u64 },

    /// A new matcher entry would exceed the list capacity.
    #[error("matcher list is full (capacity {capacity})")]
    MatcherListFull { capacity: usize },

    /// Asset store lock poisoned by a panicking writer.
    #[error("asset store lock poisoned")]
    StorePoisoned,
}

impl From<AccessError> for RegistryError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::MissingRole { account, .. } => RegistryError::Unauthorized { account },
        }
    }
}
