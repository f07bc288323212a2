//! # Domain Entities
//!
//! The asset record and its kind parameterization.
//!
//! ## Type Decisions
//!
//! - Readings are `u64` watt-hours: cumulative meter counters, never money.
//!   Monotonicity means deltas always fit without sign handling.
//! - The two asset kinds share one record shape; everything
//!   producing-specific lives behind `AssetKind::Details` so the registry
//!   service is written once and parameterized, not duplicated.
//! - `last_certificate_quantity_wh` is kind-asymmetric on purpose: the
//!   producing reading path maintains it as the latest accepted delta,
//!   while the consuming path never touches it (an external settlement
//!   process owns it for consuming assets).

use crate::domain::matcher::MatcherSet;
use crate::errors::RegistryError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use shared_types::{Address, AssetId};
use std::fmt;

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::Producing {}
    impl Sealed for super::Consuming {}
}

/// Kind parameter of an asset table: [`Producing`] or [`Consuming`].
///
/// The kind carries the record extension, the kind-specific creation
/// parameters, and the extra payload a meter reading submits (CO2 offsets
/// for producing assets). The trait is sealed; the registry knows exactly
/// two kinds.
pub trait AssetKind: sealed::Sealed + Clone + Send + Sync + 'static {
    /// Label used in logs.
    const LABEL: &'static str;

    /// Kind-specific record extension.
    type Details: Clone
        + fmt::Debug
        + PartialEq
        + Eq
        + Serialize
        + DeserializeOwned
        + Send
        + Sync
        + 'static;

    /// Kind-specific `create_asset` parameters.
    type CreateParams;

    /// Kind-specific payload of a meter reading submission.
    type ReadExtra;

    /// Record extension for a freshly created asset.
    fn initial_details(params: Self::CreateParams) -> Self::Details;

    /// Kind-specific validation of a reading (runs after the common
    /// checks, before any mutation).
    fn check_read(details: &Self::Details, extra: &Self::ReadExtra) -> Result<(), RegistryError>;

    /// Kind-specific effects of an accepted reading; returns the CO2
    /// section of the audit event, if any.
    fn apply_read(
        asset: &mut AssetRecord<Self>,
        delta: u64,
        extra: &Self::ReadExtra,
    ) -> Option<Co2Reading>
    where
        Self: Sized;
}

/// Marker for the producing-asset kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Producing;

/// Marker for the consuming-asset kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Consuming;

/// Producing-only record fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProducingDetails {
    /// Last accepted CO2 offset reading; monotonic like the Wh counter.
    pub last_co2_offset_read: u64,
    /// Remaining permitted owner reassignments.
    pub max_owner_changes: u64,
}

/// Consuming assets carry no kind-specific fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConsumingDetails;

/// CO2 section of a producing meter reading, reported in the audit event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Co2Reading {
    /// CO2 offset counter before this reading.
    pub old_read: u64,
    /// CO2 offset counter submitted with this reading.
    pub new_read: u64,
    /// The reporting service flagged itself as degraded.
    pub service_down: bool,
}

/// Extra payload a producing meter submits with each reading.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProducingReadExtra {
    /// Cumulative CO2 offset counter.
    pub new_co2_read: u64,
    /// The reporting service flagged itself as degraded.
    pub service_down: bool,
}

impl AssetKind for Producing {
    const LABEL: &'static str = "producing";
    type Details = ProducingDetails;
    /// Maximum permitted owner reassignments.
    type CreateParams = u64;
    type ReadExtra = ProducingReadExtra;

    fn initial_details(max_owner_changes: u64) -> Self::Details {
        ProducingDetails {
            last_co2_offset_read: 0,
            max_owner_changes,
        }
    }

    fn check_read(details: &Self::Details, extra: &Self::ReadExtra) -> Result<(), RegistryError> {
        if extra.new_co2_read < details.last_co2_offset_read {
            return Err(RegistryError::Co2ReadRegression {
                last: details.last_co2_offset_read,
                submitted: extra.new_co2_read,
            });
        }
        Ok(())
    }

    fn apply_read(
        asset: &mut AssetRecord<Self>,
        delta: u64,
        extra: &Self::ReadExtra,
    ) -> Option<Co2Reading> {
        let old_read = asset.details.last_co2_offset_read;
        asset.details.last_co2_offset_read = extra.new_co2_read;
        asset.last_certificate_quantity_wh = delta;
        Some(Co2Reading {
            old_read,
            new_read: extra.new_co2_read,
            service_down: extra.service_down,
        })
    }
}

impl AssetKind for Consuming {
    const LABEL: &'static str = "consuming";
    type Details = ConsumingDetails;
    type CreateParams = ();
    type ReadExtra = ();

    fn initial_details(_params: ()) -> Self::Details {
        ConsumingDetails
    }

    fn check_read(_details: &Self::Details, _extra: &Self::ReadExtra) -> Result<(), RegistryError> {
        Ok(())
    }

    fn apply_read(
        _asset: &mut AssetRecord<Self>,
        _delta: u64,
        _extra: &Self::ReadExtra,
    ) -> Option<Co2Reading> {
        // The certificate quantity of a consuming asset belongs to the
        // external settlement process; the reading path leaves it alone.
        None
    }
}

/// One registered asset.
///
/// Records are created through the authorized create operation and never
/// deleted; `active` may be toggled arbitrarily often.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "K::Details: Serialize",
    deserialize = "K::Details: Deserialize<'de>"
))]
pub struct AssetRecord<K: AssetKind> {
    /// Dense sequential id, assigned by the store, immutable.
    pub id: AssetId,
    /// The account authorized to submit readings.
    pub smart_meter: Address,
    /// The account holding asset-level management rights.
    pub owner: Address,
    /// Last accepted cumulative reading in Wh.
    pub last_read_wh: u64,
    /// Whether new readings are accepted.
    pub active: bool,
    /// Opaque file hash recorded with the last accepted reading.
    pub last_read_file_hash: String,
    /// Accounts permitted to match against this asset.
    pub matchers: MatcherSet,
    /// Certificate quantity recorded with the most recent settlement-
    /// relevant reading; see the kind asymmetry note in the module docs.
    pub last_certificate_quantity_wh: u64,
    /// Opaque descriptive document hash, set at creation.
    pub properties_document_hash: String,
    /// Opaque descriptive URL, set at creation.
    pub url: String,
    /// Optional market lookup reference; `Address::ZERO` when unset.
    pub market_lookup: Address,
    /// Kind-specific extension.
    pub details: K::Details,
}

impl<K: AssetKind> AssetRecord<K> {
    /// Build a fresh record with creation defaults. The id is assigned by
    /// the store on append.
    pub fn new(params: NewAsset, matchers: MatcherSet, details: K::Details) -> Self {
        Self {
            id: 0,
            smart_meter: params.smart_meter,
            owner: params.owner,
            last_read_wh: 0,
            active: true,
            last_read_file_hash: String::new(),
            matchers,
            last_certificate_quantity_wh: 0,
            properties_document_hash: params.properties_document_hash,
            url: params.url,
            market_lookup: Address::ZERO,
            details,
        }
    }
}

/// Kind-independent creation parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewAsset {
    /// The account authorized to submit readings.
    pub smart_meter: Address,
    /// The account holding asset-level management rights.
    pub owner: Address,
    /// Initial matcher accounts (deduplicated on insertion).
    pub matchers: Vec<Address>,
    /// Opaque descriptive document hash.
    pub properties_document_hash: String,
    /// Opaque descriptive URL.
    pub url: String,
}
