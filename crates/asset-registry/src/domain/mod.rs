//! Domain layer: asset records, kind parameterization, the bounded matcher
//! set, and invariant checks.

pub mod entities;
pub mod invariants;
pub mod matcher;

pub use entities::{
    AssetKind, AssetRecord, Co2Reading, Consuming, ConsumingDetails, NewAsset, Producing,
    ProducingDetails, ProducingReadExtra,
};
pub use matcher::MatcherSet;
