//! # Domain Invariants
//!
//! Checks for the invariants every committed registry state satisfies.
//! The operations enforce these inline; the checkers here exist so tests
//! (and debug assertions) can verify whole states independently of the
//! code paths that produced them.

use crate::domain::entities::{AssetKind, AssetRecord};
use crate::domain::matcher::MatcherSet;

/// Ids form the dense sequence 0..n in table order, with no repeats.
#[must_use]
pub fn check_dense_ids<K: AssetKind>(assets: &[AssetRecord<K>]) -> bool {
    assets
        .iter()
        .enumerate()
        .all(|(index, asset)| asset.id == index as u64)
}

/// A submitted cumulative reading never regresses.
#[must_use]
pub fn check_monotonic_read(previous: u64, submitted: u64) -> bool {
    submitted >= previous
}

/// A matcher list stays within capacity and free of duplicates.
#[must_use]
pub fn check_matcher_bound(matchers: &MatcherSet) -> bool {
    if matchers.len() > matchers.capacity() {
        return false;
    }
    let entries = matchers.as_slice();
    entries
        .iter()
        .enumerate()
        .all(|(index, entry)| !entries[..index].contains(entry))
}

/// The certificate quantity of an accepted producing reading equals the
/// reading's delta, not a running total.
#[must_use]
pub fn check_certificate_delta(old_read_wh: u64, new_read_wh: u64, certificate_wh: u64) -> bool {
    new_read_wh >= old_read_wh && certificate_wh == new_read_wh - old_read_wh
}
