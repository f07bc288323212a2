//! # Bounded Matcher Set
//!
//! Ordered, duplicate-free, capacity-bounded set of matcher accounts.
//! Membership checks are O(n) over a plain vector; with a capacity of ten
//! that beats any hashed container and keeps insertion order for free.

use crate::errors::RegistryError;
use serde::{Deserialize, Serialize};
use shared_types::Address;

/// Default capacity of a matcher list.
pub const DEFAULT_MATCHER_CAPACITY: usize = 10;

/// Insertion-ordered set of matcher accounts with a fixed capacity.
///
/// Inserting a present account and removing an absent one are idempotent
/// no-ops, not errors; only a *new* entry beyond capacity fails.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatcherSet {
    entries: Vec<Address>,
    capacity: usize,
}

impl MatcherSet {
    /// Empty set with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MATCHER_CAPACITY)
    }

    /// Empty set with an explicit capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Build a set from an iterator, deduplicating idempotently.
    ///
    /// Fails with [`RegistryError::MatcherListFull`] when the distinct
    /// entries exceed `capacity`.
    pub fn try_from_iter<I>(capacity: usize, accounts: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = Address>,
    {
        let mut set = Self::with_capacity(capacity);
        for account in accounts {
            set.insert(account)?;
        }
        Ok(set)
    }

    /// Append `account` unless already present.
    ///
    /// Returns `Ok(true)` when newly added, `Ok(false)` when already a
    /// member, and [`RegistryError::MatcherListFull`] when a new entry
    /// would exceed the capacity.
    pub fn insert(&mut self, account: Address) -> Result<bool, RegistryError> {
        if self.contains(account) {
            return Ok(false);
        }
        if self.entries.len() >= self.capacity {
            return Err(RegistryError::MatcherListFull {
                capacity: self.capacity,
            });
        }
        self.entries.push(account);
        Ok(true)
    }

    /// Remove `account`, preserving the relative order of the rest.
    ///
    /// Returns whether the account was present.
    pub fn remove(&mut self, account: Address) -> bool {
        match self.entries.iter().position(|entry| *entry == account) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    /// Membership test.
    pub fn contains(&self, account: Address) -> bool {
        self.entries.contains(&account)
    }

    /// Entries in insertion order.
    pub fn as_slice(&self) -> &[Address] {
        &self.entries
    }

    /// Iterator over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Address> {
        self.entries.iter()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no matcher is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for MatcherSet {
    fn default() -> Self {
        Self::new()
    }
}
