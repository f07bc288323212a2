//! # Core Identity Entities
//!
//! Account and asset identifiers used across every registry crate.
//!
//! ## Type Decisions
//!
//! - `Address` is a 20-byte opaque identifier. It names accounts (callers,
//!   asset owners, smart meters) and deployed collaborators (registries,
//!   stores, the role directory) alike; the registry core never inspects
//!   its contents beyond equality and the zero sentinel.
//! - `AssetId` is a plain `u64`. Ids are dense vector indices assigned by
//!   the asset store, so the full range is never exhausted in practice.

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Sequential identifier of an asset within its registry table.
///
/// Ids start at 0, are assigned densely in creation order, and are never
/// reused.
pub type AssetId = u64;

/// A 20-byte account or collaborator identifier.
///
/// Displayed and serialized as a `0x`-prefixed lowercase hex string.
/// `Address::ZERO` is the conventional "unset" sentinel (for example the
/// market lookup reference of a freshly created asset).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Address([u8; 20]);

impl Address {
    /// The all-zero sentinel address.
    pub const ZERO: Address = Address([0u8; 20]);

    /// Wrap a raw 20-byte identifier.
    pub const fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Raw bytes of this address.
    pub const fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// True for the all-zero sentinel.
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }

    /// Parse from a hex string, with or without a `0x` prefix.
    pub fn from_hex(s: &str) -> Result<Self, AddressParseError> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        let raw = hex::decode(digits)?;
        let bytes: [u8; 20] = raw
            .try_into()
            .map_err(|v: Vec<u8>| AddressParseError::InvalidLength { got: v.len() })?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({self})")
    }
}

impl FromStr for Address {
    type Err = AddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl From<[u8; 20]> for Address {
    fn from(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Address::from_hex(&s).map_err(DeError::custom)
    }
}

/// Errors from parsing a textual address.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AddressParseError {
    /// The decoded byte string was not exactly 20 bytes.
    #[error("address must be 20 bytes, got {got}")]
    InvalidLength { got: usize },

    /// The string was not valid hex.
    #[error("invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),
}
