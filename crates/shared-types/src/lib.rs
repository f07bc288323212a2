//! # Shared Types Crate
//!
//! This crate contains the primitives shared by every registry crate: the
//! `Address` account identifier, the role taxonomy, and the `AccessGateway`
//! capability check consulted by every mutating registry operation.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-crate types are defined here.
//! - **Centralized Authorization**: Role policy lives in one place
//!   (`security`); registries never embed role logic of their own.
//! - **Opaque Identity**: Callers are identified by `Address` values only;
//!   no ambient identity is consulted anywhere.

pub mod entities;
pub mod security;

pub use entities::{Address, AddressParseError, AssetId};
pub use security::{AccessError, AccessGateway, Role, RoleDirectory, RoleSet};
