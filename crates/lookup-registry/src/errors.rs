//! # Error Types
//!
//! All error kinds surfaced by the lookup registry.

use shared_types::Address;
use thiserror::Error;

/// Errors from lookup registry operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// Caller is not the registered owner of the lookup (or, through the
    /// rotation port, of a registry/store pair).
    #[error("caller {caller} is not the registered owner")]
    NotOwner { caller: Address },

    /// `init` was called a second time.
    #[error("lookup registry is already initialized")]
    AlreadyInitialized,

    /// Operation requires a completed `init`.
    #[error("lookup registry is not initialized")]
    NotInitialized,

    /// Rotation handles were already bound.
    #[error("rotation handles are already bound")]
    AlreadyBound,

    /// A rotation handle's identity does not match the stored reference.
    #[error("rotation handle {got} does not match registered reference {expected}")]
    RotationMismatch { expected: Address, got: Address },

    /// `update` was called before the wiring bound rotation handles.
    #[error("rotation handles are not bound")]
    RotationsUnbound,

    /// A registry no longer owns its backing store; the rotation pair
    /// cannot commit atomically.
    #[error("registry {registry} no longer owns its backing store")]
    StoreNotOwned { registry: Address },

    /// Internal lock poisoned by a panicking writer.
    #[error("lookup state lock poisoned")]
    StatePoisoned,
}
