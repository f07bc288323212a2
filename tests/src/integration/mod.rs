//! Integration flows over the deployed stack.

pub mod producing_registry;
