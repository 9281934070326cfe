//! Behavior registrations for the uplift component engine.
//!
//! # Purpose
//!
//! A [`Registry`] records which behaviors exist: for each behavior id, the class
//! [`Selector`] that marks candidate elements, the factory that builds an instance for
//! one element, whether the instance can be torn down ([`Disposable`]), whether it is
//! exposed on the element, and the callbacks fired after every upgrade.
//!
//! The registry is pure bookkeeping. It never touches a document; the element type is a
//! parameter so the same registry works for any host.
//!
//! # Invariants
//!
//! - Behavior ids are unique.
//!   - Enforced in: [`Registry::register`] (same id with another selector is rejected,
//!     same id with the same selector replaces in place).
//! - Selectors are unique across behaviors.
//!   - Enforced in: [`Registry::register`].
//! - Iteration follows registration order, and a replacement keeps the original slot.
//!   - Enforced in: [`Registry::register`] (indexed storage, in-place overwrite).
//! - A failed registration leaves the registry unchanged.
//!
//! Replacing a registration discards the upgrade callbacks attached to the old one.

mod error;
mod id;
mod registration;
mod registry;
mod selector;

#[cfg(test)]
mod tests;

pub use error::{RegistryError, Result};
pub use id::BehaviorId;
pub use registration::{BehaviorRegistration, Disposable, Teardown, UpgradeCallback};
pub use registry::Registry;
pub use selector::Selector;

/// Element slot name reserved for engine bookkeeping. No behavior may use it as its id,
/// since exposed instances are keyed by behavior id.
pub const RESERVED_SLOT: &str = "upliftComponentConfig";
