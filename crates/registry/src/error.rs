use thiserror::Error;

use crate::{BehaviorId, Selector};

/// Configuration errors raised while defining or registering behaviors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
	/// The id is empty or contains a comma or whitespace.
	#[error("invalid behavior id {0:?}: ids must be non-empty and contain no commas or whitespace")]
	InvalidId(String),

	/// The selector is not a single class name.
	#[error("invalid selector {0:?}: expected a single class name such as `.x-foo`")]
	InvalidSelector(String),

	/// Another behavior already claims the selector.
	#[error("selector {selector} is already registered by {existing}; cannot register {incoming}")]
	DuplicateSelector {
		selector: Selector,
		existing: BehaviorId,
		incoming: BehaviorId,
	},

	/// The id is registered with a different selector.
	#[error("behavior {id} is already registered with selector {existing}; replacement uses {incoming}")]
	DuplicateId {
		id: BehaviorId,
		existing: Selector,
		incoming: Selector,
	},

	/// The id collides with [`crate::RESERVED_SLOT`].
	#[error("behavior id {0} collides with the reserved config slot")]
	ReservedId(BehaviorId),
}

/// Result type for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;
