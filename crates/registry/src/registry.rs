use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use tracing::{debug, trace};

use crate::{BehaviorId, BehaviorRegistration, RESERVED_SLOT, RegistryError, Result};

/// Ordered set of behavior registrations for elements of type `E`.
pub struct Registry<E> {
	entries: IndexMap<BehaviorId, BehaviorRegistration<E>, FxBuildHasher>,
}

impl<E> Registry<E> {
	pub fn new() -> Self {
		Self {
			entries: IndexMap::default(),
		}
	}

	/// Adds a behavior, or replaces the one with the same id and selector in place.
	///
	/// Replacement drops the callbacks attached to the old registration.
	///
	/// # Errors
	///
	/// - [`RegistryError::ReservedId`] if the id is [`RESERVED_SLOT`].
	/// - [`RegistryError::DuplicateSelector`] if another behavior owns the selector.
	/// - [`RegistryError::DuplicateId`] if the id exists with a different selector.
	pub fn register(&mut self, registration: BehaviorRegistration<E>) -> Result<()> {
		let id = registration.id().clone();
		if id == RESERVED_SLOT {
			return Err(RegistryError::ReservedId(id));
		}

		if let Some(owner) = self
			.entries
			.values()
			.find(|existing| existing.selector() == registration.selector() && existing.id() != &id)
		{
			return Err(RegistryError::DuplicateSelector {
				selector: registration.selector().clone(),
				existing: owner.id().clone(),
				incoming: id,
			});
		}

		match self.entries.get_index_of(id.as_str()) {
			Some(index) => {
				let existing = &self.entries[index];
				if existing.selector() != registration.selector() {
					return Err(RegistryError::DuplicateId {
						id,
						existing: existing.selector().clone(),
						incoming: registration.selector().clone(),
					});
				}
				debug!(
					behavior = %id,
					dropped_callbacks = existing.upgrade_callbacks().len(),
					"replacing behavior registration"
				);
				self.entries[index] = registration;
			}
			None => {
				debug!(behavior = %id, selector = %registration.selector(), "registered behavior");
				self.entries.insert(id, registration);
			}
		}
		Ok(())
	}

	pub fn find(&self, id: &str) -> Option<&BehaviorRegistration<E>> {
		self.entries.get(id)
	}

	/// Returns the behavior whose selector names `class`.
	pub fn find_by_class(&self, class: &str) -> Option<&BehaviorRegistration<E>> {
		self.entries
			.values()
			.find(|registration| registration.selector().class_name() == class)
	}

	/// Appends an upgrade callback. Unknown ids are ignored.
	pub fn add_upgrade_callback(&mut self, id: &str, callback: impl Fn(&E) + 'static) {
		match self.entries.get_mut(id) {
			Some(registration) => registration.push_callback(Rc::new(callback)),
			None => trace!(behavior = id, "ignoring upgrade callback for unknown behavior"),
		}
	}

	/// Registrations in registration order.
	pub fn all(&self) -> impl Iterator<Item = &BehaviorRegistration<E>> + '_ {
		self.entries.values()
	}

	pub fn ids(&self) -> impl Iterator<Item = &BehaviorId> + '_ {
		self.entries.keys()
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

impl<E> Default for Registry<E> {
	fn default() -> Self {
		Self::new()
	}
}

impl<E> fmt::Debug for Registry<E> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_list().entries(self.entries.values()).finish()
	}
}
