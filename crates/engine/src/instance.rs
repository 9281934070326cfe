use std::any::Any;
use std::fmt;

use uplift_registry::{BehaviorId, Teardown};

/// Stable handle to a live instance. Never reused within one engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceKey(pub(crate) u64);

/// A behavior object attached to one element.
///
/// The element is a lookup key; the instance does not own it. The behavior id and
/// teardown are captured at creation, so replacing a registration later does not change
/// how existing instances are torn down.
pub struct Instance<E> {
	pub(crate) key: InstanceKey,
	pub(crate) element: E,
	pub(crate) behavior: BehaviorId,
	pub(crate) teardown: Option<Teardown>,
	pub(crate) object: Box<dyn Any>,
}

impl<E> Instance<E> {
	pub fn key(&self) -> InstanceKey {
		self.key
	}

	pub fn element(&self) -> &E {
		&self.element
	}

	pub fn behavior(&self) -> &BehaviorId {
		&self.behavior
	}

	pub fn is_disposable(&self) -> bool {
		self.teardown.is_some()
	}

	pub fn downcast_ref<B: Any>(&self) -> Option<&B> {
		self.object.downcast_ref()
	}

	pub fn downcast_mut<B: Any>(&mut self) -> Option<&mut B> {
		self.object.downcast_mut()
	}
}

impl<E: fmt::Debug> fmt::Debug for Instance<E> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Instance")
			.field("key", &self.key)
			.field("element", &self.element)
			.field("behavior", &self.behavior)
			.field("disposable", &self.is_disposable())
			.finish_non_exhaustive()
	}
}
