use std::any::Any;
use std::fmt;
use std::rc::Rc;

use crate::{BehaviorId, RegistryError, Selector};

/// Teardown capability of a behavior instance.
///
/// `dispose` must release everything the factory attached: listeners, child elements,
/// scheduled frames. The engine calls it exactly once, during downgrade.
pub trait Disposable {
	fn dispose(&mut self);
}

/// Callback fired after an element is upgraded with a behavior.
pub type UpgradeCallback<E> = Rc<dyn Fn(&E)>;

type Factory<E> = Rc<dyn Fn(&E) -> Box<dyn Any>>;

/// Type-erased [`Disposable::dispose`] for one concrete instance type.
#[derive(Clone, Copy)]
pub struct Teardown(fn(&mut dyn Any));

impl Teardown {
	fn of<B: Disposable + 'static>() -> Self {
		Self(dispose_as::<B>)
	}

	/// Runs the teardown on an instance produced by the same registration.
	pub fn run(self, instance: &mut dyn Any) {
		(self.0)(instance);
	}
}

impl fmt::Debug for Teardown {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("Teardown")
	}
}

fn dispose_as<B: Disposable + 'static>(instance: &mut dyn Any) {
	match instance.downcast_mut::<B>() {
		Some(instance) => instance.dispose(),
		None => debug_assert!(false, "teardown applied to an instance of another behavior"),
	}
}

/// Everything the engine needs to know about one behavior.
pub struct BehaviorRegistration<E> {
	id: BehaviorId,
	selector: Selector,
	factory: Factory<E>,
	teardown: Option<Teardown>,
	auto_expose: bool,
	callbacks: Vec<UpgradeCallback<E>>,
}

impl<E: 'static> BehaviorRegistration<E> {
	/// A behavior whose instances cannot be torn down; downgrade leaves them in place.
	pub fn new<B, F>(id: &str, selector: &str, factory: F) -> Result<Self, RegistryError>
	where
		B: Any,
		F: Fn(&E) -> B + 'static,
	{
		Self::build(id, selector, factory, None)
	}

	/// A behavior whose instances are torn down through [`Disposable`] on downgrade.
	pub fn disposable<B, F>(id: &str, selector: &str, factory: F) -> Result<Self, RegistryError>
	where
		B: Disposable + Any,
		F: Fn(&E) -> B + 'static,
	{
		Self::build(id, selector, factory, Some(Teardown::of::<B>()))
	}

	fn build<B, F>(id: &str, selector: &str, factory: F, teardown: Option<Teardown>) -> Result<Self, RegistryError>
	where
		B: Any,
		F: Fn(&E) -> B + 'static,
	{
		Ok(Self {
			id: BehaviorId::new(id)?,
			selector: Selector::class(selector)?,
			factory: Rc::new(move |element: &E| Box::new(factory(element)) as Box<dyn Any>),
			teardown,
			auto_expose: false,
			callbacks: Vec::new(),
		})
	}
}

impl<E> BehaviorRegistration<E> {
	/// Exposes created instances on their element under the behavior id.
	pub fn exposed(mut self) -> Self {
		self.auto_expose = true;
		self
	}

	pub fn with_upgrade_callback(mut self, callback: impl Fn(&E) + 'static) -> Self {
		self.callbacks.push(Rc::new(callback));
		self
	}

	pub fn id(&self) -> &BehaviorId {
		&self.id
	}

	pub fn selector(&self) -> &Selector {
		&self.selector
	}

	pub fn auto_expose(&self) -> bool {
		self.auto_expose
	}

	pub fn teardown(&self) -> Option<Teardown> {
		self.teardown
	}

	pub fn has_teardown(&self) -> bool {
		self.teardown.is_some()
	}

	/// Callbacks in the order they were added.
	pub fn upgrade_callbacks(&self) -> &[UpgradeCallback<E>] {
		&self.callbacks
	}

	/// Builds a new instance for `element`.
	pub fn instantiate(&self, element: &E) -> Box<dyn Any> {
		(self.factory)(element)
	}

	pub(crate) fn push_callback(&mut self, callback: UpgradeCallback<E>) {
		self.callbacks.push(callback);
	}
}

impl<E> fmt::Debug for BehaviorRegistration<E> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("BehaviorRegistration")
			.field("id", &self.id)
			.field("selector", &self.selector)
			.field("teardown", &self.teardown.is_some())
			.field("auto_expose", &self.auto_expose)
			.field("callbacks", &self.callbacks.len())
			.finish_non_exhaustive()
	}
}
