use std::any::Any;
use std::fmt;

use indexmap::IndexMap;
use rustc_hash::{FxBuildHasher, FxHashMap};
use tracing::{debug, trace};
use uplift_dom::{ComponentEvent, ComponentEventKind, Document, Element};
use uplift_registry::{BehaviorId, Registry, Selector};

use crate::{EngineConfig, EngineError, Instance, InstanceKey, Marker, Result};

/// Upgrade engine over a document `D`.
///
/// Owns the behavior registry it was constructed with, the live-instance list (in
/// creation order) and the exposure side table.
pub struct Engine<D: Document> {
	document: D,
	registry: Registry<D::Element>,
	config: EngineConfig,
	live: IndexMap<InstanceKey, Instance<D::Element>, FxBuildHasher>,
	exposed: FxHashMap<D::Element, FxHashMap<BehaviorId, InstanceKey>>,
	next_key: u64,
	bootstrapped: bool,
}

impl<D: Document> Engine<D> {
	pub fn new(document: D, registry: Registry<D::Element>) -> Self {
		Self::with_config(document, registry, EngineConfig::default())
	}

	pub fn with_config(document: D, registry: Registry<D::Element>, config: EngineConfig) -> Self {
		Self {
			document,
			registry,
			config,
			live: IndexMap::default(),
			exposed: FxHashMap::default(),
			next_key: 0,
			bootstrapped: false,
		}
	}

	pub fn document(&self) -> &D {
		&self.document
	}

	pub fn registry(&self) -> &Registry<D::Element> {
		&self.registry
	}

	/// Mutable registry access, for behaviors or callbacks added after construction.
	///
	/// New behaviors are only picked up by later scans.
	pub fn registry_mut(&mut self) -> &mut Registry<D::Element> {
		&mut self.registry
	}

	pub fn config(&self) -> &EngineConfig {
		&self.config
	}

	/// Upgrades matching elements in document order.
	///
	/// - `behavior` is `None`: every registration is scanned with its own selector, in
	///   registration order. `selector` is ignored.
	/// - `behavior` given, `selector` is `None`: the registered selector is used. An
	///   unregistered behavior matches nothing.
	/// - Both given: elements matching `selector` are upgraded with `behavior`, which
	///   must be registered.
	///
	/// Returns the number of new upgrades.
	pub fn scan_document(&mut self, behavior: Option<&str>, selector: Option<&Selector>) -> Result<usize> {
		let Some(behavior) = behavior else {
			let ids: Vec<BehaviorId> = self.registry.ids().cloned().collect();
			let mut upgraded = 0;
			for id in &ids {
				upgraded += self.scan_document(Some(id.as_str()), None)?;
			}
			return Ok(upgraded);
		};

		let selector = match (selector, self.registry.find(behavior)) {
			(Some(selector), _) => selector.clone(),
			(None, Some(registration)) => registration.selector().clone(),
			(None, None) => {
				debug!(behavior, "scan for unregistered behavior matches nothing");
				return Ok(0);
			}
		};

		let candidates = self.document.elements_by_class(selector.class_name());
		trace!(behavior, %selector, candidates = candidates.len(), "scanning document");
		let mut upgraded = 0;
		for element in &candidates {
			if self.upgrade_element(element, behavior)? {
				upgraded += 1;
			}
		}
		Ok(upgraded)
	}

	/// Upgrades `element` with `behavior`.
	///
	/// Returns `Ok(false)` without side effects if the marker already lists the behavior
	/// or a listener vetoed the `upgrading` event.
	///
	/// # Errors
	///
	/// [`EngineError::UnknownBehavior`] if `behavior` is not registered. The element is left
	/// untouched.
	pub fn upgrade_element(&mut self, element: &D::Element, behavior: &str) -> Result<bool> {
		let mut marker = self.marker(element);
		if marker.contains(behavior) {
			trace!(behavior, ?element, "already upgraded");
			return Ok(false);
		}

		let Some(registration) = self.registry.find(behavior) else {
			return Err(EngineError::UnknownBehavior(behavior.to_owned()));
		};

		if !self.emit(element, ComponentEventKind::Upgrading, behavior) {
			debug!(behavior, ?element, "upgrade vetoed");
			return Ok(false);
		}

		marker.insert(behavior);
		element.set_attribute(&self.config.marker_attribute, &marker.to_string());

		let object = registration.instantiate(element);
		let key = InstanceKey(self.next_key);
		self.next_key += 1;
		self.live.insert(
			key,
			Instance {
				key,
				element: element.clone(),
				behavior: registration.id().clone(),
				teardown: registration.teardown(),
				object,
			},
		);

		for callback in registration.upgrade_callbacks() {
			callback(element);
		}

		if registration.auto_expose() {
			self.exposed
				.entry(element.clone())
				.or_default()
				.insert(registration.id().clone(), key);
		}

		debug!(behavior, ?element, instance = key.0, "upgraded element");
		self.emit(element, ComponentEventKind::Upgraded, behavior);
		Ok(true)
	}

	/// Upgrades `element` with every behavior whose selector class it carries, in
	/// registration order.
	pub fn upgrade_element_all(&mut self, element: &D::Element) -> Result<usize> {
		let ids: Vec<BehaviorId> = self
			.registry
			.all()
			.filter(|registration| element.has_class(registration.selector().class_name()))
			.map(|registration| registration.id().clone())
			.collect();

		let mut upgraded = 0;
		for id in &ids {
			if self.upgrade_element(element, id)? {
				upgraded += 1;
			}
		}
		Ok(upgraded)
	}

	/// Upgrades each element and its subtree with all matching behaviors.
	pub fn upgrade_elements<I>(&mut self, elements: I) -> Result<usize>
	where
		I: IntoIterator<Item = D::Element>,
	{
		let mut upgraded = 0;
		for element in elements {
			upgraded += self.upgrade_element_all(&element)?;
			for descendant in element.descendants() {
				upgraded += self.upgrade_element_all(&descendant)?;
			}
		}
		Ok(upgraded)
	}

	/// Full-document pass over every registration.
	///
	/// Safe to call again after inserting elements; only elements not yet upgraded are
	/// affected.
	pub fn upgrade_all_registered(&mut self) -> Result<usize> {
		self.scan_document(None, None)
	}

	/// Runs [`Self::upgrade_all_registered`] the first time it is called; later calls
	/// return `Ok(0)`. Hook this to the host's readiness signal.
	pub fn bootstrap(&mut self) -> Result<usize> {
		if self.bootstrapped {
			trace!("bootstrap already ran");
			return Ok(0);
		}
		self.bootstrapped = true;
		let upgraded = self.upgrade_all_registered()?;
		debug!(upgraded, behaviors = self.registry.len(), "bootstrap complete");
		Ok(upgraded)
	}

	/// First live instance, in creation order, attached to `element`.
	pub fn find_instance_by_element(&self, element: &D::Element) -> Option<&Instance<D::Element>> {
		self.live.values().find(|instance| &instance.element == element)
	}

	/// All live instances attached to `element`, in creation order.
	pub fn instances_for<'a>(&'a self, element: &'a D::Element) -> impl Iterator<Item = &'a Instance<D::Element>> + 'a {
		self.live.values().filter(move |instance| &instance.element == element)
	}

	pub fn live_instances(&self) -> impl Iterator<Item = &Instance<D::Element>> + '_ {
		self.live.values()
	}

	pub fn live_count(&self) -> usize {
		self.live.len()
	}

	/// The instance exposed on `element` under `behavior`, if that behavior auto-exposes
	/// and the instance has type `B`.
	pub fn exposed<B: Any>(&self, element: &D::Element, behavior: &str) -> Option<&B> {
		let key = self.exposed.get(element)?.get(behavior)?;
		self.live.get(key)?.downcast_ref()
	}

	pub fn exposed_mut<B: Any>(&mut self, element: &D::Element, behavior: &str) -> Option<&mut B> {
		let key = *self.exposed.get(element)?.get(behavior)?;
		self.live.get_mut(&key)?.downcast_mut()
	}

	/// Current marker of `element`.
	pub fn marker(&self, element: &D::Element) -> Marker {
		Marker::parse(element.attribute(&self.config.marker_attribute).as_deref())
	}

	/// Downgrades each element's first live instance, if that instance has a teardown.
	///
	/// Pass a single element as `[element]`. Elements without a live instance, or whose
	/// first instance cannot be torn down, are skipped. Returns the number of instances
	/// torn down.
	pub fn downgrade<I>(&mut self, elements: I) -> usize
	where
		I: IntoIterator<Item = D::Element>,
	{
		let mut downgraded = 0;
		for element in elements {
			if self.downgrade_element(&element) {
				downgraded += 1;
			}
		}
		downgraded
	}

	fn downgrade_element(&mut self, element: &D::Element) -> bool {
		let Some((key, teardown)) = self
			.find_instance_by_element(element)
			.map(|instance| (instance.key, instance.teardown))
		else {
			trace!(?element, "no live instance to downgrade");
			return false;
		};
		let Some(teardown) = teardown else {
			trace!(?element, "first instance has no teardown");
			return false;
		};
		let Some(mut instance) = self.live.shift_remove(&key) else {
			return false;
		};

		teardown.run(instance.object.as_mut());

		if let Some(slots) = self.exposed.get_mut(element) {
			if slots.get(instance.behavior.as_str()) == Some(&key) {
				slots.remove(instance.behavior.as_str());
			}
			if slots.is_empty() {
				self.exposed.remove(element);
			}
		}

		let mut marker = self.marker(element);
		marker.remove(&instance.behavior);
		element.set_attribute(&self.config.marker_attribute, &marker.to_string());

		debug!(behavior = %instance.behavior, ?element, instance = key.0, "downgraded element");
		self.emit(element, ComponentEventKind::Downgraded, &instance.behavior);
		true
	}

	fn emit(&self, element: &D::Element, kind: ComponentEventKind, behavior: &str) -> bool {
		if !self.config.emit_events {
			return true;
		}
		element.dispatch_component_event(&ComponentEvent::new(kind, behavior))
	}
}

impl<D> fmt::Debug for Engine<D>
where
	D: Document + fmt::Debug,
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Engine")
			.field("document", &self.document)
			.field("registry", &self.registry)
			.field("config", &self.config)
			.field("live", &self.live.len())
			.field("bootstrapped", &self.bootstrapped)
			.finish_non_exhaustive()
	}
}
