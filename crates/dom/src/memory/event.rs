use std::cell::{Cell, RefCell};

use super::Node;

/// Handle returned by [`Node::add_listener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub(super) u64);

/// Pointer position in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}
}

/// Parameters for [`Node::dispatch`].
#[derive(Debug, Clone, Default)]
pub struct EventInit {
	kind: String,
	bubbles: bool,
	cancelable: bool,
	pointer: Option<Point>,
	detail: Option<String>,
}

impl EventInit {
	/// A non-bubbling, non-cancelable event of type `kind`.
	pub fn new(kind: impl Into<String>) -> Self {
		Self {
			kind: kind.into(),
			..Self::default()
		}
	}

	pub fn bubbles(mut self, bubbles: bool) -> Self {
		self.bubbles = bubbles;
		self
	}

	pub fn cancelable(mut self, cancelable: bool) -> Self {
		self.cancelable = cancelable;
		self
	}

	pub fn pointer(mut self, at: Point) -> Self {
		self.pointer = Some(at);
		self
	}

	pub fn detail(mut self, detail: impl Into<String>) -> Self {
		self.detail = Some(detail.into());
		self
	}
}

/// An event in flight.
#[derive(Debug)]
pub struct Event {
	init: EventInit,
	target: Node,
	current: RefCell<Option<Node>>,
	default_prevented: Cell<bool>,
	propagation_stopped: Cell<bool>,
}

impl Event {
	pub(super) fn new(init: EventInit, target: Node) -> Self {
		Self {
			init,
			target,
			current: RefCell::new(None),
			default_prevented: Cell::new(false),
			propagation_stopped: Cell::new(false),
		}
	}

	pub fn kind(&self) -> &str {
		&self.init.kind
	}

	/// Element the event was dispatched on.
	pub fn target(&self) -> &Node {
		&self.target
	}

	/// Element whose listeners are currently running.
	pub fn current_target(&self) -> Option<Node> {
		self.current.borrow().clone()
	}

	pub fn bubbles(&self) -> bool {
		self.init.bubbles
	}

	pub fn cancelable(&self) -> bool {
		self.init.cancelable
	}

	pub fn pointer(&self) -> Option<Point> {
		self.init.pointer
	}

	pub fn detail(&self) -> Option<&str> {
		self.init.detail.as_deref()
	}

	/// Marks the event as vetoed. Ignored for non-cancelable events.
	pub fn prevent_default(&self) {
		if self.init.cancelable {
			self.default_prevented.set(true);
		}
	}

	pub fn default_prevented(&self) -> bool {
		self.default_prevented.get()
	}

	/// Stops bubbling after the current element's listeners finish.
	pub fn stop_propagation(&self) {
		self.propagation_stopped.set(true);
	}

	pub(super) fn propagation_stopped(&self) -> bool {
		self.propagation_stopped.get()
	}

	pub(super) fn set_current(&self, node: &Node) {
		*self.current.borrow_mut() = Some(node.clone());
	}
}
