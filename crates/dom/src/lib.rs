//! Document host abstraction for the uplift engine.
//!
//! # Purpose
//!
//! The upgrade engine never touches a concrete DOM. It talks to a host through the
//! [`Document`] and [`Element`] traits, which cover exactly what the lifecycle needs:
//! class queries in document order, the marker attribute, subtree walks, and dispatch
//! of [`ComponentEvent`]s.
//!
//! # Hosts
//!
//! | Host | Notes |
//! |------|-------|
//! | [`memory::MemoryDocument`] | Reference-counted in-memory tree with listeners, focus and a frame queue. |
//!
//! Element handles are cheap to clone and compare by identity, the way browser element
//! handles do. Nothing here is `Send`; the whole stack is single-threaded.

use std::fmt;
use std::hash::Hash;

mod event;
pub mod memory;

pub use event::{ComponentEvent, ComponentEventKind};
pub use memory::{Event, EventInit, FrameId, ListenerId, MemoryDocument, Node, Point, Rect, WeakNode};

/// An element handle as seen by the upgrade engine.
///
/// Equality and hashing must follow element identity, not structure.
pub trait Element: Clone + Eq + Hash + fmt::Debug + 'static {
	/// Returns the value of attribute `name`, if set.
	fn attribute(&self, name: &str) -> Option<String>;

	/// Sets attribute `name` to `value`.
	fn set_attribute(&self, name: &str, value: &str);

	/// Returns true if the element carries class `class`.
	fn has_class(&self, class: &str) -> bool;

	/// Returns all descendants in document order, excluding `self`.
	fn descendants(&self) -> Vec<Self>;

	/// Dispatches a lifecycle event on the element.
	///
	/// Returns false if the event was cancelable and a listener prevented its default.
	fn dispatch_component_event(&self, event: &ComponentEvent) -> bool;
}

/// A document that can be scanned for upgrade candidates.
pub trait Document {
	/// Element handle type.
	type Element: Element;

	/// Returns every element carrying `class`, in document order.
	fn elements_by_class(&self, class: &str) -> Vec<Self::Element>;
}
