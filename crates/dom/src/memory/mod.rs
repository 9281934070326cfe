//! In-memory document.
//!
//! A small reference-counted element tree that behaves like a browser document for
//! the parts the upgrade engine and the bundled widgets use: classes, attributes,
//! inline style, listeners with bubbling dispatch, focus, and an animation-frame queue.
//!
//! Nodes hold a weak back-reference to their document. Dropping the last
//! [`MemoryDocument`] handle leaves nodes usable as detached trees, but
//! [`Node::owner_document`] then returns `None` and focus/frame calls become no-ops.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

mod event;
mod frame;
mod node;

#[cfg(test)]
mod tests;

pub use event::{Event, EventInit, ListenerId, Point};
pub use frame::FrameId;
use frame::FrameQueue;
pub use node::{Node, Rect, WeakNode};
use node::NodeData;

pub(crate) struct DocumentInner {
	root: Node,
	body: Node,
	focused: RefCell<Weak<NodeData>>,
	frames: RefCell<FrameQueue>,
}

/// Handle to an in-memory document. Clones share the same tree.
#[derive(Clone)]
pub struct MemoryDocument {
	inner: Rc<DocumentInner>,
}

impl MemoryDocument {
	/// Creates a document with an `html` root and an empty `body`.
	pub fn new() -> Self {
		let inner = Rc::new_cyclic(|owner: &Weak<DocumentInner>| {
			let root = Node::detached("html", owner.clone());
			let body = Node::detached("body", owner.clone());
			root.append_child(&body);
			DocumentInner {
				root,
				body,
				focused: RefCell::new(Weak::new()),
				frames: RefCell::default(),
			}
		});
		Self { inner }
	}

	pub(crate) fn from_inner(inner: Rc<DocumentInner>) -> Self {
		Self { inner }
	}

	/// Creates a detached element owned by this document.
	pub fn create_element(&self, tag: &str) -> Node {
		Node::detached(tag, Rc::downgrade(&self.inner))
	}

	pub fn root(&self) -> Node {
		self.inner.root.clone()
	}

	pub fn body(&self) -> Node {
		self.inner.body.clone()
	}

	/// Returns attached elements carrying `class`, in document order.
	pub fn elements_by_class(&self, class: &str) -> Vec<Node> {
		self.inner
			.root
			.descendants()
			.into_iter()
			.filter(|node| node.has_class(class))
			.collect()
	}

	/// Returns the focused element, if any.
	pub fn focused(&self) -> Option<Node> {
		self.inner.focused.borrow().upgrade().map(Node::from_data)
	}

	/// Schedules `callback` for the next [`Self::run_frame`].
	pub fn request_frame(&self, callback: impl FnOnce() + 'static) -> FrameId {
		self.inner.frames.borrow_mut().request(Box::new(callback))
	}

	/// Cancels a scheduled frame callback. Returns false if it already ran or was cancelled.
	pub fn cancel_frame(&self, id: FrameId) -> bool {
		self.inner.frames.borrow_mut().cancel(id)
	}

	/// Runs every callback scheduled before this call.
	///
	/// Callbacks requested while the frame runs wait for the next frame. Callbacks
	/// cancelled by an earlier callback in the same frame do not run.
	pub fn run_frame(&self) -> usize {
		let boundary = self.inner.frames.borrow().boundary();
		let mut ran = 0;
		loop {
			let next = self.inner.frames.borrow_mut().pop_due(boundary);
			let Some(callback) = next else {
				break;
			};
			callback();
			ran += 1;
		}
		ran
	}

	/// Number of frame callbacks waiting to run.
	pub fn pending_frames(&self) -> usize {
		self.inner.frames.borrow().len()
	}

	fn set_focus(&self, node: Option<&Node>) {
		*self.inner.focused.borrow_mut() = node.map_or_else(Weak::new, Node::weak_data);
	}
}

impl Default for MemoryDocument {
	fn default() -> Self {
		Self::new()
	}
}

impl fmt::Debug for MemoryDocument {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("MemoryDocument")
			.field("elements", &self.inner.root.descendants().len())
			.field("pending_frames", &self.pending_frames())
			.finish()
	}
}

impl crate::Document for MemoryDocument {
	type Element = Node;

	fn elements_by_class(&self, class: &str) -> Vec<Node> {
		MemoryDocument::elements_by_class(self, class)
	}
}
