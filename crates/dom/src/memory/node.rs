use std::cell::{Cell, RefCell};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::{Rc, Weak};

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use super::event::{Event, EventInit, ListenerId};
use super::{DocumentInner, MemoryDocument};
use crate::{ComponentEvent, Element};

/// Layout box in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
	pub x: f64,
	pub y: f64,
	pub width: f64,
	pub height: f64,
}

impl Rect {
	pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
		Self { x, y, width, height }
	}
}

type Callback = Rc<dyn Fn(&Event)>;

struct Listener {
	kind: Box<str>,
	callback: Callback,
}

pub(super) struct NodeData {
	tag: Box<str>,
	owner: Weak<DocumentInner>,
	parent: RefCell<Weak<NodeData>>,
	children: RefCell<Vec<Node>>,
	classes: RefCell<SmallVec<[Box<str>; 4]>>,
	attributes: RefCell<FxHashMap<Box<str>, String>>,
	style: RefCell<FxHashMap<Box<str>, String>>,
	rect: Cell<Rect>,
	listeners: RefCell<IndexMap<ListenerId, Listener>>,
	next_listener: Cell<u64>,
}

/// Element handle. Clones refer to the same element; equality is identity.
#[derive(Clone)]
pub struct Node(Rc<NodeData>);

/// Weak element handle. Does not keep the element alive.
#[derive(Clone)]
pub struct WeakNode(Weak<NodeData>);

impl WeakNode {
	pub fn upgrade(&self) -> Option<Node> {
		self.0.upgrade().map(Node)
	}
}

impl fmt::Debug for WeakNode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.upgrade() {
			Some(node) => write!(f, "WeakNode({node:?})"),
			None => f.write_str("WeakNode(<dropped>)"),
		}
	}
}

impl Node {
	pub(super) fn detached(tag: &str, owner: Weak<DocumentInner>) -> Self {
		Self(Rc::new(NodeData {
			tag: tag.into(),
			owner,
			parent: RefCell::new(Weak::new()),
			children: RefCell::default(),
			classes: RefCell::default(),
			attributes: RefCell::default(),
			style: RefCell::default(),
			rect: Cell::default(),
			listeners: RefCell::default(),
			next_listener: Cell::new(0),
		}))
	}

	pub(super) fn from_data(data: Rc<NodeData>) -> Self {
		Self(data)
	}

	pub(super) fn weak_data(&self) -> Weak<NodeData> {
		Rc::downgrade(&self.0)
	}

	/// Non-owning handle, for listeners that refer back to their element.
	pub fn weak(&self) -> WeakNode {
		WeakNode(Rc::downgrade(&self.0))
	}

	pub fn tag(&self) -> &str {
		&self.0.tag
	}

	pub fn owner_document(&self) -> Option<MemoryDocument> {
		self.0.owner.upgrade().map(MemoryDocument::from_inner)
	}

	pub fn parent(&self) -> Option<Self> {
		self.0.parent.borrow().upgrade().map(Self)
	}

	pub fn children(&self) -> Vec<Self> {
		self.0.children.borrow().clone()
	}

	/// Appends `child`, detaching it from its previous parent first.
	pub fn append_child(&self, child: &Self) {
		debug_assert!(!child.contains(self), "cannot append an ancestor into its own subtree");
		child.remove();
		*child.0.parent.borrow_mut() = Rc::downgrade(&self.0);
		self.0.children.borrow_mut().push(child.clone());
	}

	/// Detaches `child`. Returns false if it is not a direct child.
	pub fn remove_child(&self, child: &Self) -> bool {
		let mut children = self.0.children.borrow_mut();
		let Some(pos) = children.iter().position(|c| c == child) else {
			return false;
		};
		children.remove(pos);
		*child.0.parent.borrow_mut() = Weak::new();
		true
	}

	/// Detaches this element from its parent, if any.
	pub fn remove(&self) {
		if let Some(parent) = self.parent() {
			parent.remove_child(self);
		}
	}

	/// Returns true if `other` is this element or one of its descendants.
	pub fn contains(&self, other: &Self) -> bool {
		let mut cursor = Some(other.clone());
		while let Some(node) = cursor {
			if &node == self {
				return true;
			}
			cursor = node.parent();
		}
		false
	}

	/// Descendants in document (pre-)order, excluding `self`.
	pub fn descendants(&self) -> Vec<Self> {
		let mut out = Vec::new();
		let mut stack: Vec<Self> = self.children().into_iter().rev().collect();
		while let Some(node) = stack.pop() {
			stack.extend(node.children().into_iter().rev());
			out.push(node);
		}
		out
	}

	pub fn add_class(&self, class: &str) {
		let mut classes = self.0.classes.borrow_mut();
		if !classes.iter().any(|c| &**c == class) {
			classes.push(class.into());
		}
	}

	pub fn remove_class(&self, class: &str) -> bool {
		let mut classes = self.0.classes.borrow_mut();
		let before = classes.len();
		classes.retain(|c| &**c != class);
		classes.len() != before
	}

	pub fn has_class(&self, class: &str) -> bool {
		self.0.classes.borrow().iter().any(|c| &**c == class)
	}

	/// Class names in insertion order.
	pub fn class_list(&self) -> Vec<String> {
		self.0.classes.borrow().iter().map(|c| c.to_string()).collect()
	}

	pub fn attribute(&self, name: &str) -> Option<String> {
		self.0.attributes.borrow().get(name).cloned()
	}

	pub fn set_attribute(&self, name: &str, value: &str) {
		self.0.attributes.borrow_mut().insert(name.into(), value.to_owned());
	}

	pub fn remove_attribute(&self, name: &str) -> Option<String> {
		self.0.attributes.borrow_mut().remove(name)
	}

	pub fn style(&self, property: &str) -> Option<String> {
		self.0.style.borrow().get(property).cloned()
	}

	pub fn set_style(&self, property: &str, value: &str) {
		self.0.style.borrow_mut().insert(property.into(), value.to_owned());
	}

	pub fn remove_style(&self, property: &str) -> Option<String> {
		self.0.style.borrow_mut().remove(property)
	}

	pub fn rect(&self) -> Rect {
		self.0.rect.get()
	}

	pub fn set_rect(&self, rect: Rect) {
		self.0.rect.set(rect);
	}

	/// Registers `callback` for events of type `kind` reaching this element.
	pub fn add_listener(&self, kind: &str, callback: impl Fn(&Event) + 'static) -> ListenerId {
		let id = ListenerId(self.0.next_listener.get());
		self.0.next_listener.set(id.0 + 1);
		self.0.listeners.borrow_mut().insert(
			id,
			Listener {
				kind: kind.into(),
				callback: Rc::new(callback),
			},
		);
		id
	}

	pub fn remove_listener(&self, id: ListenerId) -> bool {
		self.0.listeners.borrow_mut().shift_remove(&id).is_some()
	}

	pub fn listener_count(&self) -> usize {
		self.0.listeners.borrow().len()
	}

	fn listeners_for(&self, kind: &str) -> Vec<Callback> {
		self.0
			.listeners
			.borrow()
			.values()
			.filter(|l| &*l.kind == kind)
			.map(|l| l.callback.clone())
			.collect()
	}

	/// Dispatches an event with this element as target.
	///
	/// Listeners run in registration order, target first, then ancestors when the
	/// event bubbles. Listeners may add or remove listeners while running; the set
	/// for each element is fixed when that element is reached.
	///
	/// Returns false if a listener prevented the default of a cancelable event.
	pub fn dispatch(&self, init: EventInit) -> bool {
		let event = Event::new(init, self.clone());
		let mut path = vec![self.clone()];
		if event.bubbles() {
			let mut cursor = self.parent();
			while let Some(node) = cursor {
				cursor = node.parent();
				path.push(node);
			}
		}

		for node in &path {
			event.set_current(node);
			for callback in node.listeners_for(event.kind()) {
				callback(&event);
			}
			if event.propagation_stopped() {
				break;
			}
		}
		!event.default_prevented()
	}

	pub fn focus(&self) {
		if let Some(doc) = self.owner_document() {
			doc.set_focus(Some(self));
		}
	}

	/// Drops focus if this element holds it and dispatches `blur`.
	pub fn blur(&self) {
		if !self.is_focused() {
			return;
		}
		if let Some(doc) = self.owner_document() {
			doc.set_focus(None);
		}
		self.dispatch(EventInit::new("blur"));
	}

	pub fn is_focused(&self) -> bool {
		self.owner_document()
			.and_then(|doc| doc.focused())
			.is_some_and(|focused| &focused == self)
	}
}

impl PartialEq for Node {
	fn eq(&self, other: &Self) -> bool {
		Rc::ptr_eq(&self.0, &other.0)
	}
}

impl Eq for Node {}

impl Hash for Node {
	fn hash<H: Hasher>(&self, state: &mut H) {
		std::ptr::hash(Rc::as_ptr(&self.0), state);
	}
}

impl fmt::Debug for Node {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let classes = self.0.classes.borrow();
		if classes.is_empty() {
			write!(f, "<{}>", self.0.tag)
		} else {
			write!(f, "<{} class=\"{}\">", self.0.tag, classes.join(" "))
		}
	}
}

impl Element for Node {
	fn attribute(&self, name: &str) -> Option<String> {
		Node::attribute(self, name)
	}

	fn set_attribute(&self, name: &str, value: &str) {
		Node::set_attribute(self, name, value);
	}

	fn has_class(&self, class: &str) -> bool {
		Node::has_class(self, class)
	}

	fn descendants(&self) -> Vec<Self> {
		Node::descendants(self)
	}

	fn dispatch_component_event(&self, event: &ComponentEvent) -> bool {
		let init = EventInit::new(event.kind.name())
			.bubbles(true)
			.cancelable(event.kind.cancelable())
			.detail(event.behavior.clone());
		self.dispatch(init)
	}
}
