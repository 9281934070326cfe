use std::cell::Cell;
use std::rc::Rc;

use tracing::trace;
use uplift_dom::{Event, FrameId, ListenerId, Node};
use uplift_registry::{BehaviorRegistration, Disposable, RegistryError};

/// Behavior id of [`Ripple`].
pub const RIPPLE: &str = "UpliftRipple";
/// Class that marks ripple candidates.
pub const RIPPLE_CLASS: &str = "up-js-ripple-effect";
/// Ripple always starts from the center instead of the pointer.
pub const RIPPLE_CENTER_CLASS: &str = "up-ripple--center";
/// Class of the animated element inside the candidate.
pub const RIPPLE_ELEMENT_CLASS: &str = "up-ripple";
pub const IS_VISIBLE: &str = "is-visible";
pub const IS_ANIMATING: &str = "is-animating";

const IGNORE_EVENTS_CLASS: &str = "up-js-ripple-effect--ignore-events";
const INITIAL_SCALE: &str = "scale(0.0001, 0.0001)";

/// Animation state shared by the listeners and frame callbacks.
struct RippleState {
	ripple: Node,
	recentering: bool,
	size: Cell<Option<f64>>,
	x: Cell<f64>,
	y: Cell<f64>,
	frame_count: Cell<u32>,
	ignoring_mouse_down: Cell<bool>,
	animation_frame: Cell<Option<FrameId>>,
	hide_frame: Cell<Option<FrameId>>,
}

impl RippleState {
	fn apply_styles(&self, start: bool) {
		let offset = format!("translate({}px, {}px)", self.x.get(), self.y.get());
		let transform = if start {
			format!("translate(-50%, -50%) {offset} {INITIAL_SCALE}")
		} else {
			format!("translate(-50%, -50%) {offset}")
		};
		self.ripple.set_style("transform", &transform);
		if start {
			self.ripple.remove_class(IS_ANIMATING);
		} else {
			self.ripple.add_class(IS_ANIMATING);
		}
	}

	fn press(self: &Rc<Self>, event: &Event) {
		let Some(element) = event.current_target() else {
			return;
		};
		let rect = element.rect();
		if self.size.get().is_none() {
			let size = (rect.width * rect.width + rect.height * rect.height).sqrt() * 2.0 + 2.0;
			self.size.set(Some(size));
			self.ripple.set_style("width", &format!("{size}px"));
			self.ripple.set_style("height", &format!("{size}px"));
		}
		self.ripple.add_class(IS_VISIBLE);

		if event.kind() == "mousedown" && self.ignoring_mouse_down.get() {
			self.ignoring_mouse_down.set(false);
			return;
		}
		if event.kind() == "touchstart" {
			self.ignoring_mouse_down.set(true);
		}
		if self.frame_count.get() > 0 {
			return;
		}
		self.frame_count.set(1);

		let (x, y) = match event.pointer() {
			Some(at) if !self.recentering => (at.x - rect.x, at.y - rect.y),
			_ => (rect.width / 2.0, rect.height / 2.0),
		};
		self.x.set(x.round());
		self.y.set(y.round());
		self.apply_styles(true);
		self.schedule_animation();
	}

	fn release(self: &Rc<Self>) {
		let Some(doc) = self.ripple.owner_document() else {
			return;
		};
		if let Some(previous) = self.hide_frame.take() {
			doc.cancel_frame(previous);
		}
		let state = self.clone();
		let id = doc.request_frame(move || {
			state.hide_frame.set(None);
			state.ripple.remove_class(IS_VISIBLE);
		});
		self.hide_frame.set(Some(id));
	}

	fn schedule_animation(self: &Rc<Self>) {
		let Some(doc) = self.ripple.owner_document() else {
			return;
		};
		let state = self.clone();
		let id = doc.request_frame(move || state.animation_frame());
		self.animation_frame.set(Some(id));
	}

	fn animation_frame(self: &Rc<Self>) {
		self.animation_frame.set(None);
		let remaining = self.frame_count.get();
		if remaining > 0 {
			self.frame_count.set(remaining - 1);
			self.schedule_animation();
		} else {
			self.apply_styles(false);
		}
	}

	fn cancel_frames(&self) {
		let Some(doc) = self.ripple.owner_document() else {
			return;
		};
		for slot in [&self.animation_frame, &self.hide_frame] {
			if let Some(id) = slot.take() {
				doc.cancel_frame(id);
			}
		}
	}
}

/// Press feedback: grows a circle from the pointer over two frames.
///
/// Inert when the element has no [`RIPPLE_ELEMENT_CLASS`] descendant or opts out of
/// events.
pub struct Ripple {
	element: Node,
	state: Option<Rc<RippleState>>,
	listeners: Vec<ListenerId>,
}

impl Ripple {
	pub fn new(element: &Node) -> Self {
		let mut ripple = Self {
			element: element.clone(),
			state: None,
			listeners: Vec::new(),
		};
		if element.has_class(IGNORE_EVENTS_CLASS) {
			return ripple;
		}
		let Some(target) = element
			.descendants()
			.into_iter()
			.find(|node| node.has_class(RIPPLE_ELEMENT_CLASS))
		else {
			trace!(?element, "no ripple element; ripple stays inert");
			return ripple;
		};

		let state = Rc::new(RippleState {
			ripple: target,
			recentering: element.has_class(RIPPLE_CENTER_CLASS),
			size: Cell::new(None),
			x: Cell::new(0.0),
			y: Cell::new(0.0),
			frame_count: Cell::new(0),
			ignoring_mouse_down: Cell::new(false),
			animation_frame: Cell::new(None),
			hide_frame: Cell::new(None),
		});

		for kind in ["mousedown", "touchstart"] {
			let state = state.clone();
			ripple
				.listeners
				.push(element.add_listener(kind, move |event| state.press(event)));
		}
		for kind in ["mouseup", "mouseleave", "touchend", "blur"] {
			let state = state.clone();
			ripple
				.listeners
				.push(element.add_listener(kind, move |_| state.release()));
		}
		ripple.state = Some(state);
		ripple
	}

	pub fn element(&self) -> &Node {
		&self.element
	}

	/// The animated element, if the ripple is active.
	pub fn ripple_element(&self) -> Option<&Node> {
		self.state.as_ref().map(|state| &state.ripple)
	}

	pub fn frame_count(&self) -> u32 {
		self.state.as_ref().map_or(0, |state| state.frame_count.get())
	}

	pub fn set_frame_count(&self, count: u32) {
		if let Some(state) = &self.state {
			state.frame_count.set(count);
		}
	}
}

impl std::fmt::Debug for Ripple {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Ripple")
			.field("element", &self.element)
			.field("active", &self.state.is_some())
			.field("listeners", &self.listeners.len())
			.finish()
	}
}

impl Disposable for Ripple {
	fn dispose(&mut self) {
		for id in self.listeners.drain(..) {
			self.element.remove_listener(id);
		}
		if let Some(state) = self.state.take() {
			state.cancel_frames();
		}
	}
}

pub(crate) fn registration() -> Result<BehaviorRegistration<Node>, RegistryError> {
	BehaviorRegistration::disposable(RIPPLE, RIPPLE_CLASS, Ripple::new)
}
