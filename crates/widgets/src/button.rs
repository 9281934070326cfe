use tracing::warn;
use uplift_dom::{ListenerId, Node};
use uplift_registry::{BehaviorRegistration, Disposable, RegistryError};

use crate::ripple::{RIPPLE_CLASS, RIPPLE_ELEMENT_CLASS};

/// Behavior id of [`Button`].
pub const BUTTON: &str = "UpliftButton";
/// Class that marks button candidates.
pub const BUTTON_CLASS: &str = "up-js-button";
/// Class of the container the button inserts when it carries [`RIPPLE_CLASS`].
pub const RIPPLE_CONTAINER_CLASS: &str = "up-button__ripple-container";

/// Drops focus after a click so the button does not stay highlighted.
#[derive(Debug)]
pub struct Button {
	element: Node,
	ripple_container: Option<Node>,
	listeners: Vec<(Node, ListenerId)>,
}

impl Button {
	pub fn new(element: &Node) -> Self {
		let mut listeners = Vec::new();
		let mut ripple_container = None;

		if element.has_class(RIPPLE_CLASS) {
			match element.owner_document() {
				Some(doc) => {
					let container = doc.create_element("span");
					container.add_class(RIPPLE_CONTAINER_CLASS);
					let ripple = doc.create_element("span");
					ripple.add_class(RIPPLE_ELEMENT_CLASS);
					container.append_child(&ripple);

					let button = element.weak();
					let id = ripple.add_listener("mouseup", move |_| {
						if let Some(button) = button.upgrade() {
							button.blur();
						}
					});
					listeners.push((ripple, id));
					element.append_child(&container);
					ripple_container = Some(container);
				}
				None => warn!(?element, "button outlived its document; skipping ripple container"),
			}
		}

		for kind in ["mouseup", "mouseleave"] {
			let id = element.add_listener(kind, |event| {
				if let Some(button) = event.current_target() {
					button.blur();
				}
			});
			listeners.push((element.clone(), id));
		}

		Self {
			element: element.clone(),
			ripple_container,
			listeners,
		}
	}

	pub fn element(&self) -> &Node {
		&self.element
	}

	pub fn ripple_container(&self) -> Option<&Node> {
		self.ripple_container.as_ref()
	}

	pub fn disable(&self) {
		self.element.set_attribute("disabled", "");
	}

	pub fn enable(&self) {
		self.element.remove_attribute("disabled");
	}

	pub fn is_disabled(&self) -> bool {
		self.element.attribute("disabled").is_some()
	}
}

impl Disposable for Button {
	fn dispose(&mut self) {
		for (node, id) in self.listeners.drain(..) {
			node.remove_listener(id);
		}
		if let Some(container) = self.ripple_container.take() {
			container.remove();
		}
	}
}

pub(crate) fn registration() -> Result<BehaviorRegistration<Node>, RegistryError> {
	Ok(BehaviorRegistration::disposable(BUTTON, BUTTON_CLASS, Button::new)?.exposed())
}
