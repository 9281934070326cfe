//! Button and ripple behaviors.
//!
//! Both are ordinary registry consumers: a factory that wires listeners onto the
//! element it is given, and a [`Disposable`] impl that unwires them. Register the
//! button before the ripple; the ripple animates the element the button inserts.
//!
//! | Behavior | Class | Exposed |
//! |----------|-------|---------|
//! | [`BUTTON`] | [`BUTTON_CLASS`] | yes |
//! | [`RIPPLE`] | [`RIPPLE_CLASS`] | no |
//!
//! [`Disposable`]: uplift_registry::Disposable

use uplift_dom::Node;
use uplift_registry::{Registry, RegistryError};

mod button;
mod ripple;

pub use button::{BUTTON, BUTTON_CLASS, Button, RIPPLE_CONTAINER_CLASS};
pub use ripple::{IS_ANIMATING, IS_VISIBLE, RIPPLE, RIPPLE_CENTER_CLASS, RIPPLE_CLASS, RIPPLE_ELEMENT_CLASS, Ripple};

/// Registers [`Button`] then [`Ripple`].
pub fn register_all(registry: &mut Registry<Node>) -> Result<(), RegistryError> {
	registry.register(button::registration()?)?;
	registry.register(ripple::registration()?)?;
	Ok(())
}
