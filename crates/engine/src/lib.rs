//! Upgrade and downgrade lifecycle engine.
//!
//! # Purpose
//!
//! [`Engine`] walks a [`Document`], matches elements against the selectors in its
//! [`Registry`], and instantiates each behavior exactly once per element. It keeps the
//! live instances, fires upgrade callbacks and lifecycle events, and reverses all of it
//! on downgrade for behaviors that implement [`Disposable`].
//!
//! # Mental Model
//!
//! Each (element, behavior) pair is either not upgraded or upgraded. The element's
//! [`Marker`] attribute is the persisted record of that state: `,Foo,Bar` means `Foo`
//! and `Bar` are applied, and no attribute means the element was never touched.
//!
//! 1. **Register:** behaviors go into a [`Registry`], which is then moved into the engine.
//! 2. **Scan:** [`Engine::upgrade_all_registered`] (or [`Engine::bootstrap`] once on
//!    readiness) upgrades every matching element in document order.
//! 3. **Downgrade:** [`Engine::downgrade`] resolves elements to their first live instance
//!    and runs its teardown.
//!
//! # Invariants
//!
//! - An (element, behavior) pair is upgraded at most once while its marker lists it.
//!   - Enforced in: [`Engine::upgrade_element`] (marker check before anything else).
//! - Instances without a teardown are never removed by downgrade.
//!   - Enforced in: [`Engine::downgrade`].
//! - Factories and callbacks cannot re-enter the engine: upgrades hold `&mut Engine` and
//!   hand out only `&Element`.
//!
//! # Events
//!
//! | Event | When | Cancelable |
//! |-------|------|------------|
//! | [`ComponentEventKind::Upgrading`] | before an upgrade commits | yes, vetoes the upgrade |
//! | [`ComponentEventKind::Upgraded`] | after instance, callbacks and exposure | no |
//! | [`ComponentEventKind::Downgraded`] | after teardown and marker update | no |

mod config;
mod engine;
mod error;
mod instance;
mod marker;


pub use config::EngineConfig;
pub use engine::Engine;
pub use error::{ConfigError, EngineError, Result};
pub use instance::{Instance, InstanceKey};
pub use marker::Marker;
pub use uplift_dom::{ComponentEvent, ComponentEventKind, Document, Element};
pub use uplift_registry::{BehaviorId, BehaviorRegistration, Disposable, Registry, RegistryError, Selector};
