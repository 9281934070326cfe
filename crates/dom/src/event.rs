use std::fmt;

/// Lifecycle notifications dispatched on upgraded elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentEventKind {
	/// About to upgrade; cancelable.
	Upgrading,
	/// Upgrade completed.
	Upgraded,
	/// Downgrade completed.
	Downgraded,
}

impl ComponentEventKind {
	/// DOM-level event type name.
	pub const fn name(self) -> &'static str {
		match self {
			Self::Upgrading => "uplift-componentupgrading",
			Self::Upgraded => "uplift-componentupgraded",
			Self::Downgraded => "uplift-componentdowngraded",
		}
	}

	/// Whether listeners may veto the transition.
	pub const fn cancelable(self) -> bool {
		matches!(self, Self::Upgrading)
	}
}

impl fmt::Display for ComponentEventKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

/// A lifecycle event for one behavior on one element.
///
/// Always bubbles. The target is the element it is dispatched on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentEvent {
	/// Which transition this reports.
	pub kind: ComponentEventKind,
	/// Behavior id the transition applies to.
	pub behavior: String,
}

impl ComponentEvent {
	pub fn new(kind: ComponentEventKind, behavior: impl Into<String>) -> Self {
		Self {
			kind,
			behavior: behavior.into(),
		}
	}
}
