use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use crate::RegistryError;

/// Class selector for upgrade candidates.
///
/// Accepts `x-foo` or `.x-foo`; both name the class `x-foo`. Displays with the dot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Selector(Rc<str>);

impl Selector {
	pub fn class(selector: &str) -> Result<Self, RegistryError> {
		let trimmed = selector.trim();
		let name = trimmed.strip_prefix('.').unwrap_or(trimmed);
		if !is_class_name(name) {
			return Err(RegistryError::InvalidSelector(selector.to_owned()));
		}
		Ok(Self(name.into()))
	}

	/// Class name without the leading dot.
	pub fn class_name(&self) -> &str {
		&self.0
	}
}

fn is_class_name(name: &str) -> bool {
	match name.chars().next() {
		None => false,
		Some(first) if first.is_ascii_digit() => false,
		Some(_) => name.chars().all(|c| c.is_alphanumeric() || c == '-' || c == '_'),
	}
}

impl FromStr for Selector {
	type Err = RegistryError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::class(s)
	}
}

impl fmt::Display for Selector {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, ".{}", self.0)
	}
}
