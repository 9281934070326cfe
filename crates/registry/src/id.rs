use std::borrow::Borrow;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;
use std::str::FromStr;

use crate::RegistryError;

/// Unique name of a behavior. Also the token written into element markers, so it may not
/// contain commas or whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BehaviorId(Rc<str>);

impl BehaviorId {
	pub fn new(id: &str) -> Result<Self, RegistryError> {
		if id.is_empty() || id.chars().any(|c| c == ',' || c.is_whitespace()) {
			return Err(RegistryError::InvalidId(id.to_owned()));
		}
		Ok(Self(id.into()))
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl Deref for BehaviorId {
	type Target = str;

	fn deref(&self) -> &str {
		&self.0
	}
}

impl Borrow<str> for BehaviorId {
	fn borrow(&self) -> &str {
		&self.0
	}
}

impl AsRef<str> for BehaviorId {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

impl FromStr for BehaviorId {
	type Err = RegistryError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::new(s)
	}
}

impl PartialEq<str> for BehaviorId {
	fn eq(&self, other: &str) -> bool {
		&*self.0 == other
	}
}

impl PartialEq<&str> for BehaviorId {
	fn eq(&self, other: &&str) -> bool {
		&*self.0 == *other
	}
}

impl fmt::Display for BehaviorId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}
