use std::fmt;

use smallvec::SmallVec;

/// Parsed marker attribute: the behavior ids applied to one element, in upgrade order.
///
/// Renders as `,Foo,Bar`; an empty marker renders as the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Marker {
	tokens: SmallVec<[String; 2]>,
}

impl Marker {
	/// Parses a raw attribute value. `None` and `""` both yield an empty marker.
	pub fn parse(raw: Option<&str>) -> Self {
		let tokens = raw
			.unwrap_or_default()
			.split(',')
			.filter(|token| !token.is_empty())
			.map(str::to_owned)
			.collect();
		Self { tokens }
	}

	pub fn contains(&self, id: &str) -> bool {
		self.tokens.iter().any(|token| token == id)
	}

	/// Appends `id`. Returns false if it was already present.
	pub fn insert(&mut self, id: &str) -> bool {
		if self.contains(id) {
			return false;
		}
		self.tokens.push(id.to_owned());
		true
	}

	/// Removes the first token equal to `id`.
	pub fn remove(&mut self, id: &str) -> bool {
		match self.tokens.iter().position(|token| token == id) {
			Some(pos) => {
				self.tokens.remove(pos);
				true
			}
			None => false,
		}
	}

	pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
		self.tokens.iter().map(String::as_str)
	}

	pub fn len(&self) -> usize {
		self.tokens.len()
	}

	pub fn is_empty(&self) -> bool {
		self.tokens.is_empty()
	}
}

impl fmt::Display for Marker {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for token in &self.tokens {
			write!(f, ",{token}")?;
		}
		Ok(())
	}
}
