//! Engine configuration.
//!
//! ```toml
//! marker-attribute = "data-upgraded"
//! emit-events = true
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::ConfigError;

/// Tunables for an [`crate::Engine`]. Missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct EngineConfig {
	/// Attribute holding the comma-prefixed list of applied behavior ids.
	pub marker_attribute: String,
	/// Dispatch lifecycle events on upgraded and downgraded elements.
	///
	/// With events off, upgrades can no longer be vetoed.
	pub emit_events: bool,
}

impl Default for EngineConfig {
	fn default() -> Self {
		Self {
			marker_attribute: "data-upgraded".to_owned(),
			emit_events: true,
		}
	}
}

impl EngineConfig {
	/// Parses and validates a TOML document.
	pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
		let config: Self = toml::from_str(content)?;
		config.validate()?;
		Ok(config)
	}

	/// Reads and parses a TOML file.
	pub fn load(path: &Path) -> Result<Self, ConfigError> {
		let content = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		Self::from_toml_str(&content)
	}

	pub fn validate(&self) -> Result<(), ConfigError> {
		let name = &self.marker_attribute;
		if name.is_empty() || name.chars().any(char::is_whitespace) {
			return Err(ConfigError::InvalidMarkerAttribute(name.clone()));
		}
		Ok(())
	}
}
