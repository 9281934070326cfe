//! Error types for the engine and its configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Usage errors raised by upgrade operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
	/// An upgrade named a behavior the registry does not know.
	#[error("unknown behavior {0:?}: register it before upgrading")]
	UnknownBehavior(String),
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors that can occur when loading [`crate::EngineConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
	/// The TOML document failed to parse or had unknown keys.
	#[error("TOML parse error: {0}")]
	Toml(#[from] toml::de::Error),

	/// Error reading a configuration file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// The marker attribute name is empty or contains whitespace.
	#[error("invalid marker attribute {0:?}")]
	InvalidMarkerAttribute(String),
}
