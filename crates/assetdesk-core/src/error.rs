//! Error types for the client-state layer

use thiserror::Error;

/// Result type alias for state operations
pub type Result<T> = std::result::Result<T, StateError>;

/// Errors raised while writing shared client state
///
/// Reads never produce these: an unreadable cookie degrades to its empty
/// value instead. Only writes, configuration loading and token lookups fail.
#[derive(Debug, Error)]
pub enum StateError {
	/// The cookie store rejected a read or write
	#[error("cookie store error: {0}")]
	Cookie(String),

	/// A value could not be serialized for storage
	#[error("failed to serialize state: {0}")]
	Serialization(#[from] serde_json::Error),

	/// Settings could not be parsed or failed validation
	#[error("invalid configuration: {0}")]
	Config(String),

	/// An authenticated action was attempted without a token
	#[error("no authorization token is present; please log in again")]
	MissingToken,
}

impl StateError {
	/// Create a cookie error
	pub fn cookie(msg: impl Into<String>) -> Self {
		Self::Cookie(msg.into())
	}

	/// Create a configuration error
	pub fn config(msg: impl Into<String>) -> Self {
		Self::Config(msg.into())
	}
}

impl From<toml::de::Error> for StateError {
	fn from(err: toml::de::Error) -> Self {
		Self::Config(err.to_string())
	}
}
