//! Errors raised while talking to the backend

use assetdesk_core::StateError;
use thiserror::Error;

/// Result type alias for backend calls
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Failure of a list fetch or a mutation
///
/// None of these are fatal to a page: the table keeps its last rows and the
/// user is told through a notice.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
	/// No bearer token; the request was not sent
	#[error("no authorization token is present; please log in again")]
	MissingToken,

	/// Connection failed before a response arrived
	#[error("Network error: {0}")]
	Network(String),

	/// The backend answered with a non-success status
	#[error("Server error ({status}): {message}")]
	Server {
		/// HTTP status code
		status: u16,
		/// `message`/`error` field of the body, or the raw body
		message: String,
	},

	/// The response body did not match the expected rows
	#[error("Deserialization error: {0}")]
	Deserialization(String),

	/// The request body could not be built
	#[error("Serialization error: {0}")]
	Serialization(String),

	/// Shared client state could not be read or written
	#[error("State error: {0}")]
	State(String),
}

impl ApiError {
	/// Create a network error
	pub fn network(msg: impl Into<String>) -> Self {
		Self::Network(msg.into())
	}

	/// Create a server error
	pub fn server(status: u16, message: impl Into<String>) -> Self {
		Self::Server {
			status,
			message: message.into(),
		}
	}

	/// Create a deserialization error
	pub fn deserialization(msg: impl Into<String>) -> Self {
		Self::Deserialization(msg.into())
	}

	/// Create a serialization error
	pub fn serialization(msg: impl Into<String>) -> Self {
		Self::Serialization(msg.into())
	}

	/// Text shown to the user
	pub fn notice_text(&self) -> String {
		match self {
			Self::MissingToken => self.to_string(),
			Self::Server { message, .. } if !message.is_empty() => message.clone(),
			Self::Server { status, .. } => format!("Server responded with status {status}"),
			Self::Network(_) => "Could not reach the server".to_string(),
			Self::Deserialization(_) | Self::Serialization(_) | Self::State(_) => {
				"Something went wrong".to_string()
			}
		}
	}
}

impl From<StateError> for ApiError {
	fn from(err: StateError) -> Self {
		match err {
			StateError::MissingToken => Self::MissingToken,
			StateError::Serialization(err) => Self::Serialization(err.to_string()),
			other => Self::State(other.to_string()),
		}
	}
}

impl From<serde_json::Error> for ApiError {
	fn from(err: serde_json::Error) -> Self {
		Self::Serialization(err.to_string())
	}
}
