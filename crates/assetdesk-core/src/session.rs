//! Bearer token lookup
//!
//! The login flow stores the token in a session cookie and mirrors it into
//! `sessionStorage`. Authenticated requests must check for it before
//! sending anything.

use crate::cookie::CookieJar;
use crate::error::{Result, StateError};

/// Cookie (and `sessionStorage` key) holding the bearer token
pub const TOKEN_KEY: &str = "token";

/// The stored token, if any
///
/// Browser builds fall back to `sessionStorage` when the cookie is gone.
pub fn token_from(jar: &dyn CookieJar) -> Option<String> {
	jar.get(TOKEN_KEY)
		.filter(|token| !token.is_empty())
		.or_else(session_storage_token)
}

/// The stored token, or [`StateError::MissingToken`]
pub fn require_token(jar: &dyn CookieJar) -> Result<String> {
	token_from(jar).ok_or(StateError::MissingToken)
}

#[cfg(target_arch = "wasm32")]
fn session_storage_token() -> Option<String> {
	web_sys::window()?
		.session_storage()
		.ok()??
		.get_item(TOKEN_KEY)
		.ok()?
		.filter(|token| !token.is_empty())
}

#[cfg(not(target_arch = "wasm32"))]
fn session_storage_token() -> Option<String> {
	None
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::cookie::MemoryCookies;
	use rstest::rstest;

	#[rstest]
	fn test_token_present() {
		let jar = MemoryCookies::with_cookies([(TOKEN_KEY, "abc.def")]);
		assert_eq!(require_token(&jar).unwrap(), "abc.def");
	}

	#[rstest]
	#[case::missing(MemoryCookies::new())]
	#[case::blank(MemoryCookies::with_cookies([(TOKEN_KEY, "")]))]
	fn test_missing_token(#[case] jar: MemoryCookies) {
		assert!(token_from(&jar).is_none());
		assert!(matches!(require_token(&jar), Err(StateError::MissingToken)));
	}
}
