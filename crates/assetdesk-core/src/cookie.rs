//! Cookie jar abstraction
//!
//! Every piece of shared page state lives in a browser cookie so that
//! components with no common ancestor can see it. [`CookieJar`] is the seam:
//! [`BrowserCookies`] talks to `document.cookie` in the browser, and
//! [`MemoryCookies`] keeps the same semantics in memory for native builds
//! and tests.
//!
//! Values are encoded the way the `js-cookie` library encodes them, so
//! cookies written here and cookies written by the legacy pages can be read
//! by either side.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::Result;

const SECONDS_PER_DAY: i64 = 86_400;

/// Percent escapes that `js-cookie` leaves decoded in cookie values
const RESTORED_ESCAPES: &[(&str, char)] = &[
	("%23", '#'),
	("%24", '$'),
	("%26", '&'),
	("%2B", '+'),
	("%2F", '/'),
	("%3A", ':'),
	("%3C", '<'),
	("%3D", '='),
	("%3E", '>'),
	("%3F", '?'),
	("%40", '@'),
	("%5B", '['),
	("%5D", ']'),
	("%5E", '^'),
	("%60", '`'),
	("%7B", '{'),
	("%7C", '|'),
	("%7D", '}'),
];

/// How long a cookie survives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Retention {
	/// Dropped when the browser session ends
	#[default]
	Session,
	/// Kept for the given number of days
	Days(u32),
}

impl Retention {
	/// `Max-Age` in seconds, or `None` for session cookies
	pub fn max_age(&self) -> Option<i64> {
		match self {
			Self::Session => None,
			Self::Days(days) => Some(i64::from(*days) * SECONDS_PER_DAY),
		}
	}
}

/// SameSite cookie attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SameSite {
	/// Strict mode - only same-site requests
	Strict,
	/// Lax mode - same-site and top-level navigation
	Lax,
	/// None - cross-site requests allowed (requires Secure)
	None,
}

impl SameSite {
	fn as_str(&self) -> &'static str {
		match self {
			Self::Strict => "Strict",
			Self::Lax => "Lax",
			Self::None => "None",
		}
	}
}

/// Attributes applied when a cookie is written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieOptions {
	/// Lifetime of the cookie
	pub retention: Retention,
	/// Cookie path
	pub path: String,
	/// SameSite attribute
	pub same_site: Option<SameSite>,
	/// Secure flag
	pub secure: bool,
}

impl Default for CookieOptions {
	fn default() -> Self {
		Self::new(Retention::Session)
	}
}

impl CookieOptions {
	/// Options with the given retention, path `/` and no other attributes
	pub fn new(retention: Retention) -> Self {
		Self {
			retention,
			path: "/".to_string(),
			same_site: None,
			secure: false,
		}
	}

	/// Set the cookie path
	pub fn path(mut self, path: impl Into<String>) -> Self {
		self.path = path.into();
		self
	}

	/// Set the SameSite attribute
	pub fn same_site(mut self, same_site: SameSite) -> Self {
		self.same_site = Some(same_site);
		self
	}

	/// Set the Secure flag
	pub fn secure(mut self, secure: bool) -> Self {
		self.secure = secure;
		self
	}
}

/// A key-value store with cookie semantics
///
/// Implementations are shared behind `Rc<dyn CookieJar>` by every store,
/// relay and slot of a tab; writes are visible to all of them immediately.
pub trait CookieJar {
	/// Returns the decoded value of a cookie, if present
	fn get(&self, name: &str) -> Option<String>;

	/// Writes a cookie, replacing any previous value
	fn set(&self, name: &str, value: &str, options: &CookieOptions) -> Result<()>;

	/// Deletes a cookie written with `options`; deleting a missing cookie is
	/// not an error
	///
	/// Browsers only match a deletion against a cookie with the same path, so
	/// pass the options the cookie was written with.
	fn remove(&self, name: &str, options: &CookieOptions) -> Result<()>;
}

/// Stored value plus the options it was written with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieEntry {
	/// The cookie value
	pub value: String,
	/// Options used for the last write
	pub options: CookieOptions,
}

/// In-memory cookie jar
///
/// Clones share the same storage, just as every component of a tab shares
/// `document.cookie`.
#[derive(Debug, Clone, Default)]
pub struct MemoryCookies {
	cookies: Rc<RefCell<HashMap<String, CookieEntry>>>,
}

impl MemoryCookies {
	/// Create an empty jar
	pub fn new() -> Self {
		Self::default()
	}

	/// Create a jar pre-populated with session cookies
	pub fn with_cookies<I, K, V>(cookies: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		let entries = cookies
			.into_iter()
			.map(|(name, value)| {
				(
					name.into(),
					CookieEntry {
						value: value.into(),
						options: CookieOptions::default(),
					},
				)
			})
			.collect();
		Self {
			cookies: Rc::new(RefCell::new(entries)),
		}
	}

	/// Get a cookie together with the options it was written with
	pub fn entry(&self, name: &str) -> Option<CookieEntry> {
		self.cookies.borrow().get(name).cloned()
	}

	/// Check if a cookie exists
	pub fn contains(&self, name: &str) -> bool {
		self.cookies.borrow().contains_key(name)
	}

	/// Number of stored cookies
	pub fn len(&self) -> usize {
		self.cookies.borrow().len()
	}

	/// Check if the jar is empty
	pub fn is_empty(&self) -> bool {
		self.cookies.borrow().is_empty()
	}

	/// Render the jar the way `document.cookie` reads, with encoded values
	pub fn to_cookie_string(&self) -> String {
		let cookies = self.cookies.borrow();
		let mut names: Vec<&String> = cookies.keys().collect();
		names.sort();
		names
			.into_iter()
			.map(|name| format!("{}={}", name, encode_cookie_value(&cookies[name].value)))
			.collect::<Vec<_>>()
			.join("; ")
	}
}

impl CookieJar for MemoryCookies {
	fn get(&self, name: &str) -> Option<String> {
		self.cookies
			.borrow()
			.get(name)
			.map(|entry| entry.value.clone())
	}

	fn set(&self, name: &str, value: &str, options: &CookieOptions) -> Result<()> {
		self.cookies.borrow_mut().insert(
			name.to_string(),
			CookieEntry {
				value: value.to_string(),
				options: options.clone(),
			},
		);
		Ok(())
	}

	fn remove(&self, name: &str, options: &CookieOptions) -> Result<()> {
		let mut cookies = self.cookies.borrow_mut();
		if cookies
			.get(name)
			.is_some_and(|entry| entry.options.path == options.path)
		{
			cookies.remove(name);
		}
		Ok(())
	}
}

/// Cookie jar backed by `document.cookie`
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Default)]
pub struct BrowserCookies;

#[cfg(target_arch = "wasm32")]
impl BrowserCookies {
	/// Create a handle to the page's cookies
	pub fn new() -> Self {
		Self
	}

	fn document() -> Result<web_sys::HtmlDocument> {
		use wasm_bindgen::JsCast;

		web_sys::window()
			.and_then(|window| window.document())
			.and_then(|document| document.dyn_into::<web_sys::HtmlDocument>().ok())
			.ok_or_else(|| crate::error::StateError::cookie("document is not available"))
	}

	fn write(assignment: &str) -> Result<()> {
		Self::document()?
			.set_cookie(assignment)
			.map_err(|err| crate::error::StateError::cookie(format!("{err:?}")))
	}
}

#[cfg(target_arch = "wasm32")]
impl CookieJar for BrowserCookies {
	fn get(&self, name: &str) -> Option<String> {
		let cookie_str = Self::document().ok()?.cookie().ok()?;
		parse_cookie_value(&cookie_str, name).map(|raw| decode_cookie_value(&raw))
	}

	fn set(&self, name: &str, value: &str, options: &CookieOptions) -> Result<()> {
		Self::write(&build_set_cookie(name, value, options))
	}

	fn remove(&self, name: &str, options: &CookieOptions) -> Result<()> {
		Self::write(&build_remove_cookie(name, &options.path))
	}
}

/// Parses a cookie value from a cookie string.
///
/// The cookie string format is: "name1=value1; name2=value2; ..."
/// The value is returned as stored, without decoding.
pub fn parse_cookie_value(cookie_str: &str, name: &str) -> Option<String> {
	for part in cookie_str.split(';') {
		let part = part.trim();
		if let Some((key, value)) = part.split_once('=')
			&& key.trim() == name
		{
			return Some(value.trim().to_string());
		}
	}
	None
}

/// Encodes a cookie value the way `js-cookie` does
pub fn encode_cookie_value(value: &str) -> String {
	let encoded = urlencoding::encode(value);
	let mut out = String::with_capacity(encoded.len());
	let mut rest: &str = &encoded;
	while let Some(pos) = rest.find('%') {
		out.push_str(&rest[..pos]);
		let escape = rest.get(pos..pos + 3).unwrap_or(&rest[pos..]);
		match RESTORED_ESCAPES.iter().find(|(code, _)| *code == escape) {
			Some((_, ch)) => out.push(*ch),
			None => out.push_str(escape),
		}
		rest = &rest[pos + escape.len()..];
	}
	out.push_str(rest);
	out
}

/// Decodes a stored cookie value; undecodable text is returned unchanged
pub fn decode_cookie_value(raw: &str) -> String {
	urlencoding::decode(raw)
		.map(|decoded| decoded.into_owned())
		.unwrap_or_else(|_| raw.to_string())
}

/// Renders a `document.cookie` assignment for a write
pub fn build_set_cookie(name: &str, value: &str, options: &CookieOptions) -> String {
	let mut parts = vec![
		format!("{}={}", name, encode_cookie_value(value)),
		format!("Path={}", options.path),
	];
	if let Some(max_age) = options.retention.max_age() {
		parts.push(format!("Max-Age={}", max_age));
	}
	if let Some(same_site) = options.same_site {
		parts.push(format!("SameSite={}", same_site.as_str()));
	}
	if options.secure {
		parts.push("Secure".to_string());
	}
	parts.join("; ")
}

/// Renders a `document.cookie` assignment that expires a cookie immediately
pub fn build_remove_cookie(name: &str, path: &str) -> String {
	format!("{}=; Path={}; Max-Age=0", name, path)
}
