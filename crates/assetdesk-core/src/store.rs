//! Cookie-backed filter store
//!
//! [`FilterStore`] owns the read-modify-write cycle over the `filterState`
//! cookie. Every table page of a tab builds its store over the same
//! [`CookieJar`] and the same [`Notifier`], so an edit made in one column
//! dropdown is seen by every mounted table.
//!
//! ## Lifecycle
//!
//! - [`FilterStore::bootstrap`] runs when a table page mounts and primes the
//!   cookie with `[]` if it is missing.
//! - [`FilterStore::apply`] merges one column predicate and notifies.
//! - [`FilterStore::clear`] runs when the tab unloads.
//!
//! ## Example
//!
//! ```
//! use std::rc::Rc;
//! use assetdesk_core::cookie::{CookieJar, MemoryCookies};
//! use assetdesk_core::filter::{FilterCriteria, FilterPredicate};
//! use assetdesk_core::notify::Notifier;
//! use assetdesk_core::store::{FILTER_STATE_KEY, FilterStore};
//! use assetdesk_core::config::StateConfig;
//!
//! let jar = MemoryCookies::new();
//! let store = FilterStore::new(Rc::new(jar.clone()), Notifier::new(), StateConfig::default());
//!
//! store.bootstrap().unwrap();
//! assert_eq!(jar.get(FILTER_STATE_KEY).as_deref(), Some("[]"));
//!
//! store
//!     .apply(FilterPredicate::new("AssetType", FilterCriteria::Contains, "laptop"))
//!     .unwrap();
//! assert_eq!(store.read_document().len(), 1);
//! ```

use std::fmt;
use std::rc::Rc;

use crate::config::StateConfig;
use crate::cookie::CookieJar;
use crate::error::Result;
use crate::filter::{FilterDocument, FilterPredicate};
use crate::notify::{FilterChanged, Notifier, Subscription};
use crate::{debug_log, warn_log};

/// Cookie holding the serialized filter document
pub const FILTER_STATE_KEY: &str = "filterState";

/// Serialized form of the empty document
pub const EMPTY_DOCUMENT: &str = "[]";

/// Read/merge/write access to the tab's filter document
#[derive(Clone)]
pub struct FilterStore {
	jar: Rc<dyn CookieJar>,
	events: Notifier<FilterChanged>,
	config: StateConfig,
}

impl fmt::Debug for FilterStore {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FilterStore")
			.field("events", &self.events)
			.field("config", &self.config)
			.finish_non_exhaustive()
	}
}

impl FilterStore {
	/// Create a store over an explicit jar and notifier
	pub fn new(
		jar: Rc<dyn CookieJar>,
		events: Notifier<FilterChanged>,
		config: StateConfig,
	) -> Self {
		Self {
			jar,
			events,
			config,
		}
	}

	/// Create a store wired to the tab-wide notifier
	pub fn with_defaults(jar: Rc<dyn CookieJar>) -> Self {
		Self::new(jar, crate::notify::filter_events(), StateConfig::default())
	}

	/// The cookie jar this store writes to
	pub fn jar(&self) -> &Rc<dyn CookieJar> {
		&self.jar
	}

	/// The settings this store was built with
	pub fn config(&self) -> &StateConfig {
		&self.config
	}

	/// The channel change notifications are broadcast on
	pub fn events(&self) -> &Notifier<FilterChanged> {
		&self.events
	}

	/// Subscribe to filter changes until the subscription is dropped
	#[must_use = "dropping the subscription unsubscribes the listener immediately"]
	pub fn subscribe<F>(&self, listener: F) -> Subscription
	where
		F: Fn(&FilterChanged) + 'static,
	{
		self.events.subscribe(listener)
	}

	/// Current document; anything unreadable counts as no filters
	pub fn read_document(&self) -> FilterDocument {
		FilterDocument::parse_lenient(self.jar.get(FILTER_STATE_KEY).as_deref())
	}

	/// Write `document` with the edit retention and notify listeners
	///
	/// Listeners are only notified once the write succeeded.
	pub fn persist(&self, document: &FilterDocument) -> Result<()> {
		let json = document.to_json()?;
		if let Err(err) = self
			.jar
			.set(FILTER_STATE_KEY, &json, &self.config.filter_cookie())
		{
			warn_log!("failed to persist {}: {}", FILTER_STATE_KEY, err);
			return Err(err);
		}
		debug_log!("persisted {} ({} predicates)", FILTER_STATE_KEY, document.len());
		self.notify();
		Ok(())
	}

	/// Merge one column predicate into the stored document
	///
	/// The column's previous predicate, if any, is replaced in place.
	pub fn apply(&self, predicate: FilterPredicate) -> Result<FilterDocument> {
		let document = self.read_document().upserted(predicate);
		self.persist(&document)?;
		Ok(document)
	}

	/// Drop the predicate for `column`; returns whether one was present
	pub fn remove_column(&self, column: &str) -> Result<bool> {
		let mut document = self.read_document();
		if document.remove(column).is_none() {
			return Ok(false);
		}
		self.persist(&document)?;
		Ok(true)
	}

	/// Clear every filter and notify listeners
	pub fn reset(&self) -> Result<()> {
		self.clear()?;
		self.notify();
		Ok(())
	}

	/// Prime the cookie with the empty document on page mount
	///
	/// Writes `[]` with the long retention when the cookie is missing or
	/// already empty, and leaves an active document untouched. Returns
	/// whether a write happened.
	pub fn bootstrap(&self) -> Result<bool> {
		match self.jar.get(FILTER_STATE_KEY) {
			Some(existing) if existing != EMPTY_DOCUMENT => Ok(false),
			_ => {
				self.jar
					.set(FILTER_STATE_KEY, EMPTY_DOCUMENT, &self.config.bootstrap_cookie())?;
				Ok(true)
			}
		}
	}

	/// Purge the document and re-prime it as empty
	///
	/// Runs on tab unload, when no table is left to notify.
	pub fn clear(&self) -> Result<()> {
		self.jar.remove(FILTER_STATE_KEY, &self.config.filter_cookie())?;
		self.jar
			.set(FILTER_STATE_KEY, EMPTY_DOCUMENT, &self.config.bootstrap_cookie())
	}

	fn notify(&self) {
		let _reached = self.events.broadcast(&FilterChanged);
		debug_log!("filter change delivered to {} listeners", _reached);

		#[cfg(target_arch = "wasm32")]
		if self.config.window_events {
			crate::notify::dispatch_legacy_event();
		}
	}
}

#[cfg(target_arch = "wasm32")]
pub use unload::{UnloadGuard, install_unload_handler};

#[cfg(target_arch = "wasm32")]
mod unload {
	use wasm_bindgen::JsCast;
	use wasm_bindgen::closure::Closure;

	use super::FilterStore;
	use crate::warn_log;

	const UNLOAD_EVENT: &str = "beforeunload";

	/// Keeps the unload purge registered; dropping it removes the listener
	pub struct UnloadGuard {
		closure: Closure<dyn FnMut(web_sys::Event)>,
	}

	impl Drop for UnloadGuard {
		fn drop(&mut self) {
			if let Some(window) = web_sys::window() {
				let _ = window.remove_event_listener_with_callback(
					UNLOAD_EVENT,
					self.closure.as_ref().unchecked_ref(),
				);
			}
		}
	}

	/// Clear the filter document when the tab is about to unload
	pub fn install_unload_handler(store: FilterStore) -> Option<UnloadGuard> {
		let window = web_sys::window()?;
		let closure = Closure::wrap(Box::new(move |_event: web_sys::Event| {
			if let Err(err) = store.clear() {
				warn_log!("failed to clear filters on unload: {}", err);
			}
		}) as Box<dyn FnMut(web_sys::Event)>);

		window
			.add_event_listener_with_callback(UNLOAD_EVENT, closure.as_ref().unchecked_ref())
			.ok()?;
		Some(UnloadGuard { closure })
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::cookie::{MemoryCookies, Retention};
	use crate::filter::FilterCriteria;
	use rstest::{fixture, rstest};
	use std::cell::Cell;

	struct Harness {
		jar: MemoryCookies,
		store: FilterStore,
	}

	#[fixture]
	fn harness() -> Harness {
		let jar = MemoryCookies::new();
		let store = FilterStore::new(Rc::new(jar.clone()), Notifier::new(), StateConfig::default());
		Harness { jar, store }
	}

	fn hits(store: &FilterStore) -> (Rc<Cell<u32>>, Subscription) {
		let count = Rc::new(Cell::new(0));
		let subscription = store.subscribe({
			let count = Rc::clone(&count);
			move |_| count.set(count.get() + 1)
		});
		(count, subscription)
	}

	#[rstest]
	#[case::missing(None)]
	#[case::not_json(Some("not json"))]
	#[case::object(Some("{}"))]
	#[case::empty_string(Some(""))]
	fn test_read_document_degrades_to_empty(#[case] stored: Option<&str>) {
		let jar = match stored {
			Some(value) => MemoryCookies::with_cookies([(FILTER_STATE_KEY, value)]),
			None => MemoryCookies::new(),
		};
		let store = FilterStore::new(Rc::new(jar), Notifier::new(), StateConfig::default());
		assert!(store.read_document().is_empty());
	}

	#[rstest]
	fn test_apply_persists_with_edit_retention(harness: Harness) {
		harness
			.store
			.apply(FilterPredicate::new("AssetType", FilterCriteria::Contains, "laptop"))
			.unwrap();

		let entry = harness.jar.entry(FILTER_STATE_KEY).unwrap();
		assert_eq!(
			entry.value,
			r#"[{"column":"AssetType","criteria":"Contains","filterwith":"laptop"}]"#
		);
		assert_eq!(entry.options.retention, Retention::Days(1));
	}

	#[rstest]
	fn test_apply_notifies_once_per_write(harness: Harness) {
		let (count, _subscription) = hits(&harness.store);
		harness
			.store
			.apply(FilterPredicate::new("AssetType", FilterCriteria::Contains, "laptop"))
			.unwrap();
		harness
			.store
			.apply(FilterPredicate::new("AssetType", FilterCriteria::EqualTo, "desk"))
			.unwrap();
		assert_eq!(count.get(), 2);
	}

	#[rstest]
	fn test_bootstrap_primes_missing_cookie(harness: Harness) {
		assert!(harness.store.bootstrap().unwrap());
		let entry = harness.jar.entry(FILTER_STATE_KEY).unwrap();
		assert_eq!(entry.value, "[]");
		assert_eq!(entry.options.retention, Retention::Days(7));
	}

	#[rstest]
	fn test_bootstrap_keeps_active_filters(harness: Harness) {
		harness
			.store
			.apply(FilterPredicate::new("EmpCompID", FilterCriteria::EqualTo, "IT001"))
			.unwrap();
		assert!(!harness.store.bootstrap().unwrap());
		assert_eq!(harness.store.read_document().len(), 1);
	}

	#[rstest]
	fn test_bootstrap_refreshes_empty_marker(harness: Harness) {
		harness
			.jar
			.set(FILTER_STATE_KEY, "[]", &StateConfig::default().filter_cookie())
			.unwrap();
		assert!(harness.store.bootstrap().unwrap());
		assert_eq!(
			harness.jar.entry(FILTER_STATE_KEY).unwrap().options.retention,
			Retention::Days(7)
		);
	}

	#[rstest]
	fn test_remove_column(harness: Harness) {
		let (count, _subscription) = hits(&harness.store);
		harness
			.store
			.apply(FilterPredicate::new("AssetType", FilterCriteria::Contains, "laptop"))
			.unwrap();

		assert!(harness.store.remove_column("AssetType").unwrap());
		assert!(!harness.store.remove_column("AssetType").unwrap());
		assert!(harness.store.read_document().is_empty());
		assert_eq!(count.get(), 2);
	}

	#[rstest]
	fn test_clear_reprimes_without_notifying(harness: Harness) {
		let (count, _subscription) = hits(&harness.store);
		harness
			.jar
			.set(
				FILTER_STATE_KEY,
				r#"[{"column":"a","criteria":"Contains","filterwith":"b"}]"#,
				&StateConfig::default().filter_cookie(),
			)
			.unwrap();

		harness.store.clear().unwrap();

		let entry = harness.jar.entry(FILTER_STATE_KEY).unwrap();
		assert_eq!(entry.value, "[]");
		assert_eq!(entry.options.retention, Retention::Days(7));
		assert_eq!(count.get(), 0);
	}

	#[rstest]
	fn test_reset_notifies(harness: Harness) {
		let (count, _subscription) = hits(&harness.store);
		harness.store.reset().unwrap();
		assert_eq!(count.get(), 1);
		assert!(harness.store.read_document().is_empty());
	}
}
