//! Asset Desk Core - shared client state for the asset desk web UI
//!
//! Table pages, column filter dropdowns and modal forms of the asset desk
//! are mounted independently of each other. They coordinate through a
//! handful of browser cookies; this crate gives every one of those cookies a
//! typed owner.
//!
//! ## Architecture
//!
//! - [`cookie`]: cookie jar abstraction (`document.cookie` or in-memory)
//! - [`filter`]: the filter document and its predicates
//! - [`store`]: read/merge/write of the `filterState` cookie
//! - [`notify`]: same-tab change notification
//! - [`modal`]: add/edit modal requests between unrelated components
//! - [`handoff`]: typed snapshot of the row being edited
//! - [`session`]: bearer token lookup
//! - [`task`]: poll timers and local task spawning
//! - [`config`]: settings, loadable from TOML
//!
//! ## Example
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use assetdesk_core::prelude::*;
//!
//! let jar = MemoryCookies::new();
//! let store = FilterStore::new(Rc::new(jar), Notifier::new(), StateConfig::default());
//!
//! let generation = Rc::new(Cell::new(0u64));
//! let _subscription = store.subscribe({
//!     let generation = Rc::clone(&generation);
//!     move |_| generation.set(generation.get() + 1)
//! });
//!
//! store.bootstrap().unwrap();
//! store
//!     .apply(FilterPredicate::new("AssetType", FilterCriteria::Contains, "laptop"))
//!     .unwrap();
//!
//! assert_eq!(generation.get(), 1);
//! ```
//!
//! ## Platforms
//!
//! Browser builds (`wasm32`) talk to `document.cookie`, window events and
//! `gloo-timers`. Native builds use [`cookie::MemoryCookies`] and tokio local
//! tasks, which is how the test suite runs.

#![warn(missing_docs)]

pub mod config;
pub mod cookie;
pub mod error;
pub mod filter;
pub mod handoff;
pub mod logging;
pub mod modal;
pub mod notify;
pub mod session;
pub mod store;
pub mod task;

pub use config::StateConfig;
pub use cookie::{CookieJar, CookieOptions, MemoryCookies, Retention, SameSite};
pub use error::{Result, StateError};
pub use filter::{FilterCriteria, FilterDocument, FilterPredicate};
pub use handoff::{FormSeed, HandoffSlot, seed_form};
pub use modal::{ModalHost, ModalKind, ModalRelay};
pub use notify::{FilterChanged, Notifier, Subscription, filter_events, modal_requests};
pub use session::{require_token, token_from};
pub use store::FilterStore;
pub use task::PollHandle;

#[cfg(target_arch = "wasm32")]
pub use cookie::BrowserCookies;

/// Commonly used types
pub mod prelude {
	pub use crate::config::StateConfig;
	pub use crate::cookie::{CookieJar, CookieOptions, MemoryCookies, Retention};
	pub use crate::error::{Result, StateError};
	pub use crate::filter::{FilterCriteria, FilterDocument, FilterPredicate};
	pub use crate::handoff::{FormSeed, HandoffSlot, seed_form};
	pub use crate::modal::{ModalHost, ModalKind, ModalRelay};
	pub use crate::notify::{FilterChanged, Notifier, Subscription};
	pub use crate::store::FilterStore;

	#[cfg(target_arch = "wasm32")]
	pub use crate::cookie::BrowserCookies;
}

// Used by the logging macros
#[doc(hidden)]
pub mod __private {
	pub use tracing;
	#[cfg(target_arch = "wasm32")]
	pub use web_sys;
}
