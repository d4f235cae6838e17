//! # Asset Desk
//!
//! Client-side state coordination for the asset desk web UI.
//!
//! The asset desk's tables, column filter dropdowns, header buttons and
//! modal forms are mounted independently and share no parent state. They
//! coordinate through browser cookies:
//!
//! - `filterState`: the column filters every table fetches with
//! - `addModalOpen` / `editModalOpen` / `modalType`: requests to open a modal
//! - `selected`: the row an edit form starts from
//! - `token`: the bearer token of the session
//!
//! This crate re-exports the typed owners of those cookies
//! ([`core`](mod@core)) and the table layer built on them
//! ([`tables`](mod@tables)).
//!
//! ## Feature Flags
//!
//! - `tables` (default): column filter controls, table pages, REST row
//!   sources, sorting and notices. Without it only the filter store,
//!   notifier, modal relay and handoff slots are available.
//! - `debug-hooks`: verbose `debug_log!` output in debug builds
//!
//! ## Quick Start
//!
//! ```
//! use std::rc::Rc;
//! use assetdesk::prelude::*;
//!
//! let jar: Rc<dyn CookieJar> = Rc::new(MemoryCookies::new());
//! let store = FilterStore::new(Rc::clone(&jar), Notifier::new(), StateConfig::default());
//! store.bootstrap().unwrap();
//!
//! let relay = ModalRelay::new(jar);
//! let host = ModalHost::mount_direct(relay.clone());
//! relay.request(ModalKind::Add).unwrap();
//! assert!(host.is_open(ModalKind::Add));
//! ```

pub use assetdesk_core as core;

#[cfg(feature = "tables")]
pub use assetdesk_tables as tables;

pub use assetdesk_core::{
	CookieJar, FilterChanged, FilterCriteria, FilterDocument, FilterPredicate, FilterStore,
	HandoffSlot, ModalHost, ModalKind, ModalRelay, Notifier, StateConfig, StateError,
	Subscription,
};

#[cfg(feature = "tables")]
pub use assetdesk_tables::{ApiClient, ApiError, FilterControl, Notices, TablePage, TableView};

/// Prelude module for convenient imports
///
/// ```
/// use assetdesk::prelude::*;
/// ```
pub mod prelude {
	pub use assetdesk_core::prelude::*;

	#[cfg(feature = "tables")]
	pub use assetdesk_tables::prelude::*;
}
