//! Modal-open requests between unrelated components
//!
//! A header button and a table page usually share no parent, yet the button
//! must be able to open the page's add or edit modal. The request travels
//! two ways:
//!
//! - [`ModalRelay::request`] writes a one-shot `"true"` flag cookie and
//!   delivers the request directly to every mounted [`ModalHost`].
//! - A mounted host also polls the flags, which picks up requests written
//!   before it mounted and requests written by pages outside this crate.
//!
//! Whichever path sees the flag first consumes it: the flag is removed and
//! `modalType` is set, so each request opens at most one modal.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::StateConfig;
use crate::cookie::{CookieJar, CookieOptions};
use crate::error::Result;
use crate::handoff::HandoffSlot;
use crate::notify::{Notifier, Subscription};
use crate::task::PollHandle;
use crate::{debug_log, warn_log};

/// Cookie naming the mode the modal form should render in
pub const MODAL_TYPE_KEY: &str = "modalType";

/// One-shot flag requesting the add modal
pub const ADD_MODAL_KEY: &str = "addModalOpen";

/// One-shot flag requesting the edit modal
pub const EDIT_MODAL_KEY: &str = "editModalOpen";

const FLAG_SET: &str = "true";

/// Modal variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModalKind {
	/// Create a new record
	Add,
	/// Edit the selected record
	Edit,
}

impl ModalKind {
	/// Every variant, in poll order
	pub const ALL: [ModalKind; 2] = [ModalKind::Add, ModalKind::Edit];

	/// Name of the one-shot flag cookie
	pub fn flag_key(&self) -> &'static str {
		match self {
			Self::Add => ADD_MODAL_KEY,
			Self::Edit => EDIT_MODAL_KEY,
		}
	}

	/// Value stored under `modalType`
	pub fn label(&self) -> &'static str {
		match self {
			Self::Add => "add",
			Self::Edit => "edit",
		}
	}

	/// Parse a `modalType` value
	pub fn from_label(label: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|kind| kind.label() == label)
	}
}

impl fmt::Display for ModalKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.label())
	}
}

impl FromStr for ModalKind {
	type Err = String;

	fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
		Self::from_label(s).ok_or_else(|| format!("unknown modal type: {s}"))
	}
}

/// Reads and writes the modal trigger cookies
#[derive(Clone)]
pub struct ModalRelay {
	jar: Rc<dyn CookieJar>,
	options: CookieOptions,
	requests: Notifier<ModalKind>,
}

impl fmt::Debug for ModalRelay {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ModalRelay")
			.field("options", &self.options)
			.field("requests", &self.requests)
			.finish_non_exhaustive()
	}
}

impl ModalRelay {
	/// Relay over `jar` with a private request channel
	pub fn new(jar: Rc<dyn CookieJar>) -> Self {
		Self::with_channel(jar, &StateConfig::default(), Notifier::new())
	}

	/// Relay over `jar` using the tab-wide request channel
	pub fn tab_wide(jar: Rc<dyn CookieJar>, config: &StateConfig) -> Self {
		Self::with_channel(jar, config, crate::notify::modal_requests())
	}

	/// Relay over `jar` delivering direct requests on `requests`
	pub fn with_channel(
		jar: Rc<dyn CookieJar>,
		config: &StateConfig,
		requests: Notifier<ModalKind>,
	) -> Self {
		Self {
			jar,
			options: config.session_cookie(),
			requests,
		}
	}

	/// Ask for `kind` to be opened
	///
	/// The flag is written first so that a request made before any host
	/// mounts is still picked up by that host's first poll.
	pub fn request(&self, kind: ModalKind) -> Result<()> {
		self.jar.set(kind.flag_key(), FLAG_SET, &self.options)?;
		let _reached = self.requests.broadcast(&kind);
		debug_log!("{} modal requested, {} hosts listening", kind, _reached);
		Ok(())
	}

	/// Hand `row` to the edit form and ask for the edit modal
	pub fn request_edit<T>(&self, slot: &HandoffSlot<T>, row: &T) -> Result<()>
	where
		T: Serialize + DeserializeOwned,
	{
		slot.write(row)?;
		self.jar
			.set(MODAL_TYPE_KEY, ModalKind::Edit.label(), &self.options)?;
		self.request(ModalKind::Edit)
	}

	/// Take a pending request for `kind`, if there is one
	///
	/// Clears the flag and records `kind` under `modalType`.
	pub fn consume(&self, kind: ModalKind) -> Result<bool> {
		if self.jar.get(kind.flag_key()).as_deref() != Some(FLAG_SET) {
			return Ok(false);
		}
		self.jar.remove(kind.flag_key(), &self.options)?;
		self.jar.set(MODAL_TYPE_KEY, kind.label(), &self.options)?;
		Ok(true)
	}

	/// Check both flags once; returns the requests taken
	pub fn poll_once(&self) -> Vec<ModalKind> {
		ModalKind::ALL
			.into_iter()
			.filter(|kind| match self.consume(*kind) {
				Ok(taken) => taken,
				Err(err) => {
					warn_log!("failed to consume {} flag: {}", kind.flag_key(), err);
					false
				}
			})
			.collect()
	}

	/// Mode recorded for the modal form
	pub fn modal_type(&self) -> Option<ModalKind> {
		self.jar
			.get(MODAL_TYPE_KEY)
			.and_then(|label| ModalKind::from_label(&label))
	}

	/// Channel carrying direct requests
	pub fn requests(&self) -> &Notifier<ModalKind> {
		&self.requests
	}
}

#[derive(Default)]
struct HostState {
	add_open: Cell<bool>,
	edit_open: Cell<bool>,
	opened: Notifier<ModalKind>,
}

impl HostState {
	fn flag(&self, kind: ModalKind) -> &Cell<bool> {
		match kind {
			ModalKind::Add => &self.add_open,
			ModalKind::Edit => &self.edit_open,
		}
	}

	fn open(&self, kind: ModalKind) {
		self.flag(kind).set(true);
		self.opened.broadcast(&kind);
	}
}

/// Page-side owner of the add and edit modals
///
/// Dropping the host stops its poll timer and its request subscription.
pub struct ModalHost {
	state: Rc<HostState>,
	_requests: Subscription,
	poll: Option<PollHandle>,
}

impl fmt::Debug for ModalHost {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ModalHost")
			.field("add_open", &self.state.add_open.get())
			.field("edit_open", &self.state.edit_open.get())
			.field("polling", &self.poll.is_some())
			.finish()
	}
}

impl ModalHost {
	/// Mount a host that also polls the flags every `poll_interval`
	///
	/// On native targets this must run inside a `tokio::task::LocalSet`.
	pub fn mount(relay: ModalRelay, poll_interval: Duration) -> Self {
		let mut host = Self::mount_direct(relay.clone());
		let state = Rc::clone(&host.state);
		host.poll = Some(PollHandle::start(poll_interval, move || {
			for kind in relay.poll_once() {
				state.open(kind);
			}
		}));
		host
	}

	/// Mount a host that only reacts to direct requests
	///
	/// Requests written before mounting are taken immediately.
	pub fn mount_direct(relay: ModalRelay) -> Self {
		let state = Rc::new(HostState::default());
		for kind in relay.poll_once() {
			state.flag(kind).set(true);
		}

		let requests = relay.requests().subscribe({
			let state = Rc::clone(&state);
			let relay = relay.clone();
			move |kind: &ModalKind| match relay.consume(*kind) {
				Ok(true) => state.open(*kind),
				Ok(false) => {}
				Err(err) => warn_log!("failed to consume {} request: {}", kind, err),
			}
		});

		Self {
			state,
			_requests: requests,
			poll: None,
		}
	}

	/// Check if the `kind` modal is open
	pub fn is_open(&self, kind: ModalKind) -> bool {
		self.state.flag(kind).get()
	}

	/// Close the `kind` modal
	pub fn close(&self, kind: ModalKind) {
		self.state.flag(kind).set(false);
	}

	/// Run `listener` whenever a modal opens after mounting
	#[must_use = "dropping the subscription unsubscribes the listener immediately"]
	pub fn on_open<F>(&self, listener: F) -> Subscription
	where
		F: Fn(&ModalKind) + 'static,
	{
		self.state.opened.subscribe(listener)
	}
}
