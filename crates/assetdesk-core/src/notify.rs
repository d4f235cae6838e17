//! Same-tab change notification
//!
//! A [`Notifier`] is a small publish/subscribe channel for components that
//! share no parent. Listeners register with [`Notifier::subscribe`] and stay
//! registered for as long as the returned [`Subscription`] lives, so a
//! component that unmounts (drops its subscription) can never leak a
//! listener.
//!
//! The tab-wide filter channel is [`filter_events`]: the filter store
//! broadcasts [`FilterChanged`] after every write, and every mounted table
//! reacts by refetching.
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use assetdesk_core::notify::{FilterChanged, Notifier};
//!
//! let notifier = Notifier::new();
//! let generation = Rc::new(Cell::new(0u64));
//!
//! let subscription = notifier.subscribe({
//!     let generation = Rc::clone(&generation);
//!     move |_: &FilterChanged| generation.set(generation.get() + 1)
//! });
//!
//! notifier.broadcast(&FilterChanged);
//! assert_eq!(generation.get(), 1);
//!
//! drop(subscription);
//! assert_eq!(notifier.broadcast(&FilterChanged), 0);
//! ```

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::modal::ModalKind;

/// Legacy window event fired by the old pages after a filter write
pub const LEGACY_COOKIE_EVENT: &str = "cookie-change";

/// Second legacy window event fired alongside [`LEGACY_COOKIE_EVENT`]
///
/// Never forwarded: it always arrives paired with `cookie-change`, and
/// forwarding both would refetch twice.
pub const LEGACY_STORAGE_EVENT: &str = "cookie-storage-change";

/// Payload-free signal that the filter document was rewritten
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FilterChanged;

type Listener<E> = Rc<dyn Fn(&E)>;

struct Registry<E: 'static> {
	next_id: u64,
	listeners: BTreeMap<u64, Listener<E>>,
}

/// Single-threaded broadcast channel
///
/// Clones share the same listener set.
pub struct Notifier<E: 'static> {
	registry: Rc<RefCell<Registry<E>>>,
}

impl<E: 'static> Clone for Notifier<E> {
	fn clone(&self) -> Self {
		Self {
			registry: Rc::clone(&self.registry),
		}
	}
}

impl<E: 'static> Default for Notifier<E> {
	fn default() -> Self {
		Self::new()
	}
}

impl<E: 'static> fmt::Debug for Notifier<E> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Notifier")
			.field("listeners", &self.listener_count())
			.finish()
	}
}

impl<E: 'static> Notifier<E> {
	/// Create a channel with no listeners
	pub fn new() -> Self {
		Self {
			registry: Rc::new(RefCell::new(Registry {
				next_id: 0,
				listeners: BTreeMap::new(),
			})),
		}
	}

	/// Register a listener until the returned subscription is dropped
	#[must_use = "dropping the subscription unsubscribes the listener immediately"]
	pub fn subscribe<F>(&self, listener: F) -> Subscription
	where
		F: Fn(&E) + 'static,
	{
		let id = {
			let mut registry = self.registry.borrow_mut();
			let id = registry.next_id;
			registry.next_id += 1;
			registry.listeners.insert(id, Rc::new(listener));
			id
		};

		let registry: Weak<RefCell<Registry<E>>> = Rc::downgrade(&self.registry);
		Subscription {
			unsubscribe: Some(Box::new(move || {
				if let Some(registry) = registry.upgrade() {
					registry.borrow_mut().listeners.remove(&id);
				}
			})),
		}
	}

	/// Deliver `event` to every listener registered when the call starts
	///
	/// Listeners may subscribe or unsubscribe from inside the callback; such
	/// changes take effect from the next broadcast. Returns the number of
	/// listeners reached.
	pub fn broadcast(&self, event: &E) -> usize {
		let snapshot: Vec<Listener<E>> = self
			.registry
			.borrow()
			.listeners
			.values()
			.cloned()
			.collect();
		for listener in &snapshot {
			listener(event);
		}
		snapshot.len()
	}

	/// Number of live listeners
	pub fn listener_count(&self) -> usize {
		self.registry.borrow().listeners.len()
	}
}

/// Keeps a listener registered; dropping it unsubscribes
pub struct Subscription {
	unsubscribe: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
	/// Keep the listener registered for the lifetime of the tab
	pub fn detach(mut self) {
		self.unsubscribe = None;
	}
}

impl fmt::Debug for Subscription {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Subscription")
			.field("active", &self.unsubscribe.is_some())
			.finish()
	}
}

impl Drop for Subscription {
	fn drop(&mut self) {
		if let Some(unsubscribe) = self.unsubscribe.take() {
			unsubscribe();
		}
	}
}

// In WASM there is only one thread, so these are effectively tab-wide.
thread_local! {
	static FILTER_EVENTS: Notifier<FilterChanged> = Notifier::new();
	static MODAL_REQUESTS: Notifier<ModalKind> = Notifier::new();
}

/// The tab-wide filter change channel
pub fn filter_events() -> Notifier<FilterChanged> {
	FILTER_EVENTS.with(Clone::clone)
}

/// The tab-wide channel for direct modal-open requests
pub fn modal_requests() -> Notifier<ModalKind> {
	MODAL_REQUESTS.with(Clone::clone)
}

#[cfg(target_arch = "wasm32")]
pub use window_bridge::{WindowBridge, bridge_window_events, dispatch_legacy_event};

#[cfg(target_arch = "wasm32")]
mod window_bridge {
	use std::cell::Cell;

	use wasm_bindgen::JsCast;
	use wasm_bindgen::closure::Closure;

	use super::{FilterChanged, LEGACY_COOKIE_EVENT, Notifier};
	use crate::warn_log;

	thread_local! {
		static ECHOING: Cell<bool> = const { Cell::new(false) };
	}

	/// Fire the legacy `cookie-change` window event for non-Rust listeners
	///
	/// The event is marked as our own so that [`bridge_window_events`] does
	/// not feed it back into the notifier.
	pub fn dispatch_legacy_event() {
		let Some(window) = web_sys::window() else {
			return;
		};
		let event = match web_sys::Event::new(LEGACY_COOKIE_EVENT) {
			Ok(event) => event,
			Err(err) => {
				warn_log!("failed to create {} event: {:?}", LEGACY_COOKIE_EVENT, err);
				return;
			}
		};
		ECHOING.with(|echoing| echoing.set(true));
		let dispatched = window.dispatch_event(&event);
		ECHOING.with(|echoing| echoing.set(false));
		if let Err(err) = dispatched {
			warn_log!("failed to dispatch {} event: {:?}", LEGACY_COOKIE_EVENT, err);
		}
	}

	/// Forwards legacy `cookie-change` window events into a notifier
	pub struct WindowBridge {
		closure: Closure<dyn FnMut(web_sys::Event)>,
	}

	impl Drop for WindowBridge {
		fn drop(&mut self) {
			if let Some(window) = web_sys::window() {
				let _ = window.remove_event_listener_with_callback(
					LEGACY_COOKIE_EVENT,
					self.closure.as_ref().unchecked_ref(),
				);
			}
		}
	}

	/// Listen for filter writes made by code outside this crate
	pub fn bridge_window_events(notifier: Notifier<FilterChanged>) -> Option<WindowBridge> {
		let window = web_sys::window()?;
		let closure = Closure::wrap(Box::new(move |_event: web_sys::Event| {
			if ECHOING.with(Cell::get) {
				return;
			}
			notifier.broadcast(&FilterChanged);
		}) as Box<dyn FnMut(web_sys::Event)>);

		window
			.add_event_listener_with_callback(LEGACY_COOKIE_EVENT, closure.as_ref().unchecked_ref())
			.ok()?;
		Some(WindowBridge { closure })
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serial_test::serial;
	use std::cell::Cell;

	fn counter(notifier: &Notifier<FilterChanged>) -> (Rc<Cell<u64>>, Subscription) {
		let count = Rc::new(Cell::new(0));
		let subscription = notifier.subscribe({
			let count = Rc::clone(&count);
			move |_| count.set(count.get() + 1)
		});
		(count, subscription)
	}

	#[rstest]
	fn test_each_broadcast_increments_each_listener_once() {
		let notifier = Notifier::new();
		let (first, _a) = counter(&notifier);
		let (second, _b) = counter(&notifier);

		assert_eq!(notifier.broadcast(&FilterChanged), 2);
		assert_eq!(notifier.broadcast(&FilterChanged), 2);

		assert_eq!(first.get(), 2);
		assert_eq!(second.get(), 2);
	}

	#[rstest]
	fn test_dropped_subscription_stops_delivery() {
		let notifier = Notifier::new();
		let (count, subscription) = counter(&notifier);
		notifier.broadcast(&FilterChanged);
		drop(subscription);
		notifier.broadcast(&FilterChanged);

		assert_eq!(count.get(), 1);
		assert_eq!(notifier.listener_count(), 0);
	}

	#[rstest]
	fn test_detached_subscription_stays_registered() {
		let notifier = Notifier::new();
		let (count, subscription) = counter(&notifier);
		subscription.detach();
		notifier.broadcast(&FilterChanged);
		assert_eq!(count.get(), 1);
		assert_eq!(notifier.listener_count(), 1);
	}

	#[rstest]
	fn test_subscribing_during_broadcast_waits_for_next_one() {
		let notifier: Notifier<FilterChanged> = Notifier::new();
		let late_hits = Rc::new(Cell::new(0));
		let late: Rc<RefCell<Vec<Subscription>>> = Rc::new(RefCell::new(Vec::new()));

		let _outer = notifier.subscribe({
			let notifier = notifier.clone();
			let late_hits = Rc::clone(&late_hits);
			let late = Rc::clone(&late);
			move |_| {
				let late_hits = Rc::clone(&late_hits);
				late.borrow_mut()
					.push(notifier.subscribe(move |_| late_hits.set(late_hits.get() + 1)));
			}
		});

		notifier.broadcast(&FilterChanged);
		assert_eq!(late_hits.get(), 0);

		notifier.broadcast(&FilterChanged);
		assert_eq!(late_hits.get(), 1);
	}

	#[rstest]
	fn test_subscription_outliving_notifier_is_harmless() {
		let notifier = Notifier::new();
		let (_count, subscription) = counter(&notifier);
		drop(notifier);
		drop(subscription);
	}

	#[rstest]
	#[serial]
	fn test_filter_events_is_shared_per_thread() {
		let (count, _subscription) = counter(&filter_events());
		filter_events().broadcast(&FilterChanged);
		assert_eq!(count.get(), 1);
	}
}
