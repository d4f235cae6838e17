//! A mounted table page
//!
//! [`TablePage`] wires one table to the tab's filter store. Mounting primes
//! the filter cookie, fetches once, and refetches on every filter change.
//! Each change bumps the view's refetch generation by one; responses that
//! arrive after a newer fetch was dispatched are dropped.
//!
//! In the browser a mounted page also clears the filter document when the
//! tab is about to unload. Unmounting is dropping the page, which
//! unsubscribes it from filter changes and removes the unload handler.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use assetdesk_core::notify::Subscription;
use assetdesk_core::store::FilterStore;
use assetdesk_core::task::spawn_local;
use assetdesk_core::{debug_log, warn_log};

use crate::column::ColumnSpec;
use crate::notice::Notices;
use crate::sorting::{SortState, sort_rows};
use crate::source::RowSource;
use crate::view::{FetchOutcome, TableView};

struct PageState<R> {
	store: FilterStore,
	source: Rc<dyn RowSource<R>>,
	view: RefCell<TableView<R>>,
	notices: Notices,
}

impl<R> PageState<R> {
	async fn refresh(&self) -> FetchOutcome {
		let filters = self.store.read_document();
		let ticket = self.view.borrow_mut().begin_fetch();
		debug_log!(
			"fetch #{} (generation {}) with {} filters",
			ticket.sequence,
			ticket.generation,
			filters.len()
		);

		let result = self.source.fetch(&filters).await;

		let outcome = self.view.borrow_mut().complete(ticket, result);
		if let FetchOutcome::Failed(message) = &outcome {
			self.notices.error(message.clone());
		}
		outcome
	}
}

/// One table bound to the filter document
pub struct TablePage<R: 'static> {
	state: Rc<PageState<R>>,
	_filters: Subscription,
	#[cfg(target_arch = "wasm32")]
	_unload: Option<assetdesk_core::store::UnloadGuard>,
}

impl<R: 'static> fmt::Debug for TablePage<R> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let view = self.state.view.borrow();
		f.debug_struct("TablePage")
			.field("rows", &view.rows().len())
			.field("loading", &view.is_loading())
			.field("generation", &view.generation())
			.finish_non_exhaustive()
	}
}

impl<R: 'static> TablePage<R> {
	/// Mount the page and start the first fetch
	///
	/// On native targets this must run inside a `tokio::task::LocalSet`.
	pub fn mount<S>(store: FilterStore, source: S, notices: Notices) -> Self
	where
		S: RowSource<R> + 'static,
	{
		if let Err(err) = store.bootstrap() {
			warn_log!("failed to prime filter state: {}", err);
		}

		let state = Rc::new(PageState {
			store,
			source: Rc::new(source),
			view: RefCell::new(TableView::new()),
			notices,
		});

		let weak: Weak<PageState<R>> = Rc::downgrade(&state);
		let filters = state.store.subscribe(move |_| {
			let Some(state) = weak.upgrade() else {
				return;
			};
			state.view.borrow_mut().bump_generation();
			spawn_local(async move {
				state.refresh().await;
			});
		});

		#[cfg(target_arch = "wasm32")]
		let unload = assetdesk_core::store::install_unload_handler(state.store.clone());
		#[cfg(target_arch = "wasm32")]
		if unload.is_none() {
			warn_log!("window unavailable, filters will not be cleared on unload");
		}

		spawn_local({
			let state = Rc::clone(&state);
			async move {
				state.refresh().await;
			}
		});

		Self {
			state,
			_filters: filters,
			#[cfg(target_arch = "wasm32")]
			_unload: unload,
		}
	}

	/// Clear the filter document the way the tab's unload handler does
	///
	/// No refetch follows; the page is going away.
	pub fn unload(&self) {
		if let Err(err) = self.state.store.clear() {
			warn_log!("failed to clear filters on unload: {}", err);
		}
	}

	/// Fetch now with the current filter document
	pub async fn refresh(&self) -> FetchOutcome {
		self.state.refresh().await
	}

	/// Read the view state
	pub fn with_view<T>(&self, f: impl FnOnce(&TableView<R>) -> T) -> T {
		f(&self.state.view.borrow())
	}

	/// Refetch generation
	pub fn generation(&self) -> u64 {
		self.with_view(TableView::generation)
	}

	/// Check if a fetch is outstanding
	pub fn is_loading(&self) -> bool {
		self.with_view(TableView::is_loading)
	}

	/// Message of the last failed fetch
	pub fn error(&self) -> Option<String> {
		self.with_view(|view| view.error().map(str::to_string))
	}

	/// The filter store this page reads
	pub fn store(&self) -> &FilterStore {
		&self.state.store
	}

	/// Notice queue failures are reported to
	pub fn notices(&self) -> &Notices {
		&self.state.notices
	}
}

impl<R: Clone + 'static> TablePage<R> {
	/// Rows currently shown
	pub fn rows(&self) -> Vec<R> {
		self.with_view(|view| view.rows().to_vec())
	}

	/// Rows ordered by `sort`, looking the column up in `columns`
	///
	/// Unsorted or unknown columns keep the fetched order.
	pub fn sorted_rows(&self, sort: &SortState, columns: &[ColumnSpec<R>]) -> Vec<R> {
		let mut rows = self.rows();
		let column = sort.current().and_then(|(accessor, direction)| {
			columns
				.iter()
				.find(|column| column.accessor() == accessor && column.is_sortable())
				.map(|column| (column, direction))
		});
		if let Some((column, direction)) = column {
			sort_rows(&mut rows, column, direction);
		}
		rows
	}
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
	use super::*;
	use crate::error::{ApiError, ApiResult};
	use crate::source::LocalRows;
	use assetdesk_core::{FilterDocument, MemoryCookies, Notifier, StateConfig};
	use async_trait::async_trait;
	use tokio::task::LocalSet;

	fn store() -> FilterStore {
		FilterStore::new(
			Rc::new(MemoryCookies::new()),
			Notifier::new(),
			StateConfig::default(),
		)
	}

	struct Failing;

	#[async_trait(?Send)]
	impl RowSource<u32> for Failing {
		async fn fetch(&self, _filters: &FilterDocument) -> ApiResult<Vec<u32>> {
			Err(ApiError::server(500, "database is down"))
		}
	}

	#[tokio::test(start_paused = true)]
	async fn test_mount_fetches_once() {
		LocalSet::new()
			.run_until(async {
				let page = TablePage::mount(
					store(),
					LocalRows::new(vec![3, 1, 2], |_: &u32, _: &FilterDocument| true),
					Notices::new(),
				);
				tokio::time::sleep(std::time::Duration::from_millis(1)).await;

				assert_eq!(page.rows(), vec![3, 1, 2]);
				assert_eq!(page.generation(), 0);
				assert!(!page.is_loading());
			})
			.await;
	}

	#[tokio::test(start_paused = true)]
	async fn test_failure_is_reported_once() {
		LocalSet::new()
			.run_until(async {
				let notices = Notices::new();
				let page = TablePage::mount(store(), Failing, notices.clone());
				tokio::time::sleep(std::time::Duration::from_millis(1)).await;

				assert_eq!(page.error().as_deref(), Some("database is down"));
				let drained = notices.drain();
				assert_eq!(drained.len(), 1);
				assert_eq!(drained[0].message, "database is down");
			})
			.await;
	}

	#[tokio::test(start_paused = true)]
	async fn test_sorted_rows() {
		LocalSet::new()
			.run_until(async {
				let page = TablePage::mount(
					store(),
					LocalRows::new(vec![3u32, 1, 2], |_: &u32, _: &FilterDocument| true),
					Notices::new(),
				);
				page.refresh().await;

				let columns = vec![ColumnSpec::new("n", "N", |n: &u32| n.to_string())];
				let mut sort = SortState::new();
				assert_eq!(page.sorted_rows(&sort, &columns), vec![3, 1, 2]);

				sort.toggle("n");
				assert_eq!(page.sorted_rows(&sort, &columns), vec![1, 2, 3]);
				sort.toggle("n");
				assert_eq!(page.sorted_rows(&sort, &columns), vec![3, 2, 1]);
			})
			.await;
	}
}
