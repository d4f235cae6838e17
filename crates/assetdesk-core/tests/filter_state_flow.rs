//! Filter document round trips through the cookie jar, as seen by several
//! independently mounted components of one tab.

use std::cell::Cell;
use std::rc::Rc;

use assetdesk_core::cookie::{CookieJar, MemoryCookies, Retention};
use assetdesk_core::filter::{FilterCriteria, FilterPredicate};
use assetdesk_core::notify::{Notifier, Subscription};
use assetdesk_core::store::{FILTER_STATE_KEY, FilterStore};
use assetdesk_core::StateConfig;
use rstest::{fixture, rstest};

struct Tab {
	jar: MemoryCookies,
	events: Notifier<assetdesk_core::FilterChanged>,
}

impl Tab {
	/// A store as built by one component of the tab
	fn store(&self) -> FilterStore {
		FilterStore::new(
			Rc::new(self.jar.clone()),
			self.events.clone(),
			StateConfig::default(),
		)
	}

	/// A mounted table's refetch generation counter
	fn table(&self) -> (Rc<Cell<u64>>, Subscription) {
		let generation = Rc::new(Cell::new(0));
		let subscription = self.events.subscribe({
			let generation = Rc::clone(&generation);
			move |_| generation.set(generation.get() + 1)
		});
		(generation, subscription)
	}
}

#[fixture]
fn tab() -> Tab {
	Tab {
		jar: MemoryCookies::new(),
		events: Notifier::new(),
	}
}

#[rstest]
fn test_first_visit_bootstraps_empty_document(tab: Tab) {
	assert!(tab.jar.get(FILTER_STATE_KEY).is_none());

	tab.store().bootstrap().unwrap();

	let entry = tab.jar.entry(FILTER_STATE_KEY).unwrap();
	assert_eq!(entry.value, "[]");
	assert_eq!(entry.options.retention, Retention::Days(7));
}

#[rstest]
fn test_two_columns_keep_insertion_order(tab: Tab) {
	let asset_type_dropdown = tab.store();
	let company_dropdown = tab.store();

	asset_type_dropdown
		.apply(FilterPredicate::new("AssetType", FilterCriteria::Contains, "laptop"))
		.unwrap();
	company_dropdown
		.apply(FilterPredicate::new("EmpCompID", FilterCriteria::EqualTo, "IT001"))
		.unwrap();

	assert_eq!(
		tab.jar.get(FILTER_STATE_KEY).unwrap(),
		r#"[{"column":"AssetType","criteria":"Contains","filterwith":"laptop"},{"column":"EmpCompID","criteria":"EqualTo","filterwith":"IT001"}]"#
	);
}

#[rstest]
fn test_same_column_twice_keeps_second_edit(tab: Tab) {
	let store = tab.store();
	store
		.apply(FilterPredicate::new("AssetType", FilterCriteria::Contains, "laptop"))
		.unwrap();
	store
		.apply(FilterPredicate::new("AssetType", FilterCriteria::StartsWith, "desk"))
		.unwrap();

	let document = tab.store().read_document();
	assert_eq!(document.len(), 1);
	assert_eq!(
		document.get("AssetType"),
		Some(&FilterPredicate::new("AssetType", FilterCriteria::StartsWith, "desk"))
	);
}

#[rstest]
fn test_every_mounted_table_refetches_once_per_edit(tab: Tab) {
	let (assets, _assets_subscription) = tab.table();
	let (transfers, transfers_subscription) = tab.table();
	let store = tab.store();

	store
		.apply(FilterPredicate::new("AssetType", FilterCriteria::Contains, "laptop"))
		.unwrap();
	assert_eq!((assets.get(), transfers.get()), (1, 1));

	drop(transfers_subscription);
	store
		.apply(FilterPredicate::new("EmpCompID", FilterCriteria::EqualTo, "IT001"))
		.unwrap();
	assert_eq!((assets.get(), transfers.get()), (2, 1));
}

#[rstest]
#[case::not_json("not json")]
#[case::object("{}")]
#[case::string(r#""[]""#)]
fn test_foreign_garbage_reads_as_no_filters(tab: Tab, #[case] stored: &str) {
	tab.jar
		.set(FILTER_STATE_KEY, stored, &StateConfig::default().filter_cookie())
		.unwrap();
	assert!(tab.store().read_document().is_empty());
}

#[rstest]
fn test_edit_over_garbage_starts_fresh(tab: Tab) {
	tab.jar
		.set(FILTER_STATE_KEY, "not json", &StateConfig::default().filter_cookie())
		.unwrap();

	let document = tab
		.store()
		.apply(FilterPredicate::new("AssetType", FilterCriteria::Contains, "laptop"))
		.unwrap();

	assert_eq!(document.len(), 1);
}

#[rstest]
fn test_unload_then_next_visit(tab: Tab) {
	let store = tab.store();
	store
		.apply(FilterPredicate::new("AssetType", FilterCriteria::Contains, "laptop"))
		.unwrap();

	store.clear().unwrap();
	assert_eq!(tab.jar.get(FILTER_STATE_KEY).as_deref(), Some("[]"));

	assert!(tab.store().bootstrap().unwrap());
	assert!(tab.store().read_document().is_empty());
}
