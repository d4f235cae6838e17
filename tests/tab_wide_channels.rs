//! Components that find each other through the tab-wide channels only.

use std::cell::Cell;
use std::rc::Rc;

use assetdesk::prelude::*;
use rstest::rstest;
use serial_test::serial;

#[rstest]
#[serial(tab_wide)]
fn test_independent_stores_share_filter_events() {
	let jar: Rc<dyn CookieJar> = Rc::new(MemoryCookies::new());
	let header = FilterStore::with_defaults(Rc::clone(&jar));
	let table = FilterStore::with_defaults(Rc::clone(&jar));

	let seen = Rc::new(Cell::new(0));
	let _subscription = table.subscribe({
		let seen = Rc::clone(&seen);
		move |_| seen.set(seen.get() + 1)
	});

	header
		.apply(FilterPredicate::new("AssetType", FilterCriteria::Contains, "laptop"))
		.unwrap();

	assert_eq!(seen.get(), 1);
	assert_eq!(table.read_document().len(), 1);
}

#[rstest]
#[case::add(ModalKind::Add)]
#[case::edit(ModalKind::Edit)]
#[serial(tab_wide)]
fn test_header_button_opens_modal_mounted_elsewhere(#[case] kind: ModalKind) {
	let jar: Rc<dyn CookieJar> = Rc::new(MemoryCookies::new());
	let config = StateConfig::default();
	let host = ModalHost::mount_direct(ModalRelay::tab_wide(Rc::clone(&jar), &config));

	ModalRelay::tab_wide(Rc::clone(&jar), &config)
		.request(kind)
		.unwrap();

	assert!(host.is_open(kind));
	assert_eq!(jar.get(kind.flag_key()), None);
}
