//! Modal requests reaching a mounted page through the flag poll.

#![cfg(not(target_arch = "wasm32"))]

use std::rc::Rc;
use std::time::Duration;

use assetdesk_core::cookie::{CookieJar, CookieOptions, MemoryCookies};
use assetdesk_core::handoff::{FormSeed, HandoffSlot, seed_form};
use assetdesk_core::modal::{EDIT_MODAL_KEY, MODAL_TYPE_KEY, ModalHost, ModalKind, ModalRelay};
use assetdesk_core::{Notifier, StateConfig};
use serde::{Deserialize, Serialize};
use tokio::task::LocalSet;

const POLL: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
struct UserRow {
	#[serde(rename = "EmpID")]
	emp_id: Option<String>,
	#[serde(rename = "EmpName")]
	emp_name: Option<String>,
}

#[tokio::test(start_paused = true)]
async fn test_edit_flag_opens_modal_after_one_poll() {
	LocalSet::new()
		.run_until(async {
			let jar = MemoryCookies::new();
			let relay = ModalRelay::new(Rc::new(jar.clone()));
			let host = ModalHost::mount(relay.clone(), POLL);

			// Written by a page that does not go through the relay
			jar.set(EDIT_MODAL_KEY, "true", &CookieOptions::default())
				.unwrap();
			assert!(!host.is_open(ModalKind::Edit));

			tokio::time::sleep(POLL + Duration::from_millis(10)).await;

			assert!(host.is_open(ModalKind::Edit));
			assert_eq!(jar.get(MODAL_TYPE_KEY).as_deref(), Some("edit"));
			assert_ne!(jar.get(EDIT_MODAL_KEY).as_deref(), Some("true"));

			host.close(ModalKind::Edit);
			tokio::time::sleep(POLL * 3).await;
			assert!(!host.is_open(ModalKind::Edit));
		})
		.await;
}

#[tokio::test(start_paused = true)]
async fn test_closed_modal_stays_closed_under_scoped_path() {
	LocalSet::new()
		.run_until(async {
			let jar = MemoryCookies::new();
			let config = StateConfig::from_toml_str("cookie_path = \"/app\"").unwrap();
			let relay = ModalRelay::with_channel(Rc::new(jar.clone()), &config, Notifier::new());
			let host = ModalHost::mount(relay, config.poll_interval());

			jar.set(EDIT_MODAL_KEY, "true", &config.session_cookie())
				.unwrap();
			tokio::time::sleep(POLL + Duration::from_millis(10)).await;
			assert!(host.is_open(ModalKind::Edit));
			assert!(jar.get(EDIT_MODAL_KEY).is_none());

			host.close(ModalKind::Edit);
			tokio::time::sleep(POLL * 3).await;
			assert!(!host.is_open(ModalKind::Edit));
		})
		.await;
}

#[tokio::test(start_paused = true)]
async fn test_zero_interval_host_still_polls() {
	LocalSet::new()
		.run_until(async {
			let jar = MemoryCookies::new();
			let host = ModalHost::mount(ModalRelay::new(Rc::new(jar.clone())), Duration::ZERO);

			jar.set(EDIT_MODAL_KEY, "true", &CookieOptions::default())
				.unwrap();
			tokio::time::sleep(Duration::from_millis(10)).await;

			assert!(host.is_open(ModalKind::Edit));
		})
		.await;
}

#[tokio::test(start_paused = true)]
async fn test_unmounted_host_stops_polling() {
	LocalSet::new()
		.run_until(async {
			let jar = MemoryCookies::new();
			let relay = ModalRelay::new(Rc::new(jar.clone()));
			drop(ModalHost::mount(relay, POLL));

			jar.set(EDIT_MODAL_KEY, "true", &CookieOptions::default())
				.unwrap();
			tokio::time::sleep(POLL * 4).await;

			assert_eq!(jar.get(EDIT_MODAL_KEY).as_deref(), Some("true"));
		})
		.await;
}

#[tokio::test(start_paused = true)]
async fn test_edit_action_seeds_form_with_row() {
	LocalSet::new()
		.run_until(async {
			let jar: Rc<dyn CookieJar> = Rc::new(MemoryCookies::new());
			let relay = ModalRelay::new(Rc::clone(&jar));
			let slot: HandoffSlot<UserRow> = HandoffSlot::new(Rc::clone(&jar));
			let host = ModalHost::mount(relay.clone(), POLL);
			let row = UserRow {
				emp_id: Some("E-042".to_string()),
				emp_name: Some("Ada".to_string()),
			};

			relay.request_edit(&slot, &row).unwrap();

			assert!(host.is_open(ModalKind::Edit));
			assert_eq!(seed_form(&relay, &slot), FormSeed::Edit(row));

			relay.request(ModalKind::Add).unwrap();
			assert!(host.is_open(ModalKind::Add));
			assert_eq!(seed_form(&relay, &slot), FormSeed::Create(UserRow::default()));
		})
		.await;
}
