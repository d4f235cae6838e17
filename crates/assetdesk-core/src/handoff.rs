//! Typed handoff of the row being edited
//!
//! The row an edit action targets travels to the modal form through a
//! session cookie. [`HandoffSlot`] fixes the payload type per slot, so the
//! form reads back the same row type the table wrote.

use std::fmt;
use std::marker::PhantomData;
use std::rc::Rc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::StateConfig;
use crate::cookie::{CookieJar, CookieOptions};
use crate::error::Result;
use crate::modal::{ModalKind, ModalRelay};
use crate::warn_log;

/// Cookie shared by the edit actions of every page
pub const SELECTED_KEY: &str = "selected";

/// Session-scoped slot carrying one `T` from a table to a form
pub struct HandoffSlot<T> {
	jar: Rc<dyn CookieJar>,
	key: String,
	options: CookieOptions,
	_payload: PhantomData<fn() -> T>,
}

impl<T> Clone for HandoffSlot<T> {
	fn clone(&self) -> Self {
		Self {
			jar: Rc::clone(&self.jar),
			key: self.key.clone(),
			options: self.options.clone(),
			_payload: PhantomData,
		}
	}
}

impl<T> fmt::Debug for HandoffSlot<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("HandoffSlot")
			.field("key", &self.key)
			.field("payload", &std::any::type_name::<T>())
			.finish()
	}
}

impl<T> HandoffSlot<T>
where
	T: Serialize + DeserializeOwned,
{
	/// Slot over the shared `selected` cookie
	pub fn new(jar: Rc<dyn CookieJar>) -> Self {
		Self::with_key(jar, SELECTED_KEY)
	}

	/// Slot over a dedicated cookie
	pub fn with_key(jar: Rc<dyn CookieJar>, key: impl Into<String>) -> Self {
		Self {
			jar,
			key: key.into(),
			options: CookieOptions::default(),
			_payload: PhantomData,
		}
	}

	/// Slot over the shared `selected` cookie, scoped to the configured path
	pub fn from_config(jar: Rc<dyn CookieJar>, config: &StateConfig) -> Self {
		Self::new(jar).with_options(config.session_cookie())
	}

	/// Use `options` for writes instead of a plain session cookie
	pub fn with_options(mut self, options: CookieOptions) -> Self {
		self.options = options;
		self
	}

	/// Cookie name backing this slot
	pub fn key(&self) -> &str {
		&self.key
	}

	/// Store a snapshot of `value`
	pub fn write(&self, value: &T) -> Result<()> {
		let json = serde_json::to_string(value)?;
		self.jar.set(&self.key, &json, &self.options)
	}

	/// The stored snapshot
	///
	/// A missing slot and a snapshot that no longer matches `T` both read as
	/// `None`; the latter is logged.
	pub fn read(&self) -> Option<T> {
		let raw = self.jar.get(&self.key)?;
		match serde_json::from_str(&raw) {
			Ok(value) => Some(value),
			Err(err) => {
				warn_log!(
					"ignoring unreadable {} snapshot for {}: {}",
					self.key,
					std::any::type_name::<T>(),
					err
				);
				None
			}
		}
	}

	/// Remove the stored snapshot
	pub fn clear(&self) -> Result<()> {
		self.jar.remove(&self.key, &self.options)
	}
}

/// Initial values for a modal form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormSeed<T> {
	/// Blank form for a new record
	Create(T),
	/// Form pre-filled with the row being edited
	Edit(T),
}

impl<T> FormSeed<T> {
	/// Which modal the seed belongs to
	pub fn kind(&self) -> ModalKind {
		match self {
			Self::Create(_) => ModalKind::Add,
			Self::Edit(_) => ModalKind::Edit,
		}
	}

	/// The seeded values
	pub fn into_inner(self) -> T {
		match self {
			Self::Create(value) | Self::Edit(value) => value,
		}
	}
}

/// Seed a modal form when it mounts
///
/// In edit mode the form starts from the stored snapshot, or from defaults
/// when there is none. Any other mode starts from defaults.
pub fn seed_form<T>(relay: &ModalRelay, slot: &HandoffSlot<T>) -> FormSeed<T>
where
	T: Serialize + DeserializeOwned + Default,
{
	match relay.modal_type() {
		Some(ModalKind::Edit) => FormSeed::Edit(slot.read().unwrap_or_default()),
		_ => FormSeed::Create(T::default()),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::cookie::MemoryCookies;
	use crate::modal::MODAL_TYPE_KEY;
	use rstest::rstest;
	use serde::Deserialize;

	#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
	struct Laptop {
		#[serde(rename = "AssetID")]
		asset_id: Option<String>,
		#[serde(rename = "AssetType")]
		asset_type: Option<String>,
	}

	fn laptop() -> Laptop {
		Laptop {
			asset_id: Some("A-17".to_string()),
			asset_type: Some("laptop".to_string()),
		}
	}

	#[rstest]
	fn test_write_then_read() {
		let jar = MemoryCookies::new();
		let slot: HandoffSlot<Laptop> = HandoffSlot::new(Rc::new(jar.clone()));

		slot.write(&laptop()).unwrap();

		assert_eq!(
			jar.get(SELECTED_KEY).as_deref(),
			Some(r#"{"AssetID":"A-17","AssetType":"laptop"}"#)
		);
		assert_eq!(slot.read(), Some(laptop()));
	}

	#[rstest]
	#[case::missing(None)]
	#[case::garbage(Some("{not json"))]
	#[case::wrong_shape(Some("[1,2,3]"))]
	fn test_unreadable_snapshot_is_none(#[case] stored: Option<&str>) {
		let jar = match stored {
			Some(value) => MemoryCookies::with_cookies([(SELECTED_KEY, value)]),
			None => MemoryCookies::new(),
		};
		let slot: HandoffSlot<Laptop> = HandoffSlot::new(Rc::new(jar));
		assert_eq!(slot.read(), None);
	}

	#[rstest]
	fn test_clear_removes_snapshot() {
		let jar = MemoryCookies::new();
		let slot: HandoffSlot<Laptop> =
			HandoffSlot::with_key(Rc::new(jar.clone()), "selectedAsset");
		slot.write(&laptop()).unwrap();
		slot.clear().unwrap();
		assert!(!jar.contains("selectedAsset"));
	}

	#[rstest]
	#[case::edit(Some("edit"), FormSeed::Edit(laptop()))]
	#[case::add(Some("add"), FormSeed::Create(Laptop::default()))]
	#[case::unset(None, FormSeed::Create(Laptop::default()))]
	fn test_seed_form_follows_modal_type(
		#[case] modal_type: Option<&str>,
		#[case] expected: FormSeed<Laptop>,
	) {
		let jar = MemoryCookies::new();
		if let Some(label) = modal_type {
			jar.set(MODAL_TYPE_KEY, label, &CookieOptions::default())
				.unwrap();
		}
		let jar: Rc<dyn CookieJar> = Rc::new(jar);
		let slot = HandoffSlot::new(Rc::clone(&jar));
		slot.write(&laptop()).unwrap();
		let relay = ModalRelay::new(jar);

		assert_eq!(seed_form(&relay, &slot), expected);
	}

	#[rstest]
	fn test_edit_without_snapshot_seeds_defaults() {
		let jar: Rc<dyn CookieJar> =
			Rc::new(MemoryCookies::with_cookies([(MODAL_TYPE_KEY, "edit")]));
		let slot: HandoffSlot<Laptop> = HandoffSlot::new(Rc::clone(&jar));
		let relay = ModalRelay::new(jar);

		let seed = seed_form(&relay, &slot);
		assert_eq!(seed.kind(), ModalKind::Edit);
		assert_eq!(seed.into_inner(), Laptop::default());
	}

	#[rstest]
	fn test_configured_slot_clears_under_its_path() {
		let jar = MemoryCookies::new();
		let config = StateConfig::from_toml_str("cookie_path = \"/app\"").unwrap();
		let slot: HandoffSlot<Laptop> = HandoffSlot::from_config(Rc::new(jar.clone()), &config);

		slot.write(&laptop()).unwrap();
		assert_eq!(jar.entry(SELECTED_KEY).unwrap().options.path, "/app");

		slot.clear().unwrap();
		assert_eq!(slot.read(), None);
	}
}
