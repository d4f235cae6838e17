//! Settings for the client-state layer
//!
//! Defaults reproduce the behavior the pages have always had: filters live
//! for a day, the empty-state marker for a week, and modal triggers are
//! polled every 500 ms. Settings can be overridden from a TOML document:
//!
//! ```
//! use assetdesk_core::config::StateConfig;
//!
//! let config = StateConfig::from_toml_str(r#"
//! api_base_url = "https://assets.example.com/api"
//! poll_interval_ms = 250
//! "#).unwrap();
//!
//! assert_eq!(config.poll_interval_ms, 250);
//! assert_eq!(config.filter_retention_days, 1);
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cookie::{CookieOptions, Retention};
use crate::error::{Result, StateError};

/// Default retention of an edited filter document, in days
pub const DEFAULT_FILTER_RETENTION_DAYS: u32 = 1;

/// Default retention of the bootstrapped empty document, in days
pub const DEFAULT_BOOTSTRAP_RETENTION_DAYS: u32 = 7;

/// Default modal-trigger poll cadence, in milliseconds
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 500;

/// Client-state settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StateConfig {
	/// Retention of `filterState` after a column edit
	pub filter_retention_days: u32,
	/// Retention of the `"[]"` marker written at bootstrap and after a purge
	pub bootstrap_retention_days: u32,
	/// Modal-trigger poll cadence
	pub poll_interval_ms: u64,
	/// Mirror filter changes onto the legacy `cookie-change` window event
	/// and accept that event from non-Rust writers (browser builds only)
	pub window_events: bool,
	/// Base URL of the REST backend
	pub api_base_url: String,
	/// Path attribute for every cookie written
	pub cookie_path: String,
}

impl Default for StateConfig {
	fn default() -> Self {
		Self {
			filter_retention_days: DEFAULT_FILTER_RETENTION_DAYS,
			bootstrap_retention_days: DEFAULT_BOOTSTRAP_RETENTION_DAYS,
			poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
			window_events: true,
			api_base_url: String::new(),
			cookie_path: "/".to_string(),
		}
	}
}

impl StateConfig {
	/// Parse and validate settings from TOML; missing keys take their defaults
	pub fn from_toml_str(source: &str) -> Result<Self> {
		let config: Self = toml::from_str(source)?;
		config.validate()?;
		Ok(config)
	}

	/// Check the invariants the store and relay rely on
	pub fn validate(&self) -> Result<()> {
		if self.poll_interval_ms == 0 {
			return Err(StateError::config("poll_interval_ms must be greater than zero"));
		}
		if self.filter_retention_days == 0 || self.bootstrap_retention_days == 0 {
			return Err(StateError::config("retention days must be greater than zero"));
		}
		if self.bootstrap_retention_days < self.filter_retention_days {
			return Err(StateError::config(
				"bootstrap_retention_days must not be shorter than filter_retention_days",
			));
		}
		Ok(())
	}

	/// Poll cadence as a `Duration`
	pub fn poll_interval(&self) -> Duration {
		Duration::from_millis(self.poll_interval_ms)
	}

	/// Cookie options for an edited filter document
	pub fn filter_cookie(&self) -> CookieOptions {
		CookieOptions::new(Retention::Days(self.filter_retention_days)).path(&self.cookie_path)
	}

	/// Cookie options for the bootstrapped empty document
	pub fn bootstrap_cookie(&self) -> CookieOptions {
		CookieOptions::new(Retention::Days(self.bootstrap_retention_days))
			.path(&self.cookie_path)
	}

	/// Cookie options for session-scoped slots (modal flags, handoff snapshots)
	pub fn session_cookie(&self) -> CookieOptions {
		CookieOptions::new(Retention::Session).path(&self.cookie_path)
	}
}
