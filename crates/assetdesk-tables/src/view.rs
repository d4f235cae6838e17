//! Table state and fetch sequencing
//!
//! A table refetches every time the filter document changes, and fetches
//! may resolve out of order. Each fetch carries a [`FetchTicket`]; only the
//! response for the most recently dispatched ticket is applied, so a slow
//! response can never overwrite a newer one.

use assetdesk_core::{debug_log, warn_log};

use crate::error::ApiError;

/// Identifies one dispatched fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FetchTicket {
	/// Dispatch order, starting at 1
	pub sequence: u64,
	/// Refetch generation active at dispatch
	pub generation: u64,
}

/// What happened to a completed fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
	/// Rows replaced
	Applied {
		/// Number of rows now shown
		rows: usize,
	},
	/// The fetch failed; rows kept, message for the user
	Failed(String),
	/// A newer fetch was dispatched; response discarded
	Stale,
}

/// Rows and loading state of one table
#[derive(Debug, Clone)]
pub struct TableView<R> {
	rows: Vec<R>,
	loading: bool,
	error: Option<String>,
	generation: u64,
	latest: Option<FetchTicket>,
}

impl<R> Default for TableView<R> {
	fn default() -> Self {
		Self::new()
	}
}

impl<R> TableView<R> {
	/// Empty view, not loading
	pub fn new() -> Self {
		Self {
			rows: Vec::new(),
			loading: false,
			error: None,
			generation: 0,
			latest: None,
		}
	}

	/// Rows currently shown
	pub fn rows(&self) -> &[R] {
		&self.rows
	}

	/// Check if a fetch is outstanding
	pub fn is_loading(&self) -> bool {
		self.loading
	}

	/// Message of the last failed fetch, cleared by the next success
	pub fn error(&self) -> Option<&str> {
		self.error.as_deref()
	}

	/// Refetch generation
	pub fn generation(&self) -> u64 {
		self.generation
	}

	/// Most recently dispatched ticket
	pub fn latest_ticket(&self) -> Option<FetchTicket> {
		self.latest
	}

	/// Record one filter change; returns the new generation
	pub fn bump_generation(&mut self) -> u64 {
		self.generation += 1;
		self.generation
	}

	/// Dispatch a fetch
	pub fn begin_fetch(&mut self) -> FetchTicket {
		let sequence = self.latest.map_or(1, |ticket| ticket.sequence + 1);
		let ticket = FetchTicket {
			sequence,
			generation: self.generation,
		};
		self.latest = Some(ticket);
		self.loading = true;
		ticket
	}

	/// Check if `ticket` is the most recently dispatched one
	pub fn is_current(&self, ticket: FetchTicket) -> bool {
		self.latest == Some(ticket)
	}

	/// Apply the response for `ticket`
	///
	/// A stale response changes nothing, not even the loading flag: the
	/// newer fetch is still outstanding.
	pub fn complete(
		&mut self,
		ticket: FetchTicket,
		result: Result<Vec<R>, ApiError>,
	) -> FetchOutcome {
		if !self.is_current(ticket) {
			debug_log!(
				"discarding response for fetch #{} (generation {}), latest is {:?}",
				ticket.sequence,
				ticket.generation,
				self.latest
			);
			return FetchOutcome::Stale;
		}

		self.loading = false;
		match result {
			Ok(rows) => {
				self.rows = rows;
				self.error = None;
				FetchOutcome::Applied {
					rows: self.rows.len(),
				}
			}
			Err(err) => {
				warn_log!("fetch #{} failed: {}", ticket.sequence, err);
				let message = err.notice_text();
				self.error = Some(message.clone());
				FetchOutcome::Failed(message)
			}
		}
	}
}
