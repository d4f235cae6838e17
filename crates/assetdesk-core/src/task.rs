//! Timers and local task spawning
//!
//! Browser builds run on the page's event loop through `gloo-timers` and
//! `wasm-bindgen-futures`. Native builds use tokio's local tasks, so callers
//! must be inside a `tokio::task::LocalSet`.

use std::future::Future;
use std::time::Duration;

/// Shortest period a [`PollHandle`] runs at; shorter periods are raised to it
pub const MIN_POLL_PERIOD: Duration = Duration::from_millis(1);

/// Spawn a `!Send` future on the current event loop
#[cfg(target_arch = "wasm32")]
pub fn spawn_local<F>(future: F)
where
	F: Future<Output = ()> + 'static,
{
	wasm_bindgen_futures::spawn_local(future);
}

/// Spawn a `!Send` future on the current event loop
///
/// Must be called from within a `tokio::task::LocalSet`.
#[cfg(not(target_arch = "wasm32"))]
pub fn spawn_local<F>(future: F)
where
	F: Future<Output = ()> + 'static,
{
	drop(tokio::task::spawn_local(future));
}

/// Repeating timer; dropping the handle stops it
///
/// The first tick fires one period after [`PollHandle::start`], like
/// `setInterval`.
#[must_use = "dropping the handle stops the timer"]
pub struct PollHandle {
	#[cfg(target_arch = "wasm32")]
	_interval: gloo_timers::callback::Interval,
	#[cfg(not(target_arch = "wasm32"))]
	task: tokio::task::JoinHandle<()>,
}

impl PollHandle {
	/// Run `tick` every `period`
	#[cfg(target_arch = "wasm32")]
	pub fn start<F>(period: Duration, mut tick: F) -> Self
	where
		F: FnMut() + 'static,
	{
		let millis = u32::try_from(period.max(MIN_POLL_PERIOD).as_millis()).unwrap_or(u32::MAX);
		Self {
			_interval: gloo_timers::callback::Interval::new(millis, move || tick()),
		}
	}

	/// Run `tick` every `period`, at least [`MIN_POLL_PERIOD`]
	///
	/// Must be called from within a `tokio::task::LocalSet`.
	#[cfg(not(target_arch = "wasm32"))]
	pub fn start<F>(period: Duration, mut tick: F) -> Self
	where
		F: FnMut() + 'static,
	{
		let period = period.max(MIN_POLL_PERIOD);
		let task = tokio::task::spawn_local(async move {
			let start = tokio::time::Instant::now() + period;
			let mut interval = tokio::time::interval_at(start, period);
			interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
			loop {
				interval.tick().await;
				tick();
			}
		});
		Self { task }
	}
}

#[cfg(not(target_arch = "wasm32"))]
impl Drop for PollHandle {
	fn drop(&mut self) {
		self.task.abort();
	}
}

impl std::fmt::Debug for PollHandle {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("PollHandle").finish_non_exhaustive()
	}
}
