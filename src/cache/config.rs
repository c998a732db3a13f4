/* src/cache/config.rs */

use std::time::Duration;

/// Default capacity of the change event channel.
pub const DEFAULT_EVENT_CAPACITY: usize = 100;

/// Default bound on how long [`Cache::close`](super::Cache::close) waits.
pub const DEFAULT_CLOSE_TIMEOUT: Duration = Duration::from_secs(5);

/// Cache tuning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
	/// How long `close` waits for queued notifications before aborting them.
	pub close_timeout: Duration,

	/// Capacity of the channel behind `Cache::subscribe`. Slow subscribers
	/// miss diffs once it fills up.
	pub event_capacity: usize,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			close_timeout: DEFAULT_CLOSE_TIMEOUT,
			event_capacity: DEFAULT_EVENT_CAPACITY,
		}
	}
}
