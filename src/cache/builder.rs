/* src/cache/builder.rs */

use std::time::Duration;

use super::{Cache, Config};
use crate::loader::{FlagStore, Format};
use crate::notifier::NotificationService;

/// Builder for [`Cache`].
#[derive(Debug, Default)]
pub struct CacheBuilder {
	store: FlagStore,
	notifications: NotificationService,
	config: Config,
}

impl CacheBuilder {
	/// Creates a builder with no notifiers and the default [`Config`].
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the notifiers called for every diff.
	pub fn notifications(mut self, notifications: NotificationService) -> Self {
		self.notifications = notifications;
		self
	}

	/// Replaces the whole configuration.
	pub fn config(mut self, config: Config) -> Self {
		self.config = config;
		self
	}

	/// Sets how long [`Cache::close`] waits for queued diffs.
	pub fn close_timeout(mut self, timeout: Duration) -> Self {
		self.config.close_timeout = timeout;
		self
	}

	/// Sets the buffer size of the change-event channel.
	pub fn event_capacity(mut self, capacity: usize) -> Self {
		self.config.event_capacity = capacity;
		self
	}

	/// Registers an extra format, selectable by any of its extensions.
	pub fn format(mut self, format: impl Format + 'static) -> Self {
		self.store = self.store.with_format(format);
		self
	}

	/// Builds the cache. See [`Cache::new`] for when notifications start.
	pub fn build(self) -> Cache {
		Cache::from_parts(self.store, self.notifications, self.config)
	}
}
