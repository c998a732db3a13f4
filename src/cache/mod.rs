/* src/cache/mod.rs */

//!
//! The flag cache: owner of the active snapshot.
//!
//! Readers load the current [`Snapshot`] without locking. Updates build a
//! complete new snapshot, publish it with a single pointer swap, and queue the
//! resulting diff for the notification worker.

mod builder;
mod config;
mod read;
mod update;

pub use builder::CacheBuilder;
pub use config::{Config, DEFAULT_CLOSE_TIMEOUT, DEFAULT_EVENT_CAPACITY};

use std::sync::{Arc, Mutex};
use std::time::SystemTime;

use arc_swap::ArcSwap;

use crate::diff::FlagSnapshot;
use crate::loader::FlagStore;
use crate::model::FlagDefinition;
use crate::notifier::{Dispatcher, NotificationService};

/// An immutable, published set of flags.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
	pub flags: FlagSnapshot,
	/// Number of successful updates that led to this snapshot. The initial
	/// empty snapshot is version 0.
	pub version: u64,
	/// When this snapshot was published. `None` for the initial snapshot.
	pub loaded_at: Option<SystemTime>,
}

impl Snapshot {
	/// Looks up a flag by name.
	pub fn get(&self, name: &str) -> Option<&Arc<FlagDefinition>> {
		self.flags.get(name)
	}

	/// Number of flags.
	pub fn len(&self) -> usize {
		self.flags.len()
	}

	/// Whether the snapshot holds no flags.
	pub fn is_empty(&self) -> bool {
		self.flags.is_empty()
	}
}

/// Thread-safe flag cache with atomic snapshot replacement.
///
/// Any number of threads may read while one update is in flight; concurrent
/// updates queue behind each other.
pub struct Cache {
	pub(crate) inner: ArcSwap<Snapshot>,
	pub(crate) store: FlagStore,
	pub(crate) writer: Mutex<()>,
	pub(crate) dispatcher: Dispatcher,
}

impl Cache {
	/// Creates an empty cache.
	///
	/// The notification worker starts on the current Tokio runtime, or on the
	/// first runtime an update or [`Cache::close`] runs in.
	pub fn new(notifications: NotificationService) -> Self {
		Self::builder().notifications(notifications).build()
	}

	/// Starts a [`CacheBuilder`] with default settings.
	pub fn builder() -> CacheBuilder {
		CacheBuilder::new()
	}

	pub(crate) fn from_parts(
		store: FlagStore,
		notifications: NotificationService,
		config: Config,
	) -> Self {
		Self {
			inner: ArcSwap::from_pointee(Snapshot::default()),
			store,
			writer: Mutex::new(()),
			dispatcher: Dispatcher::new(notifications, config.close_timeout, config.event_capacity),
		}
	}

	/// Stops the notification worker.
	///
	/// Diffs already queued are dispatched unless that takes longer than
	/// [`Config::close_timeout`], in which case the worker is aborted. Safe to
	/// call repeatedly. Updates after closing still replace the snapshot but
	/// no longer notify.
	pub async fn close(&self) {
		self.dispatcher.close().await;
	}
}

impl std::fmt::Debug for Cache {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let snapshot = self.inner.load();
		f.debug_struct("Cache")
			.field("version", &snapshot.version)
			.field("flags", &snapshot.len())
			.field("store", &self.store)
			.finish_non_exhaustive()
	}
}
