/* src/cache/read.rs */

use std::sync::Arc;
use std::time::SystemTime;

use super::{Cache, Snapshot};
use crate::diff::FlagSnapshot;
use crate::model::FlagDefinition;

#[cfg(feature = "events")]
use crate::diff::DiffCache;

impl Cache {
	/// Gets a flag by name. This is a wait-free operation.
	pub fn get_flag(&self, name: &str) -> Option<Arc<FlagDefinition>> {
		let snapshot = self.inner.load();
		snapshot.flags.get(name).cloned()
	}

	/// Returns every flag of the current snapshot.
	pub fn all_flags(&self) -> FlagSnapshot {
		self.inner.load().flags.clone()
	}

	/// Returns the current snapshot with its metadata.
	pub fn snapshot(&self) -> Arc<Snapshot> {
		self.inner.load_full()
	}

	/// Version of the current snapshot.
	pub fn version(&self) -> u64 {
		self.inner.load().version
	}

	/// When the last successful update was published.
	pub fn latest_update(&self) -> Option<SystemTime> {
		self.inner.load().loaded_at
	}

	/// Number of flags in the current snapshot.
	pub fn len(&self) -> usize {
		self.inner.load().len()
	}

	/// Whether the current snapshot holds no flags.
	pub fn is_empty(&self) -> bool {
		self.inner.load().is_empty()
	}

	/// Subscribes to dispatched diffs.
	///
	/// A diff is delivered after every notifier has been called with it.
	#[cfg(feature = "events")]
	pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<Arc<DiffCache>> {
		self.dispatcher.subscribe()
	}
}
