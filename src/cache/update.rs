/* src/cache/update.rs */

use std::sync::{Arc, PoisonError};
use std::time::SystemTime;

use super::{Cache, Snapshot};
use crate::diff::{FlagSnapshot, diff};
use crate::error::CacheError;

impl Cache {
	/// Replaces the snapshot with the flags decoded from `raw`.
	///
	/// On error the active snapshot is left untouched and nothing is
	/// dispatched. On success the new snapshot is published atomically and,
	/// if it differs from the previous one, the diff is queued for the
	/// notifiers.
	pub fn update_cache(&self, raw: &[u8], format: &str) -> Result<(), CacheError> {
		let parsed = self.store.parse(raw, format).inspect_err(|e| {
			tracing::warn!(format, error = %e, "rejected flag update");
		})?;

		// Serializes writers; readers never take this lock.
		let _writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
		let current = self.inner.load_full();

		// Unchanged flags keep their allocation.
		let flags: FlagSnapshot = parsed
			.into_iter()
			.map(|(name, flag)| {
				let flag = match current.flags.get(&name) {
					Some(existing) if **existing == flag => Arc::clone(existing),
					_ => Arc::new(flag),
				};
				(name, flag)
			})
			.collect();

		let changes = diff(&current.flags, &flags);
		let version = current.version + 1;

		self.inner.store(Arc::new(Snapshot {
			flags,
			version,
			loaded_at: Some(SystemTime::now()),
		}));

		tracing::info!(
			version,
			added = changes.added.len(),
			deleted = changes.deleted.len(),
			updated = changes.updated.len(),
			"published flag snapshot"
		);

		if changes.has_diff() && !self.dispatcher.send(changes) {
			tracing::warn!(version, "cache is closed, change notification dropped");
		}

		Ok(())
	}
}
