/* src/notifier/service.rs */

use std::sync::Arc;

use tokio::task::{AbortHandle, JoinHandle};

use super::{Notifier, NotifyError};
use crate::diff::DiffCache;

/// Fans a diff out to every registered [`Notifier`].
///
/// Each notifier runs as its own task, so a slow, failing or panicking
/// notifier does not affect the others.
#[derive(Clone, Default)]
pub struct NotificationService {
	notifiers: Vec<Arc<dyn Notifier>>,
}

impl NotificationService {
	/// Creates a service from the given notifiers.
	pub fn new(notifiers: Vec<Arc<dyn Notifier>>) -> Self {
		Self { notifiers }
	}

	/// Number of registered notifiers.
	pub fn len(&self) -> usize {
		self.notifiers.len()
	}

	/// Whether no notifier is registered.
	pub fn is_empty(&self) -> bool {
		self.notifiers.is_empty()
	}

	/// Invokes every notifier with `diff` and waits for all of them.
	///
	/// Failures are logged per notifier. Must be called within a Tokio runtime.
	pub async fn dispatch(&self, diff: Arc<DiffCache>) {
		if self.notifiers.is_empty() {
			return;
		}

		let tasks: Vec<(String, JoinHandle<Result<(), NotifyError>>)> = self
			.notifiers
			.iter()
			.map(|notifier| {
				let notifier = Arc::clone(notifier);
				let diff = Arc::clone(&diff);
				let name = notifier.name().to_string();
				let handle = tokio::spawn(async move { notifier.notify(&diff).await });
				(name, handle)
			})
			.collect();

		let _guard = AbortOnDrop(tasks.iter().map(|(_, h)| h.abort_handle()).collect());

		for (name, handle) in tasks {
			match handle.await {
				Ok(Ok(())) => tracing::debug!(notifier = %name, "notified"),
				Ok(Err(e)) => tracing::warn!(notifier = %name, error = %e, "notifier failed"),
				Err(e) if e.is_panic() => tracing::error!(notifier = %name, "notifier panicked"),
				Err(e) => tracing::warn!(notifier = %name, error = %e, "notifier cancelled"),
			}
		}
	}
}

impl std::fmt::Debug for NotificationService {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let names: Vec<&str> = self.notifiers.iter().map(|n| n.name()).collect();
		f.debug_struct("NotificationService")
			.field("notifiers", &names)
			.finish()
	}
}

// Cancels in-flight notifier tasks when a dispatch is itself aborted.
struct AbortOnDrop(Vec<AbortHandle>);

impl Drop for AbortOnDrop {
	fn drop(&mut self) {
		for handle in &self.0 {
			handle.abort();
		}
	}
}
