/* src/notifier/mod.rs */

//!
//! Change notification: the [`Notifier`] capability and its fan-out service.

mod service;
mod worker;

pub use service::NotificationService;
pub(crate) use worker::Dispatcher;

use async_trait::async_trait;

use crate::diff::DiffCache;

/// Error reported by a notifier. It is logged and never reaches the cache caller.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
	#[error("notification failed: {0}")]
	Failed(String),

	#[error(transparent)]
	Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// An observer informed whenever the active flag snapshot changes.
///
/// Implementations own their transport and any timeout around it.
#[async_trait]
pub trait Notifier: Send + Sync {
	/// Receives the full classification of one non-empty change.
	async fn notify(&self, diff: &DiffCache) -> Result<(), NotifyError>;

	/// Name used when logging failures.
	fn name(&self) -> &str {
		std::any::type_name::<Self>()
	}
}
