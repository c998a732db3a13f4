/* src/notifier/worker.rs */

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

#[cfg(feature = "events")]
use tokio::sync::broadcast;

use super::NotificationService;
use crate::diff::DiffCache;

/// Background task that dispatches queued diffs in publication order.
///
/// The worker is spawned on the Tokio runtime that is current when the
/// dispatcher is created, or on the first one seen by a later `send` or
/// `close`. Diffs queued before that are kept and dispatched in order.
pub(crate) struct Dispatcher {
	tx: Mutex<Option<mpsc::UnboundedSender<Arc<DiffCache>>>>,
	idle: Mutex<Option<Worker>>,
	handle: Mutex<Option<JoinHandle<()>>>,
	// Held by `close` for the whole drain so concurrent callers wait too.
	closing: tokio::sync::Mutex<()>,
	close_timeout: Duration,
	#[cfg(feature = "events")]
	events: broadcast::Sender<Arc<DiffCache>>,
}

impl Dispatcher {
	/// Creates the queue and starts the worker if a Tokio runtime is running.
	pub(crate) fn new(
		service: NotificationService,
		close_timeout: Duration,
		_event_capacity: usize,
	) -> Self {
		let (tx, rx) = mpsc::unbounded_channel();

		#[cfg(feature = "events")]
		let events = broadcast::channel(_event_capacity.max(1)).0;

		let worker = Worker {
			rx,
			service,
			#[cfg(feature = "events")]
			events: events.clone(),
		};

		let dispatcher = Self {
			tx: Mutex::new(Some(tx)),
			idle: Mutex::new(Some(worker)),
			handle: Mutex::new(None),
			closing: tokio::sync::Mutex::new(()),
			close_timeout,
			#[cfg(feature = "events")]
			events,
		};
		dispatcher.start();
		dispatcher
	}

	/// Queues a diff. Returns false once the dispatcher is closed.
	pub(crate) fn send(&self, diff: DiffCache) -> bool {
		let queued = match lock(&self.tx).as_ref() {
			Some(tx) => tx.send(Arc::new(diff)).is_ok(),
			None => false,
		};
		if queued {
			self.start();
		}
		queued
	}

	#[cfg(feature = "events")]
	pub(crate) fn subscribe(&self) -> broadcast::Receiver<Arc<DiffCache>> {
		self.events.subscribe()
	}

	/// Stops accepting diffs and waits, at most `close_timeout`, for queued
	/// ones to be dispatched. Concurrent calls all return after the drain.
	pub(crate) async fn close(&self) {
		let _closing = self.closing.lock().await;
		drop(lock(&self.tx).take());
		self.start();

		if lock(&self.idle).take().is_some() {
			tracing::warn!("no Tokio runtime available, queued change notifications dropped");
		}

		let Some(mut handle) = lock(&self.handle).take() else {
			return;
		};

		match tokio::time::timeout(self.close_timeout, &mut handle).await {
			Ok(Ok(())) => tracing::debug!("notification worker stopped"),
			Ok(Err(e)) => tracing::warn!(error = %e, "notification worker ended abnormally"),
			Err(_) => {
				tracing::warn!(
					timeout = ?self.close_timeout,
					"notification worker did not drain in time, aborting"
				);
				handle.abort();
			}
		}
	}

	fn start(&self) {
		let mut idle = lock(&self.idle);
		if idle.is_none() {
			return;
		}
		let Ok(runtime) = Handle::try_current() else {
			return;
		};
		if let Some(worker) = idle.take() {
			*lock(&self.handle) = Some(runtime.spawn(worker.run()));
		}
	}
}

impl Drop for Dispatcher {
	fn drop(&mut self) {
		if let Some(handle) = lock(&self.handle).take() {
			handle.abort();
		}
	}
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
	mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

struct Worker {
	rx: mpsc::UnboundedReceiver<Arc<DiffCache>>,
	service: NotificationService,
	#[cfg(feature = "events")]
	events: broadcast::Sender<Arc<DiffCache>>,
}

impl Worker {
	async fn run(mut self) {
		while let Some(diff) = self.rx.recv().await {
			self.service.dispatch(Arc::clone(&diff)).await;

			#[cfg(feature = "events")]
			{
				// No subscribers is not an error.
				let _ = self.events.send(diff);
			}
		}
	}
}
