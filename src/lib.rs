/* src/lib.rs */

//!
//! Runtime configuration core of a feature-flag engine.
//!
//! - **loader**: decodes YAML/JSON/TOML flag documents and normalizes the v0
//!   shorthand into canonical [`FlagDefinition`]s.
//! - **cache**: owns the active snapshot; lock-free reads, serialized updates.
//! - **diff**: classifies changes between snapshots.
//! - **notifier**: fans each change out to registered [`Notifier`]s.
//!
//! ## Feature Flags
//!
//! - `full` (default): Enables all features.
//! - `json`, `toml`, `yaml`: Built-in document formats.
//! - `events`: Enables [`Cache::subscribe`].
//!
//! ## Basic Usage
//!
//! ```no_run
//! use flagcache::{Cache, NotificationService};
//!
//! # async fn run() -> Result<(), flagcache::CacheError> {
//! let cache = Cache::new(NotificationService::default());
//! cache.update_cache(b"my-flag:\n  percentage: 50\n  true: on\n  false: off\n  default: off\n", "yaml")?;
//!
//! let flag = cache.get_flag("my-flag").expect("loaded");
//! assert!(flag.is_legacy());
//! cache.close().await;
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod diff;
pub mod error;
pub mod loader;
pub mod model;
pub mod notifier;

pub use cache::{Cache, CacheBuilder, Config, Snapshot};
pub use diff::{DiffCache, DiffUpdated, FlagSnapshot};
pub use error::CacheError;
pub use model::{FlagDefinition, LEGACY_RULE_NAME, Rule};
pub use notifier::{NotificationService, Notifier, NotifyError};
