/* src/error.rs */

use thiserror::Error;

use crate::loader::{FmtError, ValidationError};

/// Errors returned by [`Cache::update_cache`](crate::Cache::update_cache).
///
/// Every variant leaves the active snapshot untouched.
#[derive(Debug, Error)]
pub enum CacheError {
	#[error("unsupported format: {0}")]
	UnsupportedFormat(String),

	#[error("decode error: {0}")]
	Decode(#[from] FmtError),

	#[error(transparent)]
	Validation(#[from] ValidationError),
}
