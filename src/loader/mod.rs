/* src/loader/mod.rs */

//!
//! Decoding of raw flag documents into canonical definitions.
//!
//! - [`Format`] turns bytes into an untyped [`serde_json::Value`] tree.
//! - [`normalize`] classifies each entry as legacy or canonical and validates it.
//! - [`FlagStore`] ties both together and fails the whole document on any error.

pub mod error;
pub mod format;
pub mod normalize;
mod store;

pub use error::{FmtError, ValidationError, ValidationKind};
pub use normalize::{PERCENTAGE_TOLERANCE, RawFlag, normalize, validate};
pub use store::FlagStore;

use serde_json::Value;

/// Abstract format decoder that converts bytes into an untyped object graph.
pub trait Format: Send + Sync {
	/// List of supported extensions or identifiers.
	fn extensions(&self) -> &'static [&'static str];

	/// Decode the raw bytes.
	fn decode(&self, input: &[u8]) -> Result<Value, FmtError>;

	/// Whether `name` selects this format. Comparison ignores ASCII case.
	fn matches(&self, name: &str) -> bool {
		self.extensions()
			.iter()
			.any(|ext| ext.eq_ignore_ascii_case(name))
	}
}
