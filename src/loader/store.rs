/* src/loader/store.rs */

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use super::format::AnyFormat;
use super::{FmtError, Format, normalize};
use crate::error::CacheError;
use crate::model::FlagDefinition;

/// The decode + normalize pipeline.
///
/// Holds the formats it can resolve by identifier. Formats registered with
/// [`with_format`](FlagStore::with_format) take precedence over the built-in ones.
#[derive(Clone)]
pub struct FlagStore {
	formats: Vec<Arc<dyn Format>>,
}

impl FlagStore {
	/// Creates a store with every built-in format enabled in this build.
	pub fn new() -> Self {
		Self {
			formats: AnyFormat::ALL
				.iter()
				.map(|format| Arc::new(*format) as Arc<dyn Format>)
				.collect(),
		}
	}

	/// Registers an additional format.
	pub fn with_format(mut self, format: impl Format + 'static) -> Self {
		self.formats.insert(0, Arc::new(format));
		self
	}

	/// Finds the format for an identifier such as `"yaml"` or `"JSON"`.
	pub fn resolve(&self, name: &str) -> Option<&dyn Format> {
		self.formats
			.iter()
			.find(|format| format.matches(name))
			.map(|format| format.as_ref())
	}

	/// Parses a whole flag document.
	///
	/// Empty input and empty documents yield an empty mapping. Any malformed
	/// entry fails the entire call.
	pub fn parse(
		&self,
		raw: &[u8],
		format: &str,
	) -> Result<HashMap<String, FlagDefinition>, CacheError> {
		let decoder = self
			.resolve(format)
			.ok_or_else(|| CacheError::UnsupportedFormat(format.to_string()))?;

		if raw.iter().all(u8::is_ascii_whitespace) {
			return Ok(HashMap::new());
		}

		let entries = match decoder.decode(raw)? {
			Value::Null => return Ok(HashMap::new()),
			Value::Object(entries) => entries,
			other => return Err(FmtError::NotMapping(type_name(&other)).into()),
		};

		let mut flags = HashMap::with_capacity(entries.len());
		for (name, value) in entries {
			let flag = normalize(&name, value)?;
			flags.insert(name, flag);
		}

		tracing::debug!(format, flags = flags.len(), "parsed flag document");
		Ok(flags)
	}
}

impl Default for FlagStore {
	fn default() -> Self {
		Self::new()
	}
}

impl std::fmt::Debug for FlagStore {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let formats: Vec<_> = self.formats.iter().map(|f| f.extensions()).collect();
		f.debug_struct("FlagStore").field("formats", &formats).finish()
	}
}

fn type_name(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "a boolean",
		Value::Number(_) => "a number",
		Value::String(_) => "a string",
		Value::Array(_) => "a sequence",
		Value::Object(_) => "a mapping",
	}
}
