/* src/loader/format/json.rs */

use super::super::{FmtError, Format};
use serde_json::Value;

/// JSON format parser using `serde_json`.
pub struct Json;

impl Format for Json {
	fn extensions(&self) -> &'static [&'static str] {
		&["json"]
	}

	fn decode(&self, input: &[u8]) -> Result<Value, FmtError> {
		serde_json::from_slice(input).map_err(|e| FmtError::ParseError(e.to_string()))
	}
}
