/* src/loader/format/toml.rs */

use super::super::{FmtError, Format};
use serde_json::{Map, Number, Value};

/// TOML format parser using `toml`.
pub struct Toml;

impl Format for Toml {
	fn extensions(&self) -> &'static [&'static str] {
		&["toml"]
	}

	fn decode(&self, input: &[u8]) -> Result<Value, FmtError> {
		let s = std::str::from_utf8(input).map_err(|e| FmtError::ParseError(e.to_string()))?;
		let table: toml::Table = toml::from_str(s).map_err(|e| FmtError::ParseError(e.to_string()))?;
		convert_table(table)
	}
}

fn convert_table(table: toml::Table) -> Result<Value, FmtError> {
	let mut map = Map::with_capacity(table.len());
	for (key, value) in table {
		map.insert(key, convert(value)?);
	}
	Ok(Value::Object(map))
}

fn convert(value: toml::Value) -> Result<Value, FmtError> {
	Ok(match value {
		toml::Value::String(s) => Value::String(s),
		toml::Value::Integer(i) => Value::Number(i.into()),
		toml::Value::Float(f) => Number::from_f64(f)
			.map(Value::Number)
			.ok_or_else(|| FmtError::ParseError(format!("unsupported float value: {f}")))?,
		toml::Value::Boolean(b) => Value::Bool(b),
		toml::Value::Datetime(dt) => Value::String(dt.to_string()),
		toml::Value::Array(items) => {
			Value::Array(items.into_iter().map(convert).collect::<Result<_, _>>()?)
		}
		toml::Value::Table(table) => convert_table(table)?,
	})
}
