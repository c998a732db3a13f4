/* src/loader/format/yaml.rs */

use super::super::{FmtError, Format};
use serde_json::{Map, Number, Value};
use serde_yaml::Value as YamlValue;

/// YAML format parser using `serde_yaml`.
///
/// YAML allows non-string mapping keys (`true:` is a boolean key), so the
/// document is read as a YAML tree first and keys are rendered as strings.
pub struct Yaml;

impl Format for Yaml {
	fn extensions(&self) -> &'static [&'static str] {
		&["yaml", "yml"]
	}

	fn decode(&self, input: &[u8]) -> Result<Value, FmtError> {
		let value: YamlValue =
			serde_yaml::from_slice(input).map_err(|e| FmtError::ParseError(e.to_string()))?;
		convert(value)
	}
}

fn convert(value: YamlValue) -> Result<Value, FmtError> {
	Ok(match value {
		YamlValue::Null => Value::Null,
		YamlValue::Bool(b) => Value::Bool(b),
		YamlValue::Number(n) => convert_number(&n)?,
		YamlValue::String(s) => Value::String(s),
		YamlValue::Sequence(items) => {
			Value::Array(items.into_iter().map(convert).collect::<Result<_, _>>()?)
		}
		YamlValue::Mapping(mapping) => {
			let mut map = Map::with_capacity(mapping.len());
			for (key, value) in mapping {
				map.insert(key_to_string(key)?, convert(value)?);
			}
			Value::Object(map)
		}
		YamlValue::Tagged(tagged) => convert(tagged.value)?,
	})
}

fn convert_number(n: &serde_yaml::Number) -> Result<Value, FmtError> {
	if let Some(u) = n.as_u64() {
		return Ok(Value::Number(u.into()));
	}
	if let Some(i) = n.as_i64() {
		return Ok(Value::Number(i.into()));
	}
	n.as_f64()
		.and_then(Number::from_f64)
		.map(Value::Number)
		.ok_or_else(|| FmtError::ParseError(format!("unsupported number: {n}")))
}

fn key_to_string(key: YamlValue) -> Result<String, FmtError> {
	match key {
		YamlValue::String(s) => Ok(s),
		YamlValue::Bool(b) => Ok(b.to_string()),
		YamlValue::Number(n) => Ok(n.to_string()),
		YamlValue::Null => Ok("null".to_string()),
		YamlValue::Tagged(tagged) => key_to_string(tagged.value),
		YamlValue::Sequence(_) | YamlValue::Mapping(_) => Err(FmtError::ParseError(
			"mapping keys must be scalars".to_string(),
		)),
	}
}
