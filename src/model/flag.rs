/* src/model/flag.rs */

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{LEGACY_RULE_NAME, Rule};

/// The canonical representation of one flag.
///
/// Maps are ordered so that serialization is deterministic; equality does not
/// depend on the order in which the source document listed its keys.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlagDefinition {
	/// Variation name to value.
	pub variations: BTreeMap<String, Value>,
	/// Named targeting rules.
	#[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
	pub rules: BTreeMap<String, Rule>,
	/// Applied when no named rule matches.
	pub default_rule: Rule,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub track_events: Option<bool>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub disable: Option<bool>,
	/// Free-form version label set by the flag author.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub version: Option<String>,
}

impl FlagDefinition {
	/// Whether evaluation events should be emitted. Defaults to `true`.
	pub fn tracks_events(&self) -> bool {
		self.track_events.unwrap_or(true)
	}

	/// Whether the flag is switched off regardless of its rules.
	pub fn is_disabled(&self) -> bool {
		self.disable.unwrap_or(false)
	}

	/// Whether the flag was migrated from the v0 shorthand.
	pub fn is_legacy(&self) -> bool {
		self.rules.contains_key(LEGACY_RULE_NAME)
	}
}
