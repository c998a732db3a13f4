/* src/loader/normalize.rs */

//!
//! Detection of the v0 shorthand and conversion into [`FlagDefinition`].

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::{Map, Value};

use super::{ValidationError, ValidationKind};
use crate::model::{
	FlagDefinition, LEGACY_RULE_NAME, Rule, VARIATION_DEFAULT, VARIATION_FALSE, VARIATION_TRUE,
};

/// Allowed distance between a rule's percentage sum and 100.
pub const PERCENTAGE_TOLERANCE: f64 = 1e-6;

const DEFAULT_RULE_NAME: &str = "defaultRule";
const LEGACY_KEYS: [&str; 5] = ["rule", "percentage", "true", "false", "default"];
const CANONICAL_KEYS: [&str; 3] = ["variations", "rules", "defaultRule"];

/// The v0 single-rule shorthand.
#[derive(Debug, Clone, Deserialize)]
pub struct LegacyFlag {
	#[serde(default)]
	pub rule: Option<String>,
	#[serde(default)]
	pub percentage: Option<f64>,
	#[serde(default, rename = "true")]
	pub true_value: Value,
	#[serde(default, rename = "false")]
	pub false_value: Value,
	#[serde(default, rename = "default")]
	pub default_value: Value,
	#[serde(default, rename = "trackEvents")]
	pub track_events: Option<bool>,
	#[serde(default)]
	pub disable: Option<bool>,
}

impl From<LegacyFlag> for FlagDefinition {
	fn from(legacy: LegacyFlag) -> Self {
		let percentage = legacy.percentage.unwrap_or(0.0);

		let variations = BTreeMap::from([
			(VARIATION_TRUE.to_string(), legacy.true_value),
			(VARIATION_FALSE.to_string(), legacy.false_value),
			(VARIATION_DEFAULT.to_string(), legacy.default_value),
		]);

		let rule = Rule {
			query: legacy.rule,
			variation_result: None,
			percentages: Some(BTreeMap::from([
				(VARIATION_TRUE.to_string(), percentage),
				(VARIATION_FALSE.to_string(), 100.0 - percentage),
			])),
		};

		FlagDefinition {
			variations,
			rules: BTreeMap::from([(LEGACY_RULE_NAME.to_string(), rule)]),
			default_rule: Rule::variation(VARIATION_DEFAULT),
			track_events: legacy.track_events,
			disable: legacy.disable,
			version: None,
		}
	}
}

/// One decoded flag entry, classified by shape.
#[derive(Debug, Clone)]
pub enum RawFlag {
	Legacy(LegacyFlag),
	Canonical(FlagDefinition),
}

impl RawFlag {
	/// Classifies an untyped entry and reads it into the matching shape.
	pub fn classify(name: &str, value: Value) -> Result<Self, ValidationError> {
		let Value::Object(entry) = value else {
			return Err(ValidationError::new(name, ValidationKind::NotMapping));
		};

		let malformed = |e: serde_json::Error| {
			ValidationError::new(name, ValidationKind::Malformed(e.to_string()))
		};

		if is_legacy_shape(&entry) {
			serde_json::from_value(Value::Object(entry))
				.map(RawFlag::Legacy)
				.map_err(malformed)
		} else {
			serde_json::from_value(Value::Object(entry))
				.map(RawFlag::Canonical)
				.map_err(malformed)
		}
	}

	pub fn into_definition(self) -> FlagDefinition {
		match self {
			RawFlag::Legacy(legacy) => legacy.into(),
			RawFlag::Canonical(flag) => flag,
		}
	}
}

fn is_legacy_shape(entry: &Map<String, Value>) -> bool {
	LEGACY_KEYS.iter().any(|key| entry.contains_key(*key))
		&& !CANONICAL_KEYS.iter().any(|key| entry.contains_key(*key))
}

/// Classifies, converts and validates one flag entry.
pub fn normalize(name: &str, value: Value) -> Result<FlagDefinition, ValidationError> {
	let flag = RawFlag::classify(name, value)?.into_definition();
	validate(name, &flag)?;
	Ok(flag)
}

/// Checks the structural rules every canonical definition must satisfy.
pub fn validate(name: &str, flag: &FlagDefinition) -> Result<(), ValidationError> {
	if flag.default_rule.query.is_some() {
		return Err(ValidationError::new(name, ValidationKind::DefaultRuleQuery));
	}

	check_rule(DEFAULT_RULE_NAME, &flag.default_rule, &flag.variations)
		.map_err(|kind| ValidationError::new(name, kind))?;

	for (rule_name, rule) in &flag.rules {
		check_rule(rule_name, rule, &flag.variations)
			.map_err(|kind| ValidationError::new(name, kind))?;
	}

	Ok(())
}

fn check_rule(
	rule_name: &str,
	rule: &Rule,
	variations: &BTreeMap<String, Value>,
) -> Result<(), ValidationKind> {
	match (&rule.variation_result, &rule.percentages) {
		(Some(_), Some(_)) => Err(ValidationKind::AmbiguousResolution {
			rule: rule_name.to_string(),
		}),
		(None, None) => Err(ValidationKind::MissingResolution {
			rule: rule_name.to_string(),
		}),
		(Some(variation), None) => {
			if variations.contains_key(variation) {
				Ok(())
			} else {
				Err(ValidationKind::UnknownVariation {
					rule: rule_name.to_string(),
					variation: variation.clone(),
				})
			}
		}
		(None, Some(percentages)) => check_percentages(rule_name, percentages, variations),
	}
}

fn check_percentages(
	rule_name: &str,
	percentages: &BTreeMap<String, f64>,
	variations: &BTreeMap<String, Value>,
) -> Result<(), ValidationKind> {
	let mut sum = 0.0;
	for (variation, &value) in percentages {
		if !variations.contains_key(variation) {
			return Err(ValidationKind::UnknownVariation {
				rule: rule_name.to_string(),
				variation: variation.clone(),
			});
		}
		if !value.is_finite() || value < 0.0 {
			return Err(ValidationKind::InvalidPercentage {
				rule: rule_name.to_string(),
				variation: variation.clone(),
				value,
			});
		}
		sum += value;
	}

	if (sum - 100.0).abs() > PERCENTAGE_TOLERANCE {
		return Err(ValidationKind::PercentageSum {
			rule: rule_name.to_string(),
			sum,
		});
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	fn kind_of(value: Value) -> ValidationKind {
		normalize("flag", value).unwrap_err().kind
	}

	#[test]
	fn legacy_shorthand_is_expanded() {
		let flag = normalize(
			"flag",
			json!({
				"rule": "key eq \"random-key\"",
				"percentage": 30,
				"true": "on",
				"false": "off",
				"default": "unknown",
				"disable": true,
			}),
		)
		.unwrap();

		assert_eq!(flag.variations[VARIATION_TRUE], json!("on"));
		assert_eq!(flag.variations[VARIATION_FALSE], json!("off"));
		assert_eq!(flag.variations[VARIATION_DEFAULT], json!("unknown"));
		assert_eq!(
			flag.rules[LEGACY_RULE_NAME],
			Rule::split([(VARIATION_TRUE, 30.0), (VARIATION_FALSE, 70.0)])
				.with_query("key eq \"random-key\"")
		);
		assert_eq!(flag.default_rule, Rule::variation(VARIATION_DEFAULT));
		assert_eq!(flag.disable, Some(true));
		assert_eq!(flag.track_events, None);
		assert!(flag.is_legacy());
	}

	#[test]
	fn legacy_without_percentage_sends_everyone_to_false() {
		let flag = normalize("flag", json!({"true": 1, "false": 0})).unwrap();
		let split = flag.rules[LEGACY_RULE_NAME].percentages.clone().unwrap();
		assert_eq!(split[VARIATION_TRUE], 0.0);
		assert_eq!(split[VARIATION_FALSE], 100.0);
		assert_eq!(flag.variations[VARIATION_DEFAULT], Value::Null);
		assert_eq!(flag.rules[LEGACY_RULE_NAME].query, None);
	}

	#[test]
	fn non_numeric_legacy_percentage_is_rejected() {
		assert!(matches!(
			kind_of(json!({"rule": "x", "percentage": "toot", "true": true})),
			ValidationKind::Malformed(_)
		));
	}

	#[test]
	fn out_of_range_legacy_percentage_is_rejected() {
		assert!(matches!(
			kind_of(json!({"percentage": -5, "true": true, "false": false})),
			ValidationKind::InvalidPercentage { .. }
		));
		assert!(matches!(
			kind_of(json!({"percentage": 120, "true": true, "false": false})),
			ValidationKind::InvalidPercentage { .. }
		));
	}

	#[test]
	fn canonical_keys_win_over_legacy_markers() {
		let flag = normalize(
			"flag",
			json!({
				"variations": {"A": 1, "B": 2},
				"rules": {"beta": {"query": "beta eq true", "variation": "B"}},
				"defaultRule": {"variation": "A"},
				"true": "ignored",
			}),
		)
		.unwrap();
		assert!(!flag.is_legacy());
		assert_eq!(flag.rules["beta"], Rule::variation("B").with_query("beta eq true"));
	}

	#[test]
	fn canonical_percentages_accept_small_rounding_error() {
		let flag = normalize(
			"flag",
			json!({
				"variations": {"A": 1, "B": 2, "C": 3},
				"defaultRule": {"percentage": {"A": 33.3333333, "B": 33.3333333, "C": 33.3333334}},
			}),
		);
		assert!(flag.is_ok());
	}

	#[test]
	fn canonical_percentages_must_sum_to_100() {
		assert!(matches!(
			kind_of(json!({
				"variations": {"A": 1, "B": 2},
				"defaultRule": {"percentage": {"A": 40, "B": 40}},
			})),
			ValidationKind::PercentageSum { .. }
		));
	}

	#[test]
	fn dangling_references_are_rejected() {
		assert_eq!(
			kind_of(json!({
				"variations": {"A": 1},
				"defaultRule": {"variation": "Z"},
			})),
			ValidationKind::UnknownVariation {
				rule: "defaultRule".to_string(),
				variation: "Z".to_string(),
			}
		);
		assert_eq!(
			kind_of(json!({
				"variations": {"A": 1},
				"rules": {"r": {"percentage": {"A": 50, "Z": 50}}},
				"defaultRule": {"variation": "A"},
			})),
			ValidationKind::UnknownVariation {
				rule: "r".to_string(),
				variation: "Z".to_string(),
			}
		);
	}

	#[test]
	fn rule_resolution_must_be_exactly_one() {
		assert_eq!(
			kind_of(json!({
				"variations": {"A": 1},
				"rules": {"r": {"query": "x", "variation": "A", "percentage": {"A": 100}}},
				"defaultRule": {"variation": "A"},
			})),
			ValidationKind::AmbiguousResolution {
				rule: "r".to_string()
			}
		);
		assert_eq!(
			kind_of(json!({
				"variations": {"A": 1},
				"rules": {"r": {"query": "x"}},
				"defaultRule": {"variation": "A"},
			})),
			ValidationKind::MissingResolution {
				rule: "r".to_string()
			}
		);
	}

	#[test]
	fn default_rule_cannot_carry_a_query() {
		assert_eq!(
			kind_of(json!({
				"variations": {"A": 1},
				"defaultRule": {"query": "x", "variation": "A"},
			})),
			ValidationKind::DefaultRuleQuery
		);
	}

	#[test]
	fn non_mapping_entries_are_rejected() {
		assert_eq!(kind_of(json!("not a flag")), ValidationKind::NotMapping);
		assert!(matches!(
			kind_of(json!({"disable": true})),
			ValidationKind::Malformed(_)
		));
	}

	#[test]
	fn error_names_the_flag() {
		let err = normalize("checkout-v2", json!(42)).unwrap_err();
		assert_eq!(err.flag, "checkout-v2");
		assert!(err.to_string().contains("checkout-v2"));
	}
}
