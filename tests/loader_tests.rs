/* tests/loader_tests.rs */

#![cfg(feature = "full")]

// Backward compatibility with the v0 flag shorthand, kept in one file so it
// can be dropped together with the shorthand.

use std::collections::BTreeMap;

use flagcache::{Cache, FlagDefinition, LEGACY_RULE_NAME, NotificationService, Rule};
use serde_json::{Value, json};

const YAML_FLAG: &[u8] = br#"test-flag:
  rule: key eq "random-key"
  percentage: 100
  true: true
  false: false
  default: false
  trackEvents: false
"#;

const JSON_FLAG: &[u8] = br#"{
  "test-flag": {
    "rule": "key eq \"random-key\"",
    "percentage": 100,
    "true": true,
    "false": false,
    "default": false
  }
}
"#;

const TOML_FLAG: &[u8] = br#"[test-flag]
rule = "key eq \"random-key\""
percentage = 100.0
true = true
false = false
default = false
disable = false"#;

fn legacy_flag(
	values: [Value; 3],
	true_percentage: f64,
	track_events: Option<bool>,
	disable: Option<bool>,
) -> FlagDefinition {
	let [true_value, false_value, default_value] = values;
	FlagDefinition {
		variations: BTreeMap::from([
			("Default".to_string(), default_value),
			("False".to_string(), false_value),
			("True".to_string(), true_value),
		]),
		rules: BTreeMap::from([(
			LEGACY_RULE_NAME.to_string(),
			Rule::split([("True", true_percentage), ("False", 100.0 - true_percentage)])
				.with_query("key eq \"random-key\""),
		)]),
		default_rule: Rule::variation("Default"),
		track_events,
		disable,
		version: None,
	}
}

fn bool_values() -> [Value; 3] {
	[json!(true), json!(false), json!(false)]
}

#[tokio::test]
async fn test_legacy_flag_in_every_format() {
	let cases = [
		("yaml", YAML_FLAG, legacy_flag(bool_values(), 100.0, Some(false), None)),
		("json", JSON_FLAG, legacy_flag(bool_values(), 100.0, None, None)),
		("toml", TOML_FLAG, legacy_flag(bool_values(), 100.0, None, Some(false))),
	];

	for (format, raw, expected) in cases {
		let cache = Cache::new(NotificationService::default());
		cache.update_cache(raw, format).unwrap();

		let got = cache.get_flag("test-flag").unwrap();
		assert_eq!(*got, expected, "{format}");
		assert_eq!(
			got.rules[LEGACY_RULE_NAME].percentages,
			Some(BTreeMap::from([("True".to_string(), 100.0), ("False".to_string(), 0.0)])),
			"{format}"
		);
		assert_eq!(got.default_rule.variation_result.as_deref(), Some("Default"));
		cache.close().await;
	}
}

#[tokio::test]
async fn test_invalid_legacy_documents_are_rejected() {
	let cases: [(&str, &[u8]); 3] = [
		(
			"yaml",
			b"test-flag:\n  rule: key eq \"random-key\"\n  percentage: \"toot\"\n  true: true\n  false: false\n  default: false\n",
		),
		(
			"json",
			b"{\n  \"test-flag\": {\n    \"rule\": \"key eq \\\"random-key\\\"\",\n    \"percentage\": 100,\n    \"true\": true,\n    \"false\": false,\n    \"default\": false\"\n  }\n}",
		),
		(
			"toml",
			b"[test-flag]\nrule = \"key eq \\\"random-key\\\"\"\npercentage = 100.0\ntrue = true\nfalse = false\ndefault = false\"\ndisable = false",
		),
	];

	for (format, raw) in cases {
		let cache = Cache::new(NotificationService::default());
		cache.update_cache(YAML_FLAG, "yaml").unwrap();
		let before = cache.all_flags();

		assert!(cache.update_cache(raw, format).is_err(), "{format}");
		assert_eq!(cache.all_flags(), before, "{format}");
		assert_eq!(cache.version(), 1, "{format}");
		cache.close().await;
	}
}

#[tokio::test]
async fn test_all_flags_with_multiple_legacy_flags() {
	let raw = br#"test-flag:
  rule: key eq "random-key"
  percentage: 100
  true: true
  false: false
  default: false
  trackEvents: false
test-flag2:
  rule: key eq "random-key"
  percentage: 0
  true: "true"
  false: "false"
  default: "false"
  trackEvents: false
"#;

	let cache = Cache::new(NotificationService::default());
	cache.update_cache(raw, "yaml").unwrap();

	let flags = cache.all_flags();
	assert_eq!(flags.len(), 2);
	assert_eq!(
		*flags["test-flag"],
		legacy_flag(bool_values(), 100.0, Some(false), None)
	);
	assert_eq!(
		*flags["test-flag2"],
		legacy_flag([json!("true"), json!("false"), json!("false")], 0.0, Some(false), None)
	);
	cache.close().await;
}

#[tokio::test]
async fn test_empty_document() {
	let cache = Cache::new(NotificationService::default());
	cache.update_cache(b"", "yaml").unwrap();
	assert!(cache.all_flags().is_empty());
	assert_eq!(cache.version(), 1);
	cache.close().await;
}

#[tokio::test]
async fn test_legacy_percentages_follow_input() {
	let cache = Cache::new(NotificationService::default());
	for percentage in [0.0, 12.5, 50.0, 99.0, 100.0] {
		let raw = format!(
			"{{\"f\": {{\"percentage\": {percentage}, \"true\": 1, \"false\": 2, \"default\": 3}}}}"
		);
		cache.update_cache(raw.as_bytes(), "json").unwrap();

		let split = cache.get_flag("f").unwrap().rules[LEGACY_RULE_NAME]
			.percentages
			.clone()
			.unwrap();
		assert_eq!(split["True"], percentage);
		assert_eq!(split["False"], 100.0 - percentage);
	}
	cache.close().await;
}
