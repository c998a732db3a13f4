/* src/model/rule.rs */

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A targeting clause.
///
/// A rule resolves either to a single variation or to a percentage split
/// across variations. The query is kept as opaque text; evaluating it is the
/// job of whatever consumes the definitions.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Rule {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub query: Option<String>,
	#[serde(
		default,
		rename = "variation",
		alias = "variationResult",
		skip_serializing_if = "Option::is_none"
	)]
	pub variation_result: Option<String>,
	#[serde(
		default,
		rename = "percentage",
		alias = "percentages",
		skip_serializing_if = "Option::is_none"
	)]
	pub percentages: Option<BTreeMap<String, f64>>,
}

impl Rule {
	/// A rule resolving directly to `variation`.
	pub fn variation(variation: impl Into<String>) -> Self {
		Self {
			variation_result: Some(variation.into()),
			..Self::default()
		}
	}

	/// A rule splitting traffic by the given weights.
	pub fn split<I, K>(percentages: I) -> Self
	where
		I: IntoIterator<Item = (K, f64)>,
		K: Into<String>,
	{
		Self {
			percentages: Some(
				percentages
					.into_iter()
					.map(|(name, weight)| (name.into(), weight))
					.collect(),
			),
			..Self::default()
		}
	}

	/// Attaches a query to the rule.
	pub fn with_query(mut self, query: impl Into<String>) -> Self {
		self.query = Some(query.into());
		self
	}
}
