/* src/loader/error.rs */

/// Errors raised while turning raw bytes into an untyped flag mapping.
#[derive(Debug, thiserror::Error)]
pub enum FmtError {
	/// Parsing error from format implementation.
	#[error("parse error: {0}")]
	ParseError(String),

	/// The document decoded, but its top level is not a mapping.
	#[error("expected a mapping of flag names at the top level, found {0}")]
	NotMapping(&'static str),
}

/// Reason a single flag entry was rejected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationKind {
	/// The entry is not a mapping.
	#[error("flag entry must be a mapping")]
	NotMapping,

	/// The entry could not be read as a legacy or canonical flag.
	#[error("malformed definition: {0}")]
	Malformed(String),

	/// A percentage is negative or not finite.
	#[error("rule '{rule}': invalid percentage {value} for variation '{variation}'")]
	InvalidPercentage {
		rule: String,
		variation: String,
		value: f64,
	},

	/// Percentages of a rule do not add up to 100.
	#[error("rule '{rule}': percentages sum to {sum}, expected 100")]
	PercentageSum { rule: String, sum: f64 },

	/// A rule references a variation that is not declared.
	#[error("rule '{rule}': unknown variation '{variation}'")]
	UnknownVariation { rule: String, variation: String },

	/// A rule sets both a variation and percentages.
	#[error("rule '{rule}': variation and percentage are mutually exclusive")]
	AmbiguousResolution { rule: String },

	/// A rule sets neither a variation nor percentages.
	#[error("rule '{rule}': no variation or percentage set")]
	MissingResolution { rule: String },

	/// The default rule carries a query.
	#[error("default rule cannot have a query")]
	DefaultRuleQuery,
}

/// A flag entry that violates the canonical or legacy schema.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid flag '{flag}': {kind}")]
pub struct ValidationError {
	pub flag: String,
	pub kind: ValidationKind,
}

impl ValidationError {
	/// Creates an error for the named flag.
	pub fn new(flag: impl Into<String>, kind: ValidationKind) -> Self {
		Self {
			flag: flag.into(),
			kind,
		}
	}
}
