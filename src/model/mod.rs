/* src/model/mod.rs */

//!
//! Canonical, format-agnostic flag definitions.

mod flag;
mod rule;

pub use flag::FlagDefinition;
pub use rule::Rule;

/// Name of the synthetic rule created when a v0 shorthand flag is normalized.
pub const LEGACY_RULE_NAME: &str = "legacyRuleV0";

/// Variation names produced by the legacy shorthand.
pub const VARIATION_TRUE: &str = "True";
pub const VARIATION_FALSE: &str = "False";
pub const VARIATION_DEFAULT: &str = "Default";
