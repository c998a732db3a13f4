/* src/loader/format/mod.rs */

use super::{FmtError, Format};
use serde_json::Value;

#[cfg(feature = "json")]
mod json;
#[cfg(feature = "json")]
pub use json::Json;

#[cfg(feature = "toml")]
mod toml;
#[cfg(feature = "toml")]
pub use toml::Toml;

#[cfg(feature = "yaml")]
mod yaml;
#[cfg(feature = "yaml")]
pub use yaml::Yaml;

/// An enum wrapper for the built-in formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnyFormat {
	#[cfg(feature = "json")]
	Json,
	#[cfg(feature = "toml")]
	Toml,
	#[cfg(feature = "yaml")]
	Yaml,
}

impl AnyFormat {
	/// All formats compiled into this build.
	pub const ALL: &'static [AnyFormat] = &[
		#[cfg(feature = "json")]
		AnyFormat::Json,
		#[cfg(feature = "toml")]
		AnyFormat::Toml,
		#[cfg(feature = "yaml")]
		AnyFormat::Yaml,
	];

	/// Looks up a built-in format by identifier, ignoring ASCII case.
	pub fn from_name(name: &str) -> Option<Self> {
		Self::ALL.iter().copied().find(|format| format.matches(name))
	}
}

impl Format for AnyFormat {
	fn extensions(&self) -> &'static [&'static str] {
		match self {
			#[cfg(feature = "json")]
			Self::Json => Json.extensions(),
			#[cfg(feature = "toml")]
			Self::Toml => Toml.extensions(),
			#[cfg(feature = "yaml")]
			Self::Yaml => Yaml.extensions(),
			#[cfg(not(any(feature = "json", feature = "toml", feature = "yaml")))]
			_ => unreachable!(),
		}
	}

	fn decode(&self, _input: &[u8]) -> Result<Value, FmtError> {
		match self {
			#[cfg(feature = "json")]
			Self::Json => Json.decode(_input),
			#[cfg(feature = "toml")]
			Self::Toml => Toml.decode(_input),
			#[cfg(feature = "yaml")]
			Self::Yaml => Yaml.decode(_input),
			#[cfg(not(any(feature = "json", feature = "toml", feature = "yaml")))]
			_ => unreachable!(),
		}
	}
}
