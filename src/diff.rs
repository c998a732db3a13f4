/* src/diff.rs */

//!
//! Structural comparison of two flag snapshots.

use std::collections::HashMap;
use std::sync::Arc;

use crate::model::FlagDefinition;

/// A flag name mapped to its shared definition.
pub type FlagSnapshot = HashMap<String, Arc<FlagDefinition>>;

/// A flag present in both snapshots whose definition changed.
#[derive(Debug, Clone, PartialEq)]
pub struct DiffUpdated {
	pub before: Arc<FlagDefinition>,
	pub after: Arc<FlagDefinition>,
}

/// Classification of the changes between two snapshots.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiffCache {
	/// Flags only present in the new snapshot.
	pub added: FlagSnapshot,
	/// Flags only present in the old snapshot.
	pub deleted: FlagSnapshot,
	/// Flags present in both but structurally different.
	pub updated: HashMap<String, DiffUpdated>,
}

impl DiffCache {
	/// Returns true if at least one flag was added, deleted or updated.
	pub fn has_diff(&self) -> bool {
		!self.added.is_empty() || !self.deleted.is_empty() || !self.updated.is_empty()
	}

	pub fn is_empty(&self) -> bool {
		!self.has_diff()
	}

	/// Names of every flag touched by this diff, sorted.
	pub fn changed_flags(&self) -> Vec<&str> {
		let mut names: Vec<&str> = self
			.added
			.keys()
			.chain(self.deleted.keys())
			.chain(self.updated.keys())
			.map(String::as_str)
			.collect();
		names.sort_unstable();
		names
	}
}

/// Compares two snapshots.
///
/// Definitions are compared by value, so a flag re-decoded from a document
/// that only reordered its keys is not reported as updated.
pub fn diff(old: &FlagSnapshot, new: &FlagSnapshot) -> DiffCache {
	let mut result = DiffCache::default();

	for (name, after) in new {
		match old.get(name) {
			None => {
				result.added.insert(name.clone(), Arc::clone(after));
			}
			Some(before) => {
				if !Arc::ptr_eq(before, after) && before != after {
					result.updated.insert(
						name.clone(),
						DiffUpdated {
							before: Arc::clone(before),
							after: Arc::clone(after),
						},
					);
				}
			}
		}
	}

	for (name, before) in old {
		if !new.contains_key(name) {
			result.deleted.insert(name.clone(), Arc::clone(before));
		}
	}

	result
}
