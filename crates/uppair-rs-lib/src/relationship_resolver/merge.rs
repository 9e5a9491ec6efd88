//! Folds every occurrence of a package in the trees into a single choice.
//!
//! # Heuristic
//! The chosen release is simply the earliest one any branch asked for,
//! this is the most conservative pick given the date bounds that led to it.
//! Nothing checks that this release actually suits every branch depending on it,
//! merging is not constraint solving.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::*;

/// One package of the final plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergedEntry {
	pub name: String,
	pub version: String,
	pub date: NaiveDate,
	/// Deepest level the package was found at. Higher installs earlier.
	pub priority: usize,
}

impl std::fmt::Display for MergedEntry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}@{}", self.name, self.version)
	}
}

/// Merges every node reachable from `roots`, walked in pre-order.
///
/// - `priority` is the greatest level among the occurrences of a name.
/// - `version` and `date` come from the occurrence with the earliest date, the first one walked wins a tie.
pub fn merge<'t>(roots: impl IntoIterator<Item = &'t TreeNode>) -> BTreeMap<String, MergedEntry> {
	let mut merged = BTreeMap::<String, MergedEntry>::new();

	for node in roots.into_iter().flat_map(TreeNode::preorder) {
		let entry = &node.entry;
		match merged.get_mut(&entry.name) {
			None => {
				merged.insert(entry.name.clone(), MergedEntry {
					name: entry.name.clone(),
					version: entry.version.clone(),
					date: entry.date,
					priority: node.level,
				});
			},
			Some(existing) => {
				existing.priority = existing.priority.max(node.level);
				if entry.date < existing.date {
					log::trace!("{} replaces {} as the earliest required release", entry, existing);
					existing.version = entry.version.clone();
					existing.date = entry.date;
				}
			},
		}
	}

	merged
}

#[cfg(test)]
mod test {
	use super::*;

	fn date(s: &str) -> NaiveDate {
		NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
	}

	fn node(name: &str, version: &str, date_str: &str, level: usize, children: Vec<TreeNode>) -> TreeNode {
		TreeNode {
			entry: ResolvedEntry {
				name: name.into(),
				version: version.into(),
				date: date(date_str),
				dependency_names: children.iter().map(|c| c.entry.name.clone()).collect(),
				runtime_constraint: None,
			},
			level,
			children,
		}
	}

	#[test]
	fn earliest_version_and_deepest_level() {
		/* A -> B(1.0), C -> X -> B(1.1) */
		let roots = vec![
			node("A", "1", "2021-01-01", 0, vec![node("B", "1.0", "2020-01-01", 1, vec![])]),
			node("C", "1", "2021-01-01", 0, vec![
				node("X", "1", "2020-12-01", 1, vec![node("B", "1.1", "2020-05-01", 2, vec![])]),
			]),
		];
		let merged = merge(&roots);
		let b = &merged["B"];
		assert_eq!(b.version, "1.0");
		assert_eq!(b.date, date("2020-01-01"));
		assert_eq!(b.priority, 2);
		assert_eq!(merged.len(), 4);
	}

	#[test]
	fn date_tie_keeps_first_walked() {
		let roots = vec![
			node("A", "1", "2021-01-01", 0, vec![node("B", "first", "2020-01-01", 1, vec![])]),
			node("C", "1", "2021-01-01", 0, vec![node("B", "second", "2020-01-01", 1, vec![])]),
		];
		assert_eq!(merge(&roots)["B"].version, "first");
	}

	#[test]
	fn root_can_gain_priority_from_deeper_occurrence() {
		let roots = vec![
			node("B", "2.0", "2021-06-01", 0, vec![]),
			node("A", "1", "2021-03-01", 0, vec![node("B", "1.5", "2021-02-01", 1, vec![])]),
		];
		let b = &merge(&roots)["B"];
		assert_eq!(b.priority, 1);
		assert_eq!(b.version, "1.5");
	}
}
