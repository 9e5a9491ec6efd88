use std::collections::{BTreeMap, HashMap};

use petgraph::prelude::*;

use super::*;

/// Merged packages in the order they should be installed.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstallPlan {
	entries: Vec<MergedEntry>,
}

impl InstallPlan {
	pub fn entries(&self) -> &[MergedEntry] {
		&self.entries
	}

	pub fn iter(&self) -> std::slice::Iter<'_, MergedEntry> {
		self.entries.iter()
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn get(&self, name: &str) -> Option<&MergedEntry> {
		self.entries.iter().find(|e| e.name == name)
	}

	/// Position of `name` in the install order.
	pub fn position(&self, name: &str) -> Option<usize> {
		self.entries.iter().position(|e| e.name == name)
	}
}

impl<'a> IntoIterator for &'a InstallPlan {
	type Item = &'a MergedEntry;
	type IntoIter = std::slice::Iter<'a, MergedEntry>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

/// Orders merged packages by priority, highest first. Equal priorities stay in name order.
///
/// This only approximates dependencies-before-dependents, merging gives a package a
/// single priority whichever branch it came from. [`emit_topological`] gives a real guarantee.
pub fn emit(merged: BTreeMap<String, MergedEntry>) -> InstallPlan {
	let mut entries: Vec<_> = merged.into_values().collect();
	entries.sort_by(|a, b| b.priority.cmp(&a.priority));
	InstallPlan { entries }
}

/// Orders merged packages so every package comes after everything it was found depending on in `roots`.
///
/// # Errors
/// [`crate::Error::OrderingCycle`] if the dependency edges, gathered across all branches, form a cycle.
pub fn emit_topological(merged: BTreeMap<String, MergedEntry>, roots: &[TreeNode]) -> crate::Result<InstallPlan> {
	let order = {
		let mut graph = DiGraph::<&str, ()>::new();
		let mut indices = HashMap::<&str, NodeIndex>::new();
		for name in merged.keys() {
			indices.insert(name.as_str(), graph.add_node(name.as_str()));
		}

		for node in roots.iter().flat_map(TreeNode::preorder) {
			for child in &node.children {
				/* Edges run from a dependency to its dependent so dependencies sort first */
				if let (Some(&from), Some(&to)) = (indices.get(child.entry.name.as_str()), indices.get(node.entry.name.as_str())) {
					graph.update_edge(from, to, ());
				}
			}
		}

		petgraph::algo::toposort(&graph, None)
			.map_err(|cycle| crate::Error::OrderingCycle(graph[cycle.node_id()].to_string()))?
			.into_iter()
			.map(|i| graph[i].to_string())
			.collect::<Vec<_>>()
	};

	let mut merged = merged;
	let entries = order.iter().filter_map(|name| merged.remove(name)).collect();
	Ok(InstallPlan { entries })
}
