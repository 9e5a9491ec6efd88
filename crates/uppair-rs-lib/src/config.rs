use serde::{Serialize, Deserialize};

/// How the merged packages are put into install order.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlanOrdering {
	/// Deepest tree level first. Approximates dependencies-before-dependents
	/// but can misorder packages related across different branches.
	#[default] Priority,
	/// A real topological sort over the dependency edges of the tree.
	/// Fails with [`crate::Error::OrderingCycle`] when the edges contain a cycle.
	Topological,
}

/// Whether a plan may be installed while some requests stayed unresolved.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnresolvedPolicy {
	/// Install whatever resolved.
	#[default] Proceed,
	/// Refuse when any of the requested root packages failed, tolerate transitive failures.
	HaltOnUnresolvedRoot,
	/// Refuse when anything at all failed to resolve.
	HaltOnAnyUnresolved,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverOptions {
	runtime_name: String,
	max_depth: usize,
	ordering: PlanOrdering,
	unresolved_policy: UnresolvedPolicy,
	memoize: bool,
}

impl Default for ResolverOptions {
	fn default() -> Self {
		Self {
			runtime_name: "R".to_string(),
			max_depth: 64,
			ordering: Default::default(),
			unresolved_policy: Default::default(),
			memoize: true,
		}
	}
}

impl ResolverOptions {
	/// Reads options from a JSON file, missing fields take their default value.
	pub fn load_from_disk(path: impl AsRef<std::path::Path>) -> crate::Result<Self> {
		let data = std::fs::read(path)?;
		Ok(serde_json::from_slice(&data)?)
	}

	pub fn save_to_disk(&self, path: impl AsRef<std::path::Path>) -> crate::Result<()> {
		let data = serde_json::to_vec_pretty(self)?;
		std::fs::write(path, data)?;
		Ok(())
	}

	/// Name of the host runtime as it appears in dependency fields.
	pub fn runtime_name(&self) -> &str {
		&self.runtime_name
	}
	pub fn set_runtime_name(&mut self, runtime_name: impl Into<String>) {
		self.runtime_name = runtime_name.into();
	}

	pub fn max_depth(&self) -> usize {
		self.max_depth
	}
	/// returns if the depth is valid or not.
	pub fn set_max_depth(&mut self, max_depth: usize) -> bool {
		if max_depth > 0 {
			self.max_depth = max_depth;
			true
		} else {
			false
		}
	}

	pub fn ordering(&self) -> PlanOrdering {
		self.ordering
	}
	pub fn set_ordering(&mut self, ordering: PlanOrdering) {
		self.ordering = ordering;
	}

	pub fn unresolved_policy(&self) -> UnresolvedPolicy {
		self.unresolved_policy
	}
	pub fn set_unresolved_policy(&mut self, unresolved_policy: UnresolvedPolicy) {
		self.unresolved_policy = unresolved_policy;
	}

	pub fn memoize(&self) -> bool {
		self.memoize
	}
	pub fn set_memoize(&mut self, memoize: bool) {
		self.memoize = memoize;
	}
}
