//! Turns a list of requested packages into a pinned, ordered install plan.
//!
//! Publication dates are the only compatibility signal the catalogs offer,
//! so every dependency is pinned to a release no newer than the package requiring it.
//!
//! # Process
//! 1. [`resolve_request`] picks a release for a single request.
//! 1. [`TreeBuilder`] expands each root request into a tree of resolved dependencies.
//! 1. [`merge`] folds every occurrence of a package into one [`MergedEntry`].
//! 1. [`emit`] or [`emit_topological`] puts the merged packages into an [`InstallPlan`].
//!
//! [`resolve`] runs all of these in one pass.
//!
//! # Failures
//! A request that can't be satisfied is recorded as an [`UnresolvedRequest`] and the rest of the resolve continues.
//! Only a [`ProviderError`] ends the pass, and nothing resolved up to that point is kept.

use serde::{Serialize, Deserialize};

use crate::config::{PlanOrdering, UnresolvedPolicy};
use crate::error::ProviderError;
use crate::metadb::*;
use crate::metadb::package::*;
use crate::ResolverOptions;

mod request_resolver;
pub use request_resolver::resolve_request;
pub use request_resolver::Determination;
pub use request_resolver::DeterminePackageError;

mod package_tree;
pub use package_tree::TreeNode;
pub use package_tree::TreeBuilder;
pub use package_tree::DependencyForest;
pub use package_tree::UnresolvedRequest;

mod merge;
pub use merge::merge;
pub use merge::MergedEntry;

mod install_plan;
pub use install_plan::InstallPlan;
pub use install_plan::emit;
pub use install_plan::emit_topological;

/// Everything produced by one resolution pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
	/// One dependency tree per root request that resolved.
	pub tree: Vec<TreeNode>,
	pub plan: InstallPlan,
	pub unresolved: Vec<UnresolvedRequest>,
	/// Root requests that failed themselves, also present in `unresolved`.
	#[serde(default)]
	pub unresolved_roots: Vec<PackageRequest>,
}

impl Resolution {
	/// Whether every request, at any depth, resolved.
	pub fn is_complete(&self) -> bool {
		self.unresolved.is_empty()
	}

	/// The plan, if `policy` allows installing it with the current unresolved requests.
	///
	/// # Errors
	/// [`crate::Error::Blocked`] naming the offending packages.
	pub fn installable_plan(&self, policy: UnresolvedPolicy) -> crate::Result<&InstallPlan> {
		let blocking: Vec<String> = match policy {
			UnresolvedPolicy::Proceed => Vec::new(),
			UnresolvedPolicy::HaltOnUnresolvedRoot => self.unresolved_roots.iter().map(|r| r.name.clone()).collect(),
			UnresolvedPolicy::HaltOnAnyUnresolved => self.unresolved.iter().map(|u| u.request.name.clone()).collect(),
		};

		if blocking.is_empty() {
			Ok(&self.plan)
		} else {
			Err(crate::Error::Blocked(blocking))
		}
	}

	pub fn to_json(&self) -> crate::Result<String> {
		Ok(serde_json::to_string_pretty(self)?)
	}

	pub fn save_to_disk(&self, path: impl AsRef<std::path::Path>) -> crate::Result<()> {
		std::fs::write(path, self.to_json()?)?;
		Ok(())
	}
}

/// Resolves `requests` into an install plan.
///
/// Providers are consulted one request at a time, in request order then declaration order,
/// so identical provider answers always give an identical [`Resolution`].
///
/// # Errors
/// - [`crate::Error::Provider`] if a provider fails, the partial resolve is discarded.
/// - [`crate::Error::OrderingCycle`] with [`PlanOrdering::Topological`] when the dependencies form a cycle across branches.
pub fn resolve<M: MetadataProvider, A: ArchiveProvider>(metadata: &M, archive: &A, requests: &[PackageRequest], options: &ResolverOptions) -> crate::Result<Resolution> {
	log::info!("Resolving {} requested package(s)", requests.len());

	let forest = if options.memoize() {
		let memoized = Memoized::new(metadata, archive);
		TreeBuilder::new(&memoized, &memoized, options).build(requests)?
	} else {
		TreeBuilder::new(metadata, archive, options).build(requests)?
	};

	let merged = merge(&forest.roots);
	let plan = match options.ordering() {
		PlanOrdering::Priority => emit(merged),
		PlanOrdering::Topological => emit_topological(merged, &forest.roots)?,
	};

	if forest.unresolved.is_empty() {
		log::info!("Resolved {} package(s)", plan.len());
	} else {
		log::warn!("Resolved {} package(s), {} request(s) unresolved", plan.len(), forest.unresolved.len());
	}

	Ok(Resolution {
		tree: forest.roots,
		plan,
		unresolved: forest.unresolved,
		unresolved_roots: forest.unresolved_roots,
	})
}
