use super::*;

/// A resolved package and the packages it depends on.
///
/// The same package may appear many times in a tree, with different versions.
/// Duplicates are only folded together by [`merge`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
	pub entry: ResolvedEntry,
	/// Distance from the root request, roots are `0`.
	pub level: usize,
	pub children: Vec<TreeNode>,
}

impl TreeNode {
	/// Walks this node and everything below it, parents before children and children in declared order.
	pub fn preorder(&self) -> PreOrder<'_> {
		PreOrder { stack: vec![self] }
	}
}

/// Iterator returned by [`TreeNode::preorder`].
#[derive(Debug)]
pub struct PreOrder<'t> {
	stack: Vec<&'t TreeNode>,
}

impl<'t> Iterator for PreOrder<'t> {
	type Item = &'t TreeNode;

	fn next(&mut self) -> Option<Self::Item> {
		let node = self.stack.pop()?;
		self.stack.extend(node.children.iter().rev());
		Some(node)
	}
}

/// A request that could not be resolved and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnresolvedRequest {
	pub request: PackageRequest,
	pub reason: DeterminePackageError,
}

/// The trees grown from each root request.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyForest {
	/// One tree per root request that resolved, in request order.
	pub roots: Vec<TreeNode>,
	/// Every failed request at any depth, in the order they were met.
	pub unresolved: Vec<UnresolvedRequest>,
	/// The root requests among `unresolved`.
	pub unresolved_roots: Vec<PackageRequest>,
}

/// Expands requests into trees, one branch after another.
///
/// Each dependency is requested with its parent's publication date as the bound,
/// so dates never increase going down a branch.
#[derive(Debug)]
pub struct TreeBuilder<'p, M, A> {
	metadata: &'p M,
	archive: &'p A,
	options: &'p ResolverOptions,
}

impl<'p, M: MetadataProvider, A: ArchiveProvider> TreeBuilder<'p, M, A> {
	pub fn new(metadata: &'p M, archive: &'p A, options: &'p ResolverOptions) -> Self {
		Self {
			metadata,
			archive,
			options,
		}
	}

	/// Grows a tree for every root request.
	pub fn build(&self, requests: &[PackageRequest]) -> Result<DependencyForest, ProviderError> {
		let mut forest = DependencyForest::default();
		for request in requests {
			match self.expand(request.clone(), 0, &mut forest.unresolved)? {
				Some(node) => forest.roots.push(node),
				None => forest.unresolved_roots.push(request.clone()),
			}
		}
		Ok(forest)
	}

	/// Resolves `request` and everything below it.
	///
	/// Returns `None` if `request` itself failed, the failure is appended to `unresolved`.
	/// Failed dependencies are appended as well and left out of `children`, their siblings are still expanded.
	///
	/// # Errors
	/// Only provider failures, which end the whole resolve.
	pub fn expand(&self, request: PackageRequest, level: usize, unresolved: &mut Vec<UnresolvedRequest>) -> Result<Option<TreeNode>, ProviderError> {
		let mut branch = Vec::<String>::new();
		self.expand_branch(request, level, &mut branch, unresolved)
	}

	/// `branch` holds the names from the root down to the parent of `request`.
	fn expand_branch(&self, request: PackageRequest, level: usize, branch: &mut Vec<String>, unresolved: &mut Vec<UnresolvedRequest>) -> Result<Option<TreeNode>, ProviderError> {
		let failure = if branch.iter().any(|n| n == &request.name) {
			Some(DeterminePackageError::CycleDetected)
		} else if level > self.options.max_depth() {
			Some(DeterminePackageError::DepthLimitExceeded)
		} else {
			None
		};

		let entry = match failure {
			Some(reason) => Err(reason),
			None => resolve_request(self.metadata, self.archive, &request, self.options.runtime_name())?,
		};

		let entry = match entry {
			Ok(entry) => entry,
			Err(reason) => {
				log::warn!("Unable to resolve {}: {}", request, reason);
				unresolved.push(UnresolvedRequest { request, reason });
				return Ok(None);
			},
		};

		branch.push(entry.name.clone());
		let mut children = Vec::<TreeNode>::with_capacity(entry.dependency_names.len());
		for name in &entry.dependency_names {
			let child = PackageRequest::dependency_of(name, entry.date);
			if let Some(node) = self.expand_branch(child, level + 1, branch, unresolved)? {
				children.push(node);
			}
		}
		branch.pop();

		Ok(Some(TreeNode { entry, level, children }))
	}
}
