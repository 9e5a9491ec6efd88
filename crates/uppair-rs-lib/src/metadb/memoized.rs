//! Remembers provider answers for the length of one resolution pass.
//!
//! The same package is usually requested from many branches of a tree,
//! without this every request would reach the network again.

use std::cell::RefCell;
use std::collections::HashMap;

use super::*;

/// Wraps a metadata and an archive provider, answering repeated questions from memory.
///
/// Errors are not remembered.
#[derive(Debug)]
pub struct Memoized<M, A> {
	metadata: M,
	archive: A,
	current: RefCell<HashMap<String, Option<CurrentRelease>>>,
	versions: RefCell<HashMap<String, Option<Vec<ArchivedRelease>>>>,
	manifests: RefCell<HashMap<(String, String), DependencyFields>>,
}

impl<M, A> Memoized<M, A> {
	pub fn new(metadata: M, archive: A) -> Self {
		Self {
			metadata,
			archive,
			current: Default::default(),
			versions: Default::default(),
			manifests: Default::default(),
		}
	}
}

impl<M: MetadataProvider, A> MetadataProvider for Memoized<M, A> {
	fn lookup_current(&self, name: &str) -> Result<Option<CurrentRelease>, ProviderError> {
		if let Some(hit) = self.current.borrow().get(name) {
			log::trace!("Current release of {} answered from memory", name);
			return Ok(hit.clone());
		}
		let found = self.metadata.lookup_current(name)?;
		self.current.borrow_mut().insert(name.to_owned(), found.clone());
		Ok(found)
	}
}

impl<M, A: ArchiveProvider> ArchiveProvider for Memoized<M, A> {
	fn list_versions(&self, name: &str) -> Result<Option<Vec<ArchivedRelease>>, ProviderError> {
		if let Some(hit) = self.versions.borrow().get(name) {
			log::trace!("Archive listing of {} answered from memory", name);
			return Ok(hit.clone());
		}
		let found = self.archive.list_versions(name)?;
		self.versions.borrow_mut().insert(name.to_owned(), found.clone());
		Ok(found)
	}

	fn fetch_manifest(&self, name: &str, version: &str) -> Result<DependencyFields, ProviderError> {
		let key = (name.to_owned(), version.to_owned());
		if let Some(hit) = self.manifests.borrow().get(&key) {
			log::trace!("Manifest of {}@{} answered from memory", name, version);
			return Ok(hit.clone());
		}
		let found = self.archive.fetch_manifest(name, version)?;
		self.manifests.borrow_mut().insert(key, found.clone());
		Ok(found)
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use std::cell::Cell;

	use chrono::NaiveDate;

	#[derive(Default)]
	struct Counting {
		calls: Cell<usize>,
	}

	impl MetadataProvider for Counting {
		fn lookup_current(&self, name: &str) -> Result<Option<CurrentRelease>, ProviderError> {
			self.calls.set(self.calls.get() + 1);
			if name == "broken" {
				return Err(ProviderError::new(name, "retries exhausted"));
			}
			Ok(Some(CurrentRelease { version: "1.0".into(), date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(), fields: Default::default() }))
		}
	}

	#[test]
	fn repeated_lookup_reaches_provider_once() {
		let counting = Counting::default();
		let memo = Memoized::new(&counting, CatalogSnapshot::default());
		memo.lookup_current("A").unwrap();
		memo.lookup_current("A").unwrap();
		memo.lookup_current("B").unwrap();
		assert_eq!(counting.calls.get(), 2);
	}

	#[test]
	fn errors_are_not_remembered() {
		let counting = Counting::default();
		let memo = Memoized::new(&counting, CatalogSnapshot::default());
		assert!(memo.lookup_current("broken").is_err());
		assert!(memo.lookup_current("broken").is_err());
		assert_eq!(counting.calls.get(), 2);
	}
}
