//! # Catalog access
//!
//! Package data comes from two overlapping catalogs:
//! - the current catalog, which only knows the latest release of each package.
//! - the archive, which lists every earlier release with its publication date.
//!
//! Fetching and scraping these catalogs is left to implementors of [`MetadataProvider`] and [`ArchiveProvider`].
//! [`snapshot::CatalogSnapshot`] implements both over data already held in memory or on disk.

pub mod package;
pub use package::CurrentRelease;
pub use package::ArchivedRelease;
pub use package::DependencyFields;

pub mod snapshot;
pub use snapshot::CatalogSnapshot;

pub mod memoized;
pub use memoized::Memoized;

use crate::error::ProviderError;

/// Source of the latest published release of a package.
///
/// `Ok(None)` means the package is not in the current catalog, which is an ordinary outcome.
/// `Err` is reserved for failures the provider could not recover from itself.
pub trait MetadataProvider {
	fn lookup_current(&self, name: &str) -> Result<Option<CurrentRelease>, ProviderError>;
}

/// Source of historical releases.
pub trait ArchiveProvider {
	/// Every archived release of `name` in the archive's own order, `None` if the archive doesn't know the package.
	fn list_versions(&self, name: &str) -> Result<Option<Vec<ArchivedRelease>>, ProviderError>;
	/// Dependency fields declared by one archived release.
	/// Implementors may need to download and unpack the release to answer.
	fn fetch_manifest(&self, name: &str, version: &str) -> Result<DependencyFields, ProviderError>;
}

impl<T: MetadataProvider + ?Sized> MetadataProvider for &T {
	fn lookup_current(&self, name: &str) -> Result<Option<CurrentRelease>, ProviderError> {
		(**self).lookup_current(name)
	}
}

impl<T: ArchiveProvider + ?Sized> ArchiveProvider for &T {
	fn list_versions(&self, name: &str) -> Result<Option<Vec<ArchivedRelease>>, ProviderError> {
		(**self).list_versions(name)
	}

	fn fetch_manifest(&self, name: &str, version: &str) -> Result<DependencyFields, ProviderError> {
		(**self).fetch_manifest(name, version)
	}
}
