//! Various helper functions for testing
//!
//! Catalogs built here are small, fixed and fully in memory.

use chrono::NaiveDate;
use uppair_rs::error::ProviderError;
use uppair_rs::installer::{InstallError, Installer};
use uppair_rs::metadb::{ArchivedRelease, CatalogSnapshot, CurrentRelease, DependencyFields};
use uppair_rs::{ArchiveProvider, MetadataProvider};

/// Parses a `YYYY-MM-DD` date.
/// # Panics
/// If `s` is not a valid date, which is a mistake in the test itself.
pub fn date(s: &str) -> NaiveDate {
	NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("invalid test date")
}

/// Dependency fields with only `Depends` filled.
pub fn depends(names: &[&str]) -> DependencyFields {
	DependencyFields {
		depends: names.iter().map(|s| s.to_string()).collect(),
		..Default::default()
	}
}

/// `A 1.0` depends on `B`, whose current release is newer than `A`.
/// The archive holds an older `B` that fits.
pub fn catalog_newer_dependency() -> CatalogSnapshot {
	CatalogSnapshot::default()
		.with_current("A", "1.0", date("2021-03-01"), depends(&["B"]))
		.with_current("B", "2.0", date("2021-06-01"), depends(&[]))
		.with_archived("B", "1.5", date("2021-02-01"), depends(&[]))
}

/// `X` exists in both catalogs but never as version `3.0`.
pub fn catalog_missing_version() -> CatalogSnapshot {
	CatalogSnapshot::default()
		.with_current("X", "2.0", date("2021-01-01"), depends(&[]))
		.with_archived("X", "1.0", date("2019-01-01"), depends(&[]))
}

/// `A` and `C` both end up needing `B`, but through bounds that pick different releases.
///
/// `A -> B 1.0` at level 1 and `C -> X -> B 1.1` at level 2.
pub fn catalog_diverging_branches() -> CatalogSnapshot {
	CatalogSnapshot::default()
		.with_current("A", "1.0", date("2020-03-01"), depends(&["B"]))
		.with_current("C", "1.0", date("2021-06-01"), depends(&["X"]))
		.with_current("X", "1.0", date("2020-06-01"), depends(&["B"]))
		.with_current("B", "2.0", date("2021-01-01"), depends(&[]))
		.with_archived("B", "1.1", date("2020-05-01"), depends(&[]))
		.with_archived("B", "1.0", date("2020-01-01"), depends(&[]))
}

/// Wraps a snapshot and fails every lookup of one package.
#[derive(Debug, Clone)]
pub struct FailingProvider {
	pub inner: CatalogSnapshot,
	pub failing: String,
}

impl FailingProvider {
	pub fn new(inner: CatalogSnapshot, failing: &str) -> Self {
		Self { inner, failing: failing.to_owned() }
	}

	fn check(&self, name: &str) -> Result<(), ProviderError> {
		if name == self.failing {
			Err(ProviderError::new(name, "simulated provider outage"))
		} else {
			Ok(())
		}
	}
}

impl MetadataProvider for FailingProvider {
	fn lookup_current(&self, name: &str) -> Result<Option<CurrentRelease>, ProviderError> {
		self.check(name)?;
		self.inner.lookup_current(name)
	}
}

impl ArchiveProvider for FailingProvider {
	fn list_versions(&self, name: &str) -> Result<Option<Vec<ArchivedRelease>>, ProviderError> {
		self.check(name)?;
		self.inner.list_versions(name)
	}

	fn fetch_manifest(&self, name: &str, version: &str) -> Result<DependencyFields, ProviderError> {
		self.check(name)?;
		self.inner.fetch_manifest(name, version)
	}
}

/// Remembers what it was asked to install, in order.
#[derive(Debug, Default)]
pub struct RecordingInstaller {
	pub installed: Vec<(String, String)>,
}

impl Installer for RecordingInstaller {
	fn install(&mut self, name: &str, version: &str) -> Result<(), InstallError> {
		self.installed.push((name.to_owned(), version.to_owned()));
		Ok(())
	}
}

/// Writes `snapshot` to a temporary file, removed when the handle drops.
pub fn write_snapshot(snapshot: &CatalogSnapshot) -> uppair_rs::Result<tempfile::NamedTempFile> {
	let file = tempfile::NamedTempFile::new()?;
	snapshot.save_to_disk(file.path())?;
	Ok(file)
}
