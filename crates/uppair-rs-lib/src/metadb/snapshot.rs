//! An in-memory copy of both catalogs.
//!
//! Snapshots are written as JSON so catalog data parsed earlier in the day can be reused
//! instead of fetched again.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Serialize, Deserialize};

use super::*;

/// Archive data held for one package.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchivedPackage {
	/// Releases in archive order.
	pub releases: Vec<ArchivedRelease>,
	/// Manifests keyed by version, a listed release without a manifest has no dependencies.
	pub manifests: BTreeMap<String, DependencyFields>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSnapshot {
	pub current: BTreeMap<String, CurrentRelease>,
	pub archive: BTreeMap<String, ArchivedPackage>,
}

impl CatalogSnapshot {
	pub fn load_from_disk(path: impl AsRef<std::path::Path>) -> crate::Result<Self> {
		let path = path.as_ref();
		log::debug!("Loading catalog snapshot from {}", path.display());
		let data = std::fs::read(path)?;
		Ok(serde_json::from_slice(&data)?)
	}

	pub fn save_to_disk(&self, path: impl AsRef<std::path::Path>) -> crate::Result<()> {
		let path = path.as_ref();
		log::debug!("Saving catalog snapshot to {}", path.display());
		let data = serde_json::to_vec_pretty(self)?;
		std::fs::write(path, data)?;
		Ok(())
	}

	/// Sets the current release of `name`, replacing any earlier one.
	pub fn with_current(mut self, name: &str, version: &str, date: NaiveDate, fields: DependencyFields) -> Self {
		self.current.insert(name.to_owned(), CurrentRelease { version: version.to_owned(), date, fields });
		self
	}

	/// Appends a release to the archive listing of `name`.
	pub fn with_archived(mut self, name: &str, version: &str, date: NaiveDate, fields: DependencyFields) -> Self {
		let package = self.archive.entry(name.to_owned()).or_default();
		package.releases.push(ArchivedRelease { version: version.to_owned(), date });
		package.manifests.insert(version.to_owned(), fields);
		self
	}
}

impl MetadataProvider for CatalogSnapshot {
	fn lookup_current(&self, name: &str) -> Result<Option<CurrentRelease>, ProviderError> {
		Ok(self.current.get(name).cloned())
	}
}

impl ArchiveProvider for CatalogSnapshot {
	fn list_versions(&self, name: &str) -> Result<Option<Vec<ArchivedRelease>>, ProviderError> {
		Ok(self.archive.get(name).map(|p| p.releases.clone()))
	}

	fn fetch_manifest(&self, name: &str, version: &str) -> Result<DependencyFields, ProviderError> {
		let package = self.archive.get(name)
			.ok_or_else(|| ProviderError::new(name, "package not in archive snapshot"))?;
		if !package.releases.iter().any(|r| r.version == version) {
			return Err(ProviderError::new(name, format!("version {} not in archive snapshot", version)));
		}
		Ok(package.manifests.get(version).cloned().unwrap_or_default())
	}
}

#[cfg(test)]
mod test {
	use super::*;

	fn date(s: &str) -> NaiveDate {
		NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
	}

	#[test]
	fn archive_keeps_listing_order() {
		let snapshot = CatalogSnapshot::default()
			.with_archived("B", "1.5", date("2021-02-01"), Default::default())
			.with_archived("B", "1.2", date("2020-07-01"), Default::default());
		let versions: Vec<_> = snapshot.list_versions("B").unwrap().unwrap().into_iter().map(|r| r.version).collect();
		assert_eq!(versions, vec!["1.5", "1.2"]);
	}

	#[test]
	fn unknown_manifest_is_an_error() {
		let snapshot = CatalogSnapshot::default()
			.with_archived("B", "1.5", date("2021-02-01"), Default::default());
		assert!(snapshot.fetch_manifest("B", "9.9").is_err());
		assert!(snapshot.fetch_manifest("C", "1.0").is_err());
		assert!(snapshot.fetch_manifest("B", "1.5").is_ok());
	}

	#[test]
	fn missing_packages_are_absent() {
		let snapshot = CatalogSnapshot::default();
		assert_eq!(snapshot.lookup_current("A").unwrap(), None);
		assert_eq!(snapshot.list_versions("A").unwrap(), None);
	}

	#[test]
	fn dates_serialize_as_iso() {
		let snapshot = CatalogSnapshot::default()
			.with_current("A", "1.0", date("2021-03-01"), Default::default());
		let json = serde_json::to_string(&snapshot).unwrap();
		assert!(json.contains("\"2021-03-01\""));
		assert_eq!(serde_json::from_str::<CatalogSnapshot>(&json).unwrap(), snapshot);
	}
}
