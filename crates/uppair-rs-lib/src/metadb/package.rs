//! Various types associated with packages.

use chrono::NaiveDate;
use serde::{Serialize, Deserialize};

mod request;
pub use request::PackageRequest;

mod dependency_fields;
pub use dependency_fields::DependencyFields;
pub use dependency_fields::RuntimeConstraint;

/// The release listed by the current catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentRelease {
	pub version: String,
	pub date: NaiveDate,
	#[serde(default)]
	pub fields: DependencyFields,
}

/// One entry of a package's archive listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchivedRelease {
	pub version: String,
	pub date: NaiveDate,
}

/// A concrete release chosen for a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedEntry {
	pub name: String,
	pub version: String,
	pub date: NaiveDate,
	/// Depends, Imports and LinkingTo in declared order, without duplicates.
	pub dependency_names: Vec<String>,
	/// The release's requirement on the host runtime, never resolved as a package.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub runtime_constraint: Option<RuntimeConstraint>,
}

impl ResolvedEntry {
	pub fn new(name: &str, version: &str, date: NaiveDate, fields: &DependencyFields, runtime_name: &str) -> Self {
		let (dependency_names, runtime_constraint) = fields.normalize(runtime_name);
		Self {
			name: name.to_owned(),
			version: version.to_owned(),
			date,
			dependency_names,
			runtime_constraint,
		}
	}
}

impl std::fmt::Display for ResolvedEntry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}@{} ({})", self.name, self.version, self.date)
	}
}
