use chrono::NaiveDate;
use serde::{Serialize, Deserialize};

const VERSION_SEPARATOR: char = '@';

/// A demand to pin one package.
///
/// `not_after` is an upper bound on the publication date of whatever release is chosen.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PackageRequest {
	pub name: String,
	pub exact_version: Option<String>,
	pub not_after: Option<NaiveDate>,
}

impl PackageRequest {
	/// A request without constraints, it resolves to the current release.
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			exact_version: None,
			not_after: None,
		}
	}

	pub fn with_version(mut self, version: impl Into<String>) -> Self {
		self.exact_version = Some(version.into());
		self
	}

	pub fn not_after(mut self, date: NaiveDate) -> Self {
		self.not_after = Some(date);
		self
	}

	/// The request made for a dependency of a release published on `parent_date`.
	pub(crate) fn dependency_of(name: &str, parent_date: NaiveDate) -> Self {
		Self::new(name).not_after(parent_date)
	}
}

/// Parses `name` or `name@version`.
impl std::str::FromStr for PackageRequest {
	type Err = crate::Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let s = s.trim();
		let mut spl = s.split(VERSION_SEPARATOR);
		let name = spl.next().unwrap_or_default();
		if name.is_empty() {
			return Err(crate::Error::Parse(format!("package name missing in `{}`", s)));
		}

		let request = match spl.next() {
			None => PackageRequest::new(name),
			Some("") => return Err(crate::Error::Parse(format!("version missing after `{}` in `{}`", VERSION_SEPARATOR, s))),
			Some(version) => PackageRequest::new(name).with_version(version),
		};

		if spl.next().is_some() {
			return Err(crate::Error::Parse(format!("more than one `{}` in `{}`", VERSION_SEPARATOR, s)));
		}
		Ok(request)
	}
}

impl std::fmt::Display for PackageRequest {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.name)?;
		if let Some(version) = &self.exact_version {
			write!(f, "{}{}", VERSION_SEPARATOR, version)?;
		}
		if let Some(date) = &self.not_after {
			write!(f, " (not after {})", date)?;
		}
		Ok(())
	}
}
