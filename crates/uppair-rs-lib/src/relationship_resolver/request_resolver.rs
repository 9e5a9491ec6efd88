//! Picks the concrete release satisfying a single [`PackageRequest`].

use chrono::NaiveDate;

use super::*;

/// Why a single request could not be resolved.
///
/// These never halt the resolver, they are recorded as [`UnresolvedRequest`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, thiserror::Error)]
pub enum DeterminePackageError {
	/// Neither catalog knows the package.
	#[error("package not found.")]
	PackageNotFound,
	/// Neither catalog has the requested version.
	#[error("requested version not found.")]
	VersionNotFound,
	/// Nothing was published before the date bound.
	#[error("no release published within the date bound.")]
	DateBoundUnsatisfiable,
	/// The package already appears above this request in the same branch.
	#[error("package depends on itself.")]
	CycleDetected,
	/// The branch went deeper than [`crate::ResolverOptions::max_depth`].
	#[error("dependency chain too deep.")]
	DepthLimitExceeded,
}

/// Outcome of one request, the error side is a local failure.
pub type Determination = Result<ResolvedEntry, DeterminePackageError>;

/// Resolves one request against the current catalog and the archive.
///
/// - An exact version is taken from the current catalog if it matches, otherwise from the archive.
/// - A date bound alone accepts the current release if it is old enough,
/// otherwise the most recent archived release published strictly before the bound.
/// Releases sharing a date are chosen in archive order.
/// - With no constraints the current release is used.
/// If the package is absent from the current catalog the archive's most recent release is used instead.
///
/// # Errors
/// `Err` only when a provider fails outright. Requests that can't be satisfied return `Ok(Err(_))`.
pub fn resolve_request(
	metadata: &impl MetadataProvider,
	archive: &impl ArchiveProvider,
	request: &PackageRequest,
	runtime_name: &str,
) -> Result<Determination, ProviderError> {
	let name = request.name.as_str();
	let within = |date: NaiveDate| request.not_after.map_or(true, |bound| date <= bound);

	log::trace!("Resolving request {}", request);
	let current = metadata.lookup_current(name)?;

	let from_current = |c: &CurrentRelease| {
		let entry = ResolvedEntry::new(name, &c.version, c.date, &c.fields, runtime_name);
		log::debug!("{} taken from the current catalog", entry);
		entry
	};

	let from_archive = |r: &ArchivedRelease| -> Result<Determination, ProviderError> {
		let fields = archive.fetch_manifest(name, &r.version)?;
		let entry = ResolvedEntry::new(name, &r.version, r.date, &fields, runtime_name);
		log::debug!("{} taken from the archive", entry);
		Ok(Ok(entry))
	};

	if let Some(version) = &request.exact_version {
		if let Some(c) = current.as_ref().filter(|c| &c.version == version && within(c.date)) {
			return Ok(Ok(from_current(c)));
		}

		let archived = archive.list_versions(name)?;
		if current.is_none() && archived.is_none() {
			return Ok(Err(DeterminePackageError::PackageNotFound));
		}

		let archived = archived.unwrap_or_default();
		if let Some(r) = archived.iter().find(|r| &r.version == version && within(r.date)) {
			return from_archive(r);
		}

		/* The version exists but was published after the bound */
		let exists = current.iter().any(|c| &c.version == version) || archived.iter().any(|r| &r.version == version);
		return Ok(Err(if exists { DeterminePackageError::DateBoundUnsatisfiable } else { DeterminePackageError::VersionNotFound }));
	}

	if let Some(bound) = request.not_after {
		if let Some(c) = current.as_ref().filter(|c| c.date <= bound) {
			return Ok(Ok(from_current(c)));
		}

		let archived = archive.list_versions(name)?;
		if current.is_none() && archived.is_none() {
			return Ok(Err(DeterminePackageError::PackageNotFound));
		}

		let archived = archived.unwrap_or_default();
		return match most_recent(archived.iter().filter(|r| r.date < bound)) {
			Some(r) => from_archive(r),
			None => Ok(Err(DeterminePackageError::DateBoundUnsatisfiable)),
		};
	}

	if let Some(c) = &current {
		return Ok(Ok(from_current(c)));
	}

	let archived = archive.list_versions(name)?.unwrap_or_default();
	match most_recent(archived.iter()) {
		Some(r) => from_archive(r),
		None => Ok(Err(DeterminePackageError::PackageNotFound)),
	}
}

/// The release with the latest date, the first listed wins a tie.
fn most_recent<'r>(releases: impl Iterator<Item = &'r ArchivedRelease>) -> Option<&'r ArchivedRelease> {
	let mut best: Option<&ArchivedRelease> = None;
	for r in releases {
		if best.map_or(true, |b| r.date > b.date) {
			best = Some(r);
		}
	}
	best
}
