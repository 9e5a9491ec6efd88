//! Hands an install plan to the host package manager.
//!
//! The actual install is done by an [`Installer`] implementation, this module only
//! decides whether a plan may be installed and feeds it through in order.

use crate::config::UnresolvedPolicy;
use crate::relationship_resolver::{InstallPlan, MergedEntry, Resolution};

#[derive(Debug, thiserror::Error)]
pub enum InstallError {
	/// The package's artifact wasn't available to install from.
	#[error("artifact missing for {0}")]
	MissingArtifact(String),
	#[error("installation failed: {0}")]
	Failed(String),
	#[error("IO error: {0}")]
	IO(#[from] std::io::Error),
}

pub trait Installer {
	/// Installs one pinned package.
	fn install(&mut self, name: &str, version: &str) -> Result<(), InstallError>;

	/// Installs every package of `plan` in order.
	///
	/// A failed package doesn't stop the ones after it.
	fn install_all<'p>(&mut self, plan: &'p InstallPlan) -> Vec<(&'p MergedEntry, Result<(), InstallError>)> {
		plan.iter()
			.map(|entry| (entry, self.install(&entry.name, &entry.version)))
			.collect()
	}
}

/// Logs what would be installed without touching anything.
#[derive(Debug, Default)]
pub struct DryRunInstaller;

impl Installer for DryRunInstaller {
	fn install(&mut self, name: &str, version: &str) -> Result<(), InstallError> {
		log::info!("Would install {}@{}", name, version);
		Ok(())
	}
}

/// Outcome of [`install`].
#[derive(Debug, Default)]
pub struct InstallReport<'p> {
	pub installed: Vec<&'p MergedEntry>,
	pub failed: Vec<(&'p MergedEntry, InstallError)>,
}

impl InstallReport<'_> {
	pub fn is_success(&self) -> bool {
		self.failed.is_empty()
	}
}

/// Installs the plan of `resolution` if `policy` allows it.
///
/// `policy` is usually [`crate::ResolverOptions::unresolved_policy`].
///
/// # Errors
/// [`crate::Error::Blocked`] when unresolved requests forbid the install, nothing is installed then.
/// Failures of single packages are reported in [`InstallReport::failed`] instead.
pub fn install<'r>(installer: &mut impl Installer, resolution: &'r Resolution, policy: UnresolvedPolicy) -> crate::Result<InstallReport<'r>> {
	let plan = resolution.installable_plan(policy)?;
	if !resolution.is_complete() {
		log::warn!("Installing with {} unresolved request(s)", resolution.unresolved.len());
	}

	let mut report = InstallReport::default();
	for (entry, result) in installer.install_all(plan) {
		match result {
			Ok(()) => {
				log::info!("Installed {}", entry);
				report.installed.push(entry);
			},
			Err(e) => {
				log::error!("Failed to install {}: {}", entry, e);
				report.failed.push((entry, e));
			},
		}
	}

	Ok(report)
}
