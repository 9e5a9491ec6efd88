//! Library error type.

pub type Result<T> = std::result::Result<T, Error>;

use thiserror::Error;

/// Errors that end a resolution pass or refuse an install.
///
/// Failures local to a single package request are not represented here,
/// see [`crate::relationship_resolver::DeterminePackageError`].
#[derive(Debug, Error)]
pub enum Error {
	#[error("IO error: {0}")]
	IO(#[from] std::io::Error),
	#[error("JSON error: {0}")]
	SerdeJSON(#[from] serde_json::Error),
	#[error("parsing error: {0}")]
	Parse(String),
	/// A provider gave up after its own retry policy, the whole pass is discarded.
	#[error("provider error: {0}")]
	Provider(#[from] ProviderError),
	/// Topological ordering found a dependency cycle spanning several branches.
	#[error("dependency cycle through `{0}` prevents install ordering")]
	OrderingCycle(String),
	/// The unresolved policy refuses to install a partial plan.
	#[error("installation blocked by unresolved packages: {0:?}")]
	Blocked(Vec<String>),
}

/// Terminal failure reported by a metadata or archive provider.
#[derive(Debug, Clone, Error)]
#[error("`{package}`: {message}")]
pub struct ProviderError {
	pub package: String,
	pub message: String,
}

impl ProviderError {
	pub fn new(package: impl Into<String>, message: impl Into<String>) -> Self {
		Self {
			package: package.into(),
			message: message.into(),
		}
	}
}
