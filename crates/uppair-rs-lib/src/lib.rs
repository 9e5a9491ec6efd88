pub mod error;
pub use error::Result;
pub use error::Error;

pub mod metadb;
pub use metadb::MetadataProvider;
pub use metadb::ArchiveProvider;
pub use metadb::package::PackageRequest;

pub mod config;
pub use config::ResolverOptions;

pub mod relationship_resolver;
pub use relationship_resolver::resolve;
pub use relationship_resolver::Resolution;

pub mod installer;
