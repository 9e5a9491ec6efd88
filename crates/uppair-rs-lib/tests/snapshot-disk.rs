use uppair_rs::config::PlanOrdering;
use uppair_rs::metadb::{CatalogSnapshot, DependencyFields};
use uppair_rs::relationship_resolver::Resolution;
use uppair_rs::{PackageRequest, ResolverOptions};
use uppair_rs_test_utils::*;

#[test]
fn resolve_from_saved_snapshot() {
	let _ = env_logger::builder().is_test(true).try_init();

	let file = write_snapshot(&catalog_newer_dependency()).unwrap();
	let catalog = CatalogSnapshot::load_from_disk(file.path()).unwrap();
	assert_eq!(catalog, catalog_newer_dependency());

	let resolution = uppair_rs::resolve(&catalog, &catalog, &[PackageRequest::new("A")], &ResolverOptions::default()).unwrap();
	assert_eq!(resolution.plan.get("B").unwrap().version, "1.5");
}

#[test]
fn resolution_report_reads_back() {
	let catalog = catalog_diverging_branches();
	let resolution = uppair_rs::resolve(&catalog, &catalog, &[PackageRequest::new("A"), PackageRequest::new("Nope")], &ResolverOptions::default()).unwrap();

	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("resolution.json");
	resolution.save_to_disk(&path).unwrap();

	let read: Resolution = serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
	assert_eq!(read, resolution);
}

#[test]
fn options_read_back() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("options.json");

	let mut options = ResolverOptions::default();
	options.set_ordering(PlanOrdering::Topological);
	options.set_runtime_name("Rcore");
	options.save_to_disk(&path).unwrap();

	let read = ResolverOptions::load_from_disk(&path).unwrap();
	assert_eq!(read, options);
}

#[test]
fn description_fields_drive_resolution() {
	let description = "\
Package: A
Version: 1.0
Depends: R (>= 3.5.0), B
Imports: C,
    B (>= 0.2)
";
	let fields = DependencyFields::from_description(description);
	let catalog = CatalogSnapshot::default()
		.with_current("A", "1.0", date("2021-03-01"), fields)
		.with_current("B", "1.0", date("2020-01-01"), depends(&[]))
		.with_current("C", "1.0", date("2020-01-01"), depends(&[]));

	let resolution = uppair_rs::resolve(&catalog, &catalog, &[PackageRequest::new("A")], &ResolverOptions::default()).unwrap();

	let root = &resolution.tree[0];
	assert_eq!(root.entry.dependency_names, vec!["B", "C"]);
	assert_eq!(root.entry.runtime_constraint.as_ref().unwrap().to_string(), ">= 3.5.0");
	assert!(resolution.plan.get("R").is_none());
}

#[test]
fn missing_snapshot_is_an_io_error() {
	let dir = tempfile::tempdir().unwrap();
	let result = CatalogSnapshot::load_from_disk(dir.path().join("absent.json"));
	assert!(matches!(result, Err(uppair_rs::Error::IO(_))));
}
