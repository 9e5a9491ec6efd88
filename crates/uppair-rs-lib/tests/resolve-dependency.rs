use uppair_rs::config::{PlanOrdering, UnresolvedPolicy};
use uppair_rs::relationship_resolver::*;
use uppair_rs::{PackageRequest, ResolverOptions};
use uppair_rs_test_utils::*;

fn init_log() {
	let _ = env_logger::builder().is_test(true).try_init();
}

fn plan_summary(resolution: &Resolution) -> Vec<(String, String, usize)> {
	resolution.plan.iter().map(|e| (e.name.clone(), e.version.clone(), e.priority)).collect()
}

#[test]
fn newer_dependency_is_pinned_from_archive() {
	init_log();
	let catalog = catalog_newer_dependency();
	let requests = vec!["A@1.0".parse::<PackageRequest>().unwrap()];

	let resolution = uppair_rs::resolve(&catalog, &catalog, &requests, &ResolverOptions::default()).unwrap();

	assert!(resolution.is_complete());
	assert_eq!(plan_summary(&resolution), vec![
		("B".to_string(), "1.5".to_string(), 1),
		("A".to_string(), "1.0".to_string(), 0),
	]);
}

#[test]
fn missing_exact_version_is_unresolved() {
	init_log();
	let catalog = catalog_missing_version();
	let requests = vec!["X@3.0".parse::<PackageRequest>().unwrap()];

	let resolution = uppair_rs::resolve(&catalog, &catalog, &requests, &ResolverOptions::default()).unwrap();

	assert!(resolution.plan.is_empty());
	assert_eq!(resolution.unresolved, vec![UnresolvedRequest {
		request: PackageRequest::new("X").with_version("3.0"),
		reason: DeterminePackageError::VersionNotFound,
	}]);
	assert_eq!(resolution.unresolved_roots, requests);
}

#[test]
fn diverging_branches_merge_to_earliest() {
	init_log();
	let catalog = catalog_diverging_branches();
	let requests = vec![PackageRequest::new("A"), PackageRequest::new("C")];

	let resolution = uppair_rs::resolve(&catalog, &catalog, &requests, &ResolverOptions::default()).unwrap();

	let b = resolution.plan.get("B").unwrap();
	assert_eq!(b.version, "1.0");
	assert_eq!(b.date, date("2020-01-01"));
	assert_eq!(b.priority, 2);
	assert_eq!(resolution.plan.position("B"), Some(0));
	assert_eq!(plan_summary(&resolution).len(), 4);
}

#[test]
fn failed_dependency_leaves_the_rest() {
	init_log();
	let catalog = catalog_newer_dependency()
		.with_current("D", "1.0", date("2021-01-01"), depends(&["B", "Gone"]));
	let requests = vec![PackageRequest::new("D")];

	let resolution = uppair_rs::resolve(&catalog, &catalog, &requests, &ResolverOptions::default()).unwrap();

	/* B 2.0 and 1.5 are both too new for D */
	let failures: Vec<_> = resolution.unresolved.iter().map(|u| (u.request.name.as_str(), u.reason)).collect();
	assert_eq!(failures, vec![
		("B", DeterminePackageError::DateBoundUnsatisfiable),
		("Gone", DeterminePackageError::PackageNotFound),
	]);
	assert!(resolution.unresolved_roots.is_empty());
	assert_eq!(resolution.plan.len(), 1);
	assert_eq!(resolution.tree[0].children.len(), 0);
}

#[test]
fn dates_never_increase_down_a_branch() {
	init_log();
	let catalog = catalog_diverging_branches();
	let requests = vec![PackageRequest::new("C"), PackageRequest::new("A")];

	let resolution = uppair_rs::resolve(&catalog, &catalog, &requests, &ResolverOptions::default()).unwrap();

	for root in &resolution.tree {
		assert_eq!(root.level, 0);
		for node in root.preorder() {
			for child in &node.children {
				assert!(child.entry.date <= node.entry.date);
				assert_eq!(child.level, node.level + 1);
			}
		}
	}
}

#[test]
fn identical_inputs_give_identical_output() {
	init_log();
	let catalog = catalog_diverging_branches();
	let requests = vec![PackageRequest::new("C"), PackageRequest::new("A"), PackageRequest::new("Nope")];

	let first = uppair_rs::resolve(&catalog, &catalog, &requests, &ResolverOptions::default()).unwrap();
	let second = uppair_rs::resolve(&catalog, &catalog, &requests, &ResolverOptions::default()).unwrap();
	assert_eq!(first.to_json().unwrap(), second.to_json().unwrap());

	let mut uncached = ResolverOptions::default();
	uncached.set_memoize(false);
	let third = uppair_rs::resolve(&catalog, &catalog, &requests, &uncached).unwrap();
	assert_eq!(first, third);
}

#[test]
fn provider_failure_aborts() {
	init_log();
	let provider = FailingProvider::new(catalog_newer_dependency(), "B");
	let requests = vec![PackageRequest::new("A")];

	let result = uppair_rs::resolve(&provider, &provider, &requests, &ResolverOptions::default());
	match result {
		Err(uppair_rs::Error::Provider(e)) => assert_eq!(e.package, "B"),
		other => panic!("expected a provider error, got {:?}", other),
	}
}

#[test]
fn policy_decides_on_partial_plans() {
	init_log();
	let catalog = catalog_newer_dependency()
		.with_current("D", "1.0", date("2021-01-01"), depends(&["Gone"]));

	let resolution = uppair_rs::resolve(&catalog, &catalog, &[PackageRequest::new("A"), PackageRequest::new("D")], &ResolverOptions::default()).unwrap();
	assert!(resolution.installable_plan(UnresolvedPolicy::Proceed).is_ok());
	assert!(resolution.installable_plan(UnresolvedPolicy::HaltOnUnresolvedRoot).is_ok());
	assert!(matches!(
		resolution.installable_plan(UnresolvedPolicy::HaltOnAnyUnresolved),
		Err(uppair_rs::Error::Blocked(names)) if names == vec!["Gone".to_string()]
	));

	let mut installer = RecordingInstaller::default();
	let report = uppair_rs::installer::install(&mut installer, &resolution, UnresolvedPolicy::Proceed).unwrap();
	assert!(report.is_success());
	assert_eq!(installer.installed, vec![
		("B".to_string(), "1.5".to_string()),
		("A".to_string(), "1.0".to_string()),
		("D".to_string(), "1.0".to_string()),
	]);
}

#[test]
fn topological_order_keeps_dependencies_first() {
	init_log();
	let catalog = catalog_diverging_branches();
	let mut options = ResolverOptions::default();
	options.set_ordering(PlanOrdering::Topological);

	let resolution = uppair_rs::resolve(&catalog, &catalog, &[PackageRequest::new("A"), PackageRequest::new("C")], &options).unwrap();

	let position = |name: &str| resolution.plan.position(name).unwrap();
	assert!(position("B") < position("A"));
	assert!(position("B") < position("X"));
	assert!(position("X") < position("C"));
}
