use std::sync::OnceLock;

use regex::Regex;
use serde::{Serialize, Deserialize};

/// The dependency-like fields of a package manifest, entries as they were scraped.
///
/// Entries may carry a parenthesised version requirement such as `Rcpp (>= 1.0.0)`.
/// These requirements are not machine checked, only the names are used.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DependencyFields {
	pub depends: Vec<String>,
	pub imports: Vec<String>,
	pub linking_to: Vec<String>,
}

/// A requirement a release places on the host runtime's version, e.g. `>= 3.5.0`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeConstraint {
	pub operator: String,
	pub version: String,
}

impl std::fmt::Display for RuntimeConstraint {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{} {}", self.operator, self.version)
	}
}

fn entry_regex() -> &'static Regex {
	static RE: OnceLock<Regex> = OnceLock::new();
	RE.get_or_init(|| Regex::new(r"^\s*([^\s(]+)\s*(?:\(\s*([^)]*?)\s*\))?").expect("dependency entry regex is valid"))
}

fn runtime_constraint_regex() -> &'static Regex {
	static RE: OnceLock<Regex> = OnceLock::new();
	/* Two character operators first so `>=` isn't read as `>` */
	RE.get_or_init(|| Regex::new(r"^(>=|<=|≥|≤|=|<|>)\s*(\d+(?:\.\d+)*)").expect("runtime constraint regex is valid"))
}

/// Splits a raw entry into its name and the text of its version requirement, if any.
fn split_entry(entry: &str) -> Option<(&str, Option<&str>)> {
	let captures = entry_regex().captures(entry)?;
	let name = captures.get(1)?.as_str();
	Some((name, captures.get(2).map(|m| m.as_str())))
}

fn split_list(value: &str) -> impl Iterator<Item = String> + '_ {
	value.split(',')
		.map(str::trim)
		.filter(|s| !s.is_empty())
		.map(str::to_owned)
}

impl DependencyFields {
	/// Reads the dependency fields out of a package `DESCRIPTION` file.
	///
	/// Continuation lines (starting with whitespace) are joined onto the field above them.
	pub fn from_description(text: &str) -> Self {
		let mut entries = Vec::<(&str, String)>::new();
		for line in text.lines() {
			if line.starts_with(char::is_whitespace) {
				if let Some((_, value)) = entries.last_mut() {
					value.push(' ');
					value.push_str(line.trim());
				}
			} else if let Some((key, value)) = line.split_once(':') {
				entries.push((key.trim(), value.trim().to_owned()));
			}
		}

		let mut fields = Self::default();
		for (key, value) in entries {
			let target = match key {
				"Depends" => &mut fields.depends,
				"Imports" => &mut fields.imports,
				"LinkingTo" => &mut fields.linking_to,
				_ => continue,
			};
			target.extend(split_list(&value));
		}
		fields
	}

	/// Reduces the raw entries to package names.
	///
	/// Names keep their declared order across Depends, Imports then LinkingTo and only appear once.
	/// An entry naming `runtime_name` is never returned as a package, its requirement
	/// from the Depends field is returned separately instead.
	pub fn normalize(&self, runtime_name: &str) -> (Vec<String>, Option<RuntimeConstraint>) {
		let mut names = Vec::<String>::new();
		let mut runtime_constraint = None;

		for (i, field) in [&self.depends, &self.imports, &self.linking_to].into_iter().enumerate() {
			for entry in field {
				let Some((name, requirement)) = split_entry(entry) else {
					continue;
				};

				if name == runtime_name {
					if i == 0 {
						if let Some(c) = requirement.and_then(|r| runtime_constraint_regex().captures(r)) {
							runtime_constraint = Some(RuntimeConstraint { operator: c[1].to_string(), version: c[2].to_string() });
						}
					}
					continue;
				}

				if !names.iter().any(|n| n == name) {
					names.push(name.to_owned());
				}
			}
		}

		(names, runtime_constraint)
	}
}
