use regex::Regex;
use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use super::manifest::{Manifest, Operator, VersionConstraint};
use crate::error::{Result, ScanError};

/// `name`, optionally followed by an operator and a dotted numeric version,
/// then at most an environment marker or a trailing comment. Lines with
/// anything else (extras, pre-releases, wildcards, multiple clauses) do not
/// match and are never truncated into a different pin.
static REQUIREMENT_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^([A-Za-z0-9][A-Za-z0-9._-]*)\s*(?:(==|>=|<=|!=|~=|>|<)\s*([0-9]+(?:\.[0-9]+)*))?\s*(?:[;#].*)?$",
    )
    .expect("requirement pattern is valid")
});

/// Version constraints recorded in a previously written manifest.
#[derive(Debug, Clone, Default)]
pub struct ReferenceManifest {
    constraints: HashMap<String, Option<VersionConstraint>>,
}

impl ReferenceManifest {
    /// Read and parse a reference manifest. A missing file is an error:
    /// reconciliation was asked for and cannot fall back silently.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|err| ScanError::from_io(path, err))?;
        let reference = Self::parse(&content);

        if reference.is_empty() {
            tracing::warn!(
                path = %path.display(),
                "reference manifest has no usable entries; no versions will be pinned"
            );
        } else {
            tracing::debug!(
                path = %path.display(),
                entries = reference.len(),
                "loaded reference manifest"
            );
        }

        Ok(reference)
    }

    /// Lenient parse: blank lines and comments are ignored, lines that do
    /// not look like a requirement are skipped with a warning.
    pub fn parse(content: &str) -> Self {
        let mut constraints = HashMap::new();

        for (index, raw_line) in content.lines().enumerate() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if line.starts_with('-') {
                tracing::debug!(line = index + 1, text = line, "skipping option line");
                continue;
            }

            let Some(caps) = REQUIREMENT_LINE.captures(line) else {
                tracing::warn!(line = index + 1, text = line, "skipping unparsable reference line");
                continue;
            };

            let name = &caps[1];
            let constraint = match (caps.get(2), caps.get(3)) {
                (Some(op), Some(version)) => op
                    .as_str()
                    .parse::<Operator>()
                    .ok()
                    .map(|operator| VersionConstraint::new(operator, version.as_str())),
                _ => None,
            };

            constraints.insert(normalize_name(name), constraint);
        }

        Self { constraints }
    }

    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    pub fn contains(&self, package: &str) -> bool {
        self.constraints.contains_key(&normalize_name(package))
    }

    /// Constraint recorded for `package`, if the reference lists one.
    pub fn constraint_for(&self, package: &str) -> Option<&VersionConstraint> {
        self.constraints
            .get(&normalize_name(package))
            .and_then(Option::as_ref)
    }

    /// Carry constraints forward for every discovered dependency listed in
    /// this reference; everything else stays unconstrained.
    pub fn reconcile(&self, dependencies: &BTreeSet<String>) -> Manifest {
        let mut manifest = Manifest::new();
        for package in dependencies {
            let constraint = self.constraint_for(package).cloned();
            match &constraint {
                Some(constraint) => {
                    tracing::debug!(package = %package, %constraint, "pinned from reference")
                }
                None => tracing::debug!(package = %package, "no pinned version"),
            }
            manifest.insert(package.clone(), constraint);
        }
        manifest
    }
}

/// Manifest with no constraints at all, used when no reference is given.
pub fn unconstrained(dependencies: &BTreeSet<String>) -> Manifest {
    let mut manifest = Manifest::new();
    for package in dependencies {
        manifest.insert(package.clone(), None);
    }
    manifest
}

/// Case-insensitive key with `-`, `_` and `.` treated alike.
fn normalize_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '_' | '.' => '-',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}
