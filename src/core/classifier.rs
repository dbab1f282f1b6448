use std::collections::BTreeSet;

use super::scanner::LocalModuleSet;
use super::stdlib::StandardLibrary;
use crate::parsers::RawImport;

/// Where an import resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImportKind {
    /// `from . import x` and friends
    Relative,
    /// Module or package inside the scanned tree
    Local,
    Stdlib,
    External,
}

/// Reduces raw imports to the set of third-party package names.
///
/// Local modules win over everything else, then the standard library.
pub struct Classifier<'a> {
    local_modules: &'a LocalModuleSet,
    stdlib: &'a StandardLibrary,
}

impl<'a> Classifier<'a> {
    pub fn new(local_modules: &'a LocalModuleSet, stdlib: &'a StandardLibrary) -> Self {
        Self {
            local_modules,
            stdlib,
        }
    }

    pub fn classify(&self, import: &RawImport) -> ImportKind {
        match import.package_name() {
            None => ImportKind::Relative,
            Some(package) => self.classify_package(package),
        }
    }

    pub fn classify_package(&self, package: &str) -> ImportKind {
        if self.local_modules.contains(package) {
            ImportKind::Local
        } else if self.stdlib.contains(package) {
            ImportKind::Stdlib
        } else {
            ImportKind::External
        }
    }

    /// Deduplicated top-level names minus local and standard-library names.
    pub fn external_dependencies<'i, I>(&self, imports: I) -> BTreeSet<String>
    where
        I: IntoIterator<Item = &'i RawImport>,
    {
        let packages: BTreeSet<&str> = imports
            .into_iter()
            .filter_map(RawImport::package_name)
            .collect();

        packages
            .into_iter()
            .filter(|package| {
                let kind = self.classify_package(package);
                if kind != ImportKind::External {
                    tracing::debug!(package, ?kind, "excluded from dependencies");
                }
                kind == ImportKind::External
            })
            .map(str::to_string)
            .collect()
    }
}
