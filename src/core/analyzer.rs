use std::collections::BTreeSet;

use super::classifier::Classifier;
use super::config::ScanConfig;
use super::manifest::Manifest;
use super::reference::{unconstrained, ReferenceManifest};
use super::scanner::{FileScanner, LocalModuleSet};
use crate::error::Result;
use crate::parsers::python::PythonParser;
use crate::parsers::{ImportParser, RawImport};

/// Result of walking and classifying a tree, before reconciliation.
#[derive(Debug, Clone, Default)]
pub struct Discovery {
    pub files_scanned: usize,
    pub raw_imports: Vec<RawImport>,
    pub local_modules: LocalModuleSet,
    pub dependencies: BTreeSet<String>,
}

/// Discovers third-party dependencies and reconciles them against an
/// optional reference manifest.
pub struct DependencyAnalyzer {
    config: ScanConfig,
    parser: Box<dyn ImportParser>,
}

impl DependencyAnalyzer {
    pub fn new(config: ScanConfig) -> Result<Self> {
        Ok(Self {
            config,
            parser: Box::new(PythonParser::new()?),
        })
    }

    /// Scan, parse and classify. Any unparsable file aborts the run.
    pub fn discover(&mut self) -> Result<Discovery> {
        let scanner = FileScanner::new(
            &self.config.path,
            self.config.recursive,
            self.parser.extensions(),
        )?;
        tracing::debug!(
            root = %scanner.root().display(),
            recursive = scanner.is_recursive(),
            "scanning"
        );

        let local_modules = scanner.local_modules()?;

        let mut files_scanned = 0usize;
        let mut raw_imports = Vec::new();
        for file in scanner.source_files() {
            let file = file?;
            let imports = self.parser.parse_file(&file)?;
            files_scanned += 1;

            if imports.is_empty() {
                tracing::info!(file = %file.display(), "no imports declared");
            } else {
                tracing::debug!(file = %file.display(), count = imports.len(), "extracted imports");
            }
            raw_imports.extend(imports);
        }

        let classifier = Classifier::new(&local_modules, &self.config.stdlib);
        let dependencies = classifier.external_dependencies(&raw_imports);

        tracing::info!(
            files = files_scanned,
            imports = raw_imports.len(),
            local_modules = local_modules.len(),
            dependencies = dependencies.len(),
            "discovery complete"
        );

        Ok(Discovery {
            files_scanned,
            raw_imports,
            local_modules,
            dependencies,
        })
    }

    /// Attach constraints from the configured reference, if any.
    pub fn reconcile(&self, dependencies: &BTreeSet<String>) -> Result<Manifest> {
        match &self.config.reference {
            Some(path) => Ok(ReferenceManifest::load(path)?.reconcile(dependencies)),
            None => Ok(unconstrained(dependencies)),
        }
    }

    /// Full pipeline: discover then reconcile.
    pub fn analyze(&mut self) -> Result<Manifest> {
        let discovery = self.discover()?;
        self.reconcile(&discovery.dependencies)
    }
}
