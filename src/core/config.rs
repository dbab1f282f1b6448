use std::path::{Path, PathBuf};

use super::stdlib::StandardLibrary;

pub const DEFAULT_MANIFEST_NAME: &str = "requirements.txt";

/// Everything a discovery run needs, passed in explicitly.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Directory or single source file to scan
    pub path: PathBuf,
    /// Descend into subdirectories
    pub recursive: bool,
    /// Prior manifest whose version constraints are carried forward
    pub reference: Option<PathBuf>,
    pub stdlib: StandardLibrary,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("."),
            recursive: true,
            reference: None,
            stdlib: StandardLibrary::bundled(),
        }
    }
}

impl ScanConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    pub fn with_reference(mut self, reference: impl Into<PathBuf>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    pub fn with_stdlib(mut self, stdlib: StandardLibrary) -> Self {
        self.stdlib = stdlib;
        self
    }

    /// Directory the project lives in: the path itself, or the parent of a
    /// single file.
    pub fn project_dir(&self) -> PathBuf {
        if self.path.is_file() {
            match self.path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
                _ => PathBuf::from("."),
            }
        } else {
            self.path.clone()
        }
    }
}

/// Where and how the manifest is emitted.
#[derive(Debug, Clone)]
pub struct EmitOptions {
    pub target: PathBuf,
    pub overwrite: bool,
    pub dry_run: bool,
}

impl EmitOptions {
    pub fn new(target: impl Into<PathBuf>) -> Self {
        Self {
            target: target.into(),
            overwrite: false,
            dry_run: false,
        }
    }

    /// `requirements.txt` inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(DEFAULT_MANIFEST_NAME))
    }

    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// Diagnostic threshold; affects log output only, never discovery.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
}

impl Verbosity {
    pub fn from_flags(quiet: bool, verbose: bool) -> Self {
        match (quiet, verbose) {
            (true, _) => Verbosity::Quiet,
            (false, true) => Verbosity::Verbose,
            (false, false) => Verbosity::Normal,
        }
    }

    /// Filter directive for this crate's diagnostics.
    pub fn directive(self) -> &'static str {
        match self {
            Verbosity::Quiet => "error",
            Verbosity::Normal => "info",
            Verbosity::Verbose => "debug",
        }
    }
}
