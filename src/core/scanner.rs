use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, FilterEntry, WalkDir};

use crate::error::{Result, ScanError};

/// Directory names that never hold project code.
const EXCLUDED_DIRS: &[&str] = &[
    "__pycache__",
    "venv",
    "env",
    "site-packages",
    "node_modules",
];

/// Names of modules and packages that live inside the scanned tree.
pub type LocalModuleSet = BTreeSet<String>;

type Walk = FilterEntry<walkdir::IntoIter, fn(&DirEntry) -> bool>;

/// Enumerates source files under a root, either the whole tree or only
/// the immediate directory.
pub struct FileScanner {
    root: PathBuf,
    single_file: Option<PathBuf>,
    recursive: bool,
    extensions: &'static [&'static str],
}

impl FileScanner {
    /// `path` may be a directory or a single source file. A single file
    /// restricts local module discovery to its own directory.
    pub fn new(path: &Path, recursive: bool, extensions: &'static [&'static str]) -> Result<Self> {
        let metadata = fs::metadata(path).map_err(|err| ScanError::from_io(path, err))?;

        if metadata.is_dir() {
            fs::read_dir(path).map_err(|err| ScanError::from_io(path, err))?;
            return Ok(Self {
                root: path.to_path_buf(),
                single_file: None,
                recursive,
                extensions,
            });
        }

        if !has_extension(path, extensions) {
            return Err(ScanError::UnsupportedFile {
                path: path.to_path_buf(),
            });
        }

        let root = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        Ok(Self {
            root,
            single_file: Some(path.to_path_buf()),
            recursive: false,
            extensions,
        })
    }

    /// Directory the scan is anchored at.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn is_recursive(&self) -> bool {
        self.recursive
    }

    /// Lazily yield every source file, in file-name order per directory.
    pub fn source_files(&self) -> SourceFiles {
        match &self.single_file {
            Some(file) => SourceFiles {
                root: self.root.clone(),
                walk: None,
                single: Some(file.clone()),
                extensions: self.extensions,
            },
            None => SourceFiles {
                root: self.root.clone(),
                walk: Some(self.walker()),
                single: None,
                extensions: self.extensions,
            },
        }
    }

    /// Directory names and source file stems at the same depth the file
    /// enumeration reaches.
    pub fn local_modules(&self) -> Result<LocalModuleSet> {
        let mut modules = LocalModuleSet::new();

        let mut walk = self.walk_dir().into_iter();
        while let Some(entry) = walk.next() {
            let entry = entry.map_err(|err| ScanError::from_walk(&self.root, err))?;
            let file_type = entry.file_type();
            let name = entry.file_name().to_str();

            if !is_scannable(&entry) {
                // An excluded directory's contents are skipped, but its name
                // may still be a package the project imports.
                if file_type.is_dir() {
                    if let Some(name) = name.filter(|n| !n.starts_with('.')) {
                        modules.insert(name.to_string());
                    }
                    walk.skip_current_dir();
                }
                continue;
            }

            if file_type.is_dir() {
                if let Some(name) = name {
                    modules.insert(name.to_string());
                }
            } else if file_type.is_file() && has_extension(entry.path(), self.extensions) {
                if let Some(stem) = entry.path().file_stem().and_then(|s| s.to_str()) {
                    modules.insert(stem.to_string());
                }
            }
        }

        tracing::debug!(
            root = %self.root.display(),
            count = modules.len(),
            "collected local module names"
        );

        Ok(modules)
    }

    fn walk_dir(&self) -> WalkDir {
        let walk = WalkDir::new(&self.root)
            .min_depth(1)
            .follow_links(false)
            .sort_by_file_name();
        if self.recursive {
            walk
        } else {
            walk.max_depth(1)
        }
    }

    fn walker(&self) -> Walk {
        self.walk_dir()
            .into_iter()
            .filter_entry(is_scannable as fn(&DirEntry) -> bool)
    }
}

/// Lazy, finite, single-pass sequence of source file paths.
pub struct SourceFiles {
    root: PathBuf,
    walk: Option<Walk>,
    single: Option<PathBuf>,
    extensions: &'static [&'static str],
}

impl Iterator for SourceFiles {
    type Item = Result<PathBuf>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(file) = self.single.take() {
            return Some(Ok(file));
        }

        let extensions = self.extensions;
        let walk = self.walk.as_mut()?;
        let next = walk.find_map(|entry| match entry {
            Ok(entry) if entry.file_type().is_file() && has_extension(entry.path(), extensions) => {
                Some(Ok(entry.into_path()))
            }
            Ok(_) => None,
            Err(err) => Some(Err(err)),
        });

        match next {
            Some(Ok(path)) => Some(Ok(path)),
            Some(Err(err)) => {
                // The walk is abandoned after the first failure.
                self.walk = None;
                Some(Err(ScanError::from_walk(&self.root, err)))
            }
            None => {
                self.walk = None;
                None
            }
        }
    }
}

fn is_scannable(entry: &DirEntry) -> bool {
    let Some(name) = entry.file_name().to_str() else {
        return false;
    };
    if name.starts_with('.') {
        return false;
    }
    !(entry.file_type().is_dir() && EXCLUDED_DIRS.contains(&name))
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.contains(&ext))
}
