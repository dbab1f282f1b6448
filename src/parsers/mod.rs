pub mod common;
pub mod python;

use std::path::Path;

use crate::error::Result;

/// One binding introduced by an import declaration, kept verbatim.
///
/// `module` is the dotted module path as written (relative imports keep
/// their leading dots); `alias` is the `as` name when one is given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawImport {
    pub module: String,
    pub alias: Option<String>,
    pub line: usize,
}

impl RawImport {
    pub fn new(module: impl Into<String>, alias: Option<String>, line: usize) -> Self {
        Self {
            module: module.into(),
            alias,
            line,
        }
    }

    pub fn is_relative(&self) -> bool {
        self.module.starts_with('.')
    }

    /// First dotted segment of the module path, `None` for relative imports.
    pub fn package_name(&self) -> Option<&str> {
        if self.is_relative() {
            return None;
        }
        self.module
            .split('.')
            .next()
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
    }
}

pub trait ImportParser {
    /// Extract every declared import from the file at `file_path`.
    fn parse_file(&mut self, file_path: &Path) -> Result<Vec<RawImport>>;

    /// Extract every declared import from already loaded source text.
    fn parse_source(&mut self, source: &str, file_path: &Path) -> Result<Vec<RawImport>>;

    /// File extensions (without the dot) this parser understands.
    fn extensions(&self) -> &'static [&'static str];
}
