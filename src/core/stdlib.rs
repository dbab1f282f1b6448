use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::{Result, ScanError};

const BUNDLED_STDLIB: &str = include_str!("../../resources/python_stdlib.txt");

/// Names that belong to the interpreter's own distribution.
///
/// Read-only once built; a run owns its own copy through `ScanConfig`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandardLibrary {
    modules: HashSet<String>,
}

impl StandardLibrary {
    /// The set bundled with this crate (CPython 3.12).
    pub fn bundled() -> Self {
        Self::parse(BUNDLED_STDLIB)
    }

    /// Load a replacement set, one module name per line, `#` for comments.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|err| ScanError::from_io(path, err))?;
        Ok(Self::parse(&content))
    }

    pub fn parse(content: &str) -> Self {
        let modules = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_string)
            .collect();
        Self { modules }
    }

    pub fn contains(&self, package: &str) -> bool {
        self.modules.contains(package)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl Default for StandardLibrary {
    fn default() -> Self {
        Self::bundled()
    }
}

impl<S: Into<String>> FromIterator<S> for StandardLibrary {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            modules: iter.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_set_covers_common_modules() {
        let stdlib = StandardLibrary::bundled();
        for name in ["os", "sys", "json", "datetime", "collections", "__future__"] {
            assert!(stdlib.contains(name), "{name} should be stdlib");
        }
        assert!(!stdlib.contains("requests"));
        assert!(!stdlib.contains("typing_extensions"));
    }

    #[test]
    fn parse_skips_comments_and_blank_lines() {
        let stdlib = StandardLibrary::parse("# header\n\nos\n  sys  \n");
        assert_eq!(stdlib.len(), 2);
        assert!(!stdlib.is_empty());
        assert!(StandardLibrary::parse("# only comments\n").is_empty());
        assert!(stdlib.contains("sys"));
        assert!(!stdlib.contains("# header"));
    }
}
