use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use super::config::EmitOptions;
use super::manifest::Manifest;
use crate::error::{Result, ScanError};
use crate::formatters::ManifestFormatter;

/// What an emission did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Emission {
    /// Manifest persisted at the given path.
    Written(PathBuf),
    /// Dry run: the exact text that would have been written.
    Previewed(String),
}

pub struct ManifestEmitter {
    options: EmitOptions,
}

impl ManifestEmitter {
    pub fn new(options: EmitOptions) -> Self {
        Self { options }
    }

    /// Render `manifest` and either preview it or write it in one step.
    ///
    /// An existing target is left untouched unless overwrite is set.
    pub fn emit(&self, manifest: &Manifest, formatter: &dyn ManifestFormatter) -> Result<Emission> {
        let rendered = formatter.render(manifest);

        if self.options.dry_run {
            tracing::debug!(
                target_path = %self.options.target.display(),
                entries = manifest.len(),
                "dry run, nothing written"
            );
            return Ok(Emission::Previewed(rendered));
        }

        let target = &self.options.target;
        if !self.options.overwrite && target.exists() {
            return Err(ScanError::TargetExists {
                path: target.clone(),
            });
        }

        self.write_atomic(target, rendered.as_bytes())?;
        tracing::info!(
            target_path = %target.display(),
            entries = manifest.len(),
            "manifest written"
        );
        Ok(Emission::Written(target.clone()))
    }

    fn write_atomic(&self, target: &Path, contents: &[u8]) -> Result<()> {
        let dir = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut staged = NamedTempFile::new_in(dir).map_err(|err| ScanError::from_io(dir, err))?;
        staged
            .write_all(contents)
            .and_then(|()| staged.as_file().sync_all())
            .map_err(|err| ScanError::from_io(staged.path(), err))?;

        let persisted = if self.options.overwrite {
            staged.persist(target)
        } else {
            staged.persist_noclobber(target)
        };

        persisted.map(|_| ()).map_err(|err| {
            if err.error.kind() == io::ErrorKind::AlreadyExists {
                ScanError::TargetExists {
                    path: target.to_path_buf(),
                }
            } else {
                ScanError::from_io(target, err.error)
            }
        })
    }
}
