use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failures surfaced by a scan, a reconciliation or an emission.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("path not found: {}", .path.display())]
    PathNotFound { path: PathBuf },

    #[error("permission denied: {}", .path.display())]
    PermissionDenied { path: PathBuf },

    #[error("failed to parse {}:{line}: {message}", .path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("{} already exists (use --force to overwrite)", .path.display())]
    TargetExists { path: PathBuf },

    #[error("not a recognized source file: {}", .path.display())]
    UnsupportedFile { path: PathBuf },

    #[error("failed to initialize parser: {0}")]
    ParserInit(String),

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ScanError {
    /// Classify an I/O failure on `path` into the scan taxonomy.
    pub fn from_io(path: &Path, err: io::Error) -> Self {
        let path = path.to_path_buf();
        match err.kind() {
            io::ErrorKind::NotFound => ScanError::PathNotFound { path },
            io::ErrorKind::PermissionDenied => ScanError::PermissionDenied { path },
            _ => ScanError::Io { path, source: err },
        }
    }

    pub(crate) fn from_walk(root: &Path, err: walkdir::Error) -> Self {
        let path = err
            .path()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| root.to_path_buf());
        match err.into_io_error() {
            Some(io_err) => ScanError::from_io(&path, io_err),
            None => ScanError::Io {
                path,
                source: io::Error::new(io::ErrorKind::Other, "filesystem loop detected"),
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, ScanError>;
