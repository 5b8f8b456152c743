//! Reading source files by resolved path.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::base::split_lines;

/// Error raised when a file cannot be read.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl LoadError {
    /// Classify an I/O error for `path`.
    pub fn from_io(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            LoadError::NotFound(path.to_owned())
        } else {
            LoadError::Io {
                path: path.to_owned(),
                source,
            }
        }
    }

    /// The path that failed to load.
    pub fn path(&self) -> &Path {
        match self {
            LoadError::NotFound(path) => path,
            LoadError::Io { path, .. } => path,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, LoadError::NotFound(_))
    }
}

/// Source of file contents, keyed by resolved path.
///
/// Implementations must be safe to share between concurrent index builds.
pub trait FileLoader: Send + Sync {
    /// Read the full text of a file.
    fn load(&self, path: &Path) -> Result<String, LoadError>;

    /// Read a file as lines, splitting on any line-ending convention.
    fn load_lines(&self, path: &Path) -> Result<Vec<String>, LoadError> {
        self.load(path).map(|text| split_lines(&text))
    }
}

/// Loads files from the local filesystem.
///
/// Invalid UTF-8 is replaced with U+FFFD rather than failing the read.
#[derive(Clone, Copy, Debug, Default)]
pub struct DiskLoader;

impl DiskLoader {
    pub fn new() -> Self {
        Self
    }
}

impl FileLoader for DiskLoader {
    fn load(&self, path: &Path) -> Result<String, LoadError> {
        let bytes = std::fs::read(path).map_err(|e| LoadError::from_io(path, e))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

impl<L: FileLoader + ?Sized> FileLoader for &L {
    fn load(&self, path: &Path) -> Result<String, LoadError> {
        (**self).load(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_disk_loader_reads_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "start:\r\n  nop\n").unwrap();

        let lines = DiskLoader::new().load_lines(file.path()).unwrap();
        assert_eq!(lines, vec!["start:", "  nop", ""]);
    }

    #[test]
    fn test_disk_loader_tolerates_invalid_utf8() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"; caf\xe9 latin-1 comment\nPORT EQU 1\n").unwrap();

        let lines = DiskLoader::new().load_lines(file.path()).unwrap();
        assert_eq!(lines[0], "; caf\u{FFFD} latin-1 comment");
        assert_eq!(lines[1], "PORT EQU 1");
    }

    #[test]
    fn test_disk_loader_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.asm");

        let err = DiskLoader::new().load(&missing).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.path(), missing.as_path());
        assert!(err.to_string().contains("missing.asm"));
    }

    #[test]
    fn test_disk_loader_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();

        let err = DiskLoader::new().load(dir.path()).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
