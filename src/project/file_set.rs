//! In-memory file contents, keyed by path.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;

use super::file_loader::{FileLoader, LoadError};
use crate::base::FileId;

/// A table of file contents that stands in for the filesystem.
///
/// Editors use this for unsaved buffers; tests use it to describe an
/// include graph without touching disk. Paths are normalised the same way
/// [`FileId`] normalises them, so `dir/../a.asm` and `a.asm` share an entry.
#[derive(Debug, Default)]
pub struct FileSet {
    inner: RwLock<IndexMap<PathBuf, Arc<str>>>,
}

impl FileSet {
    /// Create a new empty file set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the contents of a file, returning its id.
    pub fn insert(&self, path: impl AsRef<Path>, contents: impl Into<Arc<str>>) -> FileId {
        let file = FileId::new(path);
        self.inner
            .write()
            .insert(file.path().to_owned(), contents.into());
        file
    }

    /// Builder-style [`FileSet::insert`].
    pub fn with_file(self, path: impl AsRef<Path>, contents: impl Into<Arc<str>>) -> Self {
        self.insert(path, contents);
        self
    }

    /// Get the contents of a file.
    pub fn contents(&self, path: impl AsRef<Path>) -> Option<Arc<str>> {
        let file = FileId::new(path);
        self.inner.read().get(file.path()).cloned()
    }

    /// Remove a file from the set.
    pub fn remove(&self, path: impl AsRef<Path>) -> Option<Arc<str>> {
        let file = FileId::new(path);
        self.inner.write().shift_remove(file.path())
    }

    /// Get the number of files.
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Check if the file set is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All file ids, in insertion order.
    pub fn files(&self) -> Vec<FileId> {
        self.inner.read().keys().map(FileId::new).collect()
    }
}

impl FileLoader for FileSet {
    fn load(&self, path: &Path) -> Result<String, LoadError> {
        self.contents(path)
            .map(|text| text.to_string())
            .ok_or_else(|| LoadError::NotFound(path.to_owned()))
    }
}
