//! File identifiers for tracking source files.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use path_clean::PathClean;

/// An identifier for a source file.
///
/// `FileId` wraps the file's normalised path behind an `Arc`, so it is cheap
/// to clone and compare. Two ids are equal exactly when their paths are.
///
/// Paths are made absolute against the current directory and cleaned
/// lexically on construction (`a/./b/../c` becomes `a/c`), which keeps one id
/// per file however the path is spelled.
#[derive(Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct FileId(Arc<Path>);

impl FileId {
    /// Create a new FileId from a path.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_owned());
        Self(Arc::from(absolute.clean()))
    }

    /// Get the path this id stands for.
    #[inline]
    pub fn path(&self) -> &Path {
        &self.0
    }

    /// The directory containing this file, used as the base for relative includes.
    ///
    /// `None` only for a filesystem root.
    pub fn parent_dir(&self) -> Option<&Path> {
        self.0.parent().filter(|dir| !dir.as_os_str().is_empty())
    }
}

impl fmt::Debug for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FileId({})", self.0.display())
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

impl From<&Path> for FileId {
    #[inline]
    fn from(path: &Path) -> Self {
        Self::new(path)
    }
}

impl From<PathBuf> for FileId {
    #[inline]
    fn from(path: PathBuf) -> Self {
        Self::new(path)
    }
}

impl From<&str> for FileId {
    #[inline]
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl AsRef<Path> for FileId {
    fn as_ref(&self) -> &Path {
        self.path()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_id_equality() {
        let a = FileId::new("/src/main.asm");
        let b = FileId::new("/src/main.asm");
        let c = FileId::new("/src/other.asm");

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_file_id_hash() {
        use std::collections::HashSet;

        let mut set = HashSet::new();
        set.insert(FileId::new("/a.asm"));
        set.insert(FileId::new("/b.asm"));
        set.insert(FileId::new("/a.asm")); // duplicate

        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_file_id_normalises_path() {
        let a = FileId::new("/src/lib/../main.asm");
        let b = FileId::new("/src/./main.asm");

        assert_eq!(a, b);
        assert_eq!(a.path(), Path::new("/src/main.asm"));
    }

    #[test]
    fn test_file_id_parent_dir() {
        assert_eq!(
            FileId::new("/src/main.asm").parent_dir(),
            Some(Path::new("/src"))
        );
        assert_eq!(FileId::new("/").parent_dir(), None);
    }

    #[test]
    fn test_relative_path_is_made_absolute() {
        let cwd = std::env::current_dir().unwrap().clean();
        let relative = FileId::new("main.asm");

        assert!(relative.path().is_absolute());
        assert_eq!(relative.parent_dir(), Some(cwd.as_path()));
        assert_eq!(relative, FileId::new(cwd.join("main.asm")));
        assert_eq!(FileId::new("lib/../main.asm"), relative);
    }
}
