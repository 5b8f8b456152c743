//! Include resolution: walking the include graph of a root file.
//!
//! Traversal is depth-first in the order directives appear. A
//! [`TraversalContext`] carries the visited set through the whole walk, so a
//! file reached from two places is loaded and emitted once, at its first
//! discovery, and cycles terminate.

use std::path::{Path, PathBuf};

use rustc_hash::FxHashSet;

use super::diagnostics::{DiagnosticSink, IncludeDiagnostic, TracingSink};
use crate::base::{FileId, split_lines};
use crate::project::{FileLoader, LoadError};
use crate::syntax::LineScanner;

/// One loaded file's content at the moment it was read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileEntry {
    /// The file's identity. `None` only for an anonymous root.
    pub file: Option<FileId>,
    /// Content split into lines, terminators removed.
    pub lines: Vec<String>,
}

impl FileEntry {
    /// Create an entry from already-split lines.
    pub fn new(file: Option<FileId>, lines: Vec<String>) -> Self {
        Self { file, lines }
    }

    /// Build an entry by splitting `text` on any line ending.
    pub fn from_text(file: Option<FileId>, text: &str) -> Self {
        Self::new(file, split_lines(text))
    }

    /// Directory of the file, used to resolve its relative includes.
    pub fn base_dir(&self) -> Option<&Path> {
        self.file.as_ref().and_then(FileId::parent_dir)
    }
}

/// Visited-file set for a single traversal.
#[derive(Clone, Debug, Default)]
pub struct TraversalContext {
    visited: FxHashSet<FileId>,
}

impl TraversalContext {
    /// Create a context with nothing visited.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `file` has already been loaded in this traversal.
    pub fn is_visited(&self, file: &FileId) -> bool {
        self.visited.contains(file)
    }

    /// Mark a file visited. Returns `false` if it already was.
    pub fn mark_visited(&mut self, file: FileId) -> bool {
        self.visited.insert(file)
    }

    /// Number of files loaded so far.
    pub fn len(&self) -> usize {
        self.visited.len()
    }

    /// Whether no file has been loaded yet.
    pub fn is_empty(&self) -> bool {
        self.visited.is_empty()
    }
}

/// Resolves include directives and loads their targets.
#[derive(Clone)]
pub struct IncludeResolver<'a> {
    scanner: &'a LineScanner,
    loader: &'a dyn FileLoader,
    sink: &'a dyn DiagnosticSink,
    include_dirs: Vec<PathBuf>,
}

impl<'a> IncludeResolver<'a> {
    /// Create a resolver with the default grammar, reporting to `tracing`.
    pub fn new(loader: &'a dyn FileLoader) -> Self {
        Self {
            scanner: LineScanner::shared(),
            loader,
            sink: &TracingSink,
            include_dirs: Vec::new(),
        }
    }

    /// Recognise include directives with `scanner`.
    pub fn with_scanner(mut self, scanner: &'a LineScanner) -> Self {
        self.scanner = scanner;
        self
    }

    /// The loader every include is read through.
    pub fn loader(&self) -> &'a dyn FileLoader {
        self.loader
    }

    /// Report unreadable includes to `sink`.
    pub fn with_sink(mut self, sink: &'a dyn DiagnosticSink) -> Self {
        self.sink = sink;
        self
    }

    /// Directories searched, in order, when a relative include cannot be
    /// read next to the including file.
    pub fn with_include_dirs<I, P>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.include_dirs = dirs.into_iter().map(Into::into).collect();
        self
    }

    /// Collect every file reachable from `lines`, depth-first.
    ///
    /// `includer` names the file `lines` came from, for diagnostics only.
    /// `base_dir` is the directory relative includes are resolved against.
    pub fn collect_includes<S: AsRef<str>>(
        &self,
        lines: &[S],
        includer: Option<&FileId>,
        base_dir: &Path,
        ctx: &mut TraversalContext,
    ) -> Vec<FileEntry> {
        let mut entries = Vec::new();
        self.walk(lines, includer, base_dir, ctx, &mut entries);
        entries
    }

    fn walk<S: AsRef<str>>(
        &self,
        lines: &[S],
        includer: Option<&FileId>,
        base_dir: &Path,
        ctx: &mut TraversalContext,
        out: &mut Vec<FileEntry>,
    ) {
        for (line_no, line) in lines.iter().enumerate() {
            let Some(raw) = self.scanner.include_path(line.as_ref()) else {
                continue;
            };
            let Some((file, included)) =
                self.load_include(raw, includer, line_no as u32, base_dir, ctx)
            else {
                continue;
            };

            // Push first so the entry precedes everything it includes.
            let index = out.len();
            out.push(FileEntry::new(Some(file.clone()), Vec::new()));
            let dir = file.parent_dir().unwrap_or(base_dir).to_owned();
            self.walk(&included, Some(&file), &dir, ctx, out);
            out[index].lines = included;
        }
    }

    /// Resolve and load one include. `None` when skipped or unreadable.
    fn load_include(
        &self,
        raw: &str,
        includer: Option<&FileId>,
        line: u32,
        base_dir: &Path,
        ctx: &mut TraversalContext,
    ) -> Option<(FileId, Vec<String>)> {
        let mut first_error: Option<LoadError> = None;

        for candidate in self.candidates(raw, base_dir) {
            let file = FileId::new(&candidate);
            if ctx.is_visited(&file) {
                tracing::trace!(path = %file, "include already loaded, skipping");
                return None;
            }

            match self.loader.load_lines(file.path()) {
                Ok(lines) => {
                    ctx.mark_visited(file.clone());
                    return Some((file, lines));
                }
                Err(error) if error.is_not_found() => {
                    first_error.get_or_insert(error);
                }
                Err(error) => {
                    self.report(includer, line, file.path(), error);
                    return None;
                }
            }
        }

        if let Some(error) = first_error {
            let path = error.path().to_owned();
            self.report(includer, line, &path, error);
        }
        None
    }

    /// Paths to try for an include, in order. Absolute paths are used as-is.
    fn candidates(&self, raw: &str, base_dir: &Path) -> Vec<PathBuf> {
        let raw = Path::new(raw);
        if raw.is_absolute() {
            return vec![raw.to_owned()];
        }

        std::iter::once(base_dir)
            .chain(self.include_dirs.iter().map(PathBuf::as_path))
            .map(|dir| dir.join(raw))
            .collect()
    }

    fn report(&self, includer: Option<&FileId>, line: u32, path: &Path, error: LoadError) {
        self.sink.report(IncludeDiagnostic {
            includer: includer.cloned(),
            line,
            path: path.to_owned(),
            error,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hir::DiagnosticCollector;
    use crate::project::FileSet;

    fn paths(entries: &[FileEntry]) -> Vec<&Path> {
        entries
            .iter()
            .filter_map(|e| e.file.as_ref().map(FileId::path))
            .collect()
    }

    #[test]
    fn test_collect_depth_first_in_source_order() {
        let files = FileSet::new()
            .with_file("/p/a.asm", "#include \"b.asm\"\na:")
            .with_file("/p/b.asm", "b:")
            .with_file("/p/c.asm", "c:");
        let resolver = IncludeResolver::new(&files);

        let root = ["#include \"a.asm\"", "#include <c.asm>"];
        let entries =
            resolver.collect_includes(&root, None, Path::new("/p"), &mut TraversalContext::new());

        assert_eq!(
            paths(&entries),
            vec![
                Path::new("/p/a.asm"),
                Path::new("/p/b.asm"),
                Path::new("/p/c.asm")
            ]
        );
        assert_eq!(entries[0].lines, vec!["#include \"b.asm\"", "a:"]);
    }

    #[test]
    fn test_relative_to_including_file() {
        let files = FileSet::new()
            .with_file("/p/lib/io.asm", "#include \"util.asm\"")
            .with_file("/p/lib/util.asm", "util:");
        let resolver = IncludeResolver::new(&files);

        let entries = resolver.collect_includes(
            &["#include \"lib/io.asm\""],
            None,
            Path::new("/p"),
            &mut TraversalContext::new(),
        );

        assert_eq!(
            paths(&entries),
            vec![Path::new("/p/lib/io.asm"), Path::new("/p/lib/util.asm")]
        );
    }

    #[test]
    fn test_cycle_terminates() {
        let files = FileSet::new()
            .with_file("/p/a.asm", "#include \"b.asm\"")
            .with_file("/p/b.asm", "#include \"a.asm\"");
        let resolver = IncludeResolver::new(&files);

        let entries = resolver.collect_includes(
            &["#include \"b.asm\""],
            Some(&FileId::new("/p/a.asm")),
            Path::new("/p"),
            &mut TraversalContext::new(),
        );

        assert_eq!(
            paths(&entries),
            vec![Path::new("/p/b.asm"), Path::new("/p/a.asm")]
        );
    }

    #[test]
    fn test_cycle_through_parent_dir_terminates() {
        let files = FileSet::new().with_file("/p/sub/a.asm", "#include \"../sub/a.asm\"");
        let resolver = IncludeResolver::new(&files);

        let entries = resolver.collect_includes(
            &["#include \"sub/a.asm\""],
            None,
            Path::new("/p"),
            &mut TraversalContext::new(),
        );

        assert_eq!(paths(&entries), vec![Path::new("/p/sub/a.asm")]);
    }

    #[test]
    fn test_duplicate_include_emitted_once() {
        let files = FileSet::new()
            .with_file("/p/a.asm", "#include \"common.asm\"")
            .with_file("/p/common.asm", "common:");
        let resolver = IncludeResolver::new(&files);

        let root = ["#include \"a.asm\"", "#include \"common.asm\""];
        let mut ctx = TraversalContext::new();
        let entries = resolver.collect_includes(&root, None, Path::new("/p"), &mut ctx);

        assert_eq!(
            paths(&entries),
            vec![Path::new("/p/a.asm"), Path::new("/p/common.asm")]
        );
        assert_eq!(ctx.len(), 2);
    }

    #[test]
    fn test_missing_include_reported_and_skipped() {
        let files = FileSet::new().with_file("/p/ok.asm", "ok:");
        let collector = DiagnosticCollector::new();
        let resolver = IncludeResolver::new(&files).with_sink(&collector);

        let root = ["#include \"missing.asm\"", "#include \"ok.asm\""];
        let entries = resolver.collect_includes(
            &root,
            Some(&FileId::new("/p/main.asm")),
            Path::new("/p"),
            &mut TraversalContext::new(),
        );

        assert_eq!(paths(&entries), vec![Path::new("/p/ok.asm")]);
        let diagnostics = collector.take();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].path, PathBuf::from("/p/missing.asm"));
        assert_eq!(diagnostics[0].line, 0);
        assert_eq!(diagnostics[0].includer, Some(FileId::new("/p/main.asm")));
    }

    #[test]
    fn test_absolute_include_used_as_is() {
        let files = FileSet::new().with_file("/lib/abs.asm", "abs:");
        let resolver = IncludeResolver::new(&files);

        let entries = resolver.collect_includes(
            &["#include \"/lib/abs.asm\""],
            None,
            Path::new("/elsewhere"),
            &mut TraversalContext::new(),
        );

        assert_eq!(paths(&entries), vec![Path::new("/lib/abs.asm")]);
    }

    #[test]
    fn test_include_dirs_searched_in_order() {
        let files = FileSet::new()
            .with_file("/sys/one/macros.asm", "one:")
            .with_file("/sys/two/macros.asm", "two:");
        let collector = DiagnosticCollector::new();
        let resolver = IncludeResolver::new(&files)
            .with_sink(&collector)
            .with_include_dirs(["/sys/one", "/sys/two"]);

        let entries = resolver.collect_includes(
            &["#include <macros.asm>"],
            None,
            Path::new("/p"),
            &mut TraversalContext::new(),
        );

        assert_eq!(paths(&entries), vec![Path::new("/sys/one/macros.asm")]);
        assert!(collector.is_empty());
    }

    #[test]
    fn test_include_dirs_exhausted_reports_primary_path() {
        let files = FileSet::new();
        let collector = DiagnosticCollector::new();
        let resolver = IncludeResolver::new(&files)
            .with_sink(&collector)
            .with_include_dirs(["/sys"]);

        let entries = resolver.collect_includes(
            &["#include nowhere.asm"],
            None,
            Path::new("/p"),
            &mut TraversalContext::new(),
        );

        assert!(entries.is_empty());
        assert_eq!(collector.paths(), vec![PathBuf::from("/p/nowhere.asm")]);
    }
}
