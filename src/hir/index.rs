//! Symbol index: merged definitions across a root file and its includes.
//!
//! # Precedence
//!
//! Resolution is fully deterministic and never reports conflicts:
//!
//! 1. Within one file, the first line defining a name wins.
//! 2. Across files, the first file in traversal order wins. The root file
//!    is always first, followed by its includes depth-first.
//!
//! Later definitions of the same name are shadowed.

use std::path::{Path, PathBuf};

use super::definitions::{DefinitionLocation, DefinitionMap, index_file};
use super::diagnostics::DiagnosticSink;
use super::includes::{FileEntry, IncludeResolver, TraversalContext};
use crate::base::FileId;
use crate::project::FileLoader;
use crate::syntax::{DefinitionKind, LineScanner};

// ============================================================================
// SYMBOL INDEX
// ============================================================================

/// Label and constant definitions visible from one root file.
///
/// Built fresh from a snapshot of file contents and never mutated afterwards.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SymbolIndex {
    labels: DefinitionMap,
    constants: DefinitionMap,
}

impl SymbolIndex {
    /// Create a new empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Index a single file with no includes.
    pub fn from_lines<S: AsRef<str>>(
        scanner: &LineScanner,
        lines: &[S],
        file: Option<&FileId>,
    ) -> Self {
        Self {
            labels: index_file(scanner, DefinitionKind::Label, lines, file),
            constants: index_file(scanner, DefinitionKind::Constant, lines, file),
        }
    }

    /// Merge another file's definitions in, keeping existing ones.
    fn merge_missing(&mut self, other: SymbolIndex) {
        self.labels.merge_missing(other.labels);
        self.constants.merge_missing(other.constants);
    }

    /// Label definitions, in first-seen order.
    pub fn labels(&self) -> &DefinitionMap {
        &self.labels
    }

    /// Constant definitions, in first-seen order.
    pub fn constants(&self) -> &DefinitionMap {
        &self.constants
    }

    /// The definition map for one kind.
    pub fn definitions(&self, kind: DefinitionKind) -> &DefinitionMap {
        match kind {
            DefinitionKind::Label => &self.labels,
            DefinitionKind::Constant => &self.constants,
        }
    }

    /// Look up a name among definitions of one kind.
    pub fn lookup(&self, kind: DefinitionKind, name: &str) -> Option<&DefinitionLocation> {
        self.definitions(kind).get(name)
    }

    /// Look up a name of any kind. Labels take precedence over constants.
    pub fn resolve(&self, name: &str) -> Option<&DefinitionLocation> {
        DefinitionKind::ALL
            .into_iter()
            .find_map(|kind| self.lookup(kind, name))
    }

    /// Total number of definitions across both kinds.
    pub fn len(&self) -> usize {
        self.labels.len() + self.constants.len()
    }

    /// Whether neither kind has any definition.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty() && self.constants.is_empty()
    }
}

// ============================================================================
// BUILDER
// ============================================================================

/// Builds [`SymbolIndex`]es and [`DefinitionMap`]s from a root file.
///
/// Holds configuration only. Every build allocates its own traversal state,
/// so one builder may serve concurrent builds.
#[derive(Clone)]
pub struct IndexBuilder<'a> {
    scanner: &'a LineScanner,
    resolver: IncludeResolver<'a>,
}

impl<'a> IndexBuilder<'a> {
    /// Create a builder with the default grammar, reporting to `tracing`.
    pub fn new(loader: &'a dyn FileLoader) -> Self {
        Self {
            scanner: LineScanner::shared(),
            resolver: IncludeResolver::new(loader),
        }
    }

    /// Use `scanner` for the root and every include.
    pub fn with_scanner(mut self, scanner: &'a LineScanner) -> Self {
        self.scanner = scanner;
        self.resolver = self.resolver.with_scanner(scanner);
        self
    }

    /// Report unreadable includes to `sink` instead of `tracing`.
    pub fn with_sink(mut self, sink: &'a dyn DiagnosticSink) -> Self {
        self.resolver = self.resolver.with_sink(sink);
        self
    }

    /// Fallback directories for relative includes, tried in order.
    pub fn with_include_dirs<I, P>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.resolver = self.resolver.with_include_dirs(dirs);
        self
    }

    /// The scanner used for every file in a build.
    pub fn scanner(&self) -> &'a LineScanner {
        self.scanner
    }

    /// The loader includes are read through.
    pub fn loader(&self) -> &'a dyn FileLoader {
        self.resolver.loader()
    }

    /// Every file entry of a build: the root, then its includes in traversal order.
    ///
    /// With no `base_dir` the root's includes are not followed.
    pub fn file_entries<S: AsRef<str>>(
        &self,
        root_lines: &[S],
        root_file: Option<&FileId>,
        base_dir: Option<&Path>,
    ) -> Vec<FileEntry> {
        let root = FileEntry::new(
            root_file.cloned(),
            root_lines.iter().map(|l| l.as_ref().to_owned()).collect(),
        );
        std::iter::once(root)
            .chain(self.includes(root_lines, root_file, base_dir))
            .collect()
    }

    /// Build the merged definition map for one kind.
    pub fn build_definitions<S: AsRef<str>>(
        &self,
        kind: DefinitionKind,
        root_lines: &[S],
        root_file: Option<&FileId>,
        base_dir: Option<&Path>,
    ) -> DefinitionMap {
        let includes = self.includes(root_lines, root_file, base_dir);

        let mut merged = index_file(self.scanner, kind, root_lines, root_file);
        for entry in &includes {
            merged.merge_missing(index_file(
                self.scanner,
                kind,
                &entry.lines,
                entry.file.as_ref(),
            ));
        }

        tracing::debug!(
            kind = kind.display(),
            files = includes.len() + 1,
            definitions = merged.len(),
            "built definition map"
        );
        merged
    }

    /// Build labels and constants from a single traversal.
    pub fn build_index<S: AsRef<str>>(
        &self,
        root_lines: &[S],
        root_file: Option<&FileId>,
        base_dir: Option<&Path>,
    ) -> SymbolIndex {
        let includes = self.includes(root_lines, root_file, base_dir);

        let mut index = SymbolIndex::from_lines(self.scanner, root_lines, root_file);
        for entry in &includes {
            index.merge_missing(SymbolIndex::from_lines(
                self.scanner,
                &entry.lines,
                entry.file.as_ref(),
            ));
        }

        tracing::debug!(
            files = includes.len() + 1,
            labels = index.labels.len(),
            constants = index.constants.len(),
            "built symbol index"
        );
        index
    }

    /// Build the index for a root entry, resolving includes next to it.
    pub fn build_for_entry(&self, root: &FileEntry) -> SymbolIndex {
        self.build_index(&root.lines, root.file.as_ref(), root.base_dir())
    }

    fn includes<S: AsRef<str>>(
        &self,
        root_lines: &[S],
        root_file: Option<&FileId>,
        base_dir: Option<&Path>,
    ) -> Vec<FileEntry> {
        match base_dir {
            Some(dir) => self.resolver.collect_includes(
                root_lines,
                root_file,
                dir,
                &mut TraversalContext::new(),
            ),
            None => Vec::new(),
        }
    }
}
