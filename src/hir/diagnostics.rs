//! Diagnostics: non-fatal problems found while walking includes.
//!
//! Unreadable include targets are the only diagnostics this crate raises.
//! They are handed to a [`DiagnosticSink`] and never abort a build.

use std::fmt;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use crate::base::FileId;
use crate::project::LoadError;

// ============================================================================
// DIAGNOSTIC CODES
// ============================================================================

/// Standard diagnostic codes.
pub mod codes {
    /// Include target could not be read.
    pub const UNREADABLE_INCLUDE: &str = "W0101";
}

// ============================================================================
// DIAGNOSTIC TYPES
// ============================================================================

/// An include directive whose target could not be loaded.
#[derive(Debug)]
pub struct IncludeDiagnostic {
    /// The file containing the directive, if known.
    pub includer: Option<FileId>,
    /// 0-indexed line of the directive within the includer.
    pub line: u32,
    /// The resolved path that failed to load.
    pub path: PathBuf,
    /// The underlying cause.
    pub error: LoadError,
}

impl IncludeDiagnostic {
    /// Diagnostic code.
    pub fn code(&self) -> &'static str {
        codes::UNREADABLE_INCLUDE
    }

    /// The resolved path that failed to load.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl fmt::Display for IncludeDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "failed to load include file {}: {}",
            self.path.display(),
            self.error
        )
    }
}

// ============================================================================
// SINKS
// ============================================================================

/// Receives non-fatal diagnostics during a build.
pub trait DiagnosticSink: Send + Sync {
    fn report(&self, diagnostic: IncludeDiagnostic);
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &S {
    fn report(&self, diagnostic: IncludeDiagnostic) {
        (**self).report(diagnostic)
    }
}

/// Forwards diagnostics to `tracing` at `warn` level.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, diagnostic: IncludeDiagnostic) {
        tracing::warn!(
            code = diagnostic.code(),
            path = %diagnostic.path.display(),
            includer = ?diagnostic.includer,
            line = diagnostic.line,
            error = %diagnostic.error,
            "failed to load include file"
        );
    }
}

/// Collects diagnostics for later inspection.
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Mutex<Vec<IncludeDiagnostic>>,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of collected diagnostics.
    pub fn len(&self) -> usize {
        self.diagnostics.lock().len()
    }

    /// Check whether nothing was reported.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Paths of every failed include, in report order.
    pub fn paths(&self) -> Vec<PathBuf> {
        self.diagnostics
            .lock()
            .iter()
            .map(|d| d.path.clone())
            .collect()
    }

    /// Take all diagnostics, leaving the collector empty.
    pub fn take(&self) -> Vec<IncludeDiagnostic> {
        std::mem::take(&mut *self.diagnostics.lock())
    }
}

impl DiagnosticSink for DiagnosticCollector {
    fn report(&self, diagnostic: IncludeDiagnostic) {
        self.diagnostics.lock().push(diagnostic);
    }
}
