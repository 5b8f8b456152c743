//! Symbol model: definitions, include graphs, and the merged index.
//!
//! ```text
//! index        → IndexBuilder, SymbolIndex (merge with precedence)
//!   ↓
//! includes     → IncludeResolver, TraversalContext, FileEntry
//!   ↓
//! definitions  → DefinitionMap, per-file indexing
//! ```
//!
//! Unreadable includes are reported through [`DiagnosticSink`] and skipped.

mod definitions;
mod diagnostics;
mod includes;
mod index;

pub use definitions::{DefinitionLocation, DefinitionMap, index_file};
pub use diagnostics::{
    DiagnosticCollector, DiagnosticSink, IncludeDiagnostic, TracingSink, codes,
};
pub use includes::{FileEntry, IncludeResolver, TraversalContext};
pub use index::{IndexBuilder, SymbolIndex};
