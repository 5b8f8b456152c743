//! # bespoke-base
//!
//! Core library for BespokeASM symbol indexing: where is a label or
//! constant defined, across a root file and everything it includes?
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide      → Query layer (lookup, self-reference test, goto-definition)
//!   ↓
//! hir      → Definition maps, include traversal, merged SymbolIndex
//!   ↓
//! project  → File loading (disk, in-memory FileSet)
//!   ↓
//! syntax   → Line grammars (label, constant, include directive)
//!   ↓
//! base     → Primitives (FileId, LineCol, line splitting)
//! ```
//!
//! Every build is a pure function of the file contents it reads. Nothing is
//! cached between builds.

/// Foundation types: FileId, LineCol
pub mod base;

/// Line grammars for definitions and include directives
pub mod syntax;

/// File loading for include resolution
pub mod project;

/// Definition maps, include graph traversal, symbol index
pub mod hir;

/// IDE features: lookup, goto-definition
pub mod ide;

// Re-export commonly needed items
pub use base::{FileId, LineCol};
pub use hir::{DefinitionLocation, DefinitionMap, IndexBuilder, SymbolIndex};
pub use syntax::DefinitionKind;
