//! IDE features: the query layer editor integrations call.
//!
//! ## Design Principles
//!
//! 1. **Pure functions**: Take an index in, return locations out
//! 2. **No editor types**: Callers convert at their own boundary
//! 3. **Absence is a value**: A token with no definition yields `None`
//!
//! ## Usage
//!
//! ```no_run
//! use std::path::Path;
//! use bespoke::base::{FileId, LineCol};
//! use bespoke::hir::IndexBuilder;
//! use bespoke::project::DiskLoader;
//! use bespoke::ide::{lookup, is_definition_occurrence};
//!
//! let lines = ["#include \"defs.asm\"", "start:", "  jmp start"];
//! let file = FileId::new("/src/main.asm");
//! let index = IndexBuilder::new(&DiskLoader).build_index(&lines, Some(&file), Some(Path::new("/src")));
//!
//! assert!(lookup(index.labels(), "start").is_some());
//! assert!(is_definition_occurrence(index.labels(), "start", LineCol::new(1, 0), Some(&file)));
//! ```

mod goto;
mod lookup;

pub use goto::{GotoTarget, goto_definition};
pub use lookup::{is_definition_occurrence, lookup};
