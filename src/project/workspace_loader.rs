use std::path::Path;

use crate::base::FileId;
use crate::hir::{FileEntry, IndexBuilder, SymbolIndex};

use super::file_loader::{FileLoader, LoadError};

/// Reads a root file through the builder's loader and builds its symbol index.
///
/// The root must be readable; unreadable includes are only reported to the
/// builder's diagnostic sink.
pub fn load_symbol_index(
    path: impl AsRef<Path>,
    builder: &IndexBuilder<'_>,
) -> Result<SymbolIndex, LoadError> {
    let file = FileId::new(path);
    let lines = builder.loader().load_lines(file.path())?;
    let root = FileEntry::new(Some(file), lines);
    Ok(builder.build_for_entry(&root))
}
