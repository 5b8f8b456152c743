//! File loading: the filesystem side of include resolution.

mod file_loader;
mod file_set;
mod workspace_loader;

pub use file_loader::{DiskLoader, FileLoader, LoadError};
pub use file_set::FileSet;
pub use workspace_loader::load_symbol_index;
