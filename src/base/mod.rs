//! Foundation types for the BespokeASM toolchain.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`FileId`] - Path-backed file identifiers
//! - [`LineCol`] - Line/column positions
//! - [`split_lines`] - Line splitting over any line-ending convention
//!
//! This module has NO dependencies on other bespoke modules.

mod file_id;
mod span;

pub use file_id::FileId;
pub use span::{LineCol, split_lines};

pub(crate) use span::char_column;
