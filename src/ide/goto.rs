//! Go-to-definition from a cursor position.

use crate::base::{FileId, LineCol};
use crate::hir::{DefinitionLocation, SymbolIndex};
use crate::syntax::symbol_at;

/// Result of resolving the symbol under the cursor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GotoTarget<'a> {
    /// The token under the cursor.
    pub token: &'a str,
    /// 0-indexed char column where the token starts.
    pub token_col: u32,
    /// Where the token is defined.
    pub definition: &'a DefinitionLocation,
}

/// Find the definition of the symbol at `position`.
///
/// `line_text` is the text of line `position.line` in `file`. Returns `None`
/// when there is no symbol under the cursor, when it has no definition, or
/// when the cursor is on the definition itself.
pub fn goto_definition<'a>(
    index: &'a SymbolIndex,
    line_text: &'a str,
    position: LineCol,
    file: Option<&FileId>,
) -> Option<GotoTarget<'a>> {
    let token = symbol_at(line_text, position.col)?;
    let definition = index.resolve(token.name)?;

    let occurrence = LineCol::new(position.line, token.column);
    if definition.is_at(occurrence, file) {
        return None;
    }

    Some(GotoTarget {
        token: token.name,
        token_col: token.column,
        definition,
    })
}
