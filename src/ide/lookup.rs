//! Definition lookup and self-reference checks.

use crate::base::{FileId, LineCol};
use crate::hir::{DefinitionLocation, DefinitionMap};

/// Look up a token's definition.
///
/// An absent or empty token yields `None` without probing the map.
pub fn lookup<'a, 'b>(
    map: &'a DefinitionMap,
    token: impl Into<Option<&'b str>>,
) -> Option<&'a DefinitionLocation> {
    match token.into() {
        Some(name) if !name.is_empty() => map.get(name),
        _ => None,
    }
}

/// Whether the occurrence of `token` at `position` is its definition.
///
/// The file check is skipped when either side has no file identity.
pub fn is_definition_occurrence<'b>(
    map: &DefinitionMap,
    token: impl Into<Option<&'b str>>,
    position: LineCol,
    file: Option<&FileId>,
) -> bool {
    lookup(map, token).is_some_and(|location| location.is_at(position, file))
}
