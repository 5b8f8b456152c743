//! Definition maps: where each symbol is defined.

use indexmap::IndexMap;
use indexmap::map::Entry;
use smol_str::SmolStr;

use crate::base::{FileId, LineCol};
use crate::syntax::{DefinitionKind, LineScanner};

/// One definition site of a symbol.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DefinitionLocation {
    /// The symbol's exact text at the definition.
    pub name: SmolStr,
    pub kind: DefinitionKind,
    /// 0-indexed line within the owning file.
    pub line: u32,
    /// 0-indexed char offset of the symbol's first character.
    pub column: u32,
    /// The owning file. `None` for file-agnostic single-file use.
    pub file: Option<FileId>,
}

impl DefinitionLocation {
    /// Position of the symbol's first character.
    pub fn position(&self) -> LineCol {
        LineCol::new(self.line, self.column)
    }

    /// Whether an occurrence at `position` in `file` is this definition.
    ///
    /// File identities are only compared when both sides know theirs.
    pub fn is_at(&self, position: LineCol, file: Option<&FileId>) -> bool {
        if let (Some(ours), Some(theirs)) = (self.file.as_ref(), file) {
            if ours != theirs {
                return false;
            }
        }
        self.position() == position
    }
}

/// Symbol name → its single definition, in insertion order.
///
/// Names are case-sensitive. Once a name is present it is never replaced:
/// every insertion path keeps the first definition it saw.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DefinitionMap {
    entries: IndexMap<SmolStr, DefinitionLocation>,
}

impl DefinitionMap {
    /// Create a new empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a definition unless its name is already defined.
    ///
    /// Returns `true` if the definition was added.
    pub fn insert_first(&mut self, location: DefinitionLocation) -> bool {
        match self.entries.entry(location.name.clone()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(location);
                true
            }
        }
    }

    /// Merge another map in, keeping existing definitions on conflict.
    pub fn merge_missing(&mut self, other: DefinitionMap) {
        for location in other.entries.into_values() {
            self.insert_first(location);
        }
    }

    /// Look up a symbol by exact name.
    pub fn get(&self, name: &str) -> Option<&DefinitionLocation> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Iterate over definitions in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &DefinitionLocation> {
        self.entries.values()
    }

    /// Iterate over names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|name| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a DefinitionMap {
    type Item = &'a DefinitionLocation;
    type IntoIter = indexmap::map::Values<'a, SmolStr, DefinitionLocation>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.values()
    }
}

/// Index the definitions of one kind in a single file's lines.
///
/// A name defined on several lines keeps its first definition.
pub fn index_file<S: AsRef<str>>(
    scanner: &LineScanner,
    kind: DefinitionKind,
    lines: &[S],
    file: Option<&FileId>,
) -> DefinitionMap {
    let mut map = DefinitionMap::new();

    for (line_no, line) in lines.iter().enumerate() {
        let Some(found) = scanner.find(kind, line.as_ref()) else {
            continue;
        };
        map.insert_first(DefinitionLocation {
            name: SmolStr::new(found.name),
            kind,
            line: line_no as u32,
            column: found.column,
            file: file.cloned(),
        });
    }

    map
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(lines: &[&str], file: Option<&FileId>) -> DefinitionMap {
        index_file(LineScanner::shared(), DefinitionKind::Label, lines, file)
    }

    #[test]
    fn test_index_file_labels() {
        let file = FileId::new("/main.asm");
        let map = labels(&["start:", "  mov a, b", "  loop:", "  jmp loop"], Some(&file));

        assert_eq!(map.len(), 2);
        let loc = map.get("loop").unwrap();
        assert_eq!(loc.position(), LineCol::new(2, 2));
        assert_eq!(loc.file.as_ref(), Some(&file));
        assert_eq!(loc.kind, DefinitionKind::Label);
    }

    #[test]
    fn test_first_definition_in_file_wins() {
        let lines = [
            "; header", "", "LABEL1:", "  nop", "", "", "", "", "", "LABEL1:",
        ];
        let map = labels(&lines, None);

        assert_eq!(map.get("LABEL1").map(|l| l.line), Some(2));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_index_file_constants() {
        let lines = ["SIZE = 4", "PORT EQU $20", "start:"];
        let map = index_file(
            LineScanner::shared(),
            DefinitionKind::Constant,
            &lines,
            None,
        );

        assert_eq!(map.names().collect::<Vec<_>>(), vec!["SIZE", "PORT"]);
        assert!(!map.contains("start"));
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let map = labels(&["Loop:", "loop:"], None);

        assert_eq!(map.get("Loop").map(|l| l.line), Some(0));
        assert_eq!(map.get("loop").map(|l| l.line), Some(1));
        assert!(map.get("LOOP").is_none());
    }

    #[test]
    fn test_merge_missing_keeps_existing() {
        let root = FileId::new("/root.asm");
        let other = FileId::new("/other.asm");
        let mut merged = labels(&["a:", "b:"], Some(&root));
        merged.merge_missing(labels(&["b:", "c:"], Some(&other)));

        assert_eq!(merged.names().collect::<Vec<_>>(), vec!["a", "b", "c"]);
        assert_eq!(merged.get("b").unwrap().file.as_ref(), Some(&root));
        assert_eq!(merged.get("c").unwrap().file.as_ref(), Some(&other));
    }

    #[test]
    fn test_is_at_ignores_unknown_files() {
        let file = FileId::new("/main.asm");
        let map = labels(&["", "", "", "", "LOOP:"], Some(&file));
        let loc = map.get("LOOP").unwrap();

        assert!(loc.is_at(LineCol::new(4, 0), Some(&file)));
        assert!(loc.is_at(LineCol::new(4, 0), None));
        assert!(!loc.is_at(LineCol::new(4, 0), Some(&FileId::new("/other.asm"))));
        assert!(!loc.is_at(LineCol::new(5, 0), Some(&file)));
    }
}
