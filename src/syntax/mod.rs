//! Line-level grammars for BespokeASM source.
//!
//! Only three shapes of line are recognised: label definitions, constant
//! definitions, and include directives. Nothing else about the language is
//! parsed here.

mod scanner;

pub use scanner::{
    DefinitionKind, LineScanner, SymbolMatch, SyntaxConfig, SyntaxError, classify_line,
    find_constant_definition, find_label_definition, is_valid_symbol_name, parse_include_path,
    symbol_at,
};
