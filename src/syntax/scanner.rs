//! Line scanner: recognises definition and include lines.
//!
//! Every recognizer looks at exactly one line and never consults its
//! neighbours. The label and constant recognizers are independent; callers
//! that need a single answer per line use [`LineScanner::classify`].

use std::sync::LazyLock;

use regex::Regex;
use smol_str::SmolStr;
use thiserror::Error;

use crate::base::char_column;

/// Symbol-name grammar shared by every recognizer.
const SYMBOL_PATTERN: &str = r"[._A-Za-z][A-Za-z0-9_]*";

/// Prefix reserved for assembler-generated names.
const RESERVED_PREFIX: &str = "__";

static SYMBOL_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("^{SYMBOL_PATTERN}$")).expect("symbol pattern is valid")
});

// A `.` only starts a word; after an identifier character it splits one.
static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.?[A-Za-z0-9_]+").expect("word pattern is valid"));

static DEFAULT_SCANNER: LazyLock<LineScanner> = LazyLock::new(|| {
    LineScanner::new(&SyntaxConfig::default()).expect("default syntax config is valid")
});

/// Error raised when a [`SyntaxConfig`] cannot be compiled.
#[derive(Debug, Error)]
pub enum SyntaxError {
    #[error("keyword must not be empty: {0}")]
    EmptyKeyword(&'static str),
    #[error("invalid line grammar: {0}")]
    Regex(#[from] regex::Error),
}

/// Configurable pieces of the line grammars.
///
/// Built once and compiled into a [`LineScanner`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyntaxConfig {
    /// Keyword that starts an include directive. Matched case-insensitively.
    pub include_keyword: SmolStr,
    /// Keyword that, after a symbol name, defines a constant (alongside `=`).
    pub equate_keyword: SmolStr,
    /// Whether the equate keyword is matched case-insensitively.
    pub equate_ignore_case: bool,
}

impl Default for SyntaxConfig {
    fn default() -> Self {
        Self {
            include_keyword: SmolStr::new_static("#include"),
            equate_keyword: SmolStr::new_static("EQU"),
            equate_ignore_case: false,
        }
    }
}

impl SyntaxConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different include keyword.
    pub fn with_include_keyword(mut self, keyword: impl Into<SmolStr>) -> Self {
        self.include_keyword = keyword.into();
        self
    }

    /// Use a different equate keyword.
    pub fn with_equate_keyword(mut self, keyword: impl Into<SmolStr>) -> Self {
        self.equate_keyword = keyword.into();
        self
    }

    /// Match the equate keyword regardless of case.
    pub fn with_equate_ignore_case(mut self, ignore_case: bool) -> Self {
        self.equate_ignore_case = ignore_case;
        self
    }
}

/// Category of a definition line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DefinitionKind {
    /// `name:`
    Label,
    /// `name = value` or `name EQU value`
    Constant,
}

impl DefinitionKind {
    /// All kinds, in precedence order.
    pub const ALL: [DefinitionKind; 2] = [DefinitionKind::Label, DefinitionKind::Constant];

    /// Human-readable name.
    pub fn display(self) -> &'static str {
        match self {
            DefinitionKind::Label => "label",
            DefinitionKind::Constant => "constant",
        }
    }
}

/// A symbol recognised on a line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SymbolMatch<'a> {
    /// The symbol's text exactly as written.
    pub name: &'a str,
    /// 0-indexed char offset of the symbol's first character.
    pub column: u32,
}

/// Compiled line grammars.
#[derive(Clone, Debug)]
pub struct LineScanner {
    label: Regex,
    constant: Regex,
    include: Regex,
}

impl Default for LineScanner {
    fn default() -> Self {
        DEFAULT_SCANNER.clone()
    }
}

impl LineScanner {
    /// Compile a scanner from a configuration.
    pub fn new(config: &SyntaxConfig) -> Result<Self, SyntaxError> {
        if config.include_keyword.is_empty() {
            return Err(SyntaxError::EmptyKeyword("include"));
        }
        if config.equate_keyword.is_empty() {
            return Err(SyntaxError::EmptyKeyword("equate"));
        }

        let equate = equate_pattern(&config.equate_keyword, config.equate_ignore_case);

        Ok(Self {
            label: Regex::new(&format!(r"^\s*({SYMBOL_PATTERN})\s*:"))?,
            constant: Regex::new(&format!(r"^\s*({SYMBOL_PATTERN})\s*(?:=|{equate})"))?,
            include: Regex::new(&format!(
                r#"^\s*(?i:{})\s+(?:"([^"]+)"|<([^>]+)>|(\S+))"#,
                regex::escape(&config.include_keyword)
            ))?,
        })
    }

    /// The scanner compiled from [`SyntaxConfig::default`].
    pub fn shared() -> &'static LineScanner {
        &DEFAULT_SCANNER
    }

    /// Recognise a label definition (`name:`).
    pub fn find_label<'a>(&self, line: &'a str) -> Option<SymbolMatch<'a>> {
        capture_symbol(&self.label, line)
    }

    /// Recognise a constant definition (`name = ...` or `name EQU ...`).
    pub fn find_constant<'a>(&self, line: &'a str) -> Option<SymbolMatch<'a>> {
        capture_symbol(&self.constant, line)
    }

    /// Recognise a definition of the given kind.
    pub fn find<'a>(&self, kind: DefinitionKind, line: &'a str) -> Option<SymbolMatch<'a>> {
        match kind {
            DefinitionKind::Label => self.find_label(line),
            DefinitionKind::Constant => self.find_constant(line),
        }
    }

    /// Classify a line as at most one kind of definition.
    ///
    /// Labels take precedence over constants when both grammars match.
    pub fn classify<'a>(&self, line: &'a str) -> Option<(DefinitionKind, SymbolMatch<'a>)> {
        DefinitionKind::ALL
            .into_iter()
            .find_map(|kind| self.find(kind, line).map(|m| (kind, m)))
    }

    /// Extract the path from an include directive.
    ///
    /// Quoted, angle-bracketed, and bare (whitespace-delimited) paths are
    /// accepted; the first form that matches wins.
    pub fn include_path<'a>(&self, line: &'a str) -> Option<&'a str> {
        let caps = self.include.captures(line)?;
        (1..=3)
            .filter_map(|i| caps.get(i))
            .map(|m| m.as_str())
            .find(|path| !path.is_empty())
    }
}

/// Escaped equate keyword, with a word boundary on each side that ends in a
/// word character. Punctuation keywords such as `:=` have no boundary to hold.
fn equate_pattern(keyword: &str, ignore_case: bool) -> String {
    let is_word = |c: char| c.is_alphanumeric() || c == '_';
    let escaped = regex::escape(keyword);
    let body = if ignore_case {
        format!("(?i:{escaped})")
    } else {
        escaped
    };
    let lead = if keyword.starts_with(is_word) { r"\b" } else { "" };
    let trail = if keyword.ends_with(is_word) { r"\b" } else { "" };
    format!("{lead}{body}{trail}")
}

fn capture_symbol<'a>(re: &Regex, line: &'a str) -> Option<SymbolMatch<'a>> {
    let m = re.captures(line)?.get(1)?;
    if m.as_str().starts_with(RESERVED_PREFIX) {
        return None;
    }
    Some(SymbolMatch {
        name: m.as_str(),
        column: char_column(line, m.start()),
    })
}

/// Recognise a label definition using the default grammar.
pub fn find_label_definition(line: &str) -> Option<SymbolMatch<'_>> {
    DEFAULT_SCANNER.find_label(line)
}

/// Recognise a constant definition using the default grammar.
pub fn find_constant_definition(line: &str) -> Option<SymbolMatch<'_>> {
    DEFAULT_SCANNER.find_constant(line)
}

/// Classify a line using the default grammar. Labels win.
pub fn classify_line(line: &str) -> Option<(DefinitionKind, SymbolMatch<'_>)> {
    DEFAULT_SCANNER.classify(line)
}

/// Extract an include path using the default grammar.
pub fn parse_include_path(line: &str) -> Option<&str> {
    DEFAULT_SCANNER.include_path(line)
}

/// Check whether a whole string is a legal symbol name.
pub fn is_valid_symbol_name(s: &str) -> bool {
    SYMBOL_NAME.is_match(s) && !s.starts_with(RESERVED_PREFIX) && !s.starts_with("..")
}

/// Find the symbol-name token covering `column` (inclusive of its end).
///
/// Numeric literals such as `0x10` are not symbols and yield `None`.
pub fn symbol_at(line: &str, column: u32) -> Option<SymbolMatch<'_>> {
    WORD.find_iter(line).find_map(|m| {
        let start = char_column(line, m.start());
        let end = char_column(line, m.end());
        if column < start || column > end || !is_valid_symbol_name(m.as_str()) {
            return None;
        }
        Some(SymbolMatch {
            name: m.as_str(),
            column: start,
        })
    })
}
