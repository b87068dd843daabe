//! Token classes recognized by the [`Lexer`](crate::Lexer).
//!
//! A [`Terminal`] is a cheap, clonable handle. Equality, ordering and hashing
//! only look at the configuration of the terminal (the literal text, the
//! quote characters, ...), so two terminals built the same way are
//! interchangeable. The optional display name is not part of the identity.

use crate::{
    regex::{self, RegexError},
    Automaton,
};

use std::{
    cmp::Ordering,
    hash::{Hash, Hasher},
    sync::Arc,
};

mod automata;
pub mod chars;

/// Named token class backed by an [`Automaton`].
#[derive(Clone)]
pub struct Terminal(Arc<TerminalDef>);

struct TerminalDef {
    kind: TerminalKind,
    name: Option<String>,
}

/// Configuration of a [`Terminal`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TerminalKind {
    /// Exact text.
    Literal(String),
    /// A single character.
    SingleChar(char),
    /// One character of `first` followed by any number of characters of
    /// `next`.
    Word { first: Vec<char>, next: Vec<char> },
    /// Text between `start` and `end`. The `escape` character makes the next
    /// character part of the string, whatever it is. A `forbidden` character
    /// kills the match.
    QuotedString {
        start: char,
        end: char,
        escape: char,
        forbidden: Vec<char>,
    },
    /// C character constant (`'a'`, `'\n'`).
    CCharacter,
    /// C decimal integer with an optional `u`/`l` suffix.
    CInteger,
    /// C hexadecimal integer (`0x1f`).
    CHexNumber,
    /// C octal integer (`017`).
    COctal,
    /// C binary integer (`0b101`).
    CBinary,
    /// C floating point constant (`1.5`, `.5e-3f`).
    CFloatingPoint,
    /// From the start marker up to, but excluding, the end of the line.
    LineComment(String),
    /// Everything between the start and end markers (included).
    MultilineComment(String, String),
    /// `\n` or `\r\n`.
    NewLine,
    /// Automaton compiled from a pattern of the regex mini-language.
    Regex(RegexPattern),
    /// Never produced by the lexer itself; token listeners may emit it.
    Artificial(String),
    /// End of input.
    Eof,
}

/// Source of a [`TerminalKind::Regex`] along with its compiled automaton.
///
/// Only the pattern takes part in comparisons.
#[derive(Debug, Clone)]
pub struct RegexPattern {
    pattern: String,
    automaton: Arc<Automaton>,
}

impl RegexPattern {
    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

impl PartialEq for RegexPattern {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern
    }
}

impl Eq for RegexPattern {}

impl Hash for RegexPattern {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.pattern.hash(state)
    }
}

impl PartialOrd for RegexPattern {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RegexPattern {
    fn cmp(&self, other: &Self) -> Ordering {
        self.pattern.cmp(&other.pattern)
    }
}

impl Terminal {
    fn new(kind: TerminalKind) -> Self {
        Self(Arc::new(TerminalDef { kind, name: None }))
    }

    /// Returns a copy of the terminal with a display name. The name does not
    /// change the identity of the terminal.
    pub fn with_name(self, name: impl Into<String>) -> Self {
        Self(Arc::new(TerminalDef {
            kind: self.0.kind.clone(),
            name: Some(name.into()),
        }))
    }

    pub fn literal(text: impl Into<String>) -> Self {
        Self::new(TerminalKind::Literal(text.into()))
    }

    pub fn single_char(ch: char) -> Self {
        Self::new(TerminalKind::SingleChar(ch))
    }

    /// Word made of the given characters only.
    pub fn word(chars: &str) -> Self {
        Self::word_with(chars, chars)
    }

    pub fn word_with(first: &str, next: &str) -> Self {
        Self::new(TerminalKind::Word {
            first: first.chars().collect(),
            next: next.chars().collect(),
        })
    }

    pub fn quoted_string(start: char, end: char, escape: char, forbidden: &[char]) -> Self {
        Self::new(TerminalKind::QuotedString {
            start,
            end,
            escape,
            forbidden: forbidden.to_vec(),
        })
    }

    /// Double quoted C string; it may not span several lines.
    pub fn c_string() -> Self {
        Self::quoted_string('"', '"', '\\', &['\n', '\r']).with_name("cString")
    }

    pub fn c_character() -> Self {
        Self::new(TerminalKind::CCharacter)
    }

    pub fn c_integer() -> Self {
        Self::new(TerminalKind::CInteger)
    }

    pub fn c_hex_number() -> Self {
        Self::new(TerminalKind::CHexNumber)
    }

    pub fn c_octal() -> Self {
        Self::new(TerminalKind::COctal)
    }

    pub fn c_binary() -> Self {
        Self::new(TerminalKind::CBinary)
    }

    pub fn c_floating_point() -> Self {
        Self::new(TerminalKind::CFloatingPoint)
    }

    pub fn line_comment(start: impl Into<String>) -> Self {
        Self::new(TerminalKind::LineComment(start.into()))
    }

    pub fn multiline_comment(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self::new(TerminalKind::MultilineComment(start.into(), end.into()))
    }

    pub fn new_line() -> Self {
        Self::new(TerminalKind::NewLine)
    }

    /// Any run of non-newline whitespace.
    pub fn whitespace() -> Self {
        Self::word(chars::WHITESPACES_NON_NEW_LINE).with_name("Whitespace")
    }

    pub fn c_identifier() -> Self {
        Self::word_with(
            &format!("_{}", chars::alpha()),
            &format!("_{}", chars::alpha_num()),
        )
        .with_name("cIdentifier")
    }

    pub fn lowercase_word() -> Self {
        Self::word(chars::LOWERCASE_LETTERS)
    }

    /// Word of letters, digits, whitespace and punctuation.
    pub fn any_word() -> Self {
        Self::word(&format!(
            "{}{}{}",
            chars::alpha_num(),
            chars::WHITESPACES_NON_NEW_LINE,
            chars::PUNCTUATIONS
        ))
    }

    /// Compiles `pattern` with the regex mini-language (see the
    /// [`regex`](crate::regex) module).
    pub fn regex(pattern: impl Into<String>) -> Result<Self, RegexError> {
        let pattern = pattern.into();
        let automaton = regex::compile(&pattern)?;

        Ok(Self::new(TerminalKind::Regex(RegexPattern {
            pattern,
            automaton: Arc::new(automaton),
        })))
    }

    pub fn artificial(name: impl Into<String>) -> Self {
        Self::new(TerminalKind::Artificial(name.into()))
    }

    pub fn eof() -> Self {
        Self::new(TerminalKind::Eof)
    }

    pub fn kind(&self) -> &TerminalKind {
        &self.0.kind
    }

    /// Display name of the terminal.
    pub fn name(&self) -> String {
        self.to_string()
    }

    pub fn is_eof(&self) -> bool {
        self.0.kind == TerminalKind::Eof
    }

    /// Priority used when two terminals match the same amount of input. The
    /// higher value wins; literals beat every other kind by default.
    pub fn default_priority(&self) -> i32 {
        match self.0.kind {
            TerminalKind::Literal(_) => 2,
            _ => 1,
        }
    }

    /// Builds the automaton recognizing this terminal.
    pub fn automaton(&self) -> Automaton {
        automata::build(&self.0.kind)
    }
}

impl PartialEq for Terminal {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.0.kind == other.0.kind
    }
}

impl Eq for Terminal {}

impl Hash for Terminal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.kind.hash(state)
    }
}

impl PartialOrd for Terminal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Terminal {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.kind.cmp(&other.0.kind)
    }
}

impl std::fmt::Debug for Terminal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}

impl std::fmt::Display for Terminal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(name) = &self.0.name {
            return write!(f, "{}", name);
        }

        use TerminalKind::*;
        match &self.0.kind {
            Literal(text) => write!(f, "'{}'", text),
            SingleChar(ch) => write!(f, "'{}'", ch),
            Word { first, next } if first == next => {
                write!(f, "Word('{}')", first.iter().collect::<String>())
            }
            Word { first, next } => write!(
                f,
                "Word('{}', '{}')",
                first.iter().collect::<String>(),
                next.iter().collect::<String>()
            ),
            QuotedString { start, end, .. } => write!(f, "QuotedString({}{})", start, end),
            CCharacter => write!(f, "CCharacter"),
            CInteger => write!(f, "CInteger"),
            CHexNumber => write!(f, "CHexNumber"),
            COctal => write!(f, "COctal"),
            CBinary => write!(f, "CBinary"),
            CFloatingPoint => write!(f, "CFloatingPoint"),
            LineComment(start) => write!(f, "LineComment('{}')", start),
            MultilineComment(start, end) => write!(f, "MultilineComment('{}','{}')", start, end),
            NewLine => write!(f, "NewLine"),
            Regex(pattern) => write!(f, "Regex({})", pattern.pattern),
            Artificial(name) => write!(f, "{}", name),
            Eof => write!(f, "EOF"),
        }
    }
}

impl From<&str> for Terminal {
    /// Single characters become [`TerminalKind::SingleChar`], anything else a
    /// [`TerminalKind::Literal`].
    fn from(text: &str) -> Self {
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => Terminal::single_char(ch),
            _ => Terminal::literal(text),
        }
    }
}
