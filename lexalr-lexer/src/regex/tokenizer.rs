use std::{
    iter::{Enumerate, Peekable},
    str::Chars,
};

#[cfg(test)]
use proptest_derive::Arbitrary;

/// Regex tokenizer. Whitespace between tokens is skipped.
pub(super) struct Tokenizer<'a> {
    /// Iterator over the characters in the input, along with their position in
    /// the input.
    iter: Peekable<Enumerate<Chars<'a>>>,
    /// Character position right after the last consumed character.
    cursor: usize,
}

/// Regex token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct Token {
    pub(super) kind: TokenKind,
    /// Start and end position of the token in the input text. The end position
    /// is one further than the end of the current token.
    pub(super) pos: (usize, usize),
}

impl Token {
    pub(super) fn new(kind: TokenKind, pos: (usize, usize)) -> Self {
        Self { kind, pos }
    }
}

/// Regex token kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum TokenKind {
    /// Characters between single quotes, escapes already resolved.
    Quoted(Vec<char>),
    /// `.`
    Wildcard,
    Operator(OperatorKind),
    Quantifier(QuantifierKind),
    Invalid,
}

/// Regex operator kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum OperatorKind {
    LeftParen,
    RightParen,
    Vertical,
    /// `..` between the bounds of a character range.
    Range,
}

/// Regex quantifier kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(test, derive(Arbitrary))]
pub(crate) enum QuantifierKind {
    Asterisk,
    Plus,
    QuestionMark,
}

impl Iterator for Tokenizer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        while self.iter.next_if(|(_, ch)| ch.is_whitespace()).is_some() {}

        let (start, ch) = self.iter.next()?;
        self.cursor = start + 1;

        let kind = match ch {
            '\'' => self.handle_quoted(),
            '.' => self.handle_dot(),
            '(' => TokenKind::Operator(OperatorKind::LeftParen),
            ')' => TokenKind::Operator(OperatorKind::RightParen),
            '|' => TokenKind::Operator(OperatorKind::Vertical),
            '*' => TokenKind::Quantifier(QuantifierKind::Asterisk),
            '+' => TokenKind::Quantifier(QuantifierKind::Plus),
            '?' => TokenKind::Quantifier(QuantifierKind::QuestionMark),

            _ => TokenKind::Invalid,
        };

        Some(Token::new(kind, (start, self.cursor)))
    }
}

impl<'a> Tokenizer<'a> {
    pub(super) fn new(input: &'a str) -> Self {
        Self {
            iter: input.chars().enumerate().peekable(),
            cursor: 0,
        }
    }

    fn bump(&mut self) -> Option<char> {
        let (pos, ch) = self.iter.next()?;
        self.cursor = pos + 1;
        Some(ch)
    }

    /// `.` is the wildcard, `..` separates the bounds of a range.
    fn handle_dot(&mut self) -> TokenKind {
        if self.iter.peek().is_some_and(|(_, ch)| *ch == '.') {
            self.bump();
            TokenKind::Operator(OperatorKind::Range)
        } else {
            TokenKind::Wildcard
        }
    }

    /// Reads up to the closing quote. The opening quote is already consumed.
    fn handle_quoted(&mut self) -> TokenKind {
        let mut chars = Vec::new();

        loop {
            let Some(ch) = self.bump() else {
                // unterminated sequence
                return TokenKind::Invalid;
            };

            match ch {
                '\'' => return TokenKind::Quoted(chars),
                '\\' => match self.bump().and_then(Self::escape_sequence) {
                    Some(escaped) => chars.push(escaped),
                    None => return TokenKind::Invalid,
                },
                ch => chars.push(ch),
            }
        }
    }

    fn escape_sequence(ch: char) -> Option<char> {
        match ch {
            'n' => Some('\n'),
            'r' => Some('\r'),
            't' => Some('\t'),
            'f' => Some('\u{000C}'),
            '0' => Some('\0'),
            '\\' | '\'' | '"' => Some(ch),

            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{OperatorKind::*, QuantifierKind::*, Token, TokenKind::*, Tokenizer};

    macro_rules! tokens {
        ($(($start:expr, $end:expr) => $token_kind:expr),*) => {
           vec![$(Token::new($token_kind, ($start, $end))),*]
        };
    }

    fn quoted(text: &str) -> super::TokenKind {
        Quoted(text.chars().collect())
    }

    #[test]
    fn sequences_and_operators() {
        let tokens: Vec<Token> = Tokenizer::new("'ab' | ('c')*").collect();
        assert_eq!(
            tokens,
            tokens![
                (0, 4) => quoted("ab"),
                (5, 6) => Operator(Vertical),
                (7, 8) => Operator(LeftParen),
                (8, 11) => quoted("c"),
                (11, 12) => Operator(RightParen),
                (12, 13) => Quantifier(Asterisk)
            ]
        );
    }

    #[test]
    fn ranges_and_wildcards() {
        let tokens: Vec<Token> = Tokenizer::new("'a'..'z'+.?").collect();
        assert_eq!(
            tokens,
            tokens![
                (0, 3) => quoted("a"),
                (3, 5) => Operator(Range),
                (5, 8) => quoted("z"),
                (8, 9) => Quantifier(Plus),
                (9, 10) => Wildcard,
                (10, 11) => Quantifier(QuestionMark)
            ]
        );
    }

    #[test]
    fn escapes() {
        let tokens: Vec<Token> = Tokenizer::new(r"'\n\'\\'").collect();
        assert_eq!(tokens, tokens![(0, 8) => quoted("\n'\\")]);
    }

    #[test]
    fn invalid() {
        let tokens: Vec<Token> = Tokenizer::new("'open").collect();
        assert_eq!(tokens, tokens![(0, 5) => Invalid]);

        let tokens: Vec<Token> = Tokenizer::new(r"'\q'").collect();
        assert_eq!(tokens[0].kind, Invalid);

        let tokens: Vec<Token> = Tokenizer::new("x").collect();
        assert_eq!(tokens, tokens![(0, 1) => Invalid]);
    }
}
