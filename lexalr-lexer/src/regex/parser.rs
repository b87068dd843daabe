//! Recursive descent parser for the regex mini-language. See the
//! [`ast`](super::ast) module for the grammar.

use super::{
    ast::ExprKind,
    error::{RegexError, RegexErrorKind, RegexResult},
    tokenizer::{OperatorKind, Token, TokenKind, Tokenizer},
};

use std::iter::Peekable;

/// Recursive descent regex parser.
pub(crate) struct Parser<'a> {
    tokens: Peekable<Tokenizer<'a>>,
    /// Position right after the last consumed token, reported when the input
    /// ends unexpectedly.
    end: (usize, usize),
}

impl<'a> Parser<'a> {
    pub(crate) fn new(input: &'a str) -> Self {
        let len = input.chars().count();
        Self {
            tokens: Tokenizer::new(input).peekable(),
            end: (len, len),
        }
    }

    /// Parses the whole input into an [`ExprKind`].
    pub(crate) fn parse(&mut self) -> RegexResult<ExprKind> {
        let expr = self.expression()?;

        match self.tokens.next() {
            None => Ok(expr),
            Some(Token { pos, .. }) => Err(RegexError {
                kind: RegexErrorKind::TrailingInput,
                pos,
            }),
        }
    }

    fn error_at_current(&mut self, kind: RegexErrorKind) -> RegexError {
        let pos = self.tokens.peek().map_or(self.end, |t| t.pos);
        RegexError { kind, pos }
    }

    fn peek_kind(&mut self) -> Option<&TokenKind> {
        self.tokens.peek().map(|t| &t.kind)
    }

    /// Rule: `expression ::= alternative+`
    fn expression(&mut self) -> RegexResult<ExprKind> {
        let mut items = Vec::new();

        while !matches!(
            self.peek_kind(),
            Some(TokenKind::Operator(OperatorKind::Vertical | OperatorKind::RightParen)) | None
        ) {
            items.push(self.alternative()?);
        }

        match items.len() {
            0 => Err(self.error_at_current(RegexErrorKind::SubExpression)),
            1 => Ok(items.remove(0)),
            _ => Ok(ExprKind::Concat(items)),
        }
    }

    /// Rule: `alternative ::= item (VERTICAL item)*`
    ///
    /// `|` binds tighter than concatenation: `'-'? '0' | '1'` is `'-'? ('0' | '1')`.
    fn alternative(&mut self) -> RegexResult<ExprKind> {
        let mut expr = self.item()?;

        while let Some(TokenKind::Operator(OperatorKind::Vertical)) = self.peek_kind() {
            self.tokens.next();
            expr = ExprKind::Alt(Box::new(expr), Box::new(self.item()?));
        }

        Ok(expr)
    }

    /// Rule: `item ::= atom QUANTIFIER*`
    fn item(&mut self) -> RegexResult<ExprKind> {
        let mut expr = self.atom()?;

        while let Some(TokenKind::Quantifier(quantifier)) = self.peek_kind() {
            expr = ExprKind::Quantified(Box::new(expr), *quantifier);
            self.tokens.next();
        }

        Ok(expr)
    }

    /// Rule: `atom ::= LEFT_PAREN expression RIGHT_PAREN | QUOTED (RANGE QUOTED)? | WILDCARD`
    fn atom(&mut self) -> RegexResult<ExprKind> {
        let Some(Token { kind, pos }) = self.tokens.next() else {
            return Err(RegexError {
                kind: RegexErrorKind::Atom,
                pos: self.end,
            });
        };

        match kind {
            TokenKind::Operator(OperatorKind::LeftParen) => {
                let expr = self.expression()?;

                match self.tokens.next() {
                    Some(Token {
                        kind: TokenKind::Operator(OperatorKind::RightParen),
                        ..
                    }) => Ok(expr),
                    Some(Token { pos, .. }) => Err(RegexError {
                        kind: RegexErrorKind::RightParen,
                        pos,
                    }),
                    None => Err(RegexError {
                        kind: RegexErrorKind::RightParen,
                        pos: self.end,
                    }),
                }
            }
            TokenKind::Quoted(chars) => {
                if matches!(self.peek_kind(), Some(TokenKind::Operator(OperatorKind::Range))) {
                    self.tokens.next();
                    return self.range(chars, pos);
                }

                if chars.is_empty() {
                    return Err(RegexError {
                        kind: RegexErrorKind::EmptySequence,
                        pos,
                    });
                }

                Ok(ExprKind::Sequence(chars))
            }
            TokenKind::Wildcard => Ok(ExprKind::Wildcard),
            TokenKind::Invalid => Err(RegexError {
                kind: RegexErrorKind::InvalidToken,
                pos,
            }),
            TokenKind::Operator(_) | TokenKind::Quantifier(_) => Err(RegexError {
                kind: RegexErrorKind::Atom,
                pos,
            }),
        }
    }

    /// The lower bound and the `..` are already consumed.
    fn range(&mut self, lower: Vec<char>, lower_pos: (usize, usize)) -> RegexResult<ExprKind> {
        let upper = self.tokens.next();

        match (lower.as_slice(), upper) {
            (
                [lo],
                Some(Token {
                    kind: TokenKind::Quoted(upper),
                    ..
                }),
            ) if upper.len() == 1 => Ok(ExprKind::Range(*lo, upper[0])),
            ([_], Some(Token { pos, .. })) => Err(RegexError {
                kind: RegexErrorKind::RangeBound,
                pos,
            }),
            ([_], None) => Err(RegexError {
                kind: RegexErrorKind::RangeBound,
                pos: self.end,
            }),
            _ => Err(RegexError {
                kind: RegexErrorKind::RangeBound,
                pos: lower_pos,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Parser;
    use crate::regex::{
        ast::ExprKind::{self, *},
        error::RegexErrorKind,
        tokenizer::QuantifierKind::*,
    };

    fn parse(input: &str) -> ExprKind {
        Parser::new(input).parse().expect("valid regex")
    }

    fn error(input: &str) -> (RegexErrorKind, (usize, usize)) {
        let err = Parser::new(input).parse().expect_err("invalid regex");
        (err.kind, err.pos)
    }

    #[test]
    fn sequences() {
        assert_eq!(parse("'test'"), Sequence("test".chars().collect()));
        assert_eq!(
            parse("'a' 'b'?"),
            Concat(vec![
                Sequence(vec!['a']),
                Quantified(Box::new(Sequence(vec!['b'])), QuestionMark)
            ])
        );
    }

    #[test]
    fn alternatives_take_adjacent_items() {
        assert_eq!(
            parse("'a'..'z' | 'A'..'Z' '_'"),
            Concat(vec![
                Alt(Box::new(Range('a', 'z')), Box::new(Range('A', 'Z'))),
                Sequence(vec!['_'])
            ])
        );
        assert_eq!(
            parse("'-'?'0'|('1'..'9')"),
            Concat(vec![
                Quantified(Box::new(Sequence(vec!['-'])), QuestionMark),
                Alt(Box::new(Sequence(vec!['0'])), Box::new(Range('1', '9')))
            ])
        );
        assert_eq!(
            parse("'a' | 'b' | 'c'*"),
            Alt(
                Box::new(Alt(Box::new(Sequence(vec!['a'])), Box::new(Sequence(vec!['b'])))),
                Box::new(Quantified(Box::new(Sequence(vec!['c'])), Asterisk))
            )
        );
    }

    #[test]
    fn groups_and_quantifiers() {
        assert_eq!(
            parse("('0'..'9')+ .*"),
            Concat(vec![
                Quantified(Box::new(Range('0', '9')), Plus),
                Quantified(Box::new(Wildcard), Asterisk)
            ])
        );
        assert_eq!(
            parse("(('a'))"),
            Sequence(vec!['a'])
        );
    }

    #[test]
    fn errors() {
        assert_eq!(error(""), (RegexErrorKind::SubExpression, (0, 0)));
        assert_eq!(error("('a'"), (RegexErrorKind::RightParen, (4, 4)));
        assert_eq!(error("'a')"), (RegexErrorKind::TrailingInput, (3, 4)));
        assert_eq!(error("*"), (RegexErrorKind::Atom, (0, 1)));
        assert_eq!(error("'ab'..'z'"), (RegexErrorKind::RangeBound, (0, 4)));
        assert_eq!(error("'a'..'yz'"), (RegexErrorKind::RangeBound, (5, 9)));
        assert_eq!(error("''"), (RegexErrorKind::EmptySequence, (0, 2)));
        assert_eq!(error("'a' | "), (RegexErrorKind::Atom, (6, 6)));
        assert_eq!(error("| 'a'"), (RegexErrorKind::SubExpression, (0, 1)));
        assert_eq!(error("'a' x"), (RegexErrorKind::InvalidToken, (4, 5)));
    }
}
