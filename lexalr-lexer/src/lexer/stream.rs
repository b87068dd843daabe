use super::{LexResult, Lexer, LexicalError, Position, Token};
use crate::Terminal;

use tracing::trace;

/// Lazy stream of the tokens of one input.
///
/// The stream always ends with a single EOF token, unless a
/// [`LexicalError`] is yielded first. Nothing is yielded after either of
/// them.
pub struct TokenStream<'l> {
    lexer: &'l Lexer,
    input: Vec<char>,
    offset: usize,
    position: Position,
    /// Tokens handed back by the consumer, yielded again before lexing on.
    pushed: Vec<Token>,
    finished: bool,
}

impl<'l> TokenStream<'l> {
    pub(super) fn new(lexer: &'l Lexer, input: Vec<char>) -> Self {
        Self {
            lexer,
            input,
            offset: 0,
            position: Position::default(),
            pushed: Vec::new(),
            finished: false,
        }
    }

    /// Returns the next token without consuming it.
    ///
    /// A lexical error is returned once and ends the stream.
    pub fn peek(&mut self) -> LexResult<Option<&Token>> {
        if self.pushed.is_empty() {
            match self.next() {
                Some(Ok(token)) => self.pushed.push(token),
                Some(Err(err)) => return Err(err),
                None => return Ok(None),
            }
        }

        Ok(self.pushed.last())
    }

    /// Makes `token` the next token of the stream. Tokens pushed back are
    /// yielded in reverse order.
    pub fn pushback(&mut self, token: Token) {
        self.pushed.push(token);
    }

    /// Position of the first character that has not been lexed yet.
    pub fn position(&self) -> Position {
        self.position
    }

    fn lex_token(&mut self) -> Option<LexResult<Token>> {
        loop {
            if self.offset == self.input.len() {
                self.finished = true;
                trace!(position = %self.position, "end of input");
                return Some(Ok(Token::new(Terminal::eof(), self.position, "")));
            }

            let Some((terminal, len)) = self.lexer.longest_match(&self.input[self.offset..]) else {
                self.finished = true;
                return Some(Err(LexicalError {
                    position: self.position,
                    found: self.input[self.offset],
                }));
            };

            let text = self.input[self.offset..self.offset + len]
                .iter()
                .collect::<String>();
            let token = Token::new(terminal.clone(), self.position, text);

            self.offset += len;
            self.position.advance_str(&token.text);

            if self.lexer.is_filtered(&token.terminal) {
                trace!(%token, "filtered out");
                continue;
            }

            match self.lexer.notify(token) {
                Some(token) => {
                    trace!(%token, "lexed");
                    return Some(Ok(token));
                }
                None => continue,
            }
        }
    }
}

impl Iterator for TokenStream<'_> {
    type Item = LexResult<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(token) = self.pushed.pop() {
            return Some(Ok(token));
        }

        if self.finished {
            return None;
        }

        self.lex_token()
    }
}

impl std::fmt::Debug for TokenStream<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenStream")
            .field("position", &self.position)
            .field("pushed", &self.pushed)
            .field("finished", &self.finished)
            .finish()
    }
}
