pub use self::{
    error::{GrammarError, GrammarResult, ParseError, ParseResult},
    factory::{AstNodeFactory, DefaultNodeFactory},
};

use crate::{lalr::Action, ActionTable, AstNode};
use lexalr_lexer::{LexResult, Lexer, Position, Terminal, Token};

use std::{io::Read, rc::Rc};

use tracing::debug;

mod error;
mod factory;

#[cfg(test)]
mod tests {
    mod arithmetic;
    mod c_like;
    mod grammars;
}

/// Table driven LR parser.
///
/// The default lexer recognizes the terminals of the grammar and nothing
/// else; use [`lexer_mut`](Self::lexer_mut) to filter out whitespace or
/// comments.
#[derive(Clone)]
pub struct Parser {
    table: Rc<ActionTable>,
    lexer: Lexer,
    factory: Box<dyn AstNodeFactory>,
}

impl Parser {
    pub fn new(table: Rc<ActionTable>) -> Self {
        Self {
            lexer: Lexer::new(table.terminals().iter().cloned()),
            table,
            factory: Box::new(DefaultNodeFactory),
        }
    }

    pub fn table(&self) -> &ActionTable {
        &self.table
    }

    pub fn lexer(&self) -> &Lexer {
        &self.lexer
    }

    pub fn lexer_mut(&mut self) -> &mut Lexer {
        &mut self.lexer
    }

    pub fn set_lexer(&mut self, lexer: Lexer) -> &mut Self {
        self.lexer = lexer;
        self
    }

    pub fn set_node_factory(&mut self, factory: impl AstNodeFactory + 'static) -> &mut Self {
        self.factory = Box::new(factory);
        self
    }

    /// Parses `input` and returns the node of the target symbol.
    pub fn parse(&self, input: &str) -> ParseResult<AstNode> {
        self.parse_tokens(self.lexer.iter(input))
    }

    pub fn parse_reader(&self, reader: impl Read) -> ParseResult<AstNode> {
        self.parse_tokens(self.lexer.iter_reader(reader)?)
    }

    /// Parses already lexed tokens. An end of input token is appended when
    /// `tokens` ends without one.
    pub fn parse_tokens(
        &self,
        tokens: impl IntoIterator<Item = LexResult<Token>>,
    ) -> ParseResult<AstNode> {
        let mut tokens = tokens.into_iter();
        let mut states = vec![0];
        let mut nodes = Vec::<AstNode>::new();
        let mut lookahead = next_token(&mut tokens, Position::default())?;

        loop {
            let state = *states
                .last()
                .expect("the state stack always holds the initial state");

            let Some(action) = self.table.action(state, &lookahead.terminal) else {
                debug!(state, token = %lookahead, "no action");
                return Err(ParseError::UnexpectedToken {
                    expected: self.table.expected(state),
                    token: lookahead,
                });
            };

            debug!(state, token = %lookahead, %action);

            match action {
                Action::Shift(next) => {
                    let position = lookahead.position;
                    nodes.push(self.factory.leaf(lookahead));
                    states.push(next);
                    lookahead = next_token(&mut tokens, position)?;
                }
                Action::Reduce(id) => {
                    let rule = self
                        .table
                        .rule(id)
                        .expect("reduced rules belong to the table")
                        .clone();

                    let children = nodes.split_off(nodes.len() - rule.len());
                    states.truncate(states.len() - rule.len());

                    let mut node = self.factory.non_leaf(Rc::clone(&rule), children);
                    if let Some(action) = rule.action() {
                        action(&mut node);
                    }

                    let under = *states
                        .last()
                        .expect("the initial state is never popped");
                    let goto = self
                        .table
                        .goto(under, rule.target())
                        .expect("every reduced target has a goto entry");

                    debug!(%rule, goto, "reduced");
                    nodes.push(node);
                    states.push(goto);
                }
                Action::Accept => {
                    return Ok(nodes
                        .pop()
                        .expect("the target node is on the stack when accepting"));
                }
            }
        }
    }
}

fn next_token(
    tokens: &mut impl Iterator<Item = LexResult<Token>>,
    position: Position,
) -> ParseResult<Token> {
    match tokens.next() {
        Some(token) => Ok(token?),
        None => Ok(Token::new(Terminal::eof(), position, "")),
    }
}

impl std::fmt::Debug for Parser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parser")
            .field("target", self.table.target())
            .field("states", &self.table.len())
            .field("lexer", &self.lexer)
            .finish()
    }
}
