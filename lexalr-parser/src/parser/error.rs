use crate::NonTerminal;
use lexalr_lexer::{LexicalError, Terminal, Token};

use std::collections::BTreeSet;

pub type ParseResult<T> = Result<T, ParseError>;

pub type GrammarResult<T> = Result<T, GrammarError>;

/// Failure of a single parse. The parser does not try to recover.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error(transparent)]
    Lexical(#[from] LexicalError),
    /// No action for the incoming token in the current state.
    #[error("[ERROR] {}: unexpected {token}, expected one of {}", .token.position, join(.expected))]
    UnexpectedToken {
        token: Token,
        /// Terminals with an action in the state the parser was in.
        expected: BTreeSet<Terminal>,
    },
    #[error("could not read input: {0}")]
    Io(#[from] std::io::Error),
}

/// Problem found while building an action table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GrammarError {
    #[error("shift-reduce conflict in state {state} on {terminal} with rule {rule}")]
    ShiftReduceConflict {
        state: usize,
        terminal: Terminal,
        rule: String,
    },
    #[error("reduce-reduce conflict in state {state} on {terminal} between rules {first} and {second}")]
    ReduceReduceConflict {
        state: usize,
        terminal: Terminal,
        first: String,
        second: String,
    },
    #[error("grammar has no rules")]
    NoRules,
    #[error("no rule derives {0}")]
    UnknownTarget(NonTerminal),
    #[error("non-terminal {0} is used but has no rules")]
    UndefinedNonTerminal(NonTerminal),
}

fn join(terminals: &BTreeSet<Terminal>) -> String {
    terminals
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
