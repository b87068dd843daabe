//! Automaton based lexer.
//!
//! [`Terminal`]s describe token classes, each backed by an [`Automaton`]. A
//! [`Lexer`] runs the automatons of its terminals side by side and emits the
//! longest match, breaking ties with priorities.

pub use self::{
    automaton::{Automaton, AutomatonBuilder},
    char_constraint::CharConstraint,
    lexer::{LexResult, Lexer, LexicalError, Position, Token, TokenListener, TokenStream},
    regex::RegexError,
    terminal::{Terminal, TerminalKind},
};

pub mod automaton;
mod char_constraint;
mod lexer;
pub mod regex;
pub mod terminal;
