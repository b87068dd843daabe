//! Automaton based lexer and LALR(1) parser generator.
//!
//! [`lexer`] turns text into [`Token`](lexer::Token)s, [`parser`] builds
//! syntax trees out of them. The most used types are re-exported at the
//! root.

pub use lexalr_lexer as lexer;
pub use lexalr_parser as parser;

pub use lexalr_lexer::{Lexer, Terminal, Token};
pub use lexalr_parser::{
    symbols, Associativity, AstNode, Grammar, NonTerminal, Parser, Symbol, Visitor,
};
