//! LALR(1) parser generator.
//!
//! A [`Grammar`] collects [`Rule`]s over [`Terminal`](lexalr_lexer::Terminal)s
//! and [`NonTerminal`]s. [`Grammar::create_parser`] builds the LALR(1)
//! [`ActionTable`] of the grammar, resolving shift-reduce conflicts with the
//! declared precedences and associativities, and returns a [`Parser`]
//! producing [`AstNode`] trees.
//!
//! ```
//! use lexalr_lexer::Terminal;
//! use lexalr_parser::{symbols, Associativity, Grammar, NonTerminal};
//!
//! let mut grammar = Grammar::new();
//! let expr = NonTerminal::new("Expr");
//! let (plus, int) = (Terminal::from("+"), Terminal::c_integer());
//!
//! grammar.add_rule(&expr, symbols![expr, plus, expr]).with_name("add");
//! grammar.add_rule(&expr, symbols![int]);
//! grammar
//!     .set_precedence_level(1, symbols![plus])
//!     .set_associativity(&plus, Associativity::Left);
//!
//! let tree = grammar.create_parser().unwrap().parse("1+2+3").unwrap();
//! assert_eq!(tree.name(), "add");
//! assert_eq!(tree.repr(), "1 + 2 + 3");
//! ```

pub use self::{
    ast::AstNode,
    grammar::{Grammar, ReduceAction, Rule, RuleBuilder},
    lalr::{Action, ActionTable},
    parser::{
        AstNodeFactory, DefaultNodeFactory, GrammarError, GrammarResult, ParseError, ParseResult,
        Parser,
    },
    symbol::{Associativity, NonTerminal, Symbol},
    visitor::Visitor,
};

mod ast;
mod grammar;
mod lalr;
mod parser;
mod symbol;
mod visitor;
