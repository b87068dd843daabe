//! Regex mini-language used by [`Terminal::regex`](crate::Terminal::regex).
//!
//! - `'hello'` matches the quoted character sequence. The usual escapes
//!   (`\n`, `\r`, `\t`, `\f`, `\0`, `\\`, `\'`, `\"`) are understood.
//! - `'a'..'z'` matches one character of the inclusive range.
//! - `.` matches any character.
//! - `x?`, `x*` and `x+` are the usual quantifiers.
//! - `x | y` matches either side. It binds tighter than concatenation, so
//!   `'a' 'b' | 'c'` is `'a' ('b' | 'c')`.
//! - Parentheses group sub expressions.
//!
//! Whitespace between tokens is ignored. An expression that matches the
//! empty string is rejected, as a terminal has to consume input.

pub use self::error::{RegexError, RegexErrorKind, RegexResult};

use self::{compiler::compile_fragment, parser::Parser};
use crate::{Automaton, AutomatonBuilder};

use tracing::trace;

mod ast;
mod compiler;
mod error;
mod parser;
mod tokenizer;


/// Compiles `pattern` into an [`Automaton`] with a single final state.
pub fn compile(pattern: &str) -> RegexResult<Automaton> {
    let expr = Parser::new(pattern).parse()?;

    if expr.is_nullable() {
        return Err(RegexError {
            kind: RegexErrorKind::MatchesEmpty,
            pos: (0, pattern.chars().count()),
        });
    }

    let mut builder = AutomatonBuilder::new();
    let fragment = compile_fragment(&mut builder, &expr);
    builder.set_initial_state(fragment.start);

    let automaton = builder.build();
    trace!(pattern, states = automaton.len(), "compiled regex");

    Ok(automaton)
}
