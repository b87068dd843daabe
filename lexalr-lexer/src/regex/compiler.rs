//! Compiles a regex [`ExprKind`] into an automaton by splicing fragments.
//!
//! Every fragment has exactly one start and one end state. The start state
//! has no incoming transitions, the end state has no outgoing transitions and
//! is the only final state of the fragment. Each operation below keeps these
//! properties, which is what makes moving whole edge lists between states
//! safe.

use super::{ast::ExprKind, tokenizer::QuantifierKind};
use crate::{automaton::StateId, AutomatonBuilder, CharConstraint};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Fragment {
    pub(crate) start: StateId,
    pub(crate) end: StateId,
}

/// Builds the fragment of `expr` inside `builder`.
pub(crate) fn compile_fragment(builder: &mut AutomatonBuilder, expr: &ExprKind) -> Fragment {
    use ExprKind::*;
    match expr {
        Sequence(chars) => sequence(builder, chars),
        Range(lo, hi) => single(builder, CharConstraint::in_range(*lo, *hi)),
        Wildcard => single(builder, CharConstraint::any()),
        Concat(exprs) => {
            let mut fragments = exprs.iter().map(|e| compile_fragment(builder, e)).collect::<Vec<_>>();
            let first = fragments.remove(0);
            fragments
                .into_iter()
                .fold(first, |lhs, rhs| concat(builder, lhs, rhs))
        }
        Alt(lhs, rhs) => {
            let lhs = compile_fragment(builder, lhs);
            let rhs = compile_fragment(builder, rhs);
            alt(builder, lhs, rhs)
        }
        Quantified(inner, quantifier) => {
            let inner = compile_fragment(builder, inner);
            match quantifier {
                QuantifierKind::QuestionMark => optional(builder, inner),
                QuantifierKind::Plus => one_or_more(builder, inner),
                QuantifierKind::Asterisk => {
                    let repeated = one_or_more(builder, inner);
                    optional(builder, repeated)
                }
            }
        }
    }
}

fn single(builder: &mut AutomatonBuilder, constraint: CharConstraint) -> Fragment {
    let start = builder.new_non_final_state();
    let end = builder.new_final_state();
    builder.add_transition(start, constraint, end);
    Fragment { start, end }
}

fn sequence(builder: &mut AutomatonBuilder, chars: &[char]) -> Fragment {
    let start = builder.new_non_final_state();
    let end = chars.iter().fold(start, |current, ch| {
        let next = builder.new_non_final_state();
        builder.add_transition(current, CharConstraint::equals(*ch), next);
        next
    });
    builder.set_final(end, true);
    Fragment { start, end }
}

/// `lhs` then `rhs`: the start of `rhs` is merged into the end of `lhs`.
fn concat(builder: &mut AutomatonBuilder, lhs: Fragment, rhs: Fragment) -> Fragment {
    builder.move_outgoing(rhs.start, lhs.end);
    builder.retarget_incoming(rhs.start, lhs.end);
    builder.set_final(lhs.end, false);

    Fragment {
        start: lhs.start,
        end: rhs.end,
    }
}

/// `lhs | rhs`: both starts are merged into a new start state and both ends
/// into a new end state.
fn alt(builder: &mut AutomatonBuilder, lhs: Fragment, rhs: Fragment) -> Fragment {
    let start = builder.new_non_final_state();
    let end = builder.new_final_state();

    for fragment in [lhs, rhs] {
        builder.move_outgoing(fragment.start, start);
        builder.retarget_incoming(fragment.end, end);
        builder.set_final(fragment.end, false);
    }

    Fragment { start, end }
}

/// `inner?`: a bypass edge from start to end.
fn optional(builder: &mut AutomatonBuilder, inner: Fragment) -> Fragment {
    builder.add_epsilon_transition(inner.start, inner.end);
    inner
}

/// `inner+`: the old end loops back to the old start; fresh start and end
/// states keep the fragment properties.
fn one_or_more(builder: &mut AutomatonBuilder, inner: Fragment) -> Fragment {
    let start = builder.new_non_final_state();
    let end = builder.new_final_state();

    builder.add_epsilon_transition(start, inner.start);
    builder.add_epsilon_transition(inner.end, inner.start);
    builder.add_epsilon_transition(inner.end, end);
    builder.set_final(inner.end, false);

    Fragment { start, end }
}
