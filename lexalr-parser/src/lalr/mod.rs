//! LALR(1) table construction.
//!
//! The canonical collection is built from LR(1) items whose states are merged
//! as soon as their cores (rule and dot position) match. Complete items
//! reduce on their lookaheads; items before a terminal shift. Conflicts are
//! settled by the precedence declarations of the [`Grammar`] or reported as
//! a [`GrammarError`].

use self::{
    conflict::{Candidates, Resolver},
    item::{Collection, CollectionBuilder, Item},
};
use crate::{grammar::FirstSets, Grammar, GrammarError, GrammarResult, NonTerminal, Rule, Symbol};
use lexalr_lexer::Terminal;

use std::{
    collections::{BTreeMap, BTreeSet},
    rc::Rc,
};

use tracing::debug;

mod conflict;
mod dot;
mod item;

/// Entry of the ACTION table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Consume the token and go to the state.
    Shift(usize),
    /// Reduce by the rule with the given id.
    Reduce(usize),
    /// The target was recognized.
    Accept,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Shift(state) => write!(f, "s{}", state),
            Action::Reduce(rule) => write!(f, "r{}", rule),
            Action::Accept => write!(f, "acc"),
        }
    }
}

/// ACTION and GOTO tables of a grammar for one target.
///
/// A missing ACTION entry is a syntax error.
pub struct ActionTable {
    target: NonTerminal,
    /// Rules of the grammar when the table was built, followed by the
    /// augmented start rule.
    rules: Vec<Rc<Rule>>,
    terminals: Vec<Terminal>,
    actions: Vec<BTreeMap<Terminal, Action>>,
    gotos: Vec<BTreeMap<NonTerminal, usize>>,
    collection: Collection,
}

impl ActionTable {
    /// Builds the table producing `target`.
    ///
    /// # Errors
    ///
    /// When the grammar has no rules, nothing derives `target`, a reachable
    /// non-terminal has no rules, or a conflict is left unresolved.
    pub(crate) fn build(grammar: &Grammar, target: &NonTerminal) -> GrammarResult<Self> {
        if grammar.rules().is_empty() {
            return Err(GrammarError::NoRules);
        }
        if grammar.rules_for(target).next().is_none() {
            return Err(GrammarError::UnknownTarget(target.clone()));
        }

        let mut rules = grammar.rules().to_vec();
        let start = rules.len();
        rules.push(Rc::new(Rule::new(
            start,
            augmented_target(grammar, target),
            vec![Symbol::from(target)],
        )));

        let first = FirstSets::new(&rules);
        let builder = CollectionBuilder::new(&rules, &first);
        let collection = builder.build(Item {
            rule: start,
            dot: 0,
        });

        let resolver = Resolver::new(grammar, &rules);
        let mut actions = Vec::with_capacity(collection.closures.len());
        let mut gotos = vec![BTreeMap::new(); collection.closures.len()];

        for (state, closure) in collection.closures.iter().enumerate() {
            let transitions = &collection.transitions[state];
            let mut cells = BTreeMap::<Terminal, Candidates>::new();

            for (item, lookaheads) in closure {
                let Some(symbol) = builder.next_symbol(*item) else {
                    let action = if item.rule == start {
                        Action::Accept
                    } else {
                        Action::Reduce(item.rule)
                    };

                    for terminal in lookaheads {
                        cells.entry(terminal.clone()).or_default().push(action);
                    }
                    continue;
                };

                match symbol {
                    Symbol::Terminal(terminal) => cells
                        .entry(terminal.clone())
                        .or_default()
                        .push(Action::Shift(transitions[symbol])),
                    Symbol::NonTerminal(non_terminal) => {
                        if grammar.rules_for(non_terminal).next().is_none() {
                            return Err(GrammarError::UndefinedNonTerminal(non_terminal.clone()));
                        }
                        gotos[state].insert(non_terminal.clone(), transitions[symbol]);
                    }
                    Symbol::Epsilon => unreachable!("ε is never consumed"),
                }
            }

            actions.push(resolver.resolve_row(state, cells)?);
        }

        debug!(%target, states = actions.len(), "built LALR(1) action table");

        Ok(Self {
            target: target.clone(),
            terminals: grammar.terminals(),
            rules,
            actions,
            gotos,
            collection,
        })
    }

    /// Symbol recognized by the table.
    pub fn target(&self) -> &NonTerminal {
        &self.target
    }

    /// Number of states.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn action(&self, state: usize, terminal: &Terminal) -> Option<Action> {
        self.actions.get(state)?.get(terminal).copied()
    }

    pub fn goto(&self, state: usize, non_terminal: &NonTerminal) -> Option<usize> {
        self.gotos.get(state)?.get(non_terminal).copied()
    }

    /// Rule with the given id, as it was when the table was built.
    pub fn rule(&self, id: usize) -> Option<&Rc<Rule>> {
        self.rules().get(id)
    }

    /// Rules of the grammar, without the augmented start rule.
    pub fn rules(&self) -> &[Rc<Rule>] {
        &self.rules[..self.rules.len() - 1]
    }

    /// Terminals of the grammar, in order of first appearance.
    pub fn terminals(&self) -> &[Terminal] {
        &self.terminals
    }

    /// Terminals with an action in `state`.
    pub fn expected(&self, state: usize) -> BTreeSet<Terminal> {
        self.actions
            .get(state)
            .map(|row| row.keys().cloned().collect())
            .unwrap_or_default()
    }
}

impl std::fmt::Display for ActionTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (state, (actions, gotos)) in self.actions.iter().zip(&self.gotos).enumerate() {
            let actions = actions
                .iter()
                .map(|(t, a)| format!("{} {}", t, a))
                .collect::<Vec<_>>()
                .join(", ");
            let gotos = gotos
                .iter()
                .map(|(nt, s)| format!("{} {}", nt, s))
                .collect::<Vec<_>>()
                .join(", ");

            writeln!(f, "{:>4} | {} | {}", state, actions, gotos)?;
        }

        Ok(())
    }
}

/// `target'`, primed again for as long as the grammar already uses the name.
fn augmented_target(grammar: &Grammar, target: &NonTerminal) -> NonTerminal {
    let used = grammar.non_terminals();
    let mut name = format!("{}'", target);

    while used.iter().any(|non_terminal| non_terminal.name() == name) {
        name.push('\'');
    }

    NonTerminal::new(name)
}

impl std::fmt::Debug for ActionTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionTable")
            .field("target", &self.target)
            .field("actions", &self.actions)
            .field("gotos", &self.gotos)
            .finish()
    }
}
