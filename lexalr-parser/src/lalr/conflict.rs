use super::Action;
use crate::{Associativity, Grammar, GrammarError, GrammarResult, Rule, Symbol};
use lexalr_lexer::Terminal;

use std::{cmp::Ordering, collections::BTreeMap, rc::Rc};

use tracing::debug;

/// Every action proposed for one `(state, terminal)` cell.
#[derive(Debug, Default)]
pub(super) struct Candidates {
    shift: Option<usize>,
    /// Reduce and accept actions, kept sorted by rule id.
    reductions: Vec<Action>,
}

impl Candidates {
    pub(super) fn push(&mut self, action: Action) {
        match action {
            Action::Shift(state) => self.shift = Some(state),
            reduction => {
                if !self.reductions.contains(&reduction) {
                    self.reductions.push(reduction);
                }
            }
        }
    }
}

/// Settles the action cells of the table with the precedence and
/// associativity declarations of the grammar.
pub(super) struct Resolver<'a> {
    grammar: &'a Grammar,
    /// Rules of the grammar followed by the augmented start rule.
    rules: &'a [Rc<Rule>],
}

impl<'a> Resolver<'a> {
    pub(super) fn new(grammar: &'a Grammar, rules: &'a [Rc<Rule>]) -> Self {
        Self { grammar, rules }
    }

    fn rule_id(&self, action: Action) -> usize {
        match action {
            Action::Reduce(rule) => rule,
            Action::Accept => self.rules.len() - 1,
            Action::Shift(_) => unreachable!("shifts are not reductions"),
        }
    }

    fn describe(&self, action: Action) -> String {
        self.rules[self.rule_id(action)].to_string()
    }

    /// Resolves every cell of a state. Cells are only decided once all of
    /// their candidates are known.
    pub(super) fn resolve_row(
        &self,
        state: usize,
        cells: BTreeMap<Terminal, Candidates>,
    ) -> GrammarResult<BTreeMap<Terminal, Action>> {
        cells
            .into_iter()
            .map(|(terminal, candidates)| {
                let action = self.resolve(state, &terminal, candidates)?;
                Ok((terminal, action))
            })
            .collect()
    }

    fn resolve(
        &self,
        state: usize,
        terminal: &Terminal,
        mut candidates: Candidates,
    ) -> GrammarResult<Action> {
        candidates.reductions.sort_by_key(|action| self.rule_id(*action));

        match (candidates.shift, candidates.reductions.as_slice()) {
            (_, [first, second, ..]) => Err(GrammarError::ReduceReduceConflict {
                state,
                terminal: terminal.clone(),
                first: self.describe(*first),
                second: self.describe(*second),
            }),
            (Some(next), []) => Ok(Action::Shift(next)),
            (None, [reduction]) => Ok(*reduction),
            (Some(next), [Action::Reduce(rule)]) => {
                self.shift_reduce(state, terminal, Action::Shift(next), *rule)
            }
            (Some(_), [accept]) => Err(GrammarError::ShiftReduceConflict {
                state,
                terminal: terminal.clone(),
                rule: self.describe(*accept),
            }),
            (None, []) => unreachable!("cells are created with a candidate"),
        }
    }

    /// A strictly higher precedence wins; a missing precedence counts as 0
    /// as long as the other side has one. Equal precedences defer to the
    /// associativity of the rule, then to the one of the terminal.
    fn shift_reduce(
        &self,
        state: usize,
        terminal: &Terminal,
        shift: Action,
        rule_id: usize,
    ) -> GrammarResult<Action> {
        let rule = &self.rules[rule_id];
        let conflict = || GrammarError::ShiftReduceConflict {
            state,
            terminal: terminal.clone(),
            rule: rule.to_string(),
        };

        let symbol = Symbol::from(terminal);
        let (terminal_precedence, rule_precedence) = match (
            self.grammar.symbol_precedence(&symbol),
            self.grammar.rule_precedence(rule),
        ) {
            (None, None) => return Err(conflict()),
            (t, r) => (t.unwrap_or(0), r.unwrap_or(0)),
        };

        let resolved = match terminal_precedence.cmp(&rule_precedence) {
            Ordering::Greater => shift,
            Ordering::Less => Action::Reduce(rule_id),
            Ordering::Equal => match self
                .grammar
                .rule_associativity(rule)
                .or_else(|| self.grammar.symbol_associativity(&symbol))
            {
                Some(Associativity::Left) => Action::Reduce(rule_id),
                Some(Associativity::Right) => shift,
                None => return Err(conflict()),
            },
        };

        debug!(state, %terminal, %rule, ?resolved, "resolved shift-reduce conflict");
        Ok(resolved)
    }
}
