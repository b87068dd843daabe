use super::Rule;
use crate::{NonTerminal, Symbol};
use lexalr_lexer::Terminal;

use std::{
    collections::{BTreeSet, HashMap, HashSet},
    rc::Rc,
};

/// FIRST sets and nullability of every non-terminal of a rule set.
#[derive(Debug, Default)]
pub(crate) struct FirstSets {
    first: HashMap<NonTerminal, BTreeSet<Terminal>>,
    nullable: HashSet<NonTerminal>,
}

impl FirstSets {
    /// Fixed point over all rules. Every round only adds terminals (or
    /// nullability) from a finite universe, so it terminates.
    pub(crate) fn new(rules: &[Rc<Rule>]) -> Self {
        let mut sets = Self::default();
        let mut changed = true;

        while changed {
            changed = false;

            for rule in rules {
                let (terminals, nullable) = sets.of_sequence(rule.symbols());

                let entry = sets.first.entry(rule.target().clone()).or_default();
                let len = entry.len();
                entry.extend(terminals);
                changed |= len != entry.len();

                if nullable {
                    changed |= sets.nullable.insert(rule.target().clone());
                }
            }
        }

        sets
    }

    pub(crate) fn is_nullable(&self, non_terminal: &NonTerminal) -> bool {
        self.nullable.contains(non_terminal)
    }

    /// Terminals that can start `symbols`, and whether `symbols` derives the
    /// empty string. Terminals of a symbol are only included while every
    /// symbol before it is nullable.
    pub(crate) fn of_sequence(&self, symbols: &[Symbol]) -> (BTreeSet<Terminal>, bool) {
        let mut result = BTreeSet::new();

        for symbol in symbols {
            match symbol {
                Symbol::Terminal(t) => {
                    result.insert(t.clone());
                    return (result, false);
                }
                Symbol::NonTerminal(nt) => {
                    if let Some(first) = self.first.get(nt) {
                        result.extend(first.iter().cloned());
                    }

                    if !self.is_nullable(nt) {
                        return (result, false);
                    }
                }
                Symbol::Epsilon => {}
            }
        }

        (result, true)
    }
}
