use crate::{grammar::FirstSets, Rule, Symbol};
use lexalr_lexer::Terminal;

use std::{
    collections::{BTreeMap, BTreeSet, HashMap, VecDeque},
    rc::Rc,
};

/// Rule with a dot position. The lookaheads are kept next to it in an
/// [`ItemSet`], so two items with the same core compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct Item {
    pub(crate) rule: usize,
    pub(crate) dot: usize,
}

impl Item {
    fn advance(self) -> Self {
        Self {
            dot: self.dot + 1,
            ..self
        }
    }
}

pub(crate) type Lookaheads = BTreeSet<Terminal>;

/// Items of a state along with their lookaheads.
pub(crate) type ItemSet = BTreeMap<Item, Lookaheads>;

/// Canonical LALR(1) collection: one state per distinct core.
#[derive(Debug)]
pub(crate) struct Collection {
    pub(crate) closures: Vec<ItemSet>,
    pub(crate) transitions: Vec<BTreeMap<Symbol, usize>>,
}

pub(crate) struct CollectionBuilder<'a> {
    rules: &'a [Rc<Rule>],
    first: &'a FirstSets,
}

impl<'a> CollectionBuilder<'a> {
    pub(crate) fn new(rules: &'a [Rc<Rule>], first: &'a FirstSets) -> Self {
        Self { rules, first }
    }

    /// Symbol right after the dot, if any.
    pub(crate) fn next_symbol(&self, item: Item) -> Option<&'a Symbol> {
        self.rules[item.rule].symbols().get(item.dot)
    }

    /// Adds, for every item with the dot before a non-terminal `N`, the
    /// items `N → • ...` with the lookaheads that can follow `N` there.
    pub(crate) fn closure(&self, kernel: &ItemSet) -> ItemSet {
        let mut items = kernel.clone();
        let mut pending = items.keys().copied().collect::<VecDeque<_>>();

        while let Some(item) = pending.pop_front() {
            let Some(Symbol::NonTerminal(non_terminal)) = self.next_symbol(item) else {
                continue;
            };

            let rest = &self.rules[item.rule].symbols()[item.dot + 1..];
            let (mut lookaheads, nullable) = self.first.of_sequence(rest);
            if nullable {
                lookaheads.extend(items[&item].iter().cloned());
            }

            for rule in self.rules.iter().filter(|r| r.target() == non_terminal) {
                let new = Item {
                    rule: rule.id(),
                    dot: 0,
                };
                let is_new = !items.contains_key(&new);
                let existing = items.entry(new).or_default();
                let len = existing.len();
                existing.extend(lookaheads.iter().cloned());

                if is_new || existing.len() != len {
                    pending.push_back(new);
                }
            }
        }

        items
    }

    /// Kernels reached from `closure` by reading each symbol.
    fn goto_kernels(&self, closure: &ItemSet) -> BTreeMap<&'a Symbol, ItemSet> {
        let mut kernels = BTreeMap::<&Symbol, ItemSet>::new();

        for (item, lookaheads) in closure {
            if let Some(symbol) = self.next_symbol(*item) {
                kernels
                    .entry(symbol)
                    .or_default()
                    .entry(item.advance())
                    .or_default()
                    .extend(lookaheads.iter().cloned());
            }
        }

        kernels
    }

    /// Builds the collection starting from the kernel `{ start }` with an
    /// EOF lookahead. A state reached again with new lookaheads is processed
    /// again so they propagate to its successors.
    pub(crate) fn build(&self, start: Item) -> Collection {
        let mut kernels = vec![ItemSet::from([(start, Lookaheads::from([Terminal::eof()]))])];
        let mut transitions = vec![BTreeMap::new()];
        let mut cores = HashMap::from([(vec![start], 0)]);
        let mut queued = vec![true];
        let mut pending = VecDeque::from([0]);

        while let Some(state) = pending.pop_front() {
            queued[state] = false;
            let closure = self.closure(&kernels[state]);

            for (symbol, kernel) in self.goto_kernels(&closure) {
                let core = kernel.keys().copied().collect::<Vec<_>>();

                let target = match cores.get(&core) {
                    Some(&target) => {
                        if merge(&mut kernels[target], kernel) && !queued[target] {
                            queued[target] = true;
                            pending.push_back(target);
                        }
                        target
                    }
                    None => {
                        let target = kernels.len();
                        kernels.push(kernel);
                        transitions.push(BTreeMap::new());
                        cores.insert(core, target);
                        queued.push(true);
                        pending.push_back(target);
                        target
                    }
                };

                transitions[state].insert(symbol.clone(), target);
            }
        }

        Collection {
            closures: kernels.iter().map(|k| self.closure(k)).collect(),
            transitions,
        }
    }
}

/// Adds the lookaheads of `from` to `into`. Returns whether `into` grew.
fn merge(into: &mut ItemSet, from: ItemSet) -> bool {
    let mut grew = false;

    for (item, lookaheads) in from {
        let existing = into.entry(item).or_default();
        let len = existing.len();
        existing.extend(lookaheads);
        grew |= existing.len() != len;
    }

    grew
}

#[cfg(test)]
mod tests {
    use super::{CollectionBuilder, Item};
    use crate::{grammar::FirstSets, symbols, Grammar, NonTerminal, Rule};
    use lexalr_lexer::Terminal;

    use std::{collections::BTreeSet, rc::Rc};

    /// Rules of `S → N`, `N → V '=' E | E`, `E → V`, `V → 'x' | '*' E`
    /// followed by the augmented rule `S' → S`.
    fn rules() -> Vec<Rc<Rule>> {
        let mut grammar = Grammar::new();
        let (s, n, e, v) = (
            NonTerminal::new("S"),
            NonTerminal::new("N"),
            NonTerminal::new("E"),
            NonTerminal::new("V"),
        );
        let (x, eq, star) = (Terminal::from("x"), Terminal::from("="), Terminal::from("*"));

        grammar.add_rule(&s, symbols![n]);
        grammar.add_rule(&n, symbols![v, eq, e]);
        grammar.add_rule(&n, symbols![e]);
        grammar.add_rule(&e, symbols![v]);
        grammar.add_rule(&v, symbols![x]);
        grammar.add_rule(&v, symbols![star, e]);
        grammar.add_rule(&NonTerminal::new("S'"), symbols![s]);

        grammar.rules().to_vec()
    }

    #[test]
    fn closure_lookaheads() {
        let rules = rules();
        let first = FirstSets::new(&rules);
        let builder = CollectionBuilder::new(&rules, &first);

        let collection = builder.build(Item { rule: 6, dot: 0 });
        let start = &collection.closures[0];

        // every rule starts in the initial state
        assert_eq!(start.len(), 7);

        // V → • 'x' can be followed by '=' (from N → V '=' E) or EOF
        let lookaheads = &start[&Item { rule: 4, dot: 0 }];
        assert_eq!(
            *lookaheads,
            BTreeSet::from([Terminal::from("="), Terminal::eof()])
        );
    }

    #[test]
    fn merged_states() {
        let rules = rules();
        let first = FirstSets::new(&rules);
        let collection = CollectionBuilder::new(&rules, &first).build(Item { rule: 6, dot: 0 });

        // the 10 states of the textbook automaton, plus one for S → N •
        assert_eq!(collection.closures.len(), 11);

        // E → V • is reached from '*' and from '=' with merged lookaheads
        let reduce_e = collection
            .closures
            .iter()
            .find(|c| c.len() == 1 && c.contains_key(&Item { rule: 3, dot: 1 }))
            .expect("state with E → V •");
        assert_eq!(
            reduce_e[&Item { rule: 3, dot: 1 }],
            BTreeSet::from([Terminal::from("="), Terminal::eof()])
        );
    }
}
