use super::{model::Automaton, StateId};

use std::collections::BTreeSet;

/// Runs an [`Automaton`] over a stream of characters.
///
/// The simulator tracks the set of states the automaton can be in, so
/// automatons with epsilon transitions or overlapping guards are handled.
#[derive(Debug, Clone)]
pub struct Simulator<'a> {
    automaton: &'a Automaton,
    current: BTreeSet<StateId>,
}

impl Automaton {
    /// Creates a [`Simulator`] positioned at the start state.
    pub fn simulator(&self) -> Simulator<'_> {
        Simulator {
            automaton: self,
            current: self.eps_closure([self.start_state]),
        }
    }
}

impl Simulator<'_> {
    /// Whether at least one active state has a transition accepting `ch`.
    pub fn can_feed(&self, ch: char) -> bool {
        self.current.iter().any(|id| {
            self.automaton
                .state(*id)
                .transitions
                .iter()
                .any(|t| t.accepts(ch))
        })
    }

    /// Consumes `ch`. Returns whether the automaton is still alive.
    pub fn feed(&mut self, ch: char) -> bool {
        let automaton = self.automaton;
        let next = self
            .current
            .iter()
            .flat_map(|id| {
                automaton
                    .state(*id)
                    .transitions
                    .iter()
                    .filter(move |t| t.accepts(ch))
                    .map(|t| t.target)
            })
            .collect::<Vec<_>>();

        self.current = automaton.eps_closure(next);
        !self.current.is_empty()
    }

    pub fn is_accepting(&self) -> bool {
        self.current.iter().any(|id| self.automaton.state(*id).fin)
    }

    pub fn is_dead(&self) -> bool {
        self.current.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use crate::{AutomatonBuilder, CharConstraint};

    #[test]
    fn epsilon_closure_is_followed() {
        let mut builder = AutomatonBuilder::new();
        let init = builder.initial_state();
        let middle = builder.new_non_final_state();
        let fin = builder.new_final_state();
        builder.add_epsilon_transition(init, middle);
        builder.add_transition(middle, CharConstraint::equals('a'), fin);
        builder.add_epsilon_transition(init, fin);

        let automaton = builder.build();
        let mut sim = automaton.simulator();
        assert!(sim.is_accepting());
        assert!(sim.can_feed('a'));
        assert!(sim.feed('a'));
        assert!(sim.is_accepting());
        assert!(!sim.feed('a'));
        assert!(sim.is_dead());
    }

    #[test]
    fn overlapping_guards() {
        // 'ab' | 'ac' spliced into a single start state
        let mut builder = AutomatonBuilder::new();
        let init = builder.initial_state();
        let (a1, a2) = (builder.new_non_final_state(), builder.new_non_final_state());
        let fin = builder.new_final_state();
        builder.add_transition(init, CharConstraint::equals('a'), a1);
        builder.add_transition(init, CharConstraint::equals('a'), a2);
        builder.add_transition(a1, CharConstraint::equals('b'), fin);
        builder.add_transition(a2, CharConstraint::equals('c'), fin);

        let automaton = builder.build();
        assert!(automaton.matches("ab"));
        assert!(automaton.matches("ac"));
        assert!(!automaton.matches("a"));
    }
}
