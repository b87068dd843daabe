use super::{
    model::{Automaton, Guard, State, Transition},
    StateId,
};
use crate::CharConstraint;

use std::collections::BTreeMap;

type EdgeId = usize;

/// Builder struct for the [`Automaton`].
///
/// Edges are stored in their own arena and every state keeps the ids of its
/// outgoing and incoming edges. Moving all the edges entering or leaving a
/// state to another state therefore only touches those edges, which is what
/// the regex compiler relies on when splicing fragments together.
#[derive(Debug, Clone)]
pub struct AutomatonBuilder {
    start_state: StateId,
    states: Vec<BuilderState>,
    edges: Vec<Edge>,
}

#[derive(Debug, Clone, Default)]
struct BuilderState {
    fin: bool,
    outgoing: Vec<EdgeId>,
    incoming: Vec<EdgeId>,
}

#[derive(Debug, Clone)]
struct Edge {
    source: StateId,
    target: StateId,
    guard: Guard,
}

impl Default for AutomatonBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AutomatonBuilder {
    /// Creates a builder with a single, non-final initial state.
    pub fn new() -> Self {
        Self {
            start_state: 0,
            states: vec![BuilderState::default()],
            edges: Vec::new(),
        }
    }

    pub fn initial_state(&self) -> StateId {
        self.start_state
    }

    /// Makes another state the initial state.
    ///
    /// # Panics
    ///
    /// When the state does not exist.
    pub fn set_initial_state(&mut self, id: StateId) {
        assert!(id < self.states.len(), "initial state does not exist");
        self.start_state = id;
    }

    pub fn new_non_final_state(&mut self) -> StateId {
        self.states.push(BuilderState::default());
        self.states.len() - 1
    }

    pub fn new_final_state(&mut self) -> StateId {
        let id = self.new_non_final_state();
        self.states[id].fin = true;
        id
    }

    /// # Panics
    ///
    /// When the state does not exist.
    pub fn set_final(&mut self, id: StateId, fin: bool) {
        self.get_state_mut(id).fin = fin;
    }

    pub fn is_final(&self, id: StateId) -> bool {
        self.states.get(id).is_some_and(|s| s.fin)
    }

    /// Adds a transition consuming one character accepted by `constraint`.
    ///
    /// # Panics
    ///
    /// When the source state does not exist. Dangling destinations are only
    /// detected when the automaton is built.
    pub fn add_transition(&mut self, src: StateId, constraint: CharConstraint, dest: StateId) {
        self.add_edge(src, Guard::Char(constraint), dest);
    }

    /// Adds a transition that can be taken without consuming input.
    ///
    /// # Panics
    ///
    /// When the source state does not exist.
    pub fn add_epsilon_transition(&mut self, src: StateId, dest: StateId) {
        self.add_edge(src, Guard::Epsilon, dest);
    }

    fn add_edge(&mut self, source: StateId, guard: Guard, target: StateId) {
        let id = self.edges.len();
        self.edges.push(Edge {
            source,
            target,
            guard,
        });
        self.get_state_mut(source).outgoing.push(id);
        if let Some(target) = self.states.get_mut(target) {
            target.incoming.push(id);
        }
    }

    /// Number of transitions entering the state.
    pub fn incoming_count(&self, id: StateId) -> usize {
        self.states.get(id).map_or(0, |s| s.incoming.len())
    }

    /// Number of transitions leaving the state.
    pub fn outgoing_count(&self, id: StateId) -> usize {
        self.states.get(id).map_or(0, |s| s.outgoing.len())
    }

    /// Every transition that used to enter `from` now enters `to`.
    ///
    /// # Panics
    ///
    /// When one of the states does not exist.
    pub fn retarget_incoming(&mut self, from: StateId, to: StateId) {
        if from == to {
            return;
        }
        let moved = std::mem::take(&mut self.get_state_mut(from).incoming);
        for edge in moved.iter() {
            self.edges[*edge].target = to;
        }
        self.get_state_mut(to).incoming.extend(moved);
    }

    /// Every transition that used to leave `from` now leaves `to`.
    ///
    /// # Panics
    ///
    /// When one of the states does not exist.
    pub fn move_outgoing(&mut self, from: StateId, to: StateId) {
        if from == to {
            return;
        }
        let moved = std::mem::take(&mut self.get_state_mut(from).outgoing);
        for edge in moved.iter() {
            self.edges[*edge].source = to;
        }
        self.get_state_mut(to).outgoing.extend(moved);
    }

    /// Returns a mutable reference to the state.
    ///
    /// # Panics
    ///
    /// When the [`StateId`] does not exist.
    fn get_state_mut(&mut self, id: StateId) -> &mut BuilderState {
        self.states
            .get_mut(id)
            .expect("requested state does not exist")
    }

    /// Builds the [`Automaton`]. States that cannot be reached from the
    /// initial state are dropped and the remaining ones are renumbered in
    /// depth-first order, the initial state becoming state `0`.
    ///
    /// # Panics
    ///
    /// When a transition points to a state that does not exist.
    pub fn build(self) -> Automaton {
        if self.edges.iter().any(|e| e.target >= self.states.len()) {
            panic!("one or more destination states found that do not exist");
        }

        let mut renumbered: BTreeMap<StateId, StateId> = BTreeMap::new();
        let mut order = Vec::new();
        let mut pending = vec![self.start_state];

        while let Some(id) = pending.pop() {
            if renumbered.contains_key(&id) {
                continue;
            }
            renumbered.insert(id, order.len());
            order.push(id);
            pending.extend(
                self.states[id]
                    .outgoing
                    .iter()
                    .rev()
                    .map(|edge| self.edges[*edge].target),
            );
        }

        let states = order
            .iter()
            .enumerate()
            .map(|(new_id, old_id)| State {
                id: new_id,
                fin: self.states[*old_id].fin,
                transitions: self.states[*old_id]
                    .outgoing
                    .iter()
                    .map(|edge| {
                        let Edge { target, guard, .. } = &self.edges[*edge];
                        Transition {
                            guard: guard.clone(),
                            target: renumbered[target],
                        }
                    })
                    .collect(),
            })
            .collect();

        Automaton {
            start_state: 0,
            states,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::AutomatonBuilder;
    use crate::CharConstraint;

    #[test]
    fn build_drops_unreachable_states() {
        let mut builder = AutomatonBuilder::new();
        let init = builder.initial_state();
        let fin = builder.new_final_state();
        let orphan = builder.new_final_state();
        builder.add_transition(init, CharConstraint::equals('a'), fin);
        builder.add_transition(orphan, CharConstraint::equals('b'), fin);

        let automaton = builder.build();
        assert_eq!(automaton.len(), 2);
        assert_eq!(automaton.final_states().count(), 1);
        assert!(automaton.matches("a"));
        assert!(!automaton.matches("b"));
    }

    #[test]
    #[should_panic(expected = "one or more destination states found that do not exist")]
    fn dangling_transition() {
        let mut builder = AutomatonBuilder::new();
        let init = builder.initial_state();
        builder.add_transition(init, CharConstraint::any(), 42);
        builder.build();
    }

    #[test]
    fn retarget_and_move() {
        let mut builder = AutomatonBuilder::new();
        let init = builder.initial_state();
        let a = builder.new_non_final_state();
        let b = builder.new_non_final_state();
        let fin = builder.new_final_state();
        builder.add_transition(init, CharConstraint::equals('x'), a);
        builder.add_transition(b, CharConstraint::equals('y'), fin);

        // merge `b` into `a`
        builder.retarget_incoming(b, a);
        builder.move_outgoing(b, a);

        assert_eq!(builder.incoming_count(a), 1);
        assert_eq!(builder.outgoing_count(a), 1);
        assert_eq!(builder.outgoing_count(b), 0);

        let automaton = builder.build();
        assert!(automaton.matches("xy"));
        assert_eq!(automaton.len(), 3);
    }

    #[test]
    fn cycles_are_walked_once() {
        let mut builder = AutomatonBuilder::new();
        let init = builder.initial_state();
        let fin = builder.new_final_state();
        builder.add_transition(init, CharConstraint::equals('a'), fin);
        builder.add_transition(fin, CharConstraint::equals('a'), fin);
        builder.add_transition(fin, CharConstraint::equals('b'), init);

        let automaton = builder.build();
        assert_eq!(automaton.reachable(), vec![0, 1]);
        assert!(automaton.matches("aaaba"));
        assert!(!automaton.matches("aab"));
    }
}
