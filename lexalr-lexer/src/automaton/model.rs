use super::StateId;
use crate::CharConstraint;

use std::collections::{BTreeSet, VecDeque};

/// Finite-state machine over characters.
///
/// States live in an arena and refer to each other by [`StateId`]. Cycles are
/// allowed; every traversal keeps track of the visited states.
#[derive(Debug, Clone)]
pub struct Automaton {
    pub(super) start_state: StateId,
    pub(super) states: Vec<State>,
}

/// A state of an [`Automaton`].
///
/// Note (state equality): states are only created by the
/// [`AutomatonBuilder`](super::AutomatonBuilder) and ids are unique within one
/// automaton, so equality only looks at the id.
#[derive(Debug, Clone)]
pub struct State {
    pub(super) id: StateId,
    pub(super) fin: bool,
    pub(super) transitions: Vec<Transition>,
}

/// Edge between two states.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Transition {
    pub(super) guard: Guard,
    pub(super) target: StateId,
}

/// Condition under which a [`Transition`] can be taken.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Guard {
    /// Consumes one character accepted by the constraint.
    Char(CharConstraint),
    /// Unconditional edge that does not consume input.
    Epsilon,
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for State {}

impl Automaton {
    /// An automaton with a single non-final state. It never accepts.
    pub fn rejecting() -> Self {
        Self {
            start_state: 0,
            states: vec![State {
                id: 0,
                fin: false,
                transitions: Vec::new(),
            }],
        }
    }

    pub fn start_state(&self) -> StateId {
        self.start_state
    }

    /// Returns the state with the given id.
    ///
    /// # Panics
    ///
    /// When the [`StateId`] does not exist in the automaton.
    pub fn state(&self, id: StateId) -> &State {
        self.states
            .get(id)
            .expect("requested state does not exist")
    }

    pub fn states(&self) -> impl Iterator<Item = &State> + '_ {
        self.states.iter()
    }

    pub fn final_states(&self) -> impl Iterator<Item = &State> + '_ {
        self.states.iter().filter(|s| s.fin)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Depth-first walk over the states reachable from the start state, in
    /// visiting order.
    pub fn reachable(&self) -> Vec<StateId> {
        let mut visited = BTreeSet::new();
        let mut order = Vec::new();
        let mut pending = vec![self.start_state];

        while let Some(id) = pending.pop() {
            if !visited.insert(id) {
                continue;
            }
            order.push(id);

            // reversed so the first transition is explored first
            pending.extend(self.state(id).transitions.iter().rev().map(|t| t.target));
        }

        order
    }

    /// States reachable from `states` through epsilon transitions only,
    /// including `states` themselves.
    pub(crate) fn eps_closure(&self, states: impl IntoIterator<Item = StateId>) -> BTreeSet<StateId> {
        let mut result: BTreeSet<StateId> = BTreeSet::new();
        let mut not_visited: VecDeque<StateId> = VecDeque::new();

        for id in states {
            if result.insert(id) {
                not_visited.push_back(id);
            }
        }

        while let Some(id) = not_visited.pop_front() {
            for transition in self.state(id).transitions.iter() {
                if transition.guard == Guard::Epsilon && result.insert(transition.target) {
                    not_visited.push_back(transition.target);
                }
            }
        }

        result
    }

    /// Whether the automaton accepts the empty input.
    pub fn accepts_empty(&self) -> bool {
        self.eps_closure([self.start_state])
            .into_iter()
            .any(|id| self.state(id).fin)
    }

    /// Whether the automaton accepts the whole of `input`.
    pub fn matches(&self, input: &str) -> bool {
        let mut sim = self.simulator();
        input.chars().all(|ch| sim.feed(ch)) && sim.is_accepting()
    }
}

impl State {
    pub fn id(&self) -> StateId {
        self.id
    }

    pub fn is_final(&self) -> bool {
        self.fin
    }

    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }
}

impl Transition {
    pub fn guard(&self) -> &Guard {
        &self.guard
    }

    pub fn target(&self) -> StateId {
        self.target
    }

    /// Whether the transition can be taken while consuming `ch`.
    pub(crate) fn accepts(&self, ch: char) -> bool {
        match &self.guard {
            Guard::Char(constraint) => constraint.apply(ch),
            Guard::Epsilon => false,
        }
    }
}

impl std::fmt::Display for Guard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Guard::Char(constraint) => write!(f, "{}", constraint),
            Guard::Epsilon => write!(f, "ε"),
        }
    }
}
