pub use self::{
    builder::AutomatonBuilder,
    model::{Automaton, Guard, State, Transition},
    simulate::Simulator,
};

pub type StateId = usize;

mod builder;
mod dot;
mod model;
mod simulate;
