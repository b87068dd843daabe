use super::model::{Automaton, State};

impl std::fmt::Display for Automaton {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_dot())
    }
}

impl Automaton {
    /// Converts the automaton to the [graphviz](https://graphviz.org/docs/layouts/dot/)
    /// dot language format.
    pub fn to_dot(&self) -> String {
        let final_dot = format!(
            "node [shape = doublecircle]; {};",
            self.final_states()
                .map(|State { id, .. }| id.to_string())
                .collect::<Vec<String>>()
                .join(" ")
        );

        format!(
            "digraph automaton {{\n\
                \trankdir = LR;\n\
            \n\
                \t// final states\n\
                \t{}\n\
                \tnode [shape = circle]; {};\n\
            \n\
                {}\n\
            }}",
            final_dot,
            self.start_state,
            self.transition_dot()
                .map(|l| format!("\t{}", l))
                .collect::<Vec<String>>()
                .join("\n")
        )
    }

    /// Transitions of the reachable states, one dot edge per line.
    fn transition_dot(&self) -> impl Iterator<Item = String> + '_ {
        self.reachable().into_iter().flat_map(move |id| {
            self.state(id).transitions().iter().map(move |t| {
                format!(
                    "{} -> {} [label = \"{}\"];",
                    id,
                    t.target(),
                    t.guard().to_string().replace('"', "\\\"")
                )
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::{AutomatonBuilder, CharConstraint};

    #[test]
    fn dot_lists_final_states_and_edges() {
        let mut builder = AutomatonBuilder::new();
        let init = builder.initial_state();
        let fin = builder.new_final_state();
        builder.add_transition(init, CharConstraint::equals('a'), fin);
        builder.add_epsilon_transition(fin, init);

        let dot = builder.build().to_dot();
        assert!(dot.starts_with("digraph automaton {"));
        assert!(dot.contains("node [shape = doublecircle]; 1;"));
        assert!(dot.contains("0 -> 1 [label = \"c == 'a'\"];"));
        assert!(dot.contains("1 -> 0 [label = \"ε\"];"));
    }
}
