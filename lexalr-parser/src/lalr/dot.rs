use super::{item::Item, ActionTable};

impl ActionTable {
    /// Converts the LALR(1) automaton to the graphviz dot format. Every state
    /// lists its items with their lookaheads.
    pub fn to_dot(&self) -> String {
        let states = self
            .collection
            .closures
            .iter()
            .enumerate()
            .map(|(state, closure)| {
                let items = closure
                    .iter()
                    .map(|(item, lookaheads)| {
                        let lookaheads = lookaheads
                            .iter()
                            .map(ToString::to_string)
                            .collect::<Vec<_>>()
                            .join(" ");
                        format!("{}, {}", self.item_label(*item), lookaheads)
                    })
                    .collect::<Vec<_>>();

                format!(
                    "\t{} [label = \"{}\\n{}\"];",
                    state,
                    state,
                    escape(&items.join("\n"))
                )
            })
            .collect::<Vec<_>>()
            .join("\n");

        let edges = self
            .collection
            .transitions
            .iter()
            .enumerate()
            .flat_map(|(state, transitions)| {
                transitions.iter().map(move |(symbol, target)| {
                    format!(
                        "\t{} -> {} [label = \"{}\"];",
                        state,
                        target,
                        escape(&symbol.to_string())
                    )
                })
            })
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "digraph lalr {{\n\
                \tnode [shape = box];\n\
            \n\
                {}\n\
            \n\
                {}\n\
            }}",
            states, edges
        )
    }

    fn item_label(&self, item: Item) -> String {
        let rule = &self.rules[item.rule];
        let mut label = format!("{} →", rule.target());

        for (i, symbol) in rule.symbols().iter().enumerate() {
            if i == item.dot {
                label.push_str(" •");
            }
            label.push_str(&format!(" {}", symbol));
        }
        if item.dot == rule.len() {
            label.push_str(" •");
        }

        label
    }
}

fn escape(label: &str) -> String {
    label
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\l")
}

#[cfg(test)]
mod tests {
    use crate::{symbols, Grammar, NonTerminal};
    use lexalr_lexer::Terminal;

    #[test]
    fn dot_lists_items_and_transitions() {
        let mut grammar = Grammar::new();
        let l = NonTerminal::new("L");
        let (comma, quote) = (Terminal::from(","), Terminal::from("\""));

        grammar.add_rule(&l, symbols![l, comma, quote]);
        grammar.add_rule(&l, symbols![quote]);

        let dot = grammar.action_table(&l, false).unwrap().to_dot();
        assert!(dot.starts_with("digraph lalr {"));
        assert!(dot.contains("L' → • L, EOF"));
        assert!(dot.contains("L → • '\\\"', ',' EOF"));
        assert!(dot.contains("0 -> 2 [label = \"L\"];"));
    }
}
