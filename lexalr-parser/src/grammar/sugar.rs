//! Rule generating helpers. Each helper returns a fresh non-terminal whose
//! name describes the pattern (`oneOf('+', '-')`, `zeroOrMore(Stmt)`, ...),
//! so generated symbols are easy to tell apart in diagnostics. Calling a
//! helper twice with the same arguments returns the same non-terminal.

use super::{flatten_leading, Grammar};
use crate::{NonTerminal, Symbol};

fn join(symbols: &[Symbol], separator: &str) -> String {
    symbols
        .iter()
        .map(Symbol::to_string)
        .collect::<Vec<_>>()
        .join(separator)
}

impl Grammar {
    /// The non-terminal called `name`: `Ok` when it has no rules yet, `Err`
    /// when an earlier call already generated them.
    fn fresh(&self, name: String) -> Result<NonTerminal, NonTerminal> {
        let non_terminal = NonTerminal::new(name);

        let exists = self.rules_for(&non_terminal).next().is_some();
        match exists {
            true => Err(non_terminal),
            false => Ok(non_terminal),
        }
    }

    /// `T → a | b | ...`. A single symbol gets a wrapper with one rule.
    ///
    /// # Panics
    ///
    /// When no symbol is given, as `T` would derive nothing.
    pub fn one_of(&mut self, symbols: impl IntoIterator<Item = Symbol>) -> NonTerminal {
        let symbols = symbols.into_iter().collect::<Vec<_>>();
        assert!(!symbols.is_empty(), "oneOf expects at least one symbol");

        let target = match self.fresh(format!("oneOf({})", join(&symbols, ", "))) {
            Ok(target) => target,
            Err(existing) => return existing,
        };

        for symbol in symbols {
            self.add_rule(&target, [symbol]);
        }

        target
    }

    /// `T → symbols | ε`
    pub fn optional(&mut self, symbols: impl IntoIterator<Item = Symbol>) -> NonTerminal {
        let symbols = symbols.into_iter().collect::<Vec<_>>();

        let target = match self.fresh(format!("optional({})", join(&symbols, " "))) {
            Ok(target) => target,
            Err(existing) => return existing,
        };

        self.add_rule(&target, symbols);
        self.add_rule(&target, [Symbol::Epsilon]);

        target
    }

    /// `T → T symbols | ε`
    pub fn zero_or_more(&mut self, symbols: impl IntoIterator<Item = Symbol>) -> NonTerminal {
        let symbols = symbols.into_iter().collect::<Vec<_>>();

        let target = match self.fresh(format!("zeroOrMore({})", join(&symbols, " "))) {
            Ok(target) => target,
            Err(existing) => return existing,
        };

        self.add_rule(&target, std::iter::once(Symbol::from(&target)).chain(symbols));
        self.add_rule(&target, [Symbol::Epsilon]);

        target
    }

    /// `T → symbols | T symbols`
    pub fn one_or_more(&mut self, symbols: impl IntoIterator<Item = Symbol>) -> NonTerminal {
        let symbols = symbols.into_iter().collect::<Vec<_>>();

        let target = match self.fresh(format!("oneOrMore({})", join(&symbols, " "))) {
            Ok(target) => target,
            Err(existing) => return existing,
        };

        self.add_rule(&target, symbols.clone());
        self.add_rule(&target, std::iter::once(Symbol::from(&target)).chain(symbols));

        target
    }

    /// Separated list: `T → item | T separator item`. The nodes of the list
    /// are flattened, so a parsed list has the children
    /// `item (separator item)*`. With `allow_empty`, the returned
    /// non-terminal also derives the empty string.
    pub fn list_of(
        &mut self,
        item: impl Into<Symbol>,
        separator: impl Into<Symbol>,
        allow_empty: bool,
    ) -> NonTerminal {
        let (item, separator) = (item.into(), separator.into());
        let name = format!("listOf({}, {})", item, separator);

        let list = match self.fresh(name.clone()) {
            Ok(list) => {
                self.add_rule(&list, [item.clone()]);
                self.add_rule(&list, [Symbol::from(&list), separator, item])
                    .with_action(flatten_leading(list.clone()));
                list
            }
            Err(existing) => existing,
        };

        if !allow_empty {
            return list;
        }

        let target = match self.fresh(format!("optional({})", name)) {
            Ok(target) => target,
            Err(existing) => return existing,
        };

        self.add_rule(&target, [Symbol::from(&list)])
            .with_action(flatten_leading(list));
        self.add_rule(&target, [Symbol::Epsilon]);

        target
    }
}

#[cfg(test)]
mod tests {
    use crate::{symbols, Grammar, Symbol};
    use lexalr_lexer::Terminal;

    fn clauses(grammar: &Grammar) -> Vec<String> {
        grammar.rules().iter().map(|r| r.to_string()).collect()
    }

    #[test]
    fn one_of() {
        let mut grammar = Grammar::new();
        let op = grammar.one_of(symbols![Terminal::from("+"), Terminal::from("-")]);

        assert_eq!(op.name(), "oneOf('+', '-')");
        assert_eq!(clauses(&grammar), ["oneOf('+', '-') → '+'", "oneOf('+', '-') → '-'"]);

        // same arguments, same symbol, no new rules
        let again = grammar.one_of(symbols![Terminal::from("+"), Terminal::from("-")]);
        assert_eq!(op, again);
        assert_eq!(grammar.rules().len(), 2);
    }

    #[test]
    fn one_of_single_symbol() {
        let mut grammar = Grammar::new();
        let plus = grammar.one_of(symbols![Terminal::from("+")]);

        assert_eq!(plus.name(), "oneOf('+')");
        assert_eq!(clauses(&grammar), ["oneOf('+') → '+'"]);
    }

    #[test]
    #[should_panic(expected = "at least one symbol")]
    fn one_of_nothing() {
        Grammar::new().one_of(Vec::<Symbol>::new());
    }

    #[test]
    fn repetitions() {
        let mut grammar = Grammar::new();
        let b = Terminal::from("b");

        let zero = grammar.zero_or_more(symbols![b]);
        let one = grammar.one_or_more(symbols![b]);
        let opt = grammar.optional(symbols![b]);

        assert_eq!(
            clauses(&grammar),
            [
                "zeroOrMore('b') → zeroOrMore('b') 'b'",
                "zeroOrMore('b') → ε",
                "oneOrMore('b') → 'b'",
                "oneOrMore('b') → oneOrMore('b') 'b'",
                "optional('b') → 'b'",
                "optional('b') → ε",
            ]
        );
        assert!(grammar.first(&(&zero).into()).contains(&Symbol::Epsilon));
        assert!(!grammar.first(&(&one).into()).contains(&Symbol::Epsilon));
        assert!(grammar.first(&(&opt).into()).contains(&Symbol::Epsilon));
    }

    #[test]
    fn list_of() {
        let mut grammar = Grammar::new();
        let (item, comma) = (Terminal::c_identifier(), Terminal::from(","));

        let list = grammar.list_of(&item, &comma, false);
        assert_eq!(list.name(), "listOf(cIdentifier, ',')");
        assert_eq!(grammar.rules().len(), 2);
        assert!(grammar.rules()[1].action().is_some());

        let maybe = grammar.list_of(&item, &comma, true);
        assert_eq!(maybe.name(), "optional(listOf(cIdentifier, ','))");
        assert_eq!(grammar.rules().len(), 4);
    }
}
