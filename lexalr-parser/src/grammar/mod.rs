pub use self::rule::{ReduceAction, Rule, RuleBuilder};

pub(crate) use self::first::FirstSets;
use crate::{
    lalr::ActionTable, AstNode, Associativity, GrammarError, GrammarResult, NonTerminal, Parser,
    Symbol,
};
use lexalr_lexer::Terminal;

use std::{
    cell::RefCell,
    collections::{BTreeSet, HashMap},
    rc::Rc,
};

use tracing::debug;

mod first;
mod rule;
mod sugar;

/// Mutable collection of [`Rule`]s along with the precedence and
/// associativity declarations used to resolve conflicts.
///
/// The first rule added defines the parse target, unless
/// [`set_target_rule`](Self::set_target_rule) picks another one.
#[derive(Default)]
pub struct Grammar {
    rules: Vec<Rc<Rule>>,
    target_rule: Option<usize>,
    precedences: HashMap<Symbol, i32>,
    associativities: HashMap<Symbol, Associativity>,
    /// Action tables built so far, per target. Any mutation of the grammar
    /// clears it.
    cache: RefCell<HashMap<NonTerminal, Rc<ActionTable>>>,
}

impl Grammar {
    pub fn new() -> Self {
        Self::default()
    }

    fn invalidate(&mut self) {
        self.cache.get_mut().clear();
    }

    /// Adds the rule `target → clause`. An empty clause (or a clause of
    /// epsilons only) becomes the ε clause.
    pub fn add_rule(
        &mut self,
        target: &NonTerminal,
        clause: impl IntoIterator<Item = Symbol>,
    ) -> RuleBuilder<'_> {
        let mut clause = clause
            .into_iter()
            .filter(|s| *s != Symbol::Epsilon)
            .collect::<Vec<_>>();

        if clause.is_empty() {
            clause.push(Symbol::Epsilon);
        }

        let id = self.rules.len();
        self.rules.push(Rc::new(Rule::new(id, target.clone(), clause)));
        self.invalidate();

        RuleBuilder::new(self, id)
    }

    pub(crate) fn rule_mut(&mut self, id: usize) -> &mut Rule {
        self.invalidate();
        Rc::make_mut(&mut self.rules[id])
    }

    pub fn rules(&self) -> &[Rc<Rule>] {
        &self.rules
    }

    pub fn rule(&self, id: usize) -> Option<&Rc<Rule>> {
        self.rules.get(id)
    }

    /// Rules whose target is `non_terminal`, in insertion order.
    pub fn rules_for<'a>(
        &'a self,
        non_terminal: &'a NonTerminal,
    ) -> impl Iterator<Item = &'a Rc<Rule>> + 'a {
        self.rules.iter().filter(move |r| r.target() == non_terminal)
    }

    /// Terminals used by the rules, in order of first appearance.
    pub fn terminals(&self) -> Vec<Terminal> {
        let mut terminals = Vec::new();

        for terminal in self
            .rules
            .iter()
            .flat_map(|r| r.symbols())
            .filter_map(Symbol::as_terminal)
        {
            if !terminals.contains(terminal) {
                terminals.push(terminal.clone());
            }
        }

        terminals
    }

    /// Non-terminals defined or used by the rules, in order of first
    /// appearance.
    pub fn non_terminals(&self) -> Vec<NonTerminal> {
        let mut non_terminals = Vec::new();

        for rule in self.rules.iter() {
            let used = rule.symbols().iter().filter_map(Symbol::as_non_terminal);

            for non_terminal in std::iter::once(rule.target()).chain(used) {
                if !non_terminals.contains(non_terminal) {
                    non_terminals.push(non_terminal.clone());
                }
            }
        }

        non_terminals
    }

    /// Declares the precedence of `symbols`. Higher levels bind tighter.
    pub fn set_precedence_level(
        &mut self,
        level: i32,
        symbols: impl IntoIterator<Item = Symbol>,
    ) -> &mut Self {
        self.precedences
            .extend(symbols.into_iter().map(|symbol| (symbol, level)));
        self.invalidate();
        self
    }

    pub fn set_associativity(
        &mut self,
        symbol: impl Into<Symbol>,
        associativity: Associativity,
    ) -> &mut Self {
        self.associativities.insert(symbol.into(), associativity);
        self.invalidate();
        self
    }

    /// Parses will produce the target of rule `id` instead of the target of
    /// the first rule.
    ///
    /// # Panics
    ///
    /// When no rule has the given id.
    pub fn set_target_rule(&mut self, id: usize) -> &mut Self {
        assert!(id < self.rules.len(), "rule {} does not exist", id);
        self.target_rule = Some(id);
        self
    }

    /// Symbol produced by [`create_parser`](Self::create_parser).
    pub fn target(&self) -> GrammarResult<NonTerminal> {
        self.rules
            .get(self.target_rule.unwrap_or(0))
            .map(|r| r.target().clone())
            .ok_or(GrammarError::NoRules)
    }

    /// Explicit precedence of `symbol`. A non-terminal without one inherits
    /// the precedence shared by all its single symbol rules, as produced by
    /// [`one_of`](Self::one_of).
    pub fn symbol_precedence(&self, symbol: &Symbol) -> Option<i32> {
        if let Some(level) = self.precedences.get(symbol) {
            return Some(*level);
        }

        self.inherited(symbol, |s| self.precedences.get(s).copied())
    }

    pub fn symbol_associativity(&self, symbol: &Symbol) -> Option<Associativity> {
        if let Some(associativity) = self.associativities.get(symbol) {
            return Some(*associativity);
        }

        self.inherited(symbol, |s| self.associativities.get(s).copied())
    }

    fn inherited<T: PartialEq>(
        &self,
        symbol: &Symbol,
        declared: impl Fn(&Symbol) -> Option<T>,
    ) -> Option<T> {
        let non_terminal = symbol.as_non_terminal()?;
        let mut shared = None;

        for rule in self.rules_for(non_terminal) {
            let [single] = rule.clause() else {
                return None;
            };
            let value = declared(single)?;

            match &shared {
                None => shared = Some(value),
                Some(shared) if *shared == value => {}
                Some(_) => return None,
            }
        }

        shared
    }

    /// Explicit precedence of `rule`, else the precedence of the rightmost
    /// clause symbol that has one.
    pub fn rule_precedence(&self, rule: &Rule) -> Option<i32> {
        rule.precedence().or_else(|| {
            rule.symbols()
                .iter()
                .rev()
                .find_map(|s| self.symbol_precedence(s))
        })
    }

    /// Explicit associativity of `rule`, else the associativity of the
    /// rightmost clause symbol that has one.
    pub fn rule_associativity(&self, rule: &Rule) -> Option<Associativity> {
        rule.associativity().or_else(|| {
            rule.symbols()
                .iter()
                .rev()
                .find_map(|s| self.symbol_associativity(s))
        })
    }

    /// FIRST set of `symbol`. It contains [`Symbol::Epsilon`] when the symbol
    /// derives the empty string.
    pub fn first(&self, symbol: &Symbol) -> BTreeSet<Symbol> {
        let first_sets = self.first_sets();
        let (terminals, nullable) = first_sets.of_sequence(std::slice::from_ref(symbol));

        let mut result = terminals
            .into_iter()
            .map(Symbol::Terminal)
            .collect::<BTreeSet<_>>();
        if nullable {
            result.insert(Symbol::Epsilon);
        }

        result
    }

    pub(crate) fn first_sets(&self) -> FirstSets {
        FirstSets::new(&self.rules)
    }

    /// Builds the LALR(1) [`ActionTable`] for `target`. Tables are cached per
    /// target as long as the grammar does not change.
    ///
    /// # Errors
    ///
    /// When the grammar has conflicts that are not resolved by precedence
    /// declarations, or `target` has no rules.
    pub fn action_table(
        &self,
        target: &NonTerminal,
        use_cache: bool,
    ) -> GrammarResult<Rc<ActionTable>> {
        if use_cache {
            if let Some(table) = self.cache.borrow().get(target) {
                debug!(%target, "action table cache hit");
                return Ok(Rc::clone(table));
            }
        }

        let table = Rc::new(ActionTable::build(self, target)?);

        if use_cache {
            self.cache
                .borrow_mut()
                .insert(target.clone(), Rc::clone(&table));
        }

        Ok(table)
    }

    /// Creates a [`Parser`] for the target of the grammar, reusing a cached
    /// table when possible.
    pub fn create_parser(&self) -> GrammarResult<Parser> {
        self.create_parser_for(&self.target()?, true)
    }

    pub fn create_parser_for(&self, target: &NonTerminal, use_cache: bool) -> GrammarResult<Parser> {
        Ok(Parser::new(self.action_table(target, use_cache)?))
    }
}

impl std::fmt::Debug for Grammar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Grammar")
            .field("rules", &self.rules)
            .field("target_rule", &self.target_rule)
            .field("precedences", &self.precedences)
            .field("associativities", &self.associativities)
            .finish()
    }
}

/// Reduce action replacing the leading child of a node by its own children
/// when that child was produced by `non_terminal`.
pub(crate) fn flatten_leading(non_terminal: NonTerminal) -> impl Fn(&mut AstNode) + 'static {
    move |node| {
        let Some(children) = node.children_mut() else {
            return;
        };

        let nested = matches!(
            children.first().and_then(AstNode::rule),
            Some(rule) if *rule.target() == non_terminal
        );

        if nested {
            let mut flat = children.remove(0).into_children();
            flat.append(children);
            *children = flat;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Grammar;
    use crate::{symbols, Associativity, GrammarError, NonTerminal, Symbol};
    use lexalr_lexer::Terminal;

    #[test]
    fn epsilon_clauses() {
        let mut grammar = Grammar::new();
        let a = NonTerminal::new("A");

        grammar.add_rule(&a, Vec::new());
        grammar.add_rule(&a, [Symbol::Epsilon, Symbol::Epsilon]);

        for rule in grammar.rules() {
            assert_eq!(rule.clause(), [Symbol::Epsilon]);
            assert!(rule.symbols().is_empty());
            assert!(rule.is_epsilon());
        }
    }

    #[test]
    fn symbols_in_order() {
        let mut grammar = Grammar::new();
        let (s, e) = (NonTerminal::new("S"), NonTerminal::new("E"));
        let (x, plus) = (Terminal::from("x"), Terminal::from("+"));

        grammar.add_rule(&s, symbols![e]);
        grammar.add_rule(&e, symbols![e, plus, x]);
        grammar.add_rule(&e, symbols![x]);

        assert_eq!(grammar.terminals(), [x, plus]);
        assert_eq!(grammar.non_terminals(), [s, e]);
        assert_eq!(grammar.target().unwrap(), NonTerminal::new("S"));
    }

    #[test]
    fn target_rule() {
        let mut grammar = Grammar::new();
        assert_eq!(grammar.target(), Err(GrammarError::NoRules));

        let (s, e) = (NonTerminal::new("S"), NonTerminal::new("E"));
        grammar.add_rule(&s, symbols![e]);
        let id = grammar.add_rule(&e, symbols![Terminal::from("x")]).id();
        grammar.set_target_rule(id);

        assert_eq!(grammar.target().unwrap(), e);
    }

    #[test]
    fn rule_builder() {
        let mut grammar = Grammar::new();
        let e = NonTerminal::new("E");

        grammar
            .add_rule(&e, symbols![e, Terminal::from("^"), e])
            .with_name("pow")
            .with_associativity(Associativity::Right)
            .with_precedence(30);

        let rule = &grammar.rules()[0];
        assert_eq!(rule.name(), Some("pow"));
        assert_eq!(rule.display_name(), "pow");
        assert_eq!(rule.associativity(), Some(Associativity::Right));
        assert_eq!(grammar.rule_precedence(rule), Some(30));
        assert_eq!(rule.to_string(), "E → E '^' E");
    }

    #[test]
    fn precedences() {
        let mut grammar = Grammar::new();
        let e = NonTerminal::new("E");
        let (plus, minus, times) = (Terminal::from("+"), Terminal::from("-"), Terminal::from("*"));

        let additive = grammar.one_of(symbols![plus, minus]);
        let add = grammar.add_rule(&e, symbols![e, additive, e]).id();
        let mul = grammar.add_rule(&e, symbols![e, times, e]).id();
        let num = grammar.add_rule(&e, symbols![Terminal::c_integer()]).id();

        grammar
            .set_precedence_level(10, symbols![plus, minus])
            .set_precedence_level(20, symbols![times])
            .set_associativity(&times, Associativity::Left);

        assert_eq!(grammar.symbol_precedence(&(&additive).into()), Some(10));
        assert_eq!(grammar.rule_precedence(&grammar.rules()[add]), Some(10));
        assert_eq!(grammar.rule_precedence(&grammar.rules()[mul]), Some(20));
        assert_eq!(grammar.rule_precedence(&grammar.rules()[num]), None);
        assert_eq!(
            grammar.rule_associativity(&grammar.rules()[mul]),
            Some(Associativity::Left)
        );
        assert_eq!(grammar.rule_associativity(&grammar.rules()[add]), None);

        // mixed precedences are not inherited
        grammar.set_precedence_level(11, symbols![minus]);
        assert_eq!(grammar.symbol_precedence(&(&additive).into()), None);
    }
}
