use super::Grammar;
use crate::{AstNode, Associativity, NonTerminal, Symbol};

use std::rc::Rc;

/// Called on the node built by a reduction, before it is pushed on the
/// parse stack.
pub type ReduceAction = Rc<dyn Fn(&mut AstNode)>;

/// Production `target → clause`.
#[derive(Clone)]
pub struct Rule {
    id: usize,
    target: NonTerminal,
    /// Never empty: the empty clause is `[Symbol::Epsilon]`.
    clause: Vec<Symbol>,
    name: Option<String>,
    associativity: Option<Associativity>,
    precedence: Option<i32>,
    action: Option<ReduceAction>,
}

impl Rule {
    pub(crate) fn new(id: usize, target: NonTerminal, clause: Vec<Symbol>) -> Self {
        Self {
            id,
            target,
            clause,
            name: None,
            associativity: None,
            precedence: None,
            action: None,
        }
    }

    /// Position of the rule in its [`Grammar`].
    pub fn id(&self) -> usize {
        self.id
    }

    pub fn target(&self) -> &NonTerminal {
        &self.target
    }

    /// Clause as declared. The ε clause is `[Symbol::Epsilon]`.
    pub fn clause(&self) -> &[Symbol] {
        &self.clause
    }

    /// Symbols consumed by the rule. Empty for the ε clause.
    pub fn symbols(&self) -> &[Symbol] {
        if self.is_epsilon() {
            &[]
        } else {
            &self.clause
        }
    }

    /// Number of symbols consumed by the rule.
    pub fn len(&self) -> usize {
        self.symbols().len()
    }

    pub fn is_epsilon(&self) -> bool {
        self.clause == [Symbol::Epsilon]
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The name of the rule if it has one, else the name of its target.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(self.target.name())
    }

    pub fn associativity(&self) -> Option<Associativity> {
        self.associativity
    }

    /// Explicit precedence. See [`Grammar::rule_precedence`] for the
    /// effective one.
    pub fn precedence(&self) -> Option<i32> {
        self.precedence
    }

    pub fn action(&self) -> Option<&ReduceAction> {
        self.action.as_ref()
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} →", self.target)?;
        self.clause.iter().try_for_each(|s| write!(f, " {}", s))
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{} {}", self.id, self)?;
        if let Some(name) = &self.name {
            write!(f, " ({})", name)?;
        }
        Ok(())
    }
}

/// Returned by [`Grammar::add_rule`] to configure the rule just added.
pub struct RuleBuilder<'g> {
    grammar: &'g mut Grammar,
    id: usize,
}

impl<'g> RuleBuilder<'g> {
    pub(super) fn new(grammar: &'g mut Grammar, id: usize) -> Self {
        Self { grammar, id }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    /// Name used by the [`Visitor`](crate::Visitor) and in diagnostics.
    pub fn with_name(self, name: impl Into<String>) -> Self {
        self.grammar.rule_mut(self.id).name = Some(name.into());
        self
    }

    pub fn with_associativity(self, associativity: Associativity) -> Self {
        self.grammar.rule_mut(self.id).associativity = Some(associativity);
        self
    }

    pub fn with_precedence(self, precedence: i32) -> Self {
        self.grammar.rule_mut(self.id).precedence = Some(precedence);
        self
    }

    pub fn with_action(self, action: impl Fn(&mut AstNode) + 'static) -> Self {
        self.grammar.rule_mut(self.id).action = Some(Rc::new(action));
        self
    }
}
