//! Syntax tree built by the [`Parser`](crate::Parser).

use crate::{Rule, Symbol};
use lexalr_lexer::Token;

use std::rc::Rc;

/// Node of the syntax tree. Leaves hold the shifted tokens, inner nodes the
/// rule they were reduced by.
#[derive(Clone)]
pub enum AstNode {
    Leaf(Token),
    NonLeaf {
        rule: Rc<Rule>,
        children: Vec<AstNode>,
    },
}

impl AstNode {
    pub fn leaf(token: Token) -> Self {
        AstNode::Leaf(token)
    }

    pub fn non_leaf(rule: Rc<Rule>, children: Vec<AstNode>) -> Self {
        AstNode::NonLeaf { rule, children }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, AstNode::Leaf(_))
    }

    /// Rule of an inner node.
    pub fn rule(&self) -> Option<&Rc<Rule>> {
        match self {
            AstNode::Leaf(_) => None,
            AstNode::NonLeaf { rule, .. } => Some(rule),
        }
    }

    /// Terminal of a leaf, target of the rule of an inner node.
    pub fn symbol(&self) -> Symbol {
        match self {
            AstNode::Leaf(token) => Symbol::from(&token.terminal),
            AstNode::NonLeaf { rule, .. } => Symbol::from(rule.target()),
        }
    }

    /// Name used to dispatch [`Visitor`](crate::Visitor) hooks: the rule
    /// name if it has one, else the name of the symbol.
    pub fn name(&self) -> String {
        match self {
            AstNode::Leaf(token) => token.terminal.name(),
            AstNode::NonLeaf { rule, .. } => rule.display_name().to_string(),
        }
    }

    /// Children of an inner node. Empty for leaves.
    pub fn children(&self) -> &[AstNode] {
        match self {
            AstNode::Leaf(_) => &[],
            AstNode::NonLeaf { children, .. } => children,
        }
    }

    /// `None` for leaves.
    pub fn children_mut(&mut self) -> Option<&mut Vec<AstNode>> {
        match self {
            AstNode::Leaf(_) => None,
            AstNode::NonLeaf { children, .. } => Some(children),
        }
    }

    pub fn into_children(self) -> Vec<AstNode> {
        match self {
            AstNode::Leaf(_) => Vec::new(),
            AstNode::NonLeaf { children, .. } => children,
        }
    }

    /// Replaces the children of an inner node. Leaves are left unchanged.
    pub fn set_children(&mut self, new_children: Vec<AstNode>) {
        if let AstNode::NonLeaf { children, .. } = self {
            *children = new_children;
        }
    }

    pub fn first_child(&self) -> Option<&AstNode> {
        self.children().first()
    }

    pub fn last_child(&self) -> Option<&AstNode> {
        self.children().last()
    }

    pub fn child_at(&self, index: usize) -> Option<&AstNode> {
        self.children().get(index)
    }

    /// Token of a leaf. An inner node with a single child delegates to it.
    pub fn as_token(&self) -> Option<&Token> {
        match self {
            AstNode::Leaf(token) => Some(token),
            AstNode::NonLeaf { children, .. } => match children.as_slice() {
                [single] => single.as_token(),
                _ => None,
            },
        }
    }

    /// Direct children whose [`symbol`](Self::symbol) is `symbol`.
    pub fn children_of_type<'a>(
        &'a self,
        symbol: &'a Symbol,
    ) -> impl Iterator<Item = &'a AstNode> + 'a {
        self.children().iter().filter(move |c| c.symbol() == *symbol)
    }

    pub fn child_of_type<'a>(&'a self, symbol: &'a Symbol) -> Option<&'a AstNode> {
        self.children_of_type(symbol).next()
    }

    /// Every node below this one, in pre-order.
    pub fn descendants(&self) -> Vec<&AstNode> {
        let mut descendants = Vec::new();
        let mut pending = self.children().iter().rev().collect::<Vec<_>>();

        while let Some(node) = pending.pop() {
            descendants.push(node);
            pending.extend(node.children().iter().rev());
        }

        descendants
    }

    pub fn descendants_of_type(&self, symbol: &Symbol) -> Vec<&AstNode> {
        self.descendants()
            .into_iter()
            .filter(|d| d.symbol() == *symbol)
            .collect()
    }

    /// Texts of the tokens below this node, joined by spaces.
    pub fn repr(&self) -> String {
        match self {
            AstNode::Leaf(token) => token.text.clone(),
            AstNode::NonLeaf { children, .. } => children
                .iter()
                .map(AstNode::repr)
                .filter(|r| !r.is_empty())
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}

impl std::fmt::Display for AstNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.repr())
    }
}

impl std::fmt::Debug for AstNode {
    /// Indented tree, one node per line.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn write_node(
            node: &AstNode,
            depth: usize,
            f: &mut std::fmt::Formatter<'_>,
        ) -> std::fmt::Result {
            match node {
                AstNode::Leaf(token) => writeln!(f, "{:indent$}{}", "", token, indent = depth * 2),
                AstNode::NonLeaf { rule, children } => {
                    writeln!(f, "{:indent$}{}", "", rule, indent = depth * 2)?;
                    children
                        .iter()
                        .try_for_each(|child| write_node(child, depth + 1, f))
                }
            }
        }

        write_node(self, 0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::AstNode;
    use crate::{symbols, Grammar, NonTerminal, Symbol};
    use lexalr_lexer::{Position, Terminal, Token};

    fn leaf(terminal: &Terminal, text: &str) -> AstNode {
        AstNode::leaf(Token::new(terminal.clone(), Position::default(), text))
    }

    /// `Call → id '(' Arg ')'` with `Arg → id`, built by hand.
    fn call() -> (AstNode, Terminal) {
        let mut grammar = Grammar::new();
        let (call, arg) = (NonTerminal::new("Call"), NonTerminal::new("Arg"));
        let (id, open, close) = (
            Terminal::c_identifier(),
            Terminal::from("("),
            Terminal::from(")"),
        );

        grammar
            .add_rule(&call, symbols![id, open, arg, close])
            .with_name("call");
        grammar.add_rule(&arg, symbols![id]);

        let rules = grammar.rules();
        let node = AstNode::non_leaf(
            rules[0].clone(),
            vec![
                leaf(&id, "f"),
                leaf(&open, "("),
                AstNode::non_leaf(rules[1].clone(), vec![leaf(&id, "x")]),
                leaf(&close, ")"),
            ],
        );

        (node, id)
    }

    #[test]
    fn navigation() {
        let (node, id) = call();

        assert_eq!(node.name(), "call");
        assert_eq!(node.symbol(), Symbol::from(&NonTerminal::new("Call")));
        assert_eq!(node.first_child().unwrap().repr(), "f");
        assert_eq!(node.last_child().unwrap().repr(), ")");
        assert!(node.child_at(4).is_none());
        assert_eq!(node.repr(), "f ( x )");

        let arg = node.child_at(2).unwrap();
        assert_eq!(arg.name(), "Arg");
        assert_eq!(arg.as_token().unwrap().text, "x");
        assert!(node.as_token().is_none());

        let ids = node.children_of_type(&Symbol::from(&id)).count();
        assert_eq!(ids, 1);
        assert_eq!(node.descendants_of_type(&Symbol::from(&id)).len(), 2);
    }

    #[test]
    fn descendants_in_pre_order() {
        let (node, _) = call();

        let texts = node
            .descendants()
            .into_iter()
            .map(|d| d.name())
            .collect::<Vec<_>>();
        assert_eq!(texts, ["cIdentifier", "'('", "Arg", "cIdentifier", "')'"]);
    }

    #[test]
    fn edit_children() {
        let (mut node, id) = call();

        node.set_children(vec![leaf(&id, "g")]);
        assert_eq!(node.repr(), "g");
        assert_eq!(node.as_token().unwrap().text, "g");

        let mut leaf = leaf(&id, "y");
        assert!(leaf.children_mut().is_none());
        leaf.set_children(Vec::new());
        assert!(leaf.is_leaf());
        assert!(leaf.into_children().is_empty());
    }
}
