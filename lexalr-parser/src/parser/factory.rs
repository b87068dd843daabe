use crate::{AstNode, Rule};
use lexalr_lexer::Token;

use dyn_clone::{clone_trait_object, DynClone};
use std::rc::Rc;

/// Creates the nodes of the syntax tree. A custom factory may reshape nodes
/// as they are built, e.g. to collapse chains of single child nodes.
///
/// The reduce action of the rule, if any, runs on the node returned by
/// [`non_leaf`](Self::non_leaf).
pub trait AstNodeFactory: DynClone {
    fn leaf(&self, token: Token) -> AstNode {
        AstNode::leaf(token)
    }

    fn non_leaf(&self, rule: Rc<Rule>, children: Vec<AstNode>) -> AstNode {
        AstNode::non_leaf(rule, children)
    }
}

clone_trait_object!(AstNodeFactory);

/// Builds the nodes as they are.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultNodeFactory;

impl AstNodeFactory for DefaultNodeFactory {}
