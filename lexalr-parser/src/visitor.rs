use crate::AstNode;

use std::collections::HashMap;

type Hook<'v, S> = Box<dyn FnMut(&AstNode, &mut S) + 'v>;

/// Walks a syntax tree and calls the hooks registered for the name of each
/// node (see [`AstNode::name`]).
///
/// On entering a node the wildcard hooks run before the named ones; on
/// leaving it the named hooks run first. Hooks share the mutable state `S`
/// passed to [`visit`](Self::visit).
pub struct Visitor<'v, S> {
    enter: HashMap<String, Vec<Hook<'v, S>>>,
    exit: HashMap<String, Vec<Hook<'v, S>>>,
    enter_any: Vec<Hook<'v, S>>,
    exit_any: Vec<Hook<'v, S>>,
}

impl<'v, S> Default for Visitor<'v, S> {
    fn default() -> Self {
        Self {
            enter: HashMap::new(),
            exit: HashMap::new(),
            enter_any: Vec::new(),
            exit_any: Vec::new(),
        }
    }
}

impl<'v, S> Visitor<'v, S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_enter(
        &mut self,
        name: impl Into<String>,
        hook: impl FnMut(&AstNode, &mut S) + 'v,
    ) -> &mut Self {
        self.enter.entry(name.into()).or_default().push(Box::new(hook));
        self
    }

    pub fn on_exit(
        &mut self,
        name: impl Into<String>,
        hook: impl FnMut(&AstNode, &mut S) + 'v,
    ) -> &mut Self {
        self.exit.entry(name.into()).or_default().push(Box::new(hook));
        self
    }

    pub fn on_enter_any(&mut self, hook: impl FnMut(&AstNode, &mut S) + 'v) -> &mut Self {
        self.enter_any.push(Box::new(hook));
        self
    }

    pub fn on_exit_any(&mut self, hook: impl FnMut(&AstNode, &mut S) + 'v) -> &mut Self {
        self.exit_any.push(Box::new(hook));
        self
    }

    /// Depth-first walk of `node` and its descendants.
    pub fn visit(&mut self, node: &AstNode, state: &mut S) {
        let name = node.name();

        self.enter_any.iter_mut().for_each(|hook| hook(node, state));
        if let Some(hooks) = self.enter.get_mut(&name) {
            hooks.iter_mut().for_each(|hook| hook(node, state));
        }

        for child in node.children() {
            self.visit(child, state);
        }

        if let Some(hooks) = self.exit.get_mut(&name) {
            hooks.iter_mut().for_each(|hook| hook(node, state));
        }
        self.exit_any.iter_mut().for_each(|hook| hook(node, state));
    }
}
