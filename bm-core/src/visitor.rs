//! Tree traversal
//!
//! Two ways to walk the tree:
//! - `accept` + `Hardware::traverse`: single dispatch on a `Visitor`. A visitor
//!   that wants the whole subtree calls `traverse` from `visit_hardware`.
//! - `walk` / `walk_mut`: explicit pre-order recursion with a closure.
//!
//! Both produce the same order: node, then each child subtree in stored order.

use crate::hardware::Hardware;
use crate::identity::Identifier;

pub trait Visitor {
    fn visit_hardware(&mut self, hardware: &dyn Hardware);
}

/// Dispatch `visitor` on `hardware` itself
pub fn accept(hardware: &dyn Hardware, visitor: &mut dyn Visitor) {
    visitor.visit_hardware(hardware);
}

/// Pre-order walk: `f(node)`, then every child subtree in order
pub fn walk<'a, F>(hardware: &'a dyn Hardware, f: &mut F)
where
    F: FnMut(&'a dyn Hardware),
{
    f(hardware);
    for child in hardware.sub_hardware() {
        walk(child, f);
    }
}

/// Mutable pre-order walk
pub fn walk_mut<F>(hardware: &mut dyn Hardware, f: &mut F)
where
    F: FnMut(&mut dyn Hardware),
{
    f(&mut *hardware);
    for child in hardware.sub_hardware_mut() {
        walk_mut(child, f);
    }
}

/// Every node of the tree in pre-order
pub fn flatten(root: &dyn Hardware) -> Vec<&dyn Hardware> {
    let mut nodes = Vec::new();
    walk(root, &mut |node| nodes.push(node));
    nodes
}

/// Refresh sensors on every node
pub fn update_all(root: &mut dyn Hardware) {
    walk_mut(root, &mut |node| node.update());
}

/// Locate a node by identifier
pub fn find<'a>(root: &'a dyn Hardware, identifier: &Identifier) -> Option<&'a dyn Hardware> {
    if root.identifier() == identifier {
        return Some(root);
    }
    root.sub_hardware()
        .into_iter()
        .find_map(|child| find(child, identifier))
}

/// Locate a node by identifier for mutation (renaming)
pub fn find_mut<'a>(root: &'a mut dyn Hardware, identifier: &Identifier) -> Option<&'a mut dyn Hardware> {
    if root.identifier() == identifier {
        return Some(root);
    }
    root.sub_hardware_mut()
        .into_iter()
        .find_map(|child| find_mut(child, identifier))
}

/// Visitor that records every node it sees and recurses via `traverse`
#[derive(Debug, Default)]
pub struct CollectingVisitor {
    pub visited: Vec<Identifier>,
}

impl Visitor for CollectingVisitor {
    fn visit_hardware(&mut self, hardware: &dyn Hardware) {
        self.visited.push(hardware.identifier().clone());
        hardware.traverse(self);
    }
}
