//! A small arena-backed item tree.
//!
//! Hosts with their own item graph implement [`StyleNode`] directly. This
//! tree is for everything else: previews in a style editor, scripted
//! exports, and tests.

use std::collections::{BTreeMap, BTreeSet};

use crate::node::StyleNode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
struct NodeData {
    name: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    attributes: BTreeMap<String, String>,
    state: BTreeSet<String>,
}

/// Nodes are never removed; ids stay valid for the tree's lifetime.
#[derive(Debug, Clone, Default)]
pub struct NodeTree {
    nodes: Vec<NodeData>,
}

impl NodeTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_root(&mut self, name: impl Into<String>) -> NodeId {
        self.push(name.into(), None)
    }

    /// # Panics
    ///
    /// Panics if `parent` does not belong to this tree.
    pub fn add_child(&mut self, parent: NodeId, name: impl Into<String>) -> NodeId {
        let id = self.push(name.into(), Some(parent));
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn set_attribute(
        &mut self,
        id: NodeId,
        name: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.nodes[id.0].attributes.insert(name.into(), value.into());
    }

    pub fn add_state(&mut self, id: NodeId, token: impl Into<String>) {
        self.nodes[id.0].state.insert(token.into());
    }

    pub fn remove_state(&mut self, id: NodeId, token: &str) {
        self.nodes[id.0].state.remove(token);
    }

    pub fn node(&self, id: NodeId) -> NodeRef<'_> {
        NodeRef { tree: self, id }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn push(&mut self, name: String, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            name,
            parent,
            children: Vec::new(),
            attributes: BTreeMap::new(),
            state: BTreeSet::new(),
        });
        id
    }
}

/// A borrowed view of one node, implementing [`StyleNode`].
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'a> {
    tree: &'a NodeTree,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    fn data(&self) -> &'a NodeData {
        &self.tree.nodes[self.id.0]
    }
}

impl StyleNode for NodeRef<'_> {
    fn name(&self) -> &str {
        &self.data().name
    }

    fn parent(&self) -> Option<Self> {
        self.data().parent.map(|id| self.tree.node(id))
    }

    fn children(&self) -> impl Iterator<Item = Self> {
        let tree = self.tree;
        self.data().children.iter().map(move |&id| tree.node(id))
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.data().attributes.get(name).cloned()
    }

    fn state(&self) -> impl Iterator<Item = &str> {
        self.data().state.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structure_and_state() {
        let mut tree = NodeTree::new();
        let root = tree.add_root("diagram");
        let child = tree.add_child(root, "class");
        tree.add_state(child, "hover");
        tree.set_attribute(child, "class", "abstract");

        let node = tree.node(child);
        assert_eq!(node.name(), "class");
        assert_eq!(node.parent().map(|p| p.id()), Some(root));
        assert!(node.has_state("hover"));
        assert_eq!(node.attribute("class").as_deref(), Some("abstract"));
        assert_eq!(tree.node(root).children().count(), 1);

        tree.remove_state(child, "hover");
        assert!(!tree.node(child).has_state("hover"));
        assert_eq!(tree.len(), 2);
    }
}
