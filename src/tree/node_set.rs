use std::sync::Arc;

use hashlink::LinkedHashMap;

use super::NodeRef;

/// Address of the shared node; stable for as long as the set holds the `Arc`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct NodeKey(usize);

impl NodeKey {
    fn of(node: &NodeRef) -> Self {
        NodeKey(Arc::as_ptr(node) as usize)
    }
}

/// A set of nodes compared by identity, iterated in insertion order.
///
/// Two distinct nodes with the same base name are both kept.
#[derive(Debug, Clone, Default)]
pub struct NodeSet {
    nodes: LinkedHashMap<NodeKey, NodeRef>,
}

impl NodeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if the node was already a member.
    pub fn insert(&mut self, node: NodeRef) -> bool {
        self.nodes.insert(NodeKey::of(&node), node).is_none()
    }

    /// Returns `false` if the node was not a member.
    pub fn remove(&mut self, node: &NodeRef) -> bool {
        self.nodes.remove(&NodeKey::of(node)).is_some()
    }

    pub fn contains(&self, node: &NodeRef) -> bool {
        self.nodes.contains_key(&NodeKey::of(node))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NodeRef> {
        self.nodes.values()
    }
}

impl Extend<NodeRef> for NodeSet {
    fn extend<T: IntoIterator<Item = NodeRef>>(&mut self, iter: T) {
        for node in iter {
            self.insert(node);
        }
    }
}

impl FromIterator<NodeRef> for NodeSet {
    fn from_iter<T: IntoIterator<Item = NodeRef>>(iter: T) -> Self {
        let mut set = NodeSet::new();
        set.extend(iter);
        set
    }
}

impl IntoIterator for NodeSet {
    type Item = NodeRef;
    type IntoIter = std::vec::IntoIter<NodeRef>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes
            .into_iter()
            .map(|(_, node)| node)
            .collect::<Vec<_>>()
            .into_iter()
    }
}
