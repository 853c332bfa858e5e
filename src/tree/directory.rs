use std::sync::Arc;

use derive_more::Deref;
use spin::RwLock;
use tracing::{debug, trace};

use crate::contract::{ContractViolation, check_argument};

use super::{
    NodeRef, NodeSet,
    node::{Node, NodeKind},
};

#[derive(Debug, Default)]
pub(crate) struct DirectoryData {
    pub(crate) children: RwLock<NodeSet>,
}

/// A node owning a set of children.
#[derive(Debug, Clone, Deref)]
pub struct Directory(NodeRef);

impl Directory {
    pub fn new(base_name: &str, parent: &Directory) -> Result<Self, ContractViolation> {
        Node::create(
            base_name,
            parent,
            NodeKind::Directory(DirectoryData::default()),
        )
        .map(Directory)
    }

    /// Only called with nodes that are known to be directories.
    pub(crate) fn from_node(node: NodeRef) -> Self {
        debug_assert!(node.is_directory());
        Directory(node)
    }

    pub fn node(&self) -> &NodeRef {
        &self.0
    }

    pub fn into_node(self) -> NodeRef {
        self.0
    }

    fn data(&self) -> &DirectoryData {
        match self.0.directory_data() {
            Some(data) => data,
            None => unreachable!("directory handles always wrap directory nodes"),
        }
    }

    pub fn has_child_node(&self, node: &NodeRef) -> bool {
        self.data().children.read().contains(node)
    }

    /// Snapshot of the current children.
    pub fn child_nodes(&self) -> NodeSet {
        self.data().children.read().clone()
    }

    /// Makes `node` a child of this directory, taking it away from its
    /// previous parent.
    pub fn add_child_node(&self, node: &NodeRef) -> Result<(), ContractViolation> {
        check_argument(!node.is_root(), "the root node cannot become a child")?;
        if self.has_child_node(node) {
            return Ok(());
        }
        node.move_to(self)
    }

    /// Drops `node` from the child set and clears its parent. The node has no
    /// full name until it is added to a directory again.
    pub fn remove_child_node(&self, node: &NodeRef) -> Result<(), ContractViolation> {
        check_argument(
            self.has_child_node(node),
            "node must be a child before it can be removed",
        )?;
        self.detach(node);
        node.orphan();
        debug!(
            "Removed '{}' from '{}'",
            node.own_base_name(),
            self.own_base_name()
        );
        Ok(())
    }

    pub(crate) fn attach(&self, node: &NodeRef) {
        self.data().children.write().insert(node.clone());
        trace!(
            "Attached '{}' to '{}'",
            node.own_base_name(),
            self.own_base_name()
        );
    }

    pub(crate) fn detach(&self, node: &NodeRef) {
        self.data().children.write().remove(node);
    }

    /// Whether this directory is `node` or lies somewhere below it.
    pub(crate) fn is_within(&self, node: &NodeRef) -> bool {
        let mut current = self.0.clone();
        loop {
            if Arc::ptr_eq(&current, node) {
                return true;
            }
            if current.is_root() {
                return false;
            }
            match current.parent_ref() {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }
}

impl TryFrom<NodeRef> for Directory {
    type Error = ContractViolation;

    fn try_from(node: NodeRef) -> Result<Self, Self::Error> {
        check_argument(node.is_directory(), "node is not a directory")?;
        Ok(Directory(node))
    }
}

impl AsRef<NodeRef> for Directory {
    fn as_ref(&self) -> &NodeRef {
        &self.0
    }
}
