use std::sync::Arc;

use derive_more::Deref;
use spin::RwLock;
use tracing::debug;

use crate::contract::{ContractViolation, check_argument};

use super::{
    Directory, NodeRef,
    node::{Node, NodeKind, WeakNodeRef},
};

#[derive(Debug, Default)]
pub(crate) struct LinkData {
    pub(crate) target: RwLock<Option<WeakNodeRef>>,
}

/// A node standing in for another node.
///
/// The target is not owned: once it is dropped the link behaves as if it had
/// no target. Base name, rename and search go to the target and fail with a
/// state error while there is none.
#[derive(Debug, Clone, Deref)]
pub struct Link(NodeRef);

impl Link {
    pub fn new(
        base_name: &str,
        parent: &Directory,
        target: Option<&NodeRef>,
    ) -> Result<Self, ContractViolation> {
        let data = LinkData {
            target: RwLock::new(target.map(Arc::downgrade)),
        };
        Node::create(base_name, parent, NodeKind::Link(data)).map(Link)
    }

    pub fn node(&self) -> &NodeRef {
        &self.0
    }

    pub fn into_node(self) -> NodeRef {
        self.0
    }

    fn data(&self) -> &LinkData {
        match self.0.link_data() {
            Some(data) => data,
            None => unreachable!("link handles always wrap link nodes"),
        }
    }

    /// The target, if one is set and still alive.
    pub fn target_node(&self) -> Option<NodeRef> {
        self.data().target.read().as_ref().and_then(|target| target.upgrade())
    }

    pub fn set_target_node(&self, target: &NodeRef) -> Result<(), ContractViolation> {
        check_argument(!Arc::ptr_eq(target, &self.0), "a link cannot target itself")?;
        *self.data().target.write() = Some(Arc::downgrade(target));

        debug!(
            "Link '{}' now targets '{}'",
            self.own_base_name(),
            target.own_base_name()
        );
        Ok(())
    }
}

impl TryFrom<NodeRef> for Link {
    type Error = ContractViolation;

    fn try_from(node: NodeRef) -> Result<Self, Self::Error> {
        check_argument(node.link_data().is_some(), "node is not a link")?;
        Ok(Link(node))
    }
}

impl AsRef<NodeRef> for Link {
    fn as_ref(&self) -> &NodeRef {
        &self.0
    }
}
