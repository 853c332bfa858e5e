use std::sync::Arc;

use spin::Lazy;
use tracing::debug;

use super::{Directory, NodeRef, node::Node};

static ROOT_NODE: Lazy<NodeRef> = Lazy::new(|| {
    debug!("Initializing the root node");
    Arc::new_cyclic(Node::new_root)
});

/// The process-wide root directory.
///
/// Its base name is always empty, it is its own parent, and its full name is
/// the empty name with delimiter `/`.
pub fn root_node() -> Directory {
    Directory::from_node(Arc::clone(&ROOT_NODE))
}
