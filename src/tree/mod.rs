//! In-memory composite tree of directories, files and links.
//!
//! Every node except the root is owned by exactly one directory's child set
//! and refers back to it weakly. Full names are [`StringName`]s built from the
//! root downwards with `/` as delimiter.
//!
//! [`StringName`]: crate::names::StringName

mod directory;
mod file;
mod link;
mod node;
mod node_set;
mod root_node;

pub use directory::Directory;
pub use file::{File, FileState};
pub use link::Link;
pub use node::{Node, NodeRef, NodeType, PATH_DELIMITER};
pub use node_set::NodeSet;
pub use root_node::root_node;
