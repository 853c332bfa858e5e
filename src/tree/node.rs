use std::{
    fmt,
    sync::{Arc, Weak},
};

use derive_more::Display;
use snafu::IntoError;
use spin::RwLock;
use tracing::{debug, trace};

use crate::{
    contract::{
        ContractViolation, InvalidStateSnafu, ServiceFailureSnafu, check_argument, check_state,
    },
    names::{Name, StringName, mask},
};

use super::{Directory, NodeSet, directory::DirectoryData, file::FileData, link::LinkData};

/// Shared handle to a node. Identity is the allocation, not the base name.
pub type NodeRef = Arc<Node>;
pub(crate) type WeakNodeRef = Weak<Node>;

/// Delimiter of full names and the one character a base name may not contain.
pub const PATH_DELIMITER: char = '/';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum NodeType {
    #[display("directory")]
    Directory,
    #[display("file")]
    File,
    #[display("link")]
    Link,
    #[display("root")]
    Root,
}

pub(crate) enum NodeKind {
    Directory(DirectoryData),
    File(FileData),
    Link(LinkData),
    Root(DirectoryData),
}

/// An element of the tree.
///
/// The parent is held weakly; the parent's child set owns the node. The root
/// is its own parent.
pub struct Node {
    base_name: RwLock<String>,
    parent: RwLock<WeakNodeRef>,
    kind: NodeKind,
}

impl Node {
    /// Validates the base name, then links the new node into `parent`.
    pub(crate) fn create(
        base_name: &str,
        parent: &Directory,
        kind: NodeKind,
    ) -> Result<NodeRef, ContractViolation> {
        check_base_name(base_name)?;

        let node = Arc::new(Node {
            base_name: RwLock::new(base_name.to_string()),
            parent: RwLock::new(Arc::downgrade(parent.node())),
            kind,
        });
        parent.attach(&node);
        debug!(
            "Created {} '{}' in '{}'",
            node.node_type(),
            base_name,
            parent.own_base_name()
        );
        Ok(node)
    }

    pub(crate) fn new_root(me: &WeakNodeRef) -> Node {
        Node {
            base_name: RwLock::new(String::new()),
            parent: RwLock::new(me.clone()),
            kind: NodeKind::Root(DirectoryData::default()),
        }
    }

    pub fn node_type(&self) -> NodeType {
        match self.kind {
            NodeKind::Directory(_) => NodeType::Directory,
            NodeKind::File(_) => NodeType::File,
            NodeKind::Link(_) => NodeType::Link,
            NodeKind::Root(_) => NodeType::Root,
        }
    }

    pub fn is_root(&self) -> bool {
        matches!(self.kind, NodeKind::Root(_))
    }

    /// Directories and the root can hold children.
    pub fn is_directory(&self) -> bool {
        self.directory_data().is_some()
    }

    pub(crate) fn directory_data(&self) -> Option<&DirectoryData> {
        match &self.kind {
            NodeKind::Directory(data) | NodeKind::Root(data) => Some(data),
            _ => None,
        }
    }

    pub(crate) fn file_data(&self) -> Option<&FileData> {
        match &self.kind {
            NodeKind::File(data) => Some(data),
            _ => None,
        }
    }

    pub(crate) fn link_data(&self) -> Option<&LinkData> {
        match &self.kind {
            NodeKind::Link(data) => Some(data),
            _ => None,
        }
    }

    /// The name stored on this node, without following links.
    pub fn own_base_name(&self) -> String {
        self.base_name.read().clone()
    }

    /// The base name; a link reports its target's.
    pub fn base_name(&self) -> Result<String, ContractViolation> {
        match &self.kind {
            NodeKind::Link(_) => self.resolve_target()?.base_name(),
            _ => Ok(self.own_base_name()),
        }
    }

    pub fn rename(&self, new_name: &str) -> Result<(), ContractViolation> {
        match &self.kind {
            NodeKind::Root(_) => check_state(
                new_name.is_empty(),
                "the root node can only be renamed to the empty string",
            ),
            NodeKind::Link(_) => self.resolve_target()?.rename(new_name),
            NodeKind::File(data) => {
                data.check_not_deleted()?;
                self.set_base_name(new_name)
            }
            NodeKind::Directory(_) => self.set_base_name(new_name),
        }
    }

    fn set_base_name(&self, new_name: &str) -> Result<(), ContractViolation> {
        check_base_name(new_name)?;
        let old_name = std::mem::replace(&mut *self.base_name.write(), new_name.to_string());
        debug!("Renamed '{}' to '{}'", old_name, new_name);
        Ok(())
    }

    /// Fails with a state error once the node was removed from its parent.
    pub fn parent_node(&self) -> Result<Directory, ContractViolation> {
        match self.parent_ref() {
            Some(parent) => Ok(Directory::from_node(parent)),
            None => InvalidStateSnafu {
                message: "node is not attached to a directory",
            }
            .fail(),
        }
    }

    pub(crate) fn parent_ref(&self) -> Option<NodeRef> {
        self.parent.read().upgrade()
    }

    /// Called after the node left its parent's child set.
    pub(crate) fn orphan(&self) {
        *self.parent.write() = Weak::new();
    }

    /// The parent's full name with this node's base name appended.
    pub fn full_name(&self) -> Result<StringName, ContractViolation> {
        if self.is_root() {
            return StringName::empty(PATH_DELIMITER);
        }

        let base_name = self.base_name()?;
        check_state(!base_name.is_empty(), "node base name is empty")?;

        let mut name = self.parent_node()?.full_name()?;
        name.append(&mask(&base_name, PATH_DELIMITER))?;
        Ok(name)
    }

    /// Absolute path such as `/home/user`.
    pub fn path(&self) -> Result<String, ContractViolation> {
        Ok(format!("{}{}", PATH_DELIMITER, self.full_name()?.as_string()))
    }

    /// Re-parents this node under `target`.
    ///
    /// All checks run before the first edit, so a failed move leaves the tree
    /// as it was. Moving the root does nothing.
    pub fn move_to(self: &Arc<Self>, target: &Directory) -> Result<(), ContractViolation> {
        if self.is_root() {
            trace!("Ignoring request to move the root node");
            return Ok(());
        }
        if let Some(file) = self.file_data() {
            file.check_not_deleted()?;
        }
        check_argument(
            !target.is_within(self),
            "cannot move a node into itself or one of its descendants",
        )?;
        let old_parent = self.parent_ref().map(Directory::from_node);
        if let Some(old_parent) = &old_parent {
            check_state(
                old_parent.has_child_node(self),
                "node is missing from its parent's child set",
            )?;
        }

        if let Some(old_parent) = old_parent {
            old_parent.detach(self);
        }
        target.attach(self);
        *self.parent.write() = Arc::downgrade(target.node());

        debug!(
            "Moved '{}' into '{}'",
            self.own_base_name(),
            target.own_base_name()
        );
        Ok(())
    }

    /// Every node below and including this one whose base name is `base_name`.
    ///
    /// Links are followed into their targets. A failure anywhere in the
    /// traversal is reported as one [`ContractViolation::ServiceFailure`].
    pub fn find_nodes(self: &Arc<Self>, base_name: &str) -> Result<NodeSet, ContractViolation> {
        trace!("Searching '{}' for '{}'", self.own_base_name(), base_name);
        // Children reached through a child set are attached, so their path
        // is valid whenever the receiver's is.
        self.full_name()
            .and_then(|_| self.collect_matches(base_name))
            .map_err(|error| aggregate_search_failure(error, base_name))
    }

    fn collect_matches(self: &Arc<Self>, base_name: &str) -> Result<NodeSet, ContractViolation> {
        let mut found = NodeSet::new();
        match &self.kind {
            NodeKind::Link(_) => {
                let target = self.resolve_target()?;
                if self.base_name()? == base_name {
                    found.insert(self.clone());
                }
                found.extend(target.find_nodes(base_name)?);
            }
            NodeKind::Directory(data) | NodeKind::Root(data) => {
                if self.own_base_name() == base_name {
                    found.insert(self.clone());
                }
                let children = data.children.read().clone();
                for child in children {
                    found.extend(child.collect_matches(base_name)?);
                }
            }
            NodeKind::File(_) => {
                if self.own_base_name() == base_name {
                    found.insert(self.clone());
                }
            }
        }
        Ok(found)
    }

    pub(crate) fn resolve_target(&self) -> Result<NodeRef, ContractViolation> {
        let target = self
            .link_data()
            .and_then(|link| link.target.read().as_ref().and_then(Weak::upgrade));
        match target {
            Some(target) => Ok(target),
            None => InvalidStateSnafu {
                message: "link has no target",
            }
            .fail(),
        }
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("type", &self.node_type())
            .field("base_name", &*self.base_name.read())
            .finish_non_exhaustive()
    }
}

/// Base names are non-empty and contain neither `/` nor NUL.
pub(crate) fn check_base_name(base_name: &str) -> Result<(), ContractViolation> {
    check_argument(!base_name.is_empty(), "base name must not be empty")?;
    check_argument(
        !base_name.contains(PATH_DELIMITER),
        "base name must not contain the directory separator '/'",
    )?;
    check_argument(
        !base_name.contains('\0'),
        "base name must not contain a NUL byte",
    )
}

fn aggregate_search_failure(error: ContractViolation, base_name: &str) -> ContractViolation {
    match error {
        failure @ ContractViolation::ServiceFailure { .. } => failure,
        cause => ServiceFailureSnafu {
            message: format!("failed to find nodes named '{base_name}'"),
        }
        .into_error(cause),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{File, Link, root_node};
    use rstest::*;

    fn scratch(name: &str) -> Directory {
        Directory::new(name, &root_node()).unwrap()
    }

    #[rstest]
    #[case("")]
    #[case("a/b")]
    #[case("nul\0byte")]
    fn invalid_base_names_are_rejected(#[case] base_name: &str) {
        let result = check_base_name(base_name);
        assert!(result.unwrap_err().is_argument_error());
    }

    #[test]
    fn full_name_appends_base_name_to_parent() {
        let home = scratch("node-full-name");
        let user = Directory::new("user", &home).unwrap();
        let file = File::new("notes.txt", &user).unwrap();

        let name = file.full_name().unwrap();
        assert_eq!(name.delimiter_character(), PATH_DELIMITER);
        assert_eq!(name.no_components(), 3);
        assert_eq!(name.as_string(), "node-full-name/user/notes.txt");
        assert_eq!(file.path().unwrap(), "/node-full-name/user/notes.txt");
    }

    #[test]
    fn full_name_masks_escape_characters_in_base_names() {
        let home = scratch("node-masking");
        let file = File::new(r"odd\name", &home).unwrap();
        let name = file.full_name().unwrap();
        assert_eq!(name.no_components(), 2);
        assert_eq!(name.component(1).unwrap(), r"odd\\name");
        assert_eq!(name.as_string(), r"node-masking/odd\\name");
    }

    #[test]
    fn rename_replaces_base_name_in_place() {
        let home = scratch("node-rename");
        let file = File::new("draft", &home).unwrap();
        file.rename("final").unwrap();
        assert_eq!(file.base_name().unwrap(), "final");
        assert!(file.rename("").unwrap_err().is_argument_error());
        assert!(file.rename("a/b").is_err());
        assert_eq!(file.base_name().unwrap(), "final");
    }

    #[test]
    fn move_updates_both_parents() {
        let home = scratch("node-move");
        let from = Directory::new("from", &home).unwrap();
        let to = Directory::new("to", &home).unwrap();
        let file = File::new("moved", &from).unwrap();

        file.move_to(&to).unwrap();

        assert!(to.has_child_node(&file));
        assert!(!from.has_child_node(&file));
        assert!(Arc::ptr_eq(file.parent_node().unwrap().node(), to.node()));
        assert_eq!(file.path().unwrap(), "/node-move/to/moved");
    }

    #[test]
    fn move_into_own_subtree_is_rejected_without_edits() {
        let home = scratch("node-move-cycle");
        let outer = Directory::new("outer", &home).unwrap();
        let inner = Directory::new("inner", &outer).unwrap();

        assert!(outer.move_to(&inner).unwrap_err().is_argument_error());
        assert!(outer.move_to(&outer).unwrap_err().is_argument_error());
        assert!(home.has_child_node(&outer));
        assert!(Arc::ptr_eq(outer.parent_node().unwrap().node(), home.node()));
    }

    #[test]
    fn removed_node_has_no_parent_and_no_path() {
        let home = scratch("node-orphan");
        let file = File::new("f", &home).unwrap();
        home.remove_child_node(&file).unwrap();

        assert!(file.parent_node().unwrap_err().is_state_error());
        assert!(file.full_name().unwrap_err().is_state_error());
        assert!(file.path().is_err());
        assert!(matches!(
            file.find_nodes("f"),
            Err(ContractViolation::ServiceFailure { .. })
        ));
    }

    #[test]
    fn removed_node_can_be_moved_back_in() {
        let home = scratch("node-orphan-move");
        let other = Directory::new("other", &home).unwrap();
        let file = File::new("f", &home).unwrap();
        home.remove_child_node(&file).unwrap();

        file.move_to(&other).unwrap();
        assert!(other.has_child_node(&file));
        assert!(!home.has_child_node(&file));
        assert_eq!(file.path().unwrap(), "/node-orphan-move/other/f");
    }

    #[test]
    fn move_into_a_detached_directory_keeps_it_detached() {
        let home = scratch("node-detached-target");
        let detached = Directory::new("detached", &home).unwrap();
        let file = File::new("f", &home).unwrap();
        home.remove_child_node(&detached).unwrap();

        file.move_to(&detached).unwrap();
        assert!(detached.has_child_node(&file));
        assert!(file.path().unwrap_err().is_state_error());
    }

    #[test]
    fn find_nodes_searches_nested_directories() {
        let home = scratch("node-find-nested");
        let deep = Directory::new("a", &Directory::new("b", &home).unwrap()).unwrap();
        let wanted = File::new("a", &deep).unwrap();

        let found = home.find_nodes("a").unwrap();
        assert_eq!(found.len(), 2);
        assert!(found.contains(deep.node()));
        assert!(found.contains(wanted.node()));
    }

    #[test]
    fn find_nodes_wraps_failures_into_a_service_failure() {
        let home = scratch("node-find-failure");
        Link::new("dangling", &home, None).unwrap();

        let error = home.find_nodes("anything").unwrap_err();
        assert!(matches!(error, ContractViolation::ServiceFailure { .. }));
        assert!(error.root_cause().is_state_error());
    }

    #[test]
    fn nodes_report_their_type() {
        let home = scratch("node-types");
        let file = File::new("f", &home).unwrap();
        let link = Link::new("l", &home, Some(file.node())).unwrap();
        assert_eq!(home.node_type(), NodeType::Directory);
        assert_eq!(file.node_type(), NodeType::File);
        assert_eq!(link.node_type(), NodeType::Link);
        assert_eq!(root_node().node_type(), NodeType::Root);
        assert_eq!(NodeType::Link.to_string(), "link");
    }
}
