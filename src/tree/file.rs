use derive_more::{Deref, Display};
use spin::RwLock;
use tracing::debug;

use crate::contract::{ContractViolation, check_argument, check_state};

use super::{
    Directory, NodeRef,
    node::{Node, NodeKind},
};

/// Life cycle of a [`File`]. `Deleted` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
pub enum FileState {
    #[display("open")]
    Open,
    #[default]
    #[display("closed")]
    Closed,
    #[display("deleted")]
    Deleted,
}

#[derive(Debug, Default)]
pub(crate) struct FileData {
    state: RwLock<FileState>,
}

impl FileData {
    pub(crate) fn check_not_deleted(&self) -> Result<(), ContractViolation> {
        check_state(
            *self.state.read() != FileState::Deleted,
            "file has been deleted",
        )
    }
}

/// A leaf node with simulated content.
#[derive(Debug, Clone, Deref)]
pub struct File(NodeRef);

impl File {
    /// Creates a closed file inside `parent`.
    pub fn new(base_name: &str, parent: &Directory) -> Result<Self, ContractViolation> {
        Node::create(base_name, parent, NodeKind::File(FileData::default())).map(File)
    }

    pub fn node(&self) -> &NodeRef {
        &self.0
    }

    pub fn into_node(self) -> NodeRef {
        self.0
    }

    fn data(&self) -> &FileData {
        match self.0.file_data() {
            Some(data) => data,
            None => unreachable!("file handles always wrap file nodes"),
        }
    }

    pub fn state(&self) -> FileState {
        *self.data().state.read()
    }

    pub fn open(&self) -> Result<(), ContractViolation> {
        self.transition(FileState::Closed, FileState::Open)
    }

    pub fn close(&self) -> Result<(), ContractViolation> {
        self.transition(FileState::Open, FileState::Closed)
    }

    /// Returns `no_bytes` zero bytes; the file must be open.
    pub fn read(&self, no_bytes: usize) -> Result<Vec<u8>, ContractViolation> {
        let state = self.state();
        check_state(state != FileState::Deleted, "file has been deleted")?;
        check_state(state == FileState::Open, "file must be open to be read")?;
        Ok(vec![0; no_bytes])
    }

    /// Marks the file deleted; every later operation on it fails.
    pub fn delete(&self) -> Result<(), ContractViolation> {
        let mut state = self.data().state.write();
        check_state(*state != FileState::Deleted, "file has been deleted")?;
        *state = FileState::Deleted;
        drop(state);

        debug!("Deleted file '{}'", self.own_base_name());
        Ok(())
    }

    fn transition(&self, from: FileState, to: FileState) -> Result<(), ContractViolation> {
        let mut state = self.data().state.write();
        check_state(*state != FileState::Deleted, "file has been deleted")?;
        check_state(*state == from, &format!("file must be {from} to become {to}"))?;
        *state = to;
        drop(state);

        debug!("File '{}' is now {}", self.own_base_name(), to);
        Ok(())
    }
}

impl TryFrom<NodeRef> for File {
    type Error = ContractViolation;

    fn try_from(node: NodeRef) -> Result<Self, Self::Error> {
        check_argument(node.file_data().is_some(), "node is not a file")?;
        Ok(File(node))
    }
}

impl AsRef<NodeRef> for File {
    fn as_ref(&self) -> &NodeRef {
        &self.0
    }
}
