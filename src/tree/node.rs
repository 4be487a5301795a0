//! Node identifiers and records

use std::collections::HashSet;
use std::fmt;

/// Opaque handle to a node owned by a [`NodeTree`](super::NodeTree).
///
/// Handles are plain copyable ids; holding one does not keep the node
/// alive or grant access without the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle state of a file node.
///
/// Files are created `Closed`. `open` moves `Closed` to `Open`, `close`
/// moves `Open` back. No operation enters `Deleted` yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileState {
    Open,
    Closed,
    Deleted,
}

impl fmt::Display for FileState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileState::Open => write!(f, "open"),
            FileState::Closed => write!(f, "closed"),
            FileState::Deleted => write!(f, "deleted"),
        }
    }
}

/// What a node is, together with the state that kind carries.
#[derive(Debug, Clone)]
pub(crate) enum NodeKind {
    Directory { children: HashSet<NodeId> },
    File { state: FileState },
}

impl NodeKind {
    pub(crate) fn directory() -> Self {
        NodeKind::Directory {
            children: HashSet::new(),
        }
    }

    pub(crate) fn file() -> Self {
        NodeKind::File {
            state: FileState::Closed,
        }
    }

    pub(crate) fn is_directory(&self) -> bool {
        matches!(self, NodeKind::Directory { .. })
    }
}

/// One node in the arena: base name, parent link, kind.
///
/// The parent link is an id, not a reference; the arena is the lifecycle
/// authority and the only place records live. The root points at itself.
#[derive(Debug, Clone)]
pub(crate) struct NodeRecord {
    pub(crate) base_name: String,
    pub(crate) parent: NodeId,
    pub(crate) kind: NodeKind,
}
