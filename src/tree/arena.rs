//! The node arena: lifecycle, structure, and file state

use crate::config;
use crate::contract::{self, ContractKind, ContractViolation};
use crate::error::TreeError;
use crate::name::{checks, ArrayName, Name};
use crate::tree::node::{FileState, NodeId, NodeKind, NodeRecord};
use std::collections::{HashMap, HashSet};
use tracing::{debug, instrument, trace};

/// An in-memory tree of named nodes.
///
/// The tree owns every record and hands out [`NodeId`] handles; a handle
/// without its tree grants nothing. Directories track children as a set of
/// ids. Every node except the root has exactly one parent, and the root is
/// its own parent, so walking parent links always terminates.
///
/// Structural mutation takes `&mut self`, making exclusive access a
/// compile-time property. Mutating operations finish with an invariant
/// re-check of the touched node.
#[derive(Debug)]
pub struct NodeTree {
    nodes: HashMap<NodeId, NodeRecord>,
    root_id: NodeId,
    next_id: u64,
}

impl NodeTree {
    /// Create a tree holding only the root directory.
    ///
    /// The root has an empty base name and points at itself as parent.
    pub fn new() -> Self {
        let root_id = NodeId::new(0);
        let mut nodes = HashMap::new();
        nodes.insert(
            root_id,
            NodeRecord {
                base_name: String::new(),
                parent: root_id,
                kind: NodeKind::directory(),
            },
        );
        Self {
            nodes,
            root_id,
            next_id: 1,
        }
    }

    /// Handle of the root directory.
    pub fn root(&self) -> NodeId {
        self.root_id
    }

    /// Whether `id` names a node in this tree.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Number of nodes, the root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Base name of a node. The root's is empty.
    pub fn base_name(&self, id: NodeId) -> Result<&str, TreeError> {
        Ok(&self.known(id)?.base_name)
    }

    /// Parent of a node. The root answers itself.
    pub fn parent(&self, id: NodeId) -> Result<NodeId, TreeError> {
        Ok(self.known(id)?.parent)
    }

    /// Whether a node is a directory.
    pub fn is_directory(&self, id: NodeId) -> Result<bool, TreeError> {
        Ok(self.known(id)?.kind.is_directory())
    }

    /// Children of a directory, sorted by base name (ties broken by id)
    /// for deterministic iteration.
    pub fn children(&self, id: NodeId) -> Result<Vec<NodeId>, TreeError> {
        let children = self.children_of(id)?;
        let mut sorted: Vec<NodeId> = children.iter().copied().collect();
        sorted.sort_by(|a, b| {
            let name_a = self.nodes.get(a).map(|r| r.base_name.as_str()).unwrap_or("");
            let name_b = self.nodes.get(b).map(|r| r.base_name.as_str()).unwrap_or("");
            name_a.cmp(name_b).then(a.cmp(b))
        });
        Ok(sorted)
    }

    /// Whether `child` is in `dir`'s child set.
    pub fn has_child(&self, dir: NodeId, child: NodeId) -> Result<bool, TreeError> {
        Ok(self.children_of(dir)?.contains(&child))
    }

    /// Create a directory under `parent`.
    #[instrument(skip(self))]
    pub fn create_directory(
        &mut self,
        parent: NodeId,
        base_name: &str,
    ) -> Result<NodeId, TreeError> {
        self.create_node(parent, base_name, NodeKind::directory())
    }

    /// Create a file under `parent`. Files start closed.
    #[instrument(skip(self))]
    pub fn create_file(&mut self, parent: NodeId, base_name: &str) -> Result<NodeId, TreeError> {
        self.create_node(parent, base_name, NodeKind::file())
    }

    fn create_node(
        &mut self,
        parent: NodeId,
        base_name: &str,
        kind: NodeKind,
    ) -> Result<NodeId, TreeError> {
        self.require_directory(parent)?;
        require_base_name(base_name)?;

        let id = NodeId::new(self.next_id);
        self.next_id += 1;
        self.nodes.insert(
            id,
            NodeRecord {
                base_name: base_name.to_string(),
                parent,
                kind,
            },
        );
        self.children_of_mut(parent)?.insert(id);

        let registered = self.known(id)?.parent;
        contract::ensure(
            registered == parent,
            format!("node {id} registered parent {registered}, expected {parent}"),
        )?;
        self.check_node_invariants(id)?;

        debug!(node = %id, parent = %parent, base_name, "created node");
        Ok(id)
    }

    /// Rename a node. The root keeps its empty name.
    #[instrument(skip(self))]
    pub fn rename(&mut self, id: NodeId, base_name: &str) -> Result<(), TreeError> {
        self.known(id)?;
        contract::require(id != self.root_id, "the root cannot be renamed")?;
        require_base_name(base_name)?;

        self.known_mut(id)?.base_name = base_name.to_string();

        contract::ensure(
            self.known(id)?.base_name == base_name,
            format!("base name of node {id} was not updated"),
        )?;
        self.check_node_invariants(id)?;

        debug!(node = %id, base_name, "renamed node");
        Ok(())
    }

    /// Move a node under a new parent directory.
    ///
    /// Detaches from the old parent's child set, attaches to the new one,
    /// then updates the parent link. Moving the root, moving onto a file,
    /// or moving a node into its own subtree is rejected up front.
    #[instrument(skip(self))]
    pub fn move_node(&mut self, id: NodeId, to: NodeId) -> Result<(), TreeError> {
        self.known(id)?;
        contract::require(id != self.root_id, "the root cannot be moved")?;
        self.require_directory(to)?;
        self.require_outside_subtree(id, to)?;

        let old_parent = self.known(id)?.parent;
        self.children_of_mut(old_parent)?.remove(&id);
        self.children_of_mut(to)?.insert(id);
        self.known_mut(id)?.parent = to;

        let reattached = self.known(id)?.parent;
        contract::ensure(
            reattached == to,
            format!("node {id} reattached to {reattached}, expected {to}"),
        )?;
        self.check_node_invariants(id)?;

        debug!(node = %id, from = %old_parent, to = %to, "moved node");
        Ok(())
    }

    /// Raw membership primitive: put `child` into `dir`'s child set.
    ///
    /// The child's parent link is not touched. A membership that disagrees
    /// with the parent link is reported by the next invariant checkpoint.
    pub fn add_child(&mut self, dir: NodeId, child: NodeId) -> Result<(), TreeError> {
        self.known(child)?;
        self.children_of_mut(dir)?.insert(child);
        trace!(dir = %dir, child = %child, "added child membership");
        Ok(())
    }

    /// Raw membership primitive: take `child` out of `dir`'s child set.
    ///
    /// The child's parent link is not touched, so this can strand a node.
    pub fn remove_child(&mut self, dir: NodeId, child: NodeId) -> Result<(), TreeError> {
        self.known(child)?;
        self.children_of_mut(dir)?.remove(&child);
        trace!(dir = %dir, child = %child, "removed child membership");
        Ok(())
    }

    /// Full hierarchical name of a node: every ancestor's base name from
    /// the root down, as a list-backed name. The root's full name is the
    /// empty name, so a node at depth `d` has exactly `d` components.
    pub fn full_name(&self, id: NodeId) -> Result<ArrayName, TreeError> {
        self.known(id)?;
        let name = self.assemble_full_name(id)?;

        if id != self.root_id {
            let count = name.component_count();
            contract::ensure(
                count > 0,
                format!("full name of node {id} is missing its own base name"),
            )?;
            let last = name.component(count - 1)?;
            let base_name = self.known(id)?.base_name.clone();
            contract::ensure(
                last == base_name,
                format!("full name of node {id} ends in '{last}', expected '{base_name}'"),
            )?;
        }

        trace!(node = %id, digest = %hex::encode(name.canonical_digest()), "assembled full name");
        Ok(name)
    }

    fn assemble_full_name(&self, id: NodeId) -> Result<ArrayName, TreeError> {
        if id == self.root_id {
            return Ok(ArrayName::empty()?);
        }
        let record = self.known(id)?;
        let parent_name = self.assemble_full_name(record.parent)?;
        Ok(parent_name.append(&record.base_name)?)
    }

    /// Current state of a file node.
    pub fn file_state(&self, id: NodeId) -> Result<FileState, TreeError> {
        match &self.known(id)?.kind {
            NodeKind::File { state } => Ok(*state),
            NodeKind::Directory { .. } => Err(contract::violated(
                ContractKind::Precondition,
                format!("node {id} is not a file"),
            )
            .into()),
        }
    }

    /// Open a closed file.
    #[instrument(skip(self))]
    pub fn open(&mut self, id: NodeId) -> Result<(), TreeError> {
        let state = self.file_state(id)?;
        contract::require(
            state == FileState::Closed,
            format!("file {id} must be closed to open, is {state}"),
        )?;

        self.set_file_state(id, FileState::Open)?;

        contract::ensure(
            self.file_state(id)? == FileState::Open,
            format!("file {id} did not transition to open"),
        )?;
        self.check_node_invariants(id)?;

        trace!(node = %id, "opened file");
        Ok(())
    }

    /// Close an open file.
    #[instrument(skip(self))]
    pub fn close(&mut self, id: NodeId) -> Result<(), TreeError> {
        let state = self.file_state(id)?;
        contract::require(
            state == FileState::Open,
            format!("file {id} must be open to close, is {state}"),
        )?;

        self.set_file_state(id, FileState::Closed)?;

        contract::ensure(
            self.file_state(id)? == FileState::Closed,
            format!("file {id} did not transition to closed"),
        )?;
        self.check_node_invariants(id)?;

        trace!(node = %id, "closed file");
        Ok(())
    }

    /// Read up to `count` bytes from an open file.
    ///
    /// I/O is modeled only; the returned buffer is always empty.
    pub fn read(&self, id: NodeId, count: usize) -> Result<Vec<u8>, TreeError> {
        let state = self.file_state(id)?;
        contract::require(
            state == FileState::Open,
            format!("file {id} must be open to read, is {state}"),
        )?;
        trace!(node = %id, count, "read from file");
        Ok(Vec::new())
    }

    // --- internal helpers ---

    pub(super) fn known(&self, id: NodeId) -> Result<&NodeRecord, ContractViolation> {
        self.nodes.get(&id).ok_or_else(|| {
            contract::violated(
                ContractKind::Precondition,
                format!("node {id} does not exist in this tree"),
            )
        })
    }

    fn known_mut(
        &mut self,
        id: NodeId,
    ) -> Result<&mut NodeRecord, ContractViolation> {
        self.nodes.get_mut(&id).ok_or_else(|| {
            contract::violated(
                ContractKind::Precondition,
                format!("node {id} does not exist in this tree"),
            )
        })
    }

    fn require_directory(&self, id: NodeId) -> Result<(), ContractViolation> {
        let record = self.known(id)?;
        contract::require(
            record.kind.is_directory(),
            format!("node {id} is not a directory"),
        )
    }

    fn children_of(
        &self,
        id: NodeId,
    ) -> Result<&HashSet<NodeId>, ContractViolation> {
        match &self.known(id)?.kind {
            NodeKind::Directory { children } => Ok(children),
            NodeKind::File { .. } => Err(contract::violated(
                ContractKind::Precondition,
                format!("node {id} is not a directory"),
            )),
        }
    }

    fn children_of_mut(
        &mut self,
        id: NodeId,
    ) -> Result<&mut HashSet<NodeId>, ContractViolation> {
        match &mut self.known_mut(id)?.kind {
            NodeKind::Directory { children } => Ok(children),
            NodeKind::File { .. } => Err(contract::violated(
                ContractKind::Precondition,
                format!("node {id} is not a directory"),
            )),
        }
    }

    fn set_file_state(
        &mut self,
        id: NodeId,
        next: FileState,
    ) -> Result<(), ContractViolation> {
        match &mut self.known_mut(id)?.kind {
            NodeKind::File { state } => {
                *state = next;
                Ok(())
            }
            NodeKind::Directory { .. } => Err(contract::violated(
                ContractKind::Precondition,
                format!("node {id} is not a file"),
            )),
        }
    }

    /// Walk up from `to`; reaching `id` means `to` sits inside `id`'s
    /// subtree and the move would detach that subtree into a cycle.
    fn require_outside_subtree(
        &self,
        id: NodeId,
        to: NodeId,
    ) -> Result<(), ContractViolation> {
        let mut current = to;
        loop {
            contract::require(
                current != id,
                format!("cannot move node {id} into its own subtree"),
            )?;
            let parent = match self.nodes.get(&current) {
                Some(record) => record.parent,
                None => break,
            };
            if parent == current {
                break;
            }
            current = parent;
        }
        Ok(())
    }

    /// Structural invariants of one node: the record exists, the parent
    /// link resolves to a directory that lists the node as a child, and
    /// every child of a directory resolves and points back at it.
    pub(crate) fn check_node_invariants(
        &self,
        id: NodeId,
    ) -> Result<(), ContractViolation> {
        let record = self.nodes.get(&id).ok_or_else(|| {
            contract::violated(
                ContractKind::Invariant,
                format!("node {id} vanished from the arena"),
            )
        })?;

        if id == self.root_id {
            contract::invariant(record.parent == id, "the root must be its own parent")?;
            contract::invariant(record.kind.is_directory(), "the root must be a directory")?;
            contract::invariant(
                record.base_name.is_empty(),
                "the root base name must stay empty",
            )?;
        } else {
            contract::invariant(
                !record.base_name.is_empty(),
                format!("node {id} has an empty base name"),
            )?;
            let parent = self.nodes.get(&record.parent).ok_or_else(|| {
                contract::violated(
                    ContractKind::Invariant,
                    format!("parent {} of node {id} does not exist", record.parent),
                )
            })?;
            match &parent.kind {
                NodeKind::Directory { children } => {
                    contract::invariant(
                        children.contains(&id),
                        format!(
                            "node {id} is missing from the child set of its parent {}",
                            record.parent
                        ),
                    )?;
                }
                NodeKind::File { .. } => {
                    contract::invariant(
                        false,
                        format!("parent {} of node {id} is not a directory", record.parent),
                    )?;
                }
            }
        }

        if let NodeKind::Directory { children } = &record.kind {
            for child in children {
                let child_record = self.nodes.get(child).ok_or_else(|| {
                    contract::violated(
                        ContractKind::Invariant,
                        format!("child {child} of node {id} does not exist"),
                    )
                })?;
                contract::invariant(
                    child_record.parent == id,
                    format!(
                        "child {child} of node {id} points at parent {} instead",
                        child_record.parent
                    ),
                )?;
            }
        }
        Ok(())
    }
}

impl Default for NodeTree {
    fn default() -> Self {
        Self::new()
    }
}

fn require_base_name(base_name: &str) -> Result<(), ContractViolation> {
    contract::require(!base_name.is_empty(), "base name must not be empty")?;
    checks::require_escaped(base_name, config::active().default_delimiter)
}
