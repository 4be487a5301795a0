//! Recursive search over subtrees

use crate::error::TreeError;
use crate::tree::arena::NodeTree;
use crate::tree::node::NodeId;
use std::collections::HashSet;
use tracing::{debug, instrument};

impl NodeTree {
    /// Find every node below `start` whose base name equals `base_name`.
    ///
    /// Recurses through directory children and unions the matches; `start`
    /// itself is never a match, and starting at a file yields the empty
    /// set. Every node visited passes the invariant gate first, so a
    /// corrupted subtree fails the search instead of being skipped over.
    ///
    /// Whatever goes wrong inside the search, including inside a nested
    /// recursive call, comes back as one service failure carrying the
    /// deepest cause.
    #[instrument(skip(self))]
    pub fn find_nodes(
        &self,
        start: NodeId,
        base_name: &str,
    ) -> Result<HashSet<NodeId>, TreeError> {
        match self.collect_matches(start, base_name) {
            Ok(matches) => {
                debug!(start = %start, base_name, matched = matches.len(), "search finished");
                Ok(matches)
            }
            Err(cause) => Err(TreeError::service(
                format!("search for '{base_name}' below node {start} failed"),
                cause,
            )),
        }
    }

    fn collect_matches(
        &self,
        start: NodeId,
        base_name: &str,
    ) -> Result<HashSet<NodeId>, TreeError> {
        self.known(start)?;
        self.check_node_invariants(start)?;

        let mut matches = HashSet::new();
        if !self.is_directory(start)? {
            return Ok(matches);
        }
        for child in self.children(start)? {
            self.check_node_invariants(child)?;
            let record = self.known(child)?;
            if record.base_name == base_name {
                matches.insert(child);
            }
            if record.kind.is_directory() {
                // recurse through the public operation; the wrapper it
                // raises collapses back to the root cause when re-wrapped
                matches.extend(self.find_nodes(child, base_name)?);
            }
        }
        Ok(matches)
    }
}
