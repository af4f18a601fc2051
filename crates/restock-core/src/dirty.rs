use crate::id::NodeId;
use std::collections::BTreeSet;

/// Tracks which nodes have had persistent settings modified since the last
/// clean point.
///
/// Hosts consult this to decide what needs re-saving or re-broadcasting.
/// Call [`mark_clean`](DirtyTracker::mark_clean) after flushing.
#[derive(Debug, Clone, Default)]
pub struct DirtyTracker {
    dirty_nodes: BTreeSet<NodeId>,
    any_dirty: bool,
}

impl DirtyTracker {
    /// Create a new tracker with nothing dirty.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a single node as dirty (a persisted value changed).
    pub fn mark_node(&mut self, node: NodeId) {
        self.dirty_nodes.insert(node);
        self.any_dirty = true;
    }

    /// Returns `true` if anything has been marked dirty since the last clean.
    pub fn is_dirty(&self) -> bool {
        self.any_dirty
    }

    /// Returns `true` if the given node has been marked dirty.
    pub fn is_node_dirty(&self, node: NodeId) -> bool {
        self.dirty_nodes.contains(&node)
    }

    /// Returns the set of all dirty node IDs.
    pub fn dirty_nodes(&self) -> &BTreeSet<NodeId> {
        &self.dirty_nodes
    }

    /// Reset all dirty flags, marking everything as clean.
    pub fn mark_clean(&mut self) {
        self.dirty_nodes.clear();
        self.any_dirty = false;
    }
}
