//! Search nodes and the arena that owns them.
//!
//! All nodes live in a dense [`NodeArena`] and are addressed by integer
//! [`NodeId`] handles. Parent links and queue positions are indices, never
//! references, so the implicit search graph carries no ownership cycles.
//! A node is mutated in place only when a cheaper path to its state is
//! found or when it changes placement (OPEN / CLOSED / INCONS); nodes are
//! never freed while the search instance is alive.

use wayfinder_kernel::packed::PackedKey;

/// Handle into a [`NodeArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    /// The arena index this handle refers to.
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Which conceptual set a node currently belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceV1 {
    /// On the frontier, member of the open list.
    Open,
    /// Expanded or retired from the frontier.
    Closed,
    /// Provably improvable but not eligible for reinsertion
    /// (reopening disabled).
    Incons,
}

/// Positional tag written back by the queue that holds this node.
///
/// The binary heap stores its array index; the bucket heap stores the
/// (bucket, bin, index-in-bin) triple. `None` means "not in any queue".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueSlot {
    None,
    Heap(usize),
    Bucket { bucket: usize, bin: usize, idx: usize },
}

/// One explored state.
///
/// `f = g + h` is the node's priority. Invariant: `g >= 0`.
#[derive(Debug)]
pub struct Node<O> {
    /// Accumulated path cost from the root.
    pub g: f64,
    /// Heuristic cost-to-go estimate.
    pub h: f64,
    /// Distance-to-go estimate (tie-break material).
    pub d: f64,
    /// Path length from the root in steps.
    pub depth: u32,
    /// Operator that produced this node from its parent (`None` for root).
    pub op: Option<O>,
    /// Operator that would undo `op`; suppressed during expansion.
    pub pop: Option<O>,
    /// Parent handle (`None` for root). Lifetime is the arena's.
    pub parent: Option<NodeId>,
    /// Compact dedup identity.
    pub packed: PackedKey,
    /// Current conceptual set membership.
    pub place: PlaceV1,
    /// Queue position tag, maintained by the open list.
    pub slot: QueueSlot,
    /// Creation order, for deterministic tie-breaking.
    pub seq: u64,
}

impl<O> Node<O> {
    /// The node's priority, `g + h`.
    #[must_use]
    pub fn f(&self) -> f64 {
        self.g + self.h
    }
}

/// Dense owner of all nodes generated in the current search phase.
pub struct NodeArena<O> {
    nodes: Vec<Node<O>>,
}

impl<O> NodeArena<O> {
    #[must_use]
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Insert a node and return its handle.
    ///
    /// # Panics
    ///
    /// Panics if the arena outgrows `u32` handles; a search generating
    /// more than four billion nodes has exhausted memory long before.
    pub fn alloc(&mut self, node: Node<O>) -> NodeId {
        let id = u32::try_from(self.nodes.len()).expect("node arena overflow");
        self.nodes.push(node);
        NodeId(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Drop all nodes. Invalidates every outstanding handle.
    pub fn clear(&mut self) {
        self.nodes.clear();
    }
}

impl<O> Default for NodeArena<O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O> std::ops::Index<NodeId> for NodeArena<O> {
    type Output = Node<O>;

    fn index(&self, id: NodeId) -> &Node<O> {
        &self.nodes[id.index()]
    }
}

impl<O> std::ops::IndexMut<NodeId> for NodeArena<O> {
    fn index_mut(&mut self, id: NodeId) -> &mut Node<O> {
        &mut self.nodes[id.index()]
    }
}
