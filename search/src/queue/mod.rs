//! Intrusive min-priority queues backing the OPEN set.
//!
//! Queue members are arena handles; each queue writes its position back
//! into the node's [`QueueSlot`] tag, which is what makes O(log n)
//! arbitrary-element `update`/`remove` (binary heap) and O(1) amortized
//! operations (bucket heap) possible. `remove` and `update` are defined
//! only while the node is a member.
//!
//! [`QueueSlot`]: crate::node::QueueSlot

use std::cmp::Ordering;

use crate::node::{Node, NodeArena, NodeId};

pub mod binary;
pub mod bucket;

pub use binary::BinaryOpen;
pub use bucket::BucketOpen;

/// Total order over nodes, supplied to the binary heap.
///
/// The heap applies no tie-break of its own; whatever this comparator
/// leaves equal stays in arbitrary (but deterministic) heap order.
pub trait NodeOrder: Copy {
    fn cmp<O>(&self, a: &Node<O>, b: &Node<O>) -> Ordering;
}

/// Default ordering: lowest f first, then highest g (deepest toward the
/// goal), then creation order. Fully deterministic.
#[derive(Debug, Clone, Copy, Default)]
pub struct FOrder;

impl NodeOrder for FOrder {
    fn cmp<O>(&self, a: &Node<O>, b: &Node<O>) -> Ordering {
        a.f()
            .total_cmp(&b.f())
            .then_with(|| b.g.total_cmp(&a.g))
            .then_with(|| a.seq.cmp(&b.seq))
    }
}

/// Contract shared by the open-list implementations.
pub trait OpenList<O> {
    /// Insert a node. The node's slot tag must be `QueueSlot::None`.
    fn push(&mut self, arena: &mut NodeArena<O>, id: NodeId);

    /// Remove and return the minimum node, clearing its slot tag.
    fn pop(&mut self, arena: &mut NodeArena<O>) -> Option<NodeId>;

    /// The minimum node without removing it.
    fn peek(&self, arena: &NodeArena<O>) -> Option<NodeId>;

    /// Restore queue order after the node's priority fields changed in
    /// place. The node must currently be a member.
    fn update(&mut self, arena: &mut NodeArena<O>, id: NodeId);

    /// Remove an arbitrary member, clearing its slot tag.
    fn remove(&mut self, arena: &mut NodeArena<O>, id: NodeId);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop all members without touching slot tags (used together with an
    /// arena reset, which discards the nodes anyway).
    fn clear(&mut self);

    /// Largest size the queue has reached.
    fn high_water(&self) -> u64;
}
