//! Indexed binary min-heap.
//!
//! Array-backed; every member node carries its own array index in its
//! slot tag, updated on each swap. That index is what turns `update` and
//! `remove` of arbitrary members into O(log n) operations instead of a
//! linear scan. Ties are broken by the supplied [`NodeOrder`] only.

use std::cmp::Ordering;

use crate::node::{NodeArena, NodeId, QueueSlot};
use crate::queue::{FOrder, NodeOrder, OpenList};

/// Array-backed heap over arena handles.
pub struct BinaryOpen<C: NodeOrder = FOrder> {
    heap: Vec<NodeId>,
    order: C,
    high_water: u64,
}

impl BinaryOpen<FOrder> {
    #[must_use]
    pub fn new() -> Self {
        Self::with_order(FOrder)
    }
}

impl Default for BinaryOpen<FOrder> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: NodeOrder> BinaryOpen<C> {
    #[must_use]
    pub fn with_order(order: C) -> Self {
        Self {
            heap: Vec::new(),
            order,
            high_water: 0,
        }
    }

    fn less<O>(&self, arena: &NodeArena<O>, a: NodeId, b: NodeId) -> bool {
        self.order.cmp(&arena[a], &arena[b]) == Ordering::Less
    }

    fn place<O>(&mut self, arena: &mut NodeArena<O>, i: usize, id: NodeId) {
        self.heap[i] = id;
        arena[id].slot = QueueSlot::Heap(i);
    }

    fn slot_of<O>(arena: &NodeArena<O>, id: NodeId) -> usize {
        match arena[id].slot {
            QueueSlot::Heap(i) => i,
            other => panic!("node is not a binary heap member: {other:?}"),
        }
    }

    fn sift_up<O>(&mut self, arena: &mut NodeArena<O>, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / 2;
            if self.less(arena, self.heap[i], self.heap[parent]) {
                let (a, b) = (self.heap[i], self.heap[parent]);
                self.place(arena, i, b);
                self.place(arena, parent, a);
                i = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down<O>(&mut self, arena: &mut NodeArena<O>, mut i: usize) {
        loop {
            let left = 2 * i + 1;
            if left >= self.heap.len() {
                break;
            }
            let mut best = left;
            let right = left + 1;
            if right < self.heap.len() && self.less(arena, self.heap[right], self.heap[left]) {
                best = right;
            }
            if self.less(arena, self.heap[best], self.heap[i]) {
                let (a, b) = (self.heap[i], self.heap[best]);
                self.place(arena, i, b);
                self.place(arena, best, a);
                i = best;
            } else {
                break;
            }
        }
    }
}

impl<O, C: NodeOrder> OpenList<O> for BinaryOpen<C> {
    fn push(&mut self, arena: &mut NodeArena<O>, id: NodeId) {
        debug_assert_eq!(arena[id].slot, QueueSlot::None, "double push");
        let i = self.heap.len();
        self.heap.push(id);
        arena[id].slot = QueueSlot::Heap(i);
        self.sift_up(arena, i);
        self.high_water = self.high_water.max(self.heap.len() as u64);
    }

    fn pop(&mut self, arena: &mut NodeArena<O>) -> Option<NodeId> {
        if self.heap.is_empty() {
            return None;
        }
        let root = self.heap.swap_remove(0);
        arena[root].slot = QueueSlot::None;
        if !self.heap.is_empty() {
            let moved = self.heap[0];
            arena[moved].slot = QueueSlot::Heap(0);
            self.sift_down(arena, 0);
        }
        Some(root)
    }

    fn peek(&self, _arena: &NodeArena<O>) -> Option<NodeId> {
        self.heap.first().copied()
    }

    fn update(&mut self, arena: &mut NodeArena<O>, id: NodeId) {
        // Sift both directions from the stored index: handles priority
        // decreases and increases alike.
        let i = Self::slot_of(arena, id);
        self.sift_up(arena, i);
        let i = Self::slot_of(arena, id);
        self.sift_down(arena, i);
    }

    fn remove(&mut self, arena: &mut NodeArena<O>, id: NodeId) {
        let i = Self::slot_of(arena, id);
        arena[id].slot = QueueSlot::None;
        let last = self.heap.len() - 1;
        if i == last {
            self.heap.pop();
            return;
        }
        let moved = self.heap[last];
        self.heap.swap_remove(i);
        arena[moved].slot = QueueSlot::Heap(i);
        self.sift_up(arena, i);
        let i = Self::slot_of(arena, moved);
        self.sift_down(arena, i);
    }

    fn len(&self) -> usize {
        self.heap.len()
    }

    fn clear(&mut self) {
        self.heap.clear();
    }

    fn high_water(&self) -> u64 {
        self.high_water
    }
}
