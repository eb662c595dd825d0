//! Bucket heap for small-integer priorities.
//!
//! Trades the binary heap's generality for O(1) amortized operations:
//! usable only when the primary rank (the f-value) is a small non-negative
//! integer, as in unit-cost domains. Buckets are indexed by primary rank;
//! within a bucket, nodes are partitioned by secondary rank (depth) into
//! bins, and peek/pop prefer the deepest bin — a depth tie-break that
//! favors nodes closer to a goal among equal f.

use crate::node::{NodeArena, NodeId, QueueSlot};
use crate::queue::OpenList;

/// Bucket-array min-queue over arena handles.
///
/// The `min` cursor is monotone non-decreasing between pushes; a push of a
/// smaller rank rewinds it directly, so advancing it lazily on pop stays
/// O(1) amortized.
pub struct BucketOpen {
    // buckets[f][depth] -> bin of member ids.
    buckets: Vec<Vec<Vec<NodeId>>>,
    min: usize,
    size: usize,
    high_water: u64,
}

impl BucketOpen {
    #[must_use]
    pub fn new() -> Self {
        Self {
            buckets: Vec::new(),
            min: 0,
            size: 0,
            high_water: 0,
        }
    }

    /// Pre-size the bucket array for f-values up to `max_f`.
    #[must_use]
    pub fn with_max_f(max_f: usize) -> Self {
        Self {
            buckets: (0..=max_f).map(|_| Vec::new()).collect(),
            min: 0,
            size: 0,
            high_water: 0,
        }
    }

    /// Integer ranks of a node: (f rounded, depth).
    ///
    /// # Panics
    ///
    /// Panics when f is not (close to) a small non-negative integer; such
    /// a domain must use the binary heap instead.
    fn ranks<O>(arena: &NodeArena<O>, id: NodeId) -> (usize, usize) {
        let f = arena[id].f();
        let rounded = f.round();
        assert!(
            f >= 0.0 && (f - rounded).abs() < 1e-9,
            "bucket heap requires integral f-values, got {f}"
        );
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let primary = rounded as usize;
        (primary, arena[id].depth as usize)
    }

    fn bucket_is_empty(bucket: &[Vec<NodeId>]) -> bool {
        bucket.iter().all(Vec::is_empty)
    }

    /// First non-empty bucket at or after the cursor, without moving it.
    fn first_occupied(&self) -> Option<usize> {
        (self.min..self.buckets.len()).find(|&b| !Self::bucket_is_empty(&self.buckets[b]))
    }

    /// Deepest non-empty bin index within `bucket`.
    fn deepest_bin(bucket: &[Vec<NodeId>]) -> usize {
        bucket
            .iter()
            .rposition(|bin| !bin.is_empty())
            .expect("occupied bucket has a non-empty bin")
    }
}

impl Default for BucketOpen {
    fn default() -> Self {
        Self::new()
    }
}

impl<O> OpenList<O> for BucketOpen {
    fn push(&mut self, arena: &mut NodeArena<O>, id: NodeId) {
        debug_assert_eq!(arena[id].slot, QueueSlot::None, "double push");
        let (primary, secondary) = Self::ranks(arena, id);
        if primary >= self.buckets.len() {
            self.buckets.resize_with(primary + 1, Vec::new);
        }
        let bucket = &mut self.buckets[primary];
        if secondary >= bucket.len() {
            bucket.resize_with(secondary + 1, Vec::new);
        }
        let bin = &mut bucket[secondary];
        arena[id].slot = QueueSlot::Bucket {
            bucket: primary,
            bin: secondary,
            idx: bin.len(),
        };
        bin.push(id);
        if primary < self.min {
            self.min = primary;
        }
        self.size += 1;
        self.high_water = self.high_water.max(self.size as u64);
    }

    fn pop(&mut self, arena: &mut NodeArena<O>) -> Option<NodeId> {
        let primary = self.first_occupied()?;
        self.min = primary;
        let bucket = &mut self.buckets[primary];
        let bin_idx = Self::deepest_bin(bucket);
        let id = bucket[bin_idx].pop().expect("deepest bin is non-empty");
        arena[id].slot = QueueSlot::None;
        self.size -= 1;
        Some(id)
    }

    fn peek(&self, _arena: &NodeArena<O>) -> Option<NodeId> {
        let primary = self.first_occupied()?;
        let bucket = &self.buckets[primary];
        let bin = &bucket[Self::deepest_bin(bucket)];
        bin.last().copied()
    }

    fn update(&mut self, arena: &mut NodeArena<O>, id: NodeId) {
        // Ranks are erased and recomputed; cheaper than special-casing
        // same-bucket moves and still O(1).
        OpenList::<O>::remove(self, arena, id);
        OpenList::<O>::push(self, arena, id);
    }

    fn remove(&mut self, arena: &mut NodeArena<O>, id: NodeId) {
        let QueueSlot::Bucket { bucket, bin, idx } = arena[id].slot else {
            panic!("node is not a bucket heap member: {:?}", arena[id].slot);
        };
        arena[id].slot = QueueSlot::None;
        let members = &mut self.buckets[bucket][bin];
        members.swap_remove(idx);
        if let Some(&moved) = members.get(idx) {
            arena[moved].slot = QueueSlot::Bucket { bucket, bin, idx };
        }
        self.size -= 1;
    }

    fn len(&self) -> usize {
        self.size
    }

    fn clear(&mut self) {
        self.buckets.clear();
        self.min = 0;
        self.size = 0;
    }

    fn high_water(&self) -> u64 {
        self.high_water
    }
}
