//! Multiset of f-values currently present in OPEN.
//!
//! Answers "what is the minimum f in OPEN" without rescanning the open
//! list on every pop. Keys are [`FBits`] wrappers in a `BTreeMap`, so the
//! first key is always the true minimum and no cached-minimum rescan is
//! needed. Invariant: every node physically in OPEN has count >= 1 for
//! its f-value here.

use std::collections::BTreeMap;

use wayfinder_kernel::fbits::FBits;

/// Counter of f-values in OPEN.
#[derive(Debug, Default)]
pub struct FCounter {
    counts: BTreeMap<FBits, u64>,
}

impl FCounter {
    #[must_use]
    pub fn new() -> Self {
        Self {
            counts: BTreeMap::new(),
        }
    }

    /// Record one OPEN membership with priority `f`.
    pub fn add(&mut self, f: f64) {
        *self.counts.entry(FBits::new(f)).or_insert(0) += 1;
    }

    /// Drop one OPEN membership with priority `f`.
    ///
    /// # Panics
    ///
    /// Panics if `f` has no recorded count; that breaks the OPEN/counter
    /// invariant and means the engine lost track of a node.
    pub fn remove(&mut self, f: f64) {
        let key = FBits::new(f);
        let count = self
            .counts
            .get_mut(&key)
            .unwrap_or_else(|| panic!("f-counter underflow for f={f}"));
        *count -= 1;
        if *count == 0 {
            self.counts.remove(&key);
        }
    }

    /// The minimum f currently in OPEN, if OPEN is non-empty.
    #[must_use]
    pub fn min(&self) -> Option<f64> {
        self.counts.first_key_value().map(|(k, _)| k.value())
    }

    /// Number of distinct f-values tracked.
    #[must_use]
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    pub fn clear(&mut self) {
        self.counts.clear();
    }
}
