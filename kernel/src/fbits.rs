//! Order-preserving bit keys for non-negative `f64` priorities.
//!
//! The f-value counter needs an ordered map keyed by f64, but f64 is not
//! `Ord`. For non-negative finite doubles the IEEE-754 bit pattern is
//! already monotone in the numeric value, so the raw bits serve as a
//! totally ordered key with no tolerance fuzz. Search priorities satisfy
//! the precondition: `g >= 0` and `h >= 0`, hence `f >= 0`.

/// A non-negative finite `f64` as a totally ordered bit key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FBits(u64);

impl FBits {
    /// Wrap a priority value.
    ///
    /// # Panics
    ///
    /// Panics on negative or NaN input; both indicate a domain producing
    /// illegal costs or heuristics, never a normal search outcome.
    #[must_use]
    pub fn new(value: f64) -> Self {
        assert!(
            value >= 0.0 && !value.is_nan(),
            "priority {value} is not a non-negative number"
        );
        Self(value.to_bits())
    }

    /// Recover the numeric value.
    #[must_use]
    pub fn value(self) -> f64 {
        f64::from_bits(self.0)
    }
}
