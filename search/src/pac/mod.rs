//! Probably-Approximately-Correct early termination.
//!
//! A PAC condition is a policy object configured with `(statistics,
//! epsilon, delta)` and queried after every incumbent or lower-bound
//! update. Threshold-based conditions derive a stopping cost from an
//! offline benchmark CDF; the search-aware f-min condition additionally
//! arms an engine-level interrupt that can unwind the expansion loop
//! mid-iteration once `incumbent / max_fmin <= 1 + epsilon` holds.

pub mod condition;
pub mod conditions;
pub mod stats;

pub use condition::{PacConditionV1, PacHookV1, PacProbe};
pub use conditions::{FMinCondition, RatioCondition, TrivialCondition};
pub use stats::{Cdf, PacStatisticsV1};
