//! The PAC condition contract.

use crate::error::SearchError;

/// Snapshot of the quantities a stopping decision reads, assembled by the
/// anytime layer from its running aggregate result.
#[derive(Debug, Clone, Copy)]
pub struct PacProbe {
    /// Best known solution cost, if any solution exists yet.
    pub incumbent: Option<f64>,
    /// Certified lower bound on optimal cost (0 before the root seeds it).
    pub max_fmin: f64,
    /// The current instance's initial heuristic value, for rescaling
    /// ratio-based thresholds.
    pub initial_h: f64,
}

impl PacProbe {
    /// The provable guarantee: incumbent within (1+epsilon) of the
    /// certified lower bound. Always supersedes a statistical threshold.
    #[must_use]
    pub fn provably_within(&self, epsilon: f64) -> bool {
        match self.incumbent {
            Some(cost) => self.max_fmin > 0.0 && cost / self.max_fmin <= 1.0 + epsilon,
            None => false,
        }
    }
}

/// Engine-level interrupt installed by search-aware conditions.
///
/// Checked on every certified lower-bound increase, inside the expansion
/// loop, so the guarantee can end a run before the current iteration's
/// goal is found.
#[derive(Debug, Clone, Copy)]
pub struct PacHookV1 {
    pub epsilon: f64,
}

/// A pluggable stopping policy for anytime search.
///
/// Implementations are configured at construction (fatal errors for bad
/// epsilon/delta or malformed statistics) and queried after each
/// incumbent or lower-bound update.
pub trait PacConditionV1 {
    /// Whether the quality guarantee holds and search may stop.
    fn should_stop(&self, probe: &PacProbe) -> bool;

    /// The engine interrupt for search-aware conditions; `None` for
    /// conditions that only act between iterations.
    fn fmin_hook(&self) -> Option<PacHookV1> {
        None
    }
}

/// Validate a `(epsilon, delta)` configuration.
///
/// # Errors
///
/// Returns [`SearchError::InvalidEpsilon`] or
/// [`SearchError::InvalidDelta`]; these are configuration errors and are
/// never defaulted.
pub fn validate_params(epsilon: f64, delta: f64) -> Result<(), SearchError> {
    if !epsilon.is_finite() || epsilon < 0.0 {
        return Err(SearchError::InvalidEpsilon { value: epsilon });
    }
    if !delta.is_finite() || !(0.0..=1.0).contains(&delta) {
        return Err(SearchError::InvalidDelta { value: delta });
    }
    Ok(())
}
