//! The three stock PAC conditions.

use crate::error::SearchError;
use crate::pac::condition::{validate_params, PacConditionV1, PacHookV1, PacProbe};
use crate::pac::stats::{Cdf, PacStatisticsV1};

/// Threshold condition on raw optimal costs.
///
/// Stops once the incumbent is at most the benchmark-derived cost
/// threshold. Blind to the current instance's heuristic scale; prefer
/// [`RatioCondition`] when instances vary in size.
#[derive(Debug, Clone)]
pub struct TrivialCondition {
    threshold: f64,
    epsilon: f64,
}

impl TrivialCondition {
    /// Precompute the cost threshold from the benchmark statistics.
    ///
    /// # Errors
    ///
    /// Propagates parameter validation and CDF construction errors.
    pub fn new(stats: &PacStatisticsV1, epsilon: f64, delta: f64) -> Result<Self, SearchError> {
        validate_params(epsilon, delta)?;
        let cdf = Cdf::from_values(&stats.costs())?;
        Ok(Self {
            threshold: cdf.compute_threshold(epsilon, delta)?,
            epsilon,
        })
    }

    #[must_use]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

impl PacConditionV1 for TrivialCondition {
    fn should_stop(&self, probe: &PacProbe) -> bool {
        match probe.incumbent {
            Some(cost) => cost <= self.threshold || probe.provably_within(self.epsilon),
            None => false,
        }
    }
}

/// Threshold condition on optimal/initial-h ratios, rescaled by the
/// current instance's initial heuristic.
#[derive(Debug, Clone)]
pub struct RatioCondition {
    /// Ratio threshold, already scaled by (1 + epsilon).
    ratio_threshold: f64,
    epsilon: f64,
}

impl RatioCondition {
    /// Precompute the ratio threshold from the benchmark statistics.
    ///
    /// # Errors
    ///
    /// Propagates parameter validation and CDF construction errors,
    /// including zero initial heuristics in the statistics.
    pub fn new(stats: &PacStatisticsV1, epsilon: f64, delta: f64) -> Result<Self, SearchError> {
        validate_params(epsilon, delta)?;
        let cdf = Cdf::from_values(&stats.ratios()?)?;
        Ok(Self {
            ratio_threshold: cdf.compute_threshold(epsilon, delta)?,
            epsilon,
        })
    }

    /// The cost threshold for an instance with the given initial h.
    #[must_use]
    pub fn threshold_for(&self, initial_h: f64) -> f64 {
        self.ratio_threshold * initial_h
    }
}

impl PacConditionV1 for RatioCondition {
    fn should_stop(&self, probe: &PacProbe) -> bool {
        match probe.incumbent {
            Some(cost) => {
                cost <= self.threshold_for(probe.initial_h) || probe.provably_within(self.epsilon)
            }
            None => false,
        }
    }
}

/// Search-aware condition: stop as soon as the incumbent is provably
/// within (1+epsilon) of the certified f-min lower bound. Needs no
/// statistics and interrupts the expansion loop mid-iteration.
#[derive(Debug, Clone, Copy)]
pub struct FMinCondition {
    epsilon: f64,
}

impl FMinCondition {
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidEpsilon`] for a negative or
    /// non-finite epsilon.
    pub fn new(epsilon: f64) -> Result<Self, SearchError> {
        validate_params(epsilon, 0.0)?;
        Ok(Self { epsilon })
    }
}

impl PacConditionV1 for FMinCondition {
    fn should_stop(&self, probe: &PacProbe) -> bool {
        probe.provably_within(self.epsilon)
    }

    fn fmin_hook(&self) -> Option<PacHookV1> {
        Some(PacHookV1 {
            epsilon: self.epsilon,
        })
    }
}
