//! Benchmark statistics and the CDF threshold computation.

use std::collections::BTreeMap;

use crate::error::SearchError;
use crate::pac::condition::validate_params;

/// One benchmark instance's ground truth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InstanceStat {
    /// Cost of an optimal solution.
    pub optimal: f64,
    /// Heuristic value of the instance's start state.
    pub initial_h: f64,
}

/// Per-domain benchmark statistics: instance id to (optimal cost,
/// initial heuristic). Loaded once per domain, immutable after
/// construction, shared by all PAC conditions for that domain.
#[derive(Debug, Clone)]
pub struct PacStatisticsV1 {
    instances: BTreeMap<String, InstanceStat>,
}

impl PacStatisticsV1 {
    /// Validate and freeze a statistics table.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::MalformedStatistics`] for an empty table or
    /// any non-finite or negative entry.
    pub fn new(instances: BTreeMap<String, InstanceStat>) -> Result<Self, SearchError> {
        if instances.is_empty() {
            return Err(SearchError::MalformedStatistics {
                detail: "statistics table is empty".into(),
            });
        }
        for (id, stat) in &instances {
            if !stat.optimal.is_finite() || stat.optimal < 0.0 {
                return Err(SearchError::MalformedStatistics {
                    detail: format!("instance {id}: optimal cost {} is invalid", stat.optimal),
                });
            }
            if !stat.initial_h.is_finite() || stat.initial_h < 0.0 {
                return Err(SearchError::MalformedStatistics {
                    detail: format!("instance {id}: initial h {} is invalid", stat.initial_h),
                });
            }
        }
        Ok(Self { instances })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&InstanceStat> {
        self.instances.get(id)
    }

    /// Optimal costs across the benchmark, for the trivial condition.
    #[must_use]
    pub fn costs(&self) -> Vec<f64> {
        self.instances.values().map(|s| s.optimal).collect()
    }

    /// Optimal-to-initial-h ratios, for the ratio condition. This
    /// normalization generalizes across instances of different heuristic
    /// scale.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::MalformedStatistics`] if any instance has a
    /// zero initial heuristic (the ratio is undefined there).
    pub fn ratios(&self) -> Result<Vec<f64>, SearchError> {
        self.instances
            .iter()
            .map(|(id, s)| {
                if s.initial_h == 0.0 {
                    Err(SearchError::MalformedStatistics {
                        detail: format!("instance {id}: initial h is zero, ratio undefined"),
                    })
                } else {
                    Ok(s.optimal / s.initial_h)
                }
            })
            .collect()
    }
}

/// Empirical cumulative distribution over benchmark values.
///
/// Stored as `(value, Pr[X <= value])` points with values strictly
/// ascending. Cumulative probabilities are exact rationals `k/n`, so the
/// final point always carries probability 1.
#[derive(Debug, Clone)]
pub struct Cdf {
    points: Vec<(f64, f64)>,
}

impl Cdf {
    /// Build the empirical CDF of `values`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::MalformedStatistics`] for an empty or
    /// non-finite value set.
    pub fn from_values(values: &[f64]) -> Result<Self, SearchError> {
        if values.is_empty() {
            return Err(SearchError::MalformedStatistics {
                detail: "cannot build a CDF from zero values".into(),
            });
        }
        if values.iter().any(|v| !v.is_finite()) {
            return Err(SearchError::MalformedStatistics {
                detail: "CDF input contains a non-finite value".into(),
            });
        }
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        #[allow(clippy::cast_precision_loss)]
        let n = sorted.len() as f64;
        let mut points: Vec<(f64, f64)> = Vec::new();
        for (i, &v) in sorted.iter().enumerate() {
            #[allow(clippy::cast_precision_loss)]
            let cumulative = (i + 1) as f64 / n;
            match points.last_mut() {
                // Collapse duplicates onto the highest cumulative count.
                Some(last) if last.0 == v => last.1 = cumulative,
                _ => points.push((v, cumulative)),
            }
        }
        Ok(Self { points })
    }

    /// The `(value, Pr[X <= value])` points, values ascending.
    #[must_use]
    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    /// Largest benchmark value.
    #[must_use]
    pub fn max_value(&self) -> f64 {
        self.points.last().map_or(0.0, |p| p.0)
    }

    /// Derive the PAC stopping threshold for `(epsilon, delta)`.
    ///
    /// Picks the smallest value whose survival probability
    /// `Pr[X > value] = 1 - Pr[X <= value]` is at most `delta` (a value
    /// whose survival probability equals `delta` exactly qualifies), then
    /// scales it by `1 + epsilon`. With `delta = 0` this is the maximum
    /// benchmark value, and the result is monotone non-decreasing in
    /// epsilon.
    ///
    /// # Errors
    ///
    /// Returns validation errors for bad `epsilon`/`delta`, and
    /// [`SearchError::ThresholdUnreachable`] if no value qualifies —
    /// impossible for a well-formed CDF (the last point's survival
    /// probability is zero) and therefore a sign of malformed statistics.
    pub fn compute_threshold(&self, epsilon: f64, delta: f64) -> Result<f64, SearchError> {
        validate_params(epsilon, delta)?;
        for &(value, cumulative) in &self.points {
            let survival = 1.0 - cumulative;
            if survival <= delta {
                return Ok(value * (1.0 + epsilon));
            }
        }
        Err(SearchError::ThresholdUnreachable { delta })
    }
}
