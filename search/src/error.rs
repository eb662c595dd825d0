//! Typed search errors.
//!
//! `SearchError` represents configuration failures only: bad epsilon/delta,
//! malformed PAC statistics, an unreachable CDF threshold, or an invalid
//! engine config. Normal negative outcomes (OPEN exhausted with no goal)
//! are values — see [`crate::result::TerminationReasonV1`] — never errors.

/// Typed failure for search and PAC configuration validation.
///
/// These errors are reported at setup time, before any expansion happens.
/// They are never silently defaulted.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchError {
    /// Epsilon must be a non-negative finite number.
    InvalidEpsilon { value: f64 },
    /// Delta must lie in `[0, 1]`.
    InvalidDelta { value: f64 },
    /// PAC statistics failed validation (empty set, non-finite or negative
    /// entries, zero initial heuristic for a ratio condition).
    MalformedStatistics { detail: String },
    /// The benchmark CDF never reaches the requested delta.
    ThresholdUnreachable { delta: f64 },
    /// Engine configuration rejected at construction.
    InvalidConfig { detail: String },
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidEpsilon { value } => {
                write!(f, "invalid epsilon {value}: must be finite and >= 0")
            }
            Self::InvalidDelta { value } => {
                write!(f, "invalid delta {value}: must lie in [0, 1]")
            }
            Self::MalformedStatistics { detail } => {
                write!(f, "malformed PAC statistics: {detail}")
            }
            Self::ThresholdUnreachable { delta } => {
                write!(f, "benchmark CDF never reaches delta {delta}")
            }
            Self::InvalidConfig { detail } => {
                write!(f, "invalid engine config: {detail}")
            }
        }
    }
}

impl std::error::Error for SearchError {}
