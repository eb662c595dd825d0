//! Solutions, counters, and result artifacts.

use std::collections::BTreeMap;
use std::time::Duration;

use crate::contract::SearchDomainV1;

/// Why an expansion phase stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReasonV1 {
    /// A goal below the incumbent bound was generated.
    GoalReached,
    /// OPEN ran dry: no solution exists under the current incumbent
    /// bound. A normal outcome, not an error — in later anytime
    /// iterations it certifies the incumbent optimal.
    OpenExhausted,
    /// The expansion budget was exhausted.
    BudgetExceeded,
    /// A search-aware PAC condition interrupted the expansion loop.
    PacSatisfied,
}

/// Effort counters for one search instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchCountersV1 {
    /// Nodes popped from OPEN and expanded.
    pub expanded: u64,
    /// Successor states produced by operator application.
    pub generated: u64,
    /// Improving duplicates (cheaper path to a known state).
    pub duplicates: u64,
    /// CLOSED nodes reinserted into OPEN.
    pub reopened: u64,
    /// OPEN nodes re-keyed in place.
    pub updated_in_open: u64,
    /// Nodes parked in the INCONS set (reopening disabled).
    pub incons: u64,
    /// Observed violations of heuristic consistency (opt-in check).
    pub inconsistency_warnings: u64,
}

impl SearchCountersV1 {
    /// Difference against an earlier snapshot of the same counters.
    /// Counters only grow, so each field is a plain subtraction.
    #[must_use]
    pub fn since(&self, earlier: &Self) -> Self {
        Self {
            expanded: self.expanded - earlier.expanded,
            generated: self.generated - earlier.generated,
            duplicates: self.duplicates - earlier.duplicates,
            reopened: self.reopened - earlier.reopened,
            updated_in_open: self.updated_in_open - earlier.updated_in_open,
            incons: self.incons - earlier.incons,
            inconsistency_warnings: self.inconsistency_warnings - earlier.inconsistency_warnings,
        }
    }
}

/// One step on a solution path: the operator applied and the state it
/// produced. The first step carries the root state and no operator.
pub struct StepV1<D: SearchDomainV1> {
    pub op: Option<D::Operator>,
    pub state: D::State,
}

impl<D: SearchDomainV1> Clone for StepV1<D> {
    fn clone(&self) -> Self {
        Self {
            op: self.op,
            state: self.state.clone(),
        }
    }
}

/// An ordered root-to-goal path with its total cost.
pub struct SolutionV1<D: SearchDomainV1> {
    pub steps: Vec<StepV1<D>>,
    pub cost: f64,
}

impl<D: SearchDomainV1> SolutionV1<D> {
    /// Number of operator applications on the path.
    #[must_use]
    pub fn length(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }
}

impl<D: SearchDomainV1> Clone for SolutionV1<D> {
    fn clone(&self) -> Self {
        Self {
            steps: self.steps.clone(),
            cost: self.cost,
        }
    }
}

impl<D: SearchDomainV1> std::fmt::Debug for SolutionV1<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SolutionV1")
            .field("cost", &self.cost)
            .field("length", &self.length())
            .finish_non_exhaustive()
    }
}

/// Extras key carrying the certified lower bound as an f64.
pub const EXTRA_FMIN: &str = "fmin";
/// Extras key carrying the PAC-satisfaction flag as a bool.
pub const EXTRA_PAC_SATISFIED: &str = "pac_satisfied";

/// Aggregated outcome of one or more search iterations.
///
/// `solutions` holds one entry per anytime iteration that found a goal, in
/// improving-cost order; the last entry is the incumbent. The `extras` bag
/// carries add-on values (at minimum [`EXTRA_FMIN`]) so layered features
/// do not grow this type.
pub struct SearchResultV1<D: SearchDomainV1> {
    pub solutions: Vec<SolutionV1<D>>,
    pub counters: SearchCountersV1,
    pub wall_time: Duration,
    pub termination: TerminationReasonV1,
    pub extras: BTreeMap<String, serde_json::Value>,
}

impl<D: SearchDomainV1> SearchResultV1<D> {
    #[must_use]
    pub fn has_solution(&self) -> bool {
        !self.solutions.is_empty()
    }

    /// Cost of the best (last) solution found, if any.
    #[must_use]
    pub fn best_cost(&self) -> Option<f64> {
        self.solutions.last().map(|s| s.cost)
    }

    /// The certified lower bound recorded in extras, if present.
    #[must_use]
    pub fn fmin(&self) -> Option<f64> {
        self.extras.get(EXTRA_FMIN).and_then(serde_json::Value::as_f64)
    }

    /// Whether a PAC condition reported its guarantee met.
    #[must_use]
    pub fn pac_satisfied(&self) -> bool {
        self.extras
            .get(EXTRA_PAC_SATISFIED)
            .and_then(serde_json::Value::as_bool)
            .unwrap_or(false)
    }
}

impl<D: SearchDomainV1> Clone for SearchResultV1<D> {
    fn clone(&self) -> Self {
        Self {
            solutions: self.solutions.clone(),
            counters: self.counters,
            wall_time: self.wall_time,
            termination: self.termination,
            extras: self.extras.clone(),
        }
    }
}

impl<D: SearchDomainV1> std::fmt::Debug for SearchResultV1<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchResultV1")
            .field("solutions", &self.solutions)
            .field("counters", &self.counters)
            .field("termination", &self.termination)
            .field("wall_time", &self.wall_time)
            .field("extras", &self.extras)
            .finish()
    }
}
