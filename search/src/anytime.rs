//! Anytime controller: resumable search with incumbent tracking.
//!
//! Wraps a [`BestFirstEngine`] with two entry points: `search` runs one
//! EXPAND phase to the first goal, `continue_search` re-enters the same
//! OPEN/CLOSED/f-counter state under the tightened incumbent bound. Each
//! returned solution strictly improves on the previous incumbent
//! (asserted); OPEN exhaustion certifies the incumbent optimal. An
//! optional [`PacConditionV1`] is consulted after every iteration and may
//! arm the engine's mid-iteration f-min interrupt.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use crate::contract::SearchDomainV1;
use crate::engine::{BestFirstEngine, PhaseOutcomeV1};
use crate::pac::{PacConditionV1, PacProbe};
use crate::queue::OpenList;
use crate::result::{
    SearchCountersV1, SearchResultV1, SolutionV1, TerminationReasonV1, EXTRA_FMIN,
    EXTRA_PAC_SATISFIED,
};

/// Resumable anytime search over an engine.
pub struct AnytimeSearch<D, Q>
where
    D: SearchDomainV1,
    Q: OpenList<D::Operator>,
{
    engine: BestFirstEngine<D, Q>,
    condition: Option<Box<dyn PacConditionV1>>,
    solutions: Vec<SolutionV1<D>>,
    total_wall: Duration,
    counters_before: SearchCountersV1,
    started: bool,
    initial_h: f64,
    last_termination: TerminationReasonV1,
    pac_satisfied: bool,
}

impl<D, Q> AnytimeSearch<D, Q>
where
    D: SearchDomainV1,
    Q: OpenList<D::Operator>,
{
    #[must_use]
    pub fn new(engine: BestFirstEngine<D, Q>) -> Self {
        Self {
            engine,
            condition: None,
            solutions: Vec::new(),
            total_wall: Duration::ZERO,
            counters_before: SearchCountersV1::default(),
            started: false,
            initial_h: 0.0,
            last_termination: TerminationReasonV1::OpenExhausted,
            pac_satisfied: false,
        }
    }

    /// Attach a PAC stopping condition.
    #[must_use]
    pub fn with_condition(
        engine: BestFirstEngine<D, Q>,
        condition: Box<dyn PacConditionV1>,
    ) -> Self {
        let mut this = Self::new(engine);
        this.condition = Some(condition);
        this
    }

    #[must_use]
    pub fn engine(&self) -> &BestFirstEngine<D, Q> {
        &self.engine
    }

    /// The running certified lower bound.
    #[must_use]
    pub fn max_fmin(&self) -> f64 {
        self.engine.max_fmin()
    }

    /// Whether the attached PAC condition has reported its guarantee met.
    #[must_use]
    pub fn pac_satisfied(&self) -> bool {
        self.pac_satisfied
    }

    /// Reset all state and run iteration 0 to the first goal (if any).
    pub fn search(&mut self) -> SearchResultV1<D> {
        self.solutions.clear();
        self.total_wall = Duration::ZERO;
        self.counters_before = SearchCountersV1::default();
        self.pac_satisfied = false;

        self.engine
            .arm_fmin_interrupt(self.condition.as_ref().and_then(|c| c.fmin_hook()));
        let root = self.engine.domain().initial_state();
        self.initial_h = self.engine.domain().h(&root);

        let start = Instant::now();
        let outcome = self.engine.search();
        self.finish_iteration(start, outcome)
    }

    /// Run iteration k+1 on the retained frontier under the incumbent
    /// bound. Calling this after exhaustion returns `OpenExhausted`
    /// immediately.
    ///
    /// # Panics
    ///
    /// Panics if called before [`AnytimeSearch::search`].
    pub fn continue_search(&mut self) -> SearchResultV1<D> {
        assert!(self.started, "continue_search called before search");
        let start = Instant::now();
        let outcome = self.engine.resume();
        self.finish_iteration(start, outcome)
    }

    /// Drive iterations until the search exhausts OPEN, runs out of
    /// budget, or the PAC condition is satisfied; returns the aggregate.
    pub fn run(&mut self) -> SearchResultV1<D> {
        let _ = self.search();
        while self.last_termination == TerminationReasonV1::GoalReached && !self.pac_satisfied {
            let _ = self.continue_search();
        }
        self.total_result()
    }

    /// The aggregate across all iterations so far: every solution in
    /// improving order, total counters and wall time, and the `fmin`
    /// lower bound in extras.
    #[must_use]
    pub fn total_result(&self) -> SearchResultV1<D> {
        SearchResultV1 {
            solutions: self.solutions.clone(),
            counters: *self.engine.counters(),
            wall_time: self.total_wall,
            termination: self.last_termination,
            extras: self.extras(),
        }
    }

    fn probe(&self) -> PacProbe {
        PacProbe {
            incumbent: self.engine.incumbent(),
            max_fmin: self.engine.max_fmin(),
            initial_h: self.initial_h,
        }
    }

    fn extras(&self) -> BTreeMap<String, serde_json::Value> {
        let mut extras = BTreeMap::new();
        extras.insert(
            EXTRA_FMIN.to_string(),
            serde_json::Value::from(self.engine.max_fmin()),
        );
        extras.insert(
            EXTRA_PAC_SATISFIED.to_string(),
            serde_json::Value::from(self.pac_satisfied),
        );
        extras
    }

    fn finish_iteration(
        &mut self,
        start: Instant,
        outcome: PhaseOutcomeV1<D>,
    ) -> SearchResultV1<D> {
        self.started = true;
        let elapsed = start.elapsed();
        self.total_wall += elapsed;
        self.last_termination = outcome.termination;

        if let Some(solution) = &outcome.solution {
            if let Some(previous) = self.solutions.last() {
                assert!(
                    solution.cost < previous.cost,
                    "anytime invariant violated: {} does not improve on {}",
                    solution.cost,
                    previous.cost
                );
            }
            self.solutions.push(solution.clone());
        }

        // Consult the condition after the incumbent/bound update. A
        // mid-iteration engine interrupt counts as satisfied even
        // without a condition re-check.
        if outcome.termination == TerminationReasonV1::PacSatisfied {
            self.pac_satisfied = true;
        } else if let Some(condition) = &self.condition {
            if condition.should_stop(&self.probe()) {
                self.pac_satisfied = true;
            }
        }

        let iteration_counters = self.engine.counters().since(&self.counters_before);
        self.counters_before = *self.engine.counters();

        SearchResultV1 {
            solutions: outcome.solution.into_iter().collect(),
            counters: iteration_counters,
            wall_time: elapsed,
            termination: outcome.termination,
            extras: self.extras(),
        }
    }
}
