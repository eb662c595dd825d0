//! The generic best-first expansion loop.
//!
//! One engine implementation serves plain, anytime, and PAC-interrupted
//! search: variation comes from the incumbent bound (tightened by the
//! anytime layer after each solution) and an optional f-min PAC hook, both
//! plugged in at runtime — not from subclassed loop variants. The inner
//! expansion step reports a [`Flow`] status that the outer loop matches
//! on; early termination is a status, never an unwinding error.

use std::collections::HashMap;

use wayfinder_kernel::packed::PackedKey;

use crate::config::EngineConfigV1;
use crate::contract::SearchDomainV1;
use crate::error::SearchError;
use crate::fcounter::FCounter;
use crate::node::{Node, NodeArena, NodeId, PlaceV1, QueueSlot};
use crate::pac::PacHookV1;
use crate::queue::OpenList;
use crate::result::{SearchCountersV1, SolutionV1, StepV1, TerminationReasonV1};

/// Tolerance for the opt-in consistency check; absorbs f64 rounding in
/// domains whose heuristics are exact up to arithmetic noise.
const CONSISTENCY_SLACK: f64 = 1e-9;

/// Status of one expansion step, checked by the outer loop.
enum Flow<D: SearchDomainV1> {
    Continue,
    Exhausted,
    Budget,
    Goal(SolutionV1<D>),
    PacSatisfied,
}

/// Outcome of one EXPAND phase.
pub struct PhaseOutcomeV1<D: SearchDomainV1> {
    pub termination: TerminationReasonV1,
    /// Present exactly when `termination` is `GoalReached`.
    pub solution: Option<SolutionV1<D>>,
}

/// Generic best-first engine over a domain and an open-list.
///
/// Owns the OPEN queue, the node arena, the packed-key node table, the
/// INCONS set, and the f-counter; nothing escapes the instance except
/// returned solutions. Single-threaded by design.
pub struct BestFirstEngine<D, Q>
where
    D: SearchDomainV1,
    Q: OpenList<D::Operator>,
{
    domain: D,
    open: Q,
    arena: NodeArena<D::Operator>,
    table: HashMap<PackedKey, NodeId>,
    incons: Vec<NodeId>,
    fcounter: FCounter,
    config: EngineConfigV1,
    counters: SearchCountersV1,
    /// Best known solution cost; `None` means +infinity (no pruning).
    incumbent: Option<f64>,
    /// Monotone certified lower bound on the optimal solution cost.
    max_fmin: f64,
    seq: u64,
    pac_hook: Option<PacHookV1>,
}

impl<D, Q> BestFirstEngine<D, Q>
where
    D: SearchDomainV1,
    Q: OpenList<D::Operator>,
{
    /// Build an engine over `domain` with the given open-list.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidConfig`] if the config fails
    /// validation.
    pub fn new(domain: D, open: Q, config: EngineConfigV1) -> Result<Self, SearchError> {
        config.validate()?;
        Ok(Self {
            domain,
            open,
            arena: NodeArena::new(),
            table: HashMap::new(),
            incons: Vec::new(),
            fcounter: FCounter::new(),
            config,
            counters: SearchCountersV1::default(),
            incumbent: None,
            max_fmin: 0.0,
            seq: 0,
            pac_hook: None,
        })
    }

    /// Install or clear the search-aware PAC interrupt.
    pub fn arm_fmin_interrupt(&mut self, hook: Option<PacHookV1>) {
        self.pac_hook = hook;
    }

    #[must_use]
    pub fn domain(&self) -> &D {
        &self.domain
    }

    #[must_use]
    pub fn counters(&self) -> &SearchCountersV1 {
        &self.counters
    }

    /// The certified lower bound on optimal cost (monotone across a run).
    #[must_use]
    pub fn max_fmin(&self) -> f64 {
        self.max_fmin
    }

    /// Current best known solution cost, if any.
    #[must_use]
    pub fn incumbent(&self) -> Option<f64> {
        self.incumbent
    }

    #[must_use]
    pub fn open_len(&self) -> usize {
        self.open.len()
    }

    #[must_use]
    pub fn open_high_water(&self) -> u64 {
        self.open.high_water()
    }

    /// Nodes parked as improvable while reopening is disabled.
    #[must_use]
    pub fn incons_len(&self) -> usize {
        self.incons.len()
    }

    /// Distinct states generated so far.
    #[must_use]
    pub fn table_len(&self) -> usize {
        self.table.len()
    }

    /// Discard all search state, including the incumbent and counters.
    pub fn reset(&mut self) {
        self.arena.clear();
        self.table.clear();
        self.incons.clear();
        self.fcounter.clear();
        self.open.clear();
        self.counters = SearchCountersV1::default();
        self.incumbent = None;
        self.max_fmin = 0.0;
        self.seq = 0;
    }

    /// Reset, seed the root, and run one EXPAND phase to the first goal.
    pub fn search(&mut self) -> PhaseOutcomeV1<D> {
        self.reset();

        let root_state = self.domain.initial_state();
        if self.domain.is_goal(&root_state) {
            // Degenerate instance: the start is the goal.
            self.incumbent = Some(0.0);
            return PhaseOutcomeV1 {
                termination: TerminationReasonV1::GoalReached,
                solution: Some(SolutionV1 {
                    steps: vec![StepV1 {
                        op: None,
                        state: root_state,
                    }],
                    cost: 0.0,
                }),
            };
        }
        self.seed_root(&root_state);
        self.run_phase()
    }

    /// Re-enter EXPAND on the retained OPEN/CLOSED/f-counter state, under
    /// the incumbent bound tightened by previous phases.
    pub fn resume(&mut self) -> PhaseOutcomeV1<D> {
        self.run_phase()
    }

    fn seed_root(&mut self, root_state: &D::State) {
        let h = self.domain.h(root_state);
        let d = self.domain.d(root_state);
        let packed = self.domain.pack(root_state);
        let id = self.arena.alloc(Node {
            g: 0.0,
            h,
            d,
            depth: 0,
            op: None,
            pop: None,
            parent: None,
            packed: packed.clone(),
            place: PlaceV1::Open,
            slot: QueueSlot::None,
            seq: 0,
        });
        self.seq = 1;
        self.table.insert(packed, id);
        self.open.push(&mut self.arena, id);
        self.fcounter.add(h);
        // Seeds max_fmin with the root's f; no incumbent exists yet, so
        // the PAC hook cannot fire here.
        let _ = self.refresh_fmin();
    }

    fn run_phase(&mut self) -> PhaseOutcomeV1<D> {
        loop {
            match self.expand_next() {
                Flow::Continue => {}
                Flow::Exhausted => {
                    return PhaseOutcomeV1 {
                        termination: TerminationReasonV1::OpenExhausted,
                        solution: None,
                    }
                }
                Flow::Budget => {
                    return PhaseOutcomeV1 {
                        termination: TerminationReasonV1::BudgetExceeded,
                        solution: None,
                    }
                }
                Flow::Goal(solution) => {
                    return PhaseOutcomeV1 {
                        termination: TerminationReasonV1::GoalReached,
                        solution: Some(solution),
                    }
                }
                Flow::PacSatisfied => {
                    return PhaseOutcomeV1 {
                        termination: TerminationReasonV1::PacSatisfied,
                        solution: None,
                    }
                }
            }
        }
    }

    /// Pop and expand one node.
    fn expand_next(&mut self) -> Flow<D> {
        if self.counters.expanded >= self.config.max_expansions {
            return Flow::Budget;
        }
        let Some(id) = self.open.pop(&mut self.arena) else {
            return Flow::Exhausted;
        };

        let f_popped = self.arena[id].f();
        self.arena[id].place = PlaceV1::Closed;
        self.fcounter.remove(f_popped);

        self.counters.expanded += 1;
        let g = self.arena[id].g;
        let h_parent = self.arena[id].h;
        let depth = self.arena[id].depth;
        let pop_op = self.arena[id].pop;
        let state = self.domain.unpack(&self.arena[id].packed);

        for index in 0..self.domain.num_operators(&state) {
            let op = self.domain.operator(&state, index);
            // One-step reversal suppression only; general cycles are left
            // to duplicate detection.
            if pop_op == Some(op) {
                continue;
            }
            let child = self.domain.apply(&state, op);
            self.counters.generated += 1;
            let cost = self.domain.operator_cost(&child, &state, op);
            let g_child = g + cost;
            let h_child = self.domain.h(&child);

            if self.config.check_consistency && h_parent > cost + h_child + CONSISTENCY_SLACK {
                self.counters.inconsistency_warnings += 1;
            }

            // Goals are exempt from incumbent pruning: they define the
            // next incumbent. Only strict improvements are accepted.
            if self.domain.is_goal(&child) {
                let improves = match self.incumbent {
                    Some(bound) => g_child < bound,
                    None => true,
                };
                if improves {
                    let solution = self.build_solution(id, op, child, g_child);
                    self.incumbent = Some(g_child);
                    return Flow::Goal(solution);
                }
                continue;
            }

            let f_child = g_child + h_child;
            if let Some(bound) = self.incumbent {
                if f_child >= bound {
                    continue;
                }
            }

            let key = self.domain.pack(&child);
            if let Some(&known) = self.table.get(&key) {
                // Strictly-greater only: equal-cost rediscoveries keep
                // their first-found parent.
                if self.arena[known].g > g_child {
                    self.counters.duplicates += 1;
                    self.merge_improvement(known, id, op, &child, g_child, depth);
                }
            } else {
                let d_child = self.domain.d(&child);
                let pop = self.domain.reverse(&child, op);
                let nid = self.arena.alloc(Node {
                    g: g_child,
                    h: h_child,
                    d: d_child,
                    depth: depth + 1,
                    op: Some(op),
                    pop,
                    parent: Some(id),
                    packed: key.clone(),
                    place: PlaceV1::Open,
                    slot: QueueSlot::None,
                    seq: self.seq,
                });
                self.seq += 1;
                self.table.insert(key, nid);
                self.open.push(&mut self.arena, nid);
                self.fcounter.add(f_child);
            }
        }

        if self.refresh_fmin() {
            return Flow::PacSatisfied;
        }

        Flow::Continue
    }

    /// Redirect a known node onto the cheaper path just found.
    fn merge_improvement(
        &mut self,
        known: NodeId,
        parent: NodeId,
        op: D::Operator,
        child_state: &D::State,
        g_child: f64,
        parent_depth: u32,
    ) {
        let old_f = self.arena[known].f();
        let pop = self.domain.reverse(child_state, op);
        {
            let node = &mut self.arena[known];
            node.g = g_child;
            node.op = Some(op);
            node.pop = pop;
            node.parent = Some(parent);
            node.depth = parent_depth + 1;
        }
        match self.arena[known].place {
            PlaceV1::Open => {
                let new_f = self.arena[known].f();
                self.fcounter.remove(old_f);
                self.fcounter.add(new_f);
                self.open.update(&mut self.arena, known);
                self.counters.updated_in_open += 1;
            }
            PlaceV1::Closed => {
                if self.config.reopening {
                    self.arena[known].place = PlaceV1::Open;
                    let new_f = self.arena[known].f();
                    self.open.push(&mut self.arena, known);
                    self.fcounter.add(new_f);
                    self.counters.reopened += 1;
                } else {
                    self.arena[known].place = PlaceV1::Incons;
                    self.incons.push(known);
                    self.counters.incons += 1;
                }
            }
            // Already parked; the cheaper path is recorded above.
            PlaceV1::Incons => {}
        }
    }

    /// Raise `max_fmin` if the minimum f in OPEN moved above it; returns
    /// true when an armed PAC hook certifies the incumbent good enough,
    /// which unwinds the expansion loop mid-iteration.
    ///
    /// Called once per expansion, after all successors of the popped node
    /// have been placed. Mid-expansion the popped node's best successor may
    /// not be inserted yet, and observing the minimum then could push the
    /// certified bound past the true optimal cost.
    fn refresh_fmin(&mut self) -> bool {
        if let Some(min) = self.fcounter.min() {
            if min > self.max_fmin {
                self.max_fmin = min;
                if let (Some(hook), Some(incumbent)) = (self.pac_hook, self.incumbent) {
                    if self.max_fmin > 0.0 && incumbent / self.max_fmin <= 1.0 + hook.epsilon {
                        return true;
                    }
                }
            }
        }
        false
    }

    /// Materialize the root-to-goal path ending in (`final_op`, `goal`).
    fn build_solution(
        &self,
        parent: NodeId,
        final_op: D::Operator,
        goal: D::State,
        cost: f64,
    ) -> SolutionV1<D> {
        let mut steps = vec![StepV1 {
            op: Some(final_op),
            state: goal,
        }];
        let mut cursor = Some(parent);
        while let Some(nid) = cursor {
            let node = &self.arena[nid];
            steps.push(StepV1 {
                op: node.op,
                state: self.domain.unpack(&node.packed),
            });
            cursor = node.parent;
        }
        steps.reverse();
        SolutionV1 { steps, cost }
    }
}
