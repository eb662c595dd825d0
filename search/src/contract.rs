//! Domain capability contract.

use wayfinder_kernel::packed::PackedKey;

/// Trait for problem domains that support best-first search.
///
/// One implementation per concrete problem; the engine is polymorphic over
/// this capability set and never inspects states directly.
///
/// # Contract
///
/// - Operator enumeration must be deterministic: the same state yields the
///   same operators in the same order.
/// - `pack`/`unpack` must round-trip: `unpack(&pack(s))` is equal to `s`
///   under the domain's own notion of identity. Two states are duplicates
///   iff their packed keys are bit-identical.
/// - Costs and heuristic values must be non-negative finite doubles.
///   Admissibility and consistency are assumed, not verified (the engine
///   can count consistency violations when asked, see
///   [`crate::config::EngineConfigV1::check_consistency`]).
pub trait SearchDomainV1 {
    /// Full domain state. Cloned when a solution path is materialized.
    type State: Clone;
    /// Cheap operator handle (typically a small index or direction tag).
    type Operator: Copy + PartialEq + std::fmt::Debug;

    /// The instance's start state.
    fn initial_state(&self) -> Self::State;

    /// Goal predicate.
    fn is_goal(&self, state: &Self::State) -> bool;

    /// Number of operators applicable to `state`.
    fn num_operators(&self, state: &Self::State) -> usize;

    /// The `index`-th applicable operator, `index < num_operators(state)`.
    fn operator(&self, state: &Self::State, index: usize) -> Self::Operator;

    /// Successor generation.
    fn apply(&self, state: &Self::State, op: Self::Operator) -> Self::State;

    /// Cost of the move that produced `state` from `parent` via `op`.
    fn operator_cost(&self, state: &Self::State, parent: &Self::State, op: Self::Operator) -> f64;

    /// The operator that would exactly undo `op` from the resulting
    /// `state`, if one exists. Used for one-step cycle suppression.
    fn reverse(&self, state: &Self::State, op: Self::Operator) -> Option<Self::Operator>;

    /// Compact dedup identity for `state`.
    fn pack(&self, state: &Self::State) -> PackedKey;

    /// Reconstruct a state from its packed identity.
    fn unpack(&self, key: &PackedKey) -> Self::State;

    /// Heuristic cost-to-go estimate.
    fn h(&self, state: &Self::State) -> f64;

    /// Distance-to-go estimate (number of remaining steps). Domains with
    /// unit costs may leave the default, which reuses `h`.
    fn d(&self, state: &Self::State) -> f64 {
        self.h(state)
    }
}
