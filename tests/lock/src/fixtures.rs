//! Small explicit-graph domain for lock tests that need exact control
//! over edge costs and heuristic values.

use wayfinder_kernel::packed::{bits_for, KeyWriter, PackedKey};
use wayfinder_search::contract::SearchDomainV1;

/// Directed weighted graph; states are vertex ids, operator k is the
/// k-th outgoing edge.
pub struct WeightedGraph {
    pub edges: Vec<Vec<(usize, f64)>>,
    pub h: Vec<f64>,
    pub start: usize,
    pub goal: usize,
}

impl WeightedGraph {
    fn bits(&self) -> u32 {
        bits_for(self.edges.len() as u64)
    }
}

impl SearchDomainV1 for WeightedGraph {
    type State = usize;
    type Operator = usize;

    fn initial_state(&self) -> usize {
        self.start
    }

    fn is_goal(&self, state: &usize) -> bool {
        *state == self.goal
    }

    fn num_operators(&self, state: &usize) -> usize {
        self.edges[*state].len()
    }

    fn operator(&self, _state: &usize, index: usize) -> usize {
        index
    }

    fn apply(&self, state: &usize, op: usize) -> usize {
        self.edges[*state][op].0
    }

    fn operator_cost(&self, _state: &usize, parent: &usize, op: usize) -> f64 {
        self.edges[*parent][op].1
    }

    fn reverse(&self, _state: &usize, _op: usize) -> Option<usize> {
        None
    }

    fn pack(&self, state: &usize) -> PackedKey {
        let mut w = KeyWriter::new();
        w.push(*state as u64, self.bits());
        w.finish()
    }

    #[allow(clippy::cast_possible_truncation)]
    fn unpack(&self, key: &PackedKey) -> usize {
        key.reader().take(self.bits()) as usize
    }

    fn h(&self, state: &usize) -> f64 {
        self.h[*state]
    }
}

/// Two routes to the goal; the inflated heuristic on the cheap route
/// makes the expensive one (cost 11) surface first, the cheap one
/// (cost 2) only after continuation. True optimal cost: 2.
#[must_use]
pub fn two_route_graph() -> WeightedGraph {
    WeightedGraph {
        edges: vec![
            vec![(1, 1.0), (2, 1.0)],
            vec![(3, 10.0)],
            vec![(3, 1.0)],
            vec![],
        ],
        h: vec![0.0, 0.0, 50.0, 0.0],
        start: 0,
        goal: 3,
    }
}

/// First solution costs 10; the surviving frontier then proves a lower
/// bound of 9, so an f-min condition with epsilon 0.25 stops the search
/// mid-iteration. True optimal cost: 9.5.
#[must_use]
pub fn near_optimal_first_graph() -> WeightedGraph {
    WeightedGraph {
        edges: vec![
            vec![(1, 1.0), (2, 8.0)],
            vec![(3, 9.0)],
            vec![(4, 0.5)],
            vec![],
            vec![(3, 1.0)],
        ],
        h: vec![1.0, 0.0, 0.5, 0.0, 0.5],
        start: 0,
        goal: 3,
    }
}
