//! Directed weighted graph domain for crate-internal tests. States are
//! vertex ids; operator k is the k-th outgoing edge of the vertex.

use wayfinder_kernel::packed::{bits_for, KeyWriter, PackedKey};

use crate::contract::SearchDomainV1;

pub(crate) struct GraphDomain {
    pub edges: Vec<Vec<(usize, f64)>>,
    pub h: Vec<f64>,
    pub start: usize,
    pub goal: usize,
}

impl GraphDomain {
    fn bits(&self) -> u32 {
        bits_for(self.edges.len() as u64)
    }
}

impl SearchDomainV1 for GraphDomain {
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

    fn unpack(&self, key: &PackedKey) -> usize {
        usize::try_from(key.reader().take(self.bits())).unwrap()
    }

    fn h(&self, state: &usize) -> f64 {
        self.h[*state]
    }
}
