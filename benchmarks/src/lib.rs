//! Shared helpers for the wayfinder benchmark suites.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

use wayfinder_harness::domains::{FifteenPuzzle, GridDomain};
use wayfinder_kernel::packed::KeyWriter;
use wayfinder_search::node::{Node, NodeArena, NodeId, PlaceV1, QueueSlot};

/// Deterministic pseudo-random stream (xorshift64).
pub fn xorshift(state: &mut u64) -> u64 {
    let mut x = *state;
    x ^= x << 13;
    x ^= x >> 7;
    x ^= x << 17;
    *state = x;
    x
}

/// Build an arena of `n` synthetic open nodes with pseudo-random ranks.
///
/// With `integral_f` the f-values are small non-negative integers, as the
/// bucket queue requires; otherwise fractional ranks exercise the binary
/// heap's general ordering.
#[must_use]
pub fn synthetic_arena(n: usize, integral_f: bool) -> (NodeArena<u8>, Vec<NodeId>) {
    let mut arena = NodeArena::new();
    let mut ids = Vec::with_capacity(n);
    let mut rng = 0x9e37_79b9_7f4a_7c15u64;
    for seq in 0..n {
        let raw = xorshift(&mut rng);
        let small = |v: u64| f64::from(u32::try_from(v).unwrap_or(0));
        let (g, h) = if integral_f {
            (small(raw % 64), small((raw >> 8) % 64))
        } else {
            (small(raw % 1_000) / 16.0, small((raw >> 16) % 1_000) / 16.0)
        };
        let mut w = KeyWriter::new();
        w.push(seq as u64, 32);
        ids.push(arena.alloc(Node {
            g,
            h,
            d: h,
            depth: u32::try_from(seq % 50).unwrap_or(0),
            op: None,
            pop: None,
            parent: None,
            packed: w.finish(),
            place: PlaceV1::Open,
            slot: QueueSlot::None,
            seq: seq as u64,
        }));
    }
    (arena, ids)
}

/// A square grid with one wall forcing a detour, start and goal in
/// opposite corners.
///
/// # Panics
///
/// Panics for sides too small to hold the wall; benchmark setup failures
/// are fatal.
#[must_use]
pub fn corridor_grid(side: u32) -> GridDomain {
    assert!(side >= 4, "corridor grid needs side >= 4");
    let wall: Vec<(u32, u32)> = (1..side).map(|y| (side / 2, y)).collect();
    GridDomain::new(side, side, &wall, (0, 0), (side - 1, side - 1))
        .expect("valid benchmark instance")
}

/// A 15-puzzle board six optimal moves from the goal.
///
/// # Panics
///
/// Panics if the fixed permutation is rejected (compile-time constant).
#[must_use]
pub fn scrambled_fifteen() -> FifteenPuzzle {
    FifteenPuzzle::new([1, 2, 3, 4, 5, 0, 11, 7, 9, 6, 10, 8, 13, 14, 15, 12])
        .expect("valid permutation")
}
