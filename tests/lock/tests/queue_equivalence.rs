//! Lock: the two OPEN list implementations are interchangeable on
//! integral-f domains. Expansion order may differ under ties, but costs,
//! path lengths, and optimality must not.

use wayfinder_harness::domains::{FifteenPuzzle, GridDomain};
use wayfinder_search::config::EngineConfigV1;
use wayfinder_search::engine::BestFirstEngine;
use wayfinder_search::queue::{BinaryOpen, BucketOpen, OpenList};
use wayfinder_search::result::TerminationReasonV1;

fn solve<Q: OpenList<<GridDomain as wayfinder_search::contract::SearchDomainV1>::Operator>>(
    grid: GridDomain,
    open: Q,
) -> (f64, usize, TerminationReasonV1) {
    let mut engine = BestFirstEngine::new(grid, open, EngineConfigV1::default()).unwrap();
    let outcome = engine.search();
    match outcome.solution {
        Some(solution) => (solution.cost, solution.length(), outcome.termination),
        None => (f64::INFINITY, 0, outcome.termination),
    }
}

#[test]
fn grid_batch_costs_agree_between_queues() {
    let instances: Vec<(u32, u32, Vec<(u32, u32)>)> = vec![
        (6, 6, vec![]),
        (6, 6, (0..5).map(|y| (2, y)).collect()),
        (9, 4, (1..4).map(|y| (5, y)).collect()),
        (12, 12, (2..12).map(|y| (7, y)).collect()),
    ];

    for (width, height, wall) in instances {
        let grid = || GridDomain::new(width, height, &wall, (0, 0), (width - 1, height - 1));
        let (binary_cost, binary_len, binary_term) =
            solve(grid().unwrap(), BinaryOpen::new());
        let (bucket_cost, bucket_len, bucket_term) =
            solve(grid().unwrap(), BucketOpen::new());
        assert_eq!(binary_term, bucket_term, "{width}x{height}");
        assert_eq!(binary_cost, bucket_cost, "{width}x{height}");
        assert_eq!(binary_len, bucket_len, "{width}x{height}");
    }
}

#[test]
fn fifteen_puzzle_costs_agree_between_queues() {
    let tiles = [1, 2, 3, 4, 5, 0, 11, 7, 9, 6, 10, 8, 13, 14, 15, 12];
    let solve = |use_bucket: bool| {
        let puzzle = FifteenPuzzle::new(tiles).unwrap();
        if use_bucket {
            let mut engine =
                BestFirstEngine::new(puzzle, BucketOpen::new(), EngineConfigV1::default())
                    .unwrap();
            engine.search().solution.expect("solvable").cost
        } else {
            let mut engine =
                BestFirstEngine::new(puzzle, BinaryOpen::new(), EngineConfigV1::default())
                    .unwrap();
            engine.search().solution.expect("solvable").cost
        }
    };
    assert_eq!(solve(false), solve(true));
}

#[test]
fn high_water_marks_are_populated() {
    let grid = GridDomain::new(10, 10, &[], (0, 0), (9, 9)).unwrap();
    let mut engine =
        BestFirstEngine::new(grid, BinaryOpen::new(), EngineConfigV1::default()).unwrap();
    let outcome = engine.search();
    assert_eq!(outcome.termination, TerminationReasonV1::GoalReached);
    assert!(engine.open_high_water() > 0);
    assert!(u64::try_from(engine.open_len()).unwrap() <= engine.open_high_water());
}
