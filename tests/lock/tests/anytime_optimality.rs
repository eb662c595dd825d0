//! Lock: anytime search driven to OPEN exhaustion ends with the same
//! best cost a plain engine proves optimal, its solutions strictly
//! improve, and its per-iteration counters sum to the engine totals.

use lock_tests::fixtures::{two_route_graph, WeightedGraph};
use wayfinder_harness::domains::GridDomain;
use wayfinder_search::anytime::AnytimeSearch;
use wayfinder_search::config::EngineConfigV1;
use wayfinder_search::engine::BestFirstEngine;
use wayfinder_search::queue::BinaryOpen;
use wayfinder_search::result::TerminationReasonV1;

fn engine(graph: WeightedGraph) -> BestFirstEngine<WeightedGraph, BinaryOpen> {
    BestFirstEngine::new(graph, BinaryOpen::new(), EngineConfigV1::default()).unwrap()
}

/// Drive a bare engine to exhaustion, keeping the best cost seen.
fn exhaust(engine: &mut BestFirstEngine<WeightedGraph, BinaryOpen>) -> f64 {
    let mut outcome = engine.search();
    let mut best = f64::INFINITY;
    loop {
        if let Some(solution) = outcome.solution {
            best = solution.cost;
        }
        if outcome.termination != TerminationReasonV1::GoalReached {
            return best;
        }
        outcome = engine.resume();
    }
}

#[test]
fn anytime_exhaustion_matches_bare_engine_optimum() {
    let mut bare = engine(two_route_graph());
    let optimum = exhaust(&mut bare);

    let mut anytime = AnytimeSearch::new(engine(two_route_graph()));
    let total = anytime.run();
    assert_eq!(total.termination, TerminationReasonV1::OpenExhausted);
    assert_eq!(total.best_cost(), Some(optimum));

    let costs: Vec<f64> = total.solutions.iter().map(|s| s.cost).collect();
    assert!(
        costs.windows(2).all(|w| w[1] < w[0]),
        "solutions must strictly improve: {costs:?}"
    );
}

#[test]
fn iteration_counters_sum_to_engine_totals() {
    let mut anytime = AnytimeSearch::new(engine(two_route_graph()));

    let mut expanded = 0;
    let mut generated = 0;
    let mut duplicates = 0;
    let mut iteration = anytime.search();
    loop {
        expanded += iteration.counters.expanded;
        generated += iteration.counters.generated;
        duplicates += iteration.counters.duplicates;
        if iteration.termination != TerminationReasonV1::GoalReached {
            break;
        }
        iteration = anytime.continue_search();
    }

    let total = anytime.total_result();
    assert_eq!(total.counters.expanded, expanded);
    assert_eq!(total.counters.generated, generated);
    assert_eq!(total.counters.duplicates, duplicates);
}

#[test]
fn anytime_on_an_admissible_grid_is_optimal_in_one_iteration() {
    let grid = |wall: &[(u32, u32)]| GridDomain::new(7, 7, wall, (0, 0), (6, 6)).unwrap();
    let wall: Vec<(u32, u32)> = (1..7).map(|y| (3, y)).collect();

    let mut plain =
        BestFirstEngine::new(grid(&wall), BinaryOpen::new(), EngineConfigV1::default()).unwrap();
    let plain_cost = plain.search().solution.expect("reachable goal").cost;

    let engine =
        BestFirstEngine::new(grid(&wall), BinaryOpen::new(), EngineConfigV1::default()).unwrap();
    let mut anytime = AnytimeSearch::new(engine);
    let total = anytime.run();

    // Manhattan is consistent here, so iteration 0 is already optimal and
    // the continuation only certifies it.
    assert_eq!(total.solutions.len(), 1);
    assert_eq!(total.best_cost(), Some(plain_cost));
    assert_eq!(total.termination, TerminationReasonV1::OpenExhausted);
}
