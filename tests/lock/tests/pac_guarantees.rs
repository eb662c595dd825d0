//! Lock: PAC stopping conditions terminate early only when their
//! guarantee actually holds, and parameter validation is fail-closed.

use std::io::Write;

use lock_tests::fixtures::{near_optimal_first_graph, two_route_graph, WeightedGraph};
use wayfinder_harness::stats_io::statistics_from_file;
use wayfinder_search::anytime::AnytimeSearch;
use wayfinder_search::config::EngineConfigV1;
use wayfinder_search::engine::BestFirstEngine;
use wayfinder_search::error::SearchError;
use wayfinder_search::pac::{FMinCondition, RatioCondition, TrivialCondition};
use wayfinder_search::queue::BinaryOpen;
use wayfinder_search::result::TerminationReasonV1;

fn engine(graph: WeightedGraph) -> BestFirstEngine<WeightedGraph, BinaryOpen> {
    BestFirstEngine::new(graph, BinaryOpen::new(), EngineConfigV1::default()).unwrap()
}

#[test]
fn fmin_stop_is_within_epsilon_of_the_true_optimum() {
    // True optimal cost of this fixture is 9.5.
    let epsilon = 0.25;
    let condition = FMinCondition::new(epsilon).unwrap();
    let mut anytime =
        AnytimeSearch::with_condition(engine(near_optimal_first_graph()), Box::new(condition));

    let total = anytime.run();
    assert_eq!(total.termination, TerminationReasonV1::PacSatisfied);
    assert!(total.pac_satisfied());

    let cost = total.best_cost().expect("stopped with an incumbent");
    assert!(cost / 9.5 <= 1.0 + epsilon, "quality guarantee broken: {cost}");

    // The certificate itself: incumbent within (1+eps) of the proven
    // lower bound, and the bound below the true optimum.
    let fmin = total.fmin().expect("fmin extra present");
    assert!(cost / fmin <= 1.0 + epsilon + 1e-12);
    assert!(fmin <= 9.5 + 1e-12);
}

#[test]
fn trivial_condition_built_from_statistics_file_stops_at_threshold() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(
        br#"{ "instances": {
            "a": { "optimal": 11.0, "initial_h": 4.0 },
            "b": { "optimal": 7.0, "initial_h": 3.0 }
        } }"#,
    )
    .unwrap();
    let stats = statistics_from_file(file.path()).unwrap();

    // delta = 0 takes the maximum benchmark cost, 11.
    let condition = TrivialCondition::new(&stats, 0.0, 0.0).unwrap();
    assert_eq!(condition.threshold(), 11.0);

    let mut anytime =
        AnytimeSearch::with_condition(engine(two_route_graph()), Box::new(condition));
    let first = anytime.search();
    // Iteration 0 finds cost 11, which meets the threshold exactly.
    assert_eq!(first.best_cost(), Some(11.0));
    assert!(first.pac_satisfied());
}

#[test]
fn ratio_condition_rescales_by_the_instance_initial_h() {
    // Fixture initial h is 1.0; a benchmark ratio table topping out at
    // 10.0 accepts the first solution (cost 10) with epsilon 0.
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(
        br#"{ "instances": {
            "a": { "optimal": 10.0, "initial_h": 1.0 },
            "b": { "optimal": 4.0, "initial_h": 2.0 }
        } }"#,
    )
    .unwrap();
    let stats = statistics_from_file(file.path()).unwrap();
    let condition = RatioCondition::new(&stats, 0.0, 0.0).unwrap();

    let mut anytime =
        AnytimeSearch::with_condition(engine(near_optimal_first_graph()), Box::new(condition));
    let first = anytime.search();
    assert_eq!(first.best_cost(), Some(10.0));
    assert!(first.pac_satisfied());
}

#[test]
fn unsatisfied_condition_lets_the_search_run_to_exhaustion() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(br#"{ "instances": { "a": { "optimal": 1.0, "initial_h": 1.0 } } }"#)
        .unwrap();
    let stats = statistics_from_file(file.path()).unwrap();
    // Threshold 1.0: neither solution (11 then 2) qualifies.
    let condition = TrivialCondition::new(&stats, 0.0, 0.0).unwrap();

    let mut anytime =
        AnytimeSearch::with_condition(engine(two_route_graph()), Box::new(condition));
    let total = anytime.run();
    assert_eq!(total.termination, TerminationReasonV1::OpenExhausted);
    assert!(!total.pac_satisfied());
    assert_eq!(total.best_cost(), Some(2.0));
}

#[test]
fn result_extras_are_plain_json_values() {
    let mut anytime = AnytimeSearch::new(engine(two_route_graph()));
    let total = anytime.run();

    // Downstream tooling reads the extras bag as untyped JSON; lock the
    // key names and value shapes it relies on.
    assert_eq!(total.extras["pac_satisfied"], serde_json::json!(false));
    let fmin = total.extras["fmin"]
        .as_f64()
        .expect("fmin extra is a JSON number");
    assert!(fmin <= total.best_cost().unwrap() + 1e-12);
}

#[test]
fn parameter_validation_is_fail_closed() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(br#"{ "instances": { "a": { "optimal": 5.0, "initial_h": 2.0 } } }"#)
        .unwrap();
    let stats = statistics_from_file(file.path()).unwrap();

    assert!(matches!(
        FMinCondition::new(-0.5),
        Err(SearchError::InvalidEpsilon { .. })
    ));
    assert!(matches!(
        TrivialCondition::new(&stats, 0.1, 1.5),
        Err(SearchError::InvalidDelta { .. })
    ));
    assert!(matches!(
        RatioCondition::new(&stats, f64::NAN, 0.5),
        Err(SearchError::InvalidEpsilon { .. })
    ));
}
