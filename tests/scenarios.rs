use rand::rngs::StdRng;
use rand::SeedableRng;

use u_orienteering::evaluation::audit_solution;
use u_orienteering::grasp::{Grasp, GraspConfig, GreedyConstructor, SelectionPolicy};
use u_orienteering::io::read_instance;
use u_orienteering::models::{Poi, TimeWindow, TopTwProblem};
use u_orienteering::state::RouteState;

fn sample_path() -> String {
    format!("{}/data/sample.txt", env!("CARGO_MANIFEST_DIR"))
}

fn tw(ready: f64, due: f64) -> TimeWindow {
    TimeWindow::new(ready, due).expect("valid window")
}

#[test]
fn loose_windows_route_every_poi() {
    let w = tw(0.0, 1000.0);
    let pois = vec![
        Poi::depot(0.0, 0.0, w),
        Poi::new(1, 10.0, 0.0, 10.0, 5.0).with_time_window(w),
        Poi::new(2, 0.0, 10.0, 20.0, 5.0).with_time_window(w),
        Poi::new(3, -10.0, 0.0, 5.0, 5.0).with_time_window(w),
        Poi::new(4, 0.0, -10.0, 15.0, 5.0).with_time_window(w),
    ];
    let problem = TopTwProblem::new(pois, 1).expect("valid problem");
    let report = Grasp::new(&problem, GraspConfig::default().with_seed(3))
        .run()
        .expect("valid config");

    assert_eq!(report.best_fitness, 50.0);
    assert!(report.fitness_history.iter().all(|&f| f == 50.0));
    assert!(report.best_solution.unrouted().is_empty());
    assert_eq!(report.best_solution.num_routes(), 1);
}

#[test]
fn opposite_tight_windows_split_or_drop() {
    let pois = vec![
        Poi::depot(0.0, 0.0, tw(0.0, 100.0)),
        Poi::new(1, 10.0, 0.0, 10.0, 5.0).with_time_window(tw(0.0, 15.0)),
        Poi::new(2, -10.0, 0.0, 20.0, 5.0).with_time_window(tw(0.0, 15.0)),
    ];

    let single = TopTwProblem::new(pois.clone(), 1).expect("valid problem");
    let ctor = GreedyConstructor::new(&single, 2, SelectionPolicy::Random);
    let mut state = RouteState::new(&single);
    ctor.construct(&mut state, &mut StdRng::seed_from_u64(0));
    let solution = state.to_solution();
    assert_eq!(solution.num_served(), 1);
    assert_eq!(solution.unrouted().len(), 1);

    let pair = TopTwProblem::new(pois, 2).expect("valid problem");
    let ctor = GreedyConstructor::new(&pair, 2, SelectionPolicy::Random);
    let mut state = RouteState::new(&pair);
    ctor.construct(&mut state, &mut StdRng::seed_from_u64(0));
    let solution = state.to_solution();
    assert_eq!(solution.num_routes(), 2);
    assert_eq!(solution.fitness(), 30.0);
    assert!(audit_solution(&pair, &solution).is_empty());
}

#[test]
fn waiting_for_a_window_delays_the_route() {
    let pois = vec![
        Poi::depot(0.0, 0.0, tw(0.0, 100.0)),
        Poi::new(1, 5.0, 0.0, 10.0, 2.0).with_time_window(tw(20.0, 40.0)),
    ];
    let problem = TopTwProblem::new(pois, 1).expect("valid problem");
    let ctor = GreedyConstructor::new(&problem, 1, SelectionPolicy::FuzzyBest);
    let mut state = RouteState::new(&problem);
    ctor.construct(&mut state, &mut StdRng::seed_from_u64(0));

    let solution = state.to_solution();
    let visit = &solution.routes()[0].visits()[0];
    assert_eq!(visit.arrival_time, 5.0);
    assert_eq!(visit.service_start, 20.0);
    assert_eq!(visit.departure_time, 22.0);
    assert_eq!(solution.routes()[0].end_time(), 27.0);
}

#[test]
fn sample_instance_runs_clean() {
    let problem = read_instance(sample_path()).expect("sample instance loads");
    assert_eq!(problem.poi_count(), 10);
    assert_eq!(problem.vehicle_count(), 2);
    assert_eq!(problem.max_time_per_route(), 200.0);

    for policy in [
        SelectionPolicy::Random,
        SelectionPolicy::FuzzyBest,
        SelectionPolicy::FuzzyAlphaCut { alpha: 0.5 },
    ] {
        let config = GraspConfig::default()
            .with_max_iterations(20)
            .with_rcl_size(4)
            .with_policy(policy)
            .with_seed(17);
        let report = Grasp::new(&problem, config).run().expect("valid config");
        let best = &report.best_solution;

        assert!(audit_solution(&problem, best).is_empty());
        assert!(best.num_routes() <= 2);
        assert_eq!(best.num_served() + best.unrouted().len(), 10);
        assert!(report.best_fitness > 0.0);
        assert!(report.mean_fitness <= report.best_fitness);
    }
}

#[test]
fn report_serializes_to_json() {
    let problem = read_instance(sample_path()).expect("sample instance loads");
    let config = GraspConfig::default().with_max_iterations(3).with_seed(2);
    let report = Grasp::new(&problem, config).run().expect("valid config");

    let json = serde_json::to_value(&report).expect("serializable report");
    assert_eq!(json["iterations"], 3);
    assert_eq!(json["seed"], 2);
    assert_eq!(json["fitness_history"].as_array().map(Vec::len), Some(3));
    assert!(json["best_solution"]["routes"].is_array());
}

#[test]
fn config_file_round_trip() {
    let text = r#"{
        "max_iterations": 5,
        "rcl_size": 2,
        "policy": { "kind": "fuzzy_alpha_cut", "alpha": 0.3 },
        "seed": 99
    }"#;
    let config: GraspConfig = serde_json::from_str(text).expect("valid config json");
    assert_eq!(config.policy, SelectionPolicy::FuzzyAlphaCut { alpha: 0.3 });
    assert_eq!(config.initial_routes, 1);

    let problem = read_instance(sample_path()).expect("sample instance loads");
    let a = Grasp::new(&problem, config.clone()).run().expect("valid config");
    let b = Grasp::new(&problem, config).run().expect("valid config");
    assert_eq!(a.fitness_history, b.fitness_history);
}
