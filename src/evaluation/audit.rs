//! Independent feasibility audit of finished solutions.

use crate::models::{Solution, TopTwProblem, Violation, ViolationType};

const EPS: f64 = 1e-9;

/// Re-checks a solution against the instance from scratch.
///
/// Recomputes the schedule of every route from its visit order and
/// reports late arrivals, service before a window opens, routes that come
/// back after the maximum route time, and POIs visited more than once.
/// A feasible solution yields an empty list.
pub fn audit_solution(problem: &TopTwProblem, solution: &Solution) -> Vec<Violation> {
    let mut violations = Vec::new();
    let mut visited = vec![false; problem.poi_count() + 1];

    for route in solution.routes() {
        let mut time = problem.ready_time(0);
        let mut prev = 0;

        for visit in route.visits() {
            let poi_id = visit.poi_id;
            if poi_id == 0 || poi_id > problem.poi_count() {
                violations.push(Violation::new(ViolationType::UnknownPoi { poi_id }));
                continue;
            }
            if visited[poi_id] {
                violations.push(Violation::new(ViolationType::DuplicateVisit { poi_id }));
                continue;
            }
            visited[poi_id] = true;

            let arrival = time + problem.distance(prev, poi_id);
            let window = problem.poi(poi_id).time_window();
            if window.is_late(arrival, EPS) {
                violations.push(Violation::new(ViolationType::TimeWindowViolated {
                    poi_id,
                    arrival,
                    due: window.due(),
                }));
            }
            if visit.service_start + EPS < window.ready() {
                violations.push(Violation::new(ViolationType::EarlyService {
                    poi_id,
                    service_start: visit.service_start,
                    ready: window.ready(),
                }));
            }

            time = window.service_start(arrival) + problem.service_time(poi_id);
            prev = poi_id;
        }

        let end_time = time + problem.distance(prev, 0);
        if end_time > problem.max_time_per_route() + EPS {
            violations.push(Violation::new(ViolationType::MaxDurationExceeded {
                route_index: route.route_index(),
                end_time,
                max_duration: problem.max_time_per_route(),
            }));
        }
    }

    violations
}
