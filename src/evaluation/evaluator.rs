//! Cheapest feasible insertion search over the open routes.

use super::Candidate;
use crate::models::TopTwProblem;
use crate::state::RouteState;

/// Finds, for each unrouted POI, where it can be inserted without breaking
/// any time window or the route duration limit.
///
/// Each open route is walked from its depot and the **first** feasible
/// position fixes that route's offer for the POI. Across routes the
/// cheapest offer wins (first route on ties). POIs with no feasible
/// position anywhere produce no candidate.
///
/// # Examples
///
/// ```
/// use u_orienteering::models::{Poi, TimeWindow, TopTwProblem};
/// use u_orienteering::state::RouteState;
/// use u_orienteering::evaluation::CandidateEvaluator;
///
/// let pois = vec![
///     Poi::depot(0.0, 0.0, TimeWindow::new(0.0, 30.0).unwrap()),
///     Poi::new(1, 3.0, 4.0, 10.0, 1.0),
///     Poi::new(2, 30.0, 40.0, 20.0, 1.0),
/// ];
/// let problem = TopTwProblem::new(pois, 1).unwrap();
/// let mut state = RouteState::new(&problem);
/// state.init_solution(1);
///
/// let evaluator = CandidateEvaluator::new(&problem);
/// let candidates = evaluator.evaluate(&[1, 2], &state);
/// // POI 2 is 50 away: the round trip cannot return before 30
/// assert_eq!(candidates.len(), 1);
/// assert_eq!(candidates[0].customer, 1);
/// assert!((candidates[0].cost - 10.0).abs() < 1e-10);
/// ```
pub struct CandidateEvaluator<'a> {
    problem: &'a TopTwProblem,
}

impl<'a> CandidateEvaluator<'a> {
    /// Creates a new evaluator for the given problem.
    pub fn new(problem: &'a TopTwProblem) -> Self {
        Self { problem }
    }

    /// Evaluates every unrouted POI against the current routes.
    ///
    /// Returns one candidate per insertable POI, sorted by ascending cost
    /// (stable, so equal costs keep the order of `unrouted`).
    pub fn evaluate(&self, unrouted: &[usize], state: &RouteState<'_>) -> Vec<Candidate> {
        let mut candidates: Vec<Candidate> = unrouted
            .iter()
            .filter_map(|&customer| self.best_candidate(customer, state))
            .collect();
        candidates.sort_by(|a, b| a.cost.total_cmp(&b.cost));
        candidates
    }

    /// Cheapest per-route first-fit insertion of `customer`, if any.
    pub fn best_candidate(&self, customer: usize, state: &RouteState<'_>) -> Option<Candidate> {
        let mut best: Option<Candidate> = None;
        for route in 0..state.created_routes() {
            if let Some(candidate) = self.first_fit(customer, route, state) {
                if best.as_ref().is_none_or(|b| candidate.cost < b.cost) {
                    best = Some(candidate);
                }
            }
        }
        best
    }

    /// First feasible position for `customer` on `route`, walking from the
    /// depot.
    pub fn first_fit(
        &self,
        customer: usize,
        route: usize,
        state: &RouteState<'_>,
    ) -> Option<Candidate> {
        let depot = state.depot(route);
        let mut pre = depot;
        loop {
            let suc = state.successor(pre)?;
            if self.is_feasible_insertion(customer, pre, suc, route, state) {
                return Some(Candidate {
                    customer,
                    route,
                    predecessor: pre,
                    cost: self.insertion_cost(customer, pre, suc),
                    score: self.problem.score(customer),
                });
            }
            if suc == depot {
                return None;
            }
            pre = suc;
        }
    }

    /// Extra travel distance of visiting `customer` between `pre` and `suc`.
    pub fn insertion_cost(&self, customer: usize, pre: usize, suc: usize) -> f64 {
        let p = self.problem;
        p.distance(pre, customer) + p.distance(customer, suc) - p.distance(pre, suc)
    }

    /// Checks whether `customer` fits between `pre` and `suc` on `route`.
    ///
    /// The customer must be reached before its due time. The resulting
    /// delay is then pushed down the route: every later POI must still be
    /// reached before its due time and the vehicle must be back at the
    /// depot by the maximum route time. The walk stops as soon as waiting
    /// at some POI absorbs the delay, since nothing after it moves.
    pub fn is_feasible_insertion(
        &self,
        customer: usize,
        pre: usize,
        suc: usize,
        route: usize,
        state: &RouteState<'_>,
    ) -> bool {
        let p = self.problem;
        let depot = state.depot(route);

        let arrival = state.departure_time(route, pre) + p.distance(pre, customer);
        if arrival > p.due_time(customer) {
            return false;
        }
        let mut time = arrival.max(p.ready_time(customer)) + p.service_time(customer);
        let mut prev = customer;
        let mut node = suc;

        loop {
            let arrival = time + p.distance(prev, node);
            if node == depot {
                return arrival <= p.max_time_per_route();
            }
            if arrival > p.due_time(node) {
                return false;
            }
            let departure = arrival.max(p.ready_time(node)) + p.service_time(node);
            if departure <= state.departure_time(route, node) {
                return true;
            }
            let Some(next) = state.successor(node) else {
                return false;
            };
            time = departure;
            prev = node;
            node = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Poi, TimeWindow};

    fn tw(ready: f64, due: f64) -> TimeWindow {
        TimeWindow::new(ready, due).expect("valid")
    }

    /// POIs on the x axis; depot at the origin.
    fn line_problem(vehicles: usize, depot_due: f64) -> TopTwProblem {
        let pois = vec![
            Poi::depot(0.0, 0.0, tw(0.0, depot_due)),
            Poi::new(1, 1.0, 0.0, 10.0, 1.0),
            Poi::new(2, 2.0, 0.0, 20.0, 1.0).with_time_window(tw(0.0, 4.0)),
            Poi::new(3, 3.0, 0.0, 5.0, 1.0),
            Poi::new(4, 10.0, 0.0, 7.0, 1.0),
        ];
        TopTwProblem::new(pois, vehicles).expect("valid problem")
    }

    #[test]
    fn test_insertion_cost() {
        let p = line_problem(1, 100.0);
        let eval = CandidateEvaluator::new(&p);
        // depot alias 5: 0 -> 1 -> 0 = 2, minus 0 -> 0
        assert!((eval.insertion_cost(1, 5, 5) - 2.0).abs() < 1e-10);
        // 1 -> 2 -> 3 on a line costs nothing extra
        assert!((eval.insertion_cost(2, 1, 3)).abs() < 1e-10);
    }

    #[test]
    fn test_empty_route_candidates_sorted() {
        let p = line_problem(1, 100.0);
        let mut s = RouteState::new(&p);
        s.init_solution(1);
        let eval = CandidateEvaluator::new(&p);
        let cands = eval.evaluate(&[4, 3, 1, 2], &s);
        let ids: Vec<usize> = cands.iter().map(|c| c.customer).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert!(cands.windows(2).all(|w| w[0].cost <= w[1].cost));
        assert!(cands.iter().all(|c| c.predecessor == 5 && c.route == 0));
        assert_eq!(cands[1].score, 20.0);
    }

    #[test]
    fn test_no_routes_no_candidates() {
        let p = line_problem(1, 100.0);
        let s = RouteState::new(&p);
        let eval = CandidateEvaluator::new(&p);
        assert!(eval.evaluate(&[1, 2, 3], &s).is_empty());
    }

    #[test]
    fn test_route_duration_rejects() {
        // POI 4 round trip = 20 + 1 service > 15
        let p = line_problem(1, 15.0);
        let mut s = RouteState::new(&p);
        s.init_solution(1);
        let eval = CandidateEvaluator::new(&p);
        assert!(eval.best_candidate(4, &s).is_none());
        assert!(eval.best_candidate(3, &s).is_some());
    }

    #[test]
    fn test_own_due_time_rejects() {
        let p = line_problem(1, 100.0);
        let mut s = RouteState::new(&p);
        s.init_solution(1);
        s.insert_after(4, 5);
        s.forward_propagate(0, 5);
        let eval = CandidateEvaluator::new(&p);
        // after 4 the vehicle leaves at 11, too late for POI 2 (due 4)
        assert!(!eval.is_feasible_insertion(2, 4, 5, 0, &s));
        // before 4 it arrives at 2
        assert!(eval.is_feasible_insertion(2, 5, 4, 0, &s));
    }

    #[test]
    fn test_downstream_due_time_rejects() {
        let p = line_problem(1, 100.0);
        let mut s = RouteState::new(&p);
        s.init_solution(1);
        s.insert_after(2, 5);
        s.forward_propagate(0, 5);
        let eval = CandidateEvaluator::new(&p);
        // 0 -> 4 -> 2: reaching 2 at 19 misses its due time of 4
        assert!(!eval.is_feasible_insertion(4, 5, 2, 0, &s));
        // 0 -> 1 -> 2: reaching 2 at 3 is fine
        assert!(eval.is_feasible_insertion(1, 5, 2, 0, &s));
    }

    #[test]
    fn test_first_fit_not_best_fit() {
        let p = line_problem(1, 100.0);
        let mut s = RouteState::new(&p);
        s.init_solution(1);
        s.insert_after(1, 5);
        s.forward_propagate(0, 5);
        s.insert_after(3, 1);
        s.forward_propagate(0, 1);
        let eval = CandidateEvaluator::new(&p);
        // route: 0 -> 1 -> 3 -> 0; position after depot is feasible first
        let c = eval.first_fit(2, 0, &s).expect("feasible");
        assert_eq!(c.predecessor, 5);
        // cheaper slot between 1 and 3 exists but is not chosen
        assert!(eval.insertion_cost(2, 1, 3) < c.cost);
    }

    #[test]
    fn test_cheapest_route_wins() {
        let p = line_problem(2, 100.0);
        let mut s = RouteState::new(&p);
        s.init_solution(2);
        // route 0 holds POI 4 far away, route 1 holds POI 1
        s.insert_after(4, 5);
        s.forward_propagate(0, 5);
        s.insert_after(1, 6);
        s.forward_propagate(1, 6);
        let eval = CandidateEvaluator::new(&p);
        let c = eval.best_candidate(3, &s).expect("feasible");
        // route 0 offers 0 -> 3 -> 4 at cost 0, route 1 offers 0 -> 3 -> 1 at cost 4
        assert_eq!(c.route, 0);
        assert!(c.cost.abs() < 1e-10);
    }

    #[test]
    fn test_waiting_absorbs_delay() {
        let pois = vec![
            Poi::depot(0.0, 0.0, tw(0.0, 100.0)),
            Poi::new(1, 1.0, 0.0, 1.0, 1.0),
            Poi::new(2, 2.0, 0.0, 1.0, 1.0).with_time_window(tw(50.0, 52.0)),
        ];
        let p = TopTwProblem::new(pois, 1).expect("valid problem");
        let mut s = RouteState::new(&p);
        s.init_solution(1);
        s.insert_after(2, 3);
        s.forward_propagate(0, 3);
        let eval = CandidateEvaluator::new(&p);
        // visiting 1 first still reaches 2 before it opens
        assert!(eval.is_feasible_insertion(1, 3, 2, 0, &s));
    }
}
