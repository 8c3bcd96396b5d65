//! Randomized greedy construction of one complete solution.
//!
//! # Algorithm
//!
//! Each pass re-evaluates every unrouted POI against the current routes,
//! keeps the cheapest insertions in a restricted candidate list, draws one
//! of them under the selection policy and splices it in, propagating the
//! new departure times down the route. When nothing fits, another route
//! is opened; when the fleet is exhausted, construction stops and the
//! remaining POIs stay unrouted.
//!
//! # Complexity
//!
//! O(m · l · u) per pass for m routes of length l and u unrouted POIs,
//! with at most n + v passes for n POIs and v vehicles.

use rand::Rng;
use tracing::debug;

use super::rcl::{build_rcl, select};
use super::{GraspConfig, SelectionPolicy};
use crate::evaluation::{Candidate, CandidateEvaluator};
use crate::models::TopTwProblem;
use crate::state::RouteState;

/// Outcome of one construction pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    /// Splice this candidate into its route.
    Insert(Candidate),
    /// Nothing fits in the open routes; open another one.
    OpenRoute,
    /// Nothing fits and the fleet is exhausted, or every POI is routed.
    Done,
}

/// Counters of a single construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConstructionStats {
    /// Evaluate-and-decide passes, including the terminating one.
    pub passes: usize,
    /// POIs inserted.
    pub insertions: usize,
    /// Routes opened after initialization.
    pub routes_opened: usize,
    /// POIs left out.
    pub unrouted: usize,
}

/// Builds TOPTW solutions by randomized cheapest insertion.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use u_orienteering::models::{Poi, TimeWindow, TopTwProblem};
/// use u_orienteering::state::RouteState;
/// use u_orienteering::grasp::{GreedyConstructor, SelectionPolicy};
///
/// let pois = vec![
///     Poi::depot(0.0, 0.0, TimeWindow::new(0.0, 100.0).unwrap()),
///     Poi::new(1, 1.0, 0.0, 10.0, 1.0),
///     Poi::new(2, 2.0, 0.0, 20.0, 1.0),
/// ];
/// let problem = TopTwProblem::new(pois, 1).unwrap();
/// let constructor = GreedyConstructor::new(&problem, 2, SelectionPolicy::Random);
///
/// let mut state = RouteState::new(&problem);
/// let mut rng = StdRng::seed_from_u64(42);
/// let stats = constructor.construct(&mut state, &mut rng);
/// assert_eq!(stats.insertions, 2);
/// assert_eq!(state.fitness(), 30.0);
/// ```
pub struct GreedyConstructor<'a> {
    problem: &'a TopTwProblem,
    evaluator: CandidateEvaluator<'a>,
    rcl_size: usize,
    policy: SelectionPolicy,
    initial_routes: usize,
}

impl<'a> GreedyConstructor<'a> {
    /// Creates a constructor that starts from a single route.
    ///
    /// # Panics
    ///
    /// Panics if `rcl_size` is zero.
    pub fn new(problem: &'a TopTwProblem, rcl_size: usize, policy: SelectionPolicy) -> Self {
        assert!(rcl_size > 0, "rcl_size must be at least 1");
        Self {
            problem,
            evaluator: CandidateEvaluator::new(problem),
            rcl_size,
            policy,
            initial_routes: 1,
        }
    }

    /// Creates a constructor from run configuration.
    pub fn from_config(problem: &'a TopTwProblem, config: &GraspConfig) -> Self {
        Self::new(problem, config.rcl_size, config.policy).with_initial_routes(config.initial_routes)
    }

    /// Sets how many routes are open before the first insertion.
    pub fn with_initial_routes(mut self, n: usize) -> Self {
        self.initial_routes = n;
        self
    }

    /// Resets `state` and fills it with one complete solution.
    pub fn construct<R: Rng + ?Sized>(
        &self,
        state: &mut RouteState<'a>,
        rng: &mut R,
    ) -> ConstructionStats {
        state.init_solution(self.initial_routes);
        let mut unrouted: Vec<usize> = (1..=self.problem.poi_count()).collect();
        let mut stats = ConstructionStats::default();

        while !unrouted.is_empty() {
            stats.passes += 1;
            match self.next_step(&unrouted, state, rng) {
                Step::Insert(chosen) => {
                    state.insert_after(chosen.customer, chosen.predecessor);
                    state.forward_propagate(chosen.route, chosen.predecessor);
                    unrouted.retain(|&c| c != chosen.customer);
                    stats.insertions += 1;
                    debug!(
                        customer = chosen.customer,
                        route = chosen.route,
                        after = chosen.predecessor,
                        cost = chosen.cost,
                        "inserted"
                    );
                }
                Step::OpenRoute => {
                    if let Some(depot) = state.add_route() {
                        stats.routes_opened += 1;
                        debug!(depot, routes = state.created_routes(), "opened route");
                    }
                }
                Step::Done => break,
            }
        }

        stats.unrouted = unrouted.len();
        stats
    }

    /// Decides what the next pass does, without changing `state`.
    pub fn next_step<R: Rng + ?Sized>(
        &self,
        unrouted: &[usize],
        state: &RouteState<'_>,
        rng: &mut R,
    ) -> Step {
        if unrouted.is_empty() {
            return Step::Done;
        }
        let candidates = self.evaluator.evaluate(unrouted, state);
        if candidates.is_empty() {
            return if state.created_routes() < self.problem.vehicle_count() {
                Step::OpenRoute
            } else {
                Step::Done
            };
        }
        let rcl = build_rcl(&candidates, self.rcl_size);
        match select(rcl, self.policy, self.problem.max_score(), rng) {
            Some(pos) => Step::Insert(rcl[pos]),
            None => Step::Done,
        }
    }
}
