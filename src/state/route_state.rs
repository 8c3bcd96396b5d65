//! Mutable multi-route solution under construction.

use crate::models::{Route, Solution, TopTwProblem, Visit};

const UNLINKED: usize = usize::MAX;

/// Routes as disjoint circular doubly-linked lists over node ids.
///
/// Nodes `1..=poi_count` are POIs. Route `k` owns the depot alias
/// `poi_count + 1 + k`, which links to itself while the route is empty.
/// POIs that are not in any route carry no links.
///
/// Each route keeps a departure-time vector indexed by POI; the entry of
/// a POI is valid only while the POI sits in that route. Depot aliases
/// have no stored entry: a route leaves the depot at its ready time.
/// Link slots for a depot alias are allocated when its route opens.
///
/// # Examples
///
/// ```
/// use u_orienteering::models::{Poi, TimeWindow, TopTwProblem};
/// use u_orienteering::state::RouteState;
///
/// let pois = vec![
///     Poi::depot(0.0, 0.0, TimeWindow::new(0.0, 100.0).unwrap()),
///     Poi::new(1, 3.0, 4.0, 10.0, 2.0),
///     Poi::new(2, 6.0, 8.0, 20.0, 2.0),
/// ];
/// let problem = TopTwProblem::new(pois, 1).unwrap();
///
/// let mut state = RouteState::new(&problem);
/// state.init_solution(1);
/// let depot = state.depot(0);
///
/// state.insert_after(2, depot);
/// state.forward_propagate(0, depot);
/// state.insert_after(1, depot);
/// state.forward_propagate(0, depot);
///
/// assert_eq!(state.route(0).collect::<Vec<_>>(), vec![1, 2]);
/// // depot -> 1: arrive 5, serve 2, leave 7; 1 -> 2: arrive 12, leave 14
/// assert_eq!(state.departure_time(0, 2), 14.0);
/// assert_eq!(state.fitness(), 30.0);
/// ```
#[derive(Debug, Clone)]
pub struct RouteState<'a> {
    problem: &'a TopTwProblem,
    created_routes: usize,
    predecessor: Vec<usize>,
    successor: Vec<usize>,
    departure: Vec<Vec<f64>>,
}

impl<'a> RouteState<'a> {
    /// Creates a state with no routes for the given problem.
    pub fn new(problem: &'a TopTwProblem) -> Self {
        let pois = problem.poi_count() + 1;
        Self {
            problem,
            created_routes: 0,
            predecessor: vec![UNLINKED; pois],
            successor: vec![UNLINKED; pois],
            departure: Vec::new(),
        }
    }

    /// The instance this state routes over.
    pub fn problem(&self) -> &'a TopTwProblem {
        self.problem
    }

    /// Clears every route and opens `initial_routes` empty ones.
    ///
    /// The count is capped by the fleet size.
    pub fn init_solution(&mut self, initial_routes: usize) {
        let pois = self.problem.poi_count() + 1;
        self.predecessor.truncate(pois);
        self.successor.truncate(pois);
        self.predecessor.fill(UNLINKED);
        self.successor.fill(UNLINKED);
        self.departure.clear();
        self.created_routes = 0;
        for _ in 0..initial_routes {
            if self.add_route().is_none() {
                break;
            }
        }
    }

    /// Opens a new empty route and returns its depot id.
    ///
    /// Returns `None` once every vehicle already has a route.
    pub fn add_route(&mut self) -> Option<usize> {
        if self.created_routes >= self.problem.vehicle_count() {
            return None;
        }
        let depot = self.depot(self.created_routes);
        debug_assert_eq!(self.successor.len(), depot);
        self.predecessor.push(depot);
        self.successor.push(depot);
        self.departure.push(vec![0.0; self.problem.poi_count() + 1]);
        self.created_routes += 1;
        Some(depot)
    }

    /// Number of routes opened so far.
    pub fn created_routes(&self) -> usize {
        self.created_routes
    }

    /// Depot id of route `route_index`.
    pub fn depot(&self, route_index: usize) -> usize {
        self.problem.poi_count() + 1 + route_index
    }

    /// Route index owning depot alias `depot`.
    pub fn route_index_of_depot(&self, depot: usize) -> Option<usize> {
        let route_index = depot.checked_sub(self.problem.poi_count() + 1)?;
        (route_index < self.created_routes).then_some(route_index)
    }

    /// Returns `true` if `node` is linked into some open route.
    pub fn is_routed(&self, node: usize) -> bool {
        self.successor.get(node).is_some_and(|&s| s != UNLINKED)
    }

    pub fn successor(&self, node: usize) -> Option<usize> {
        self.successor.get(node).copied().filter(|&s| s != UNLINKED)
    }

    pub fn predecessor(&self, node: usize) -> Option<usize> {
        self.predecessor.get(node).copied().filter(|&p| p != UNLINKED)
    }

    /// Splices `poi` between `predecessor` and its current successor.
    ///
    /// Does not touch departure times; call [`forward_propagate`] afterwards.
    ///
    /// # Panics
    ///
    /// Panics if `poi` is not a POI id, is already routed, or if
    /// `predecessor` is not part of an open route.
    ///
    /// [`forward_propagate`]: RouteState::forward_propagate
    pub fn insert_after(&mut self, poi: usize, predecessor: usize) {
        assert!(
            poi >= 1 && poi <= self.problem.poi_count(),
            "node {poi} is not a POI"
        );
        assert!(!self.is_routed(poi), "POI {poi} is already routed");
        assert!(
            self.is_routed(predecessor),
            "predecessor {predecessor} is not routed"
        );

        let successor = self.successor[predecessor];
        self.predecessor[poi] = predecessor;
        self.successor[poi] = successor;
        self.successor[predecessor] = poi;
        self.predecessor[successor] = poi;
    }

    /// Recomputes departure times from `from` up to the route's depot.
    ///
    /// Each successor leaves at
    /// `max(departure(pre) + distance(pre, suc), ready(suc)) + service(suc)`.
    ///
    /// # Panics
    ///
    /// Panics if `route_index` is not an open route or `from` is not linked.
    pub fn forward_propagate(&mut self, route_index: usize, from: usize) {
        let depot = self.depot(route_index);
        assert!(
            route_index < self.created_routes,
            "route {route_index} is not open"
        );
        assert!(self.is_routed(from), "node {from} is not routed");

        let problem = self.problem;
        let mut time = self.departure_time(route_index, from);
        let mut pre = from;
        loop {
            let suc = self.successor[pre];
            if suc == depot {
                break;
            }
            let arrival = time + problem.distance(pre, suc);
            time = arrival.max(problem.ready_time(suc)) + problem.service_time(suc);
            self.departure[route_index][suc] = time;
            pre = suc;
        }
    }

    /// Departure time of `node` on route `route_index`.
    ///
    /// For the route's depot this is the depot's ready time.
    pub fn departure_time(&self, route_index: usize, node: usize) -> f64 {
        if self.problem.is_depot(node) {
            self.problem.ready_time(node)
        } else {
            self.departure[route_index][node]
        }
    }

    /// Arrival time back at the depot for route `route_index`.
    pub fn end_time(&self, route_index: usize) -> f64 {
        let depot = self.depot(route_index);
        let last = self.predecessor[depot];
        self.departure_time(route_index, last) + self.problem.distance(last, depot)
    }

    /// Iterates the POIs of route `route_index` in visit order.
    pub fn route(&self, route_index: usize) -> RouteIter<'_> {
        let depot = self.depot(route_index);
        RouteIter {
            successor: &self.successor,
            depot,
            current: depot,
        }
    }

    /// Number of POIs on route `route_index`.
    pub fn route_len(&self, route_index: usize) -> usize {
        self.route(route_index).count()
    }

    /// Sum of the scores of every routed POI.
    pub fn fitness(&self) -> f64 {
        (0..self.created_routes)
            .flat_map(|r| self.route(r))
            .map(|poi| self.problem.score(poi))
            .sum()
    }

    /// Checks that links are mutually consistent and every route closes.
    ///
    /// Walks each route from its depot and requires it to come back within
    /// `poi_count + 1` steps, with `successor[predecessor[n]] == n` for
    /// every node on the way, and no POI shared between routes.
    pub fn links_consistent(&self) -> bool {
        let mut seen = vec![false; self.successor.len()];
        for route_index in 0..self.created_routes {
            let depot = self.depot(route_index);
            let mut node = depot;
            let mut steps = 0;
            loop {
                let next = self.successor[node];
                if next == UNLINKED || self.predecessor[next] != node {
                    return false;
                }
                steps += 1;
                if next == depot {
                    break;
                }
                if seen[next] || self.problem.is_depot(next) || steps > self.problem.poi_count()
                {
                    return false;
                }
                seen[next] = true;
                node = next;
            }
        }
        // Unrouted POIs must be fully unlinked.
        (1..=self.problem.poi_count()).all(|poi| {
            seen[poi] || (self.successor[poi] == UNLINKED && self.predecessor[poi] == UNLINKED)
        })
    }

    /// Builds a report snapshot of the current routes.
    ///
    /// Arrival and service times are recomputed from the links so the
    /// snapshot does not depend on the stored departure vectors.
    pub fn to_solution(&self) -> Solution {
        let problem = self.problem;
        let mut solution = Solution::new();

        for route_index in 0..self.created_routes {
            let depot = self.depot(route_index);
            let mut route = Route::new(route_index);
            let mut nodes = vec![depot];
            let mut time = self.departure_time(route_index, depot);
            let mut pre = depot;

            for poi in self.route(route_index) {
                let arrival_time = time + problem.distance(pre, poi);
                let service_start = problem.poi(poi).time_window().service_start(arrival_time);
                time = service_start + problem.service_time(poi);
                route.push_visit(
                    Visit {
                        poi_id: poi,
                        arrival_time,
                        service_start,
                        departure_time: time,
                    },
                    problem.score(poi),
                );
                nodes.push(poi);
                pre = poi;
            }
            nodes.push(depot);

            route.set_end_time(time + problem.distance(pre, depot));
            route.set_total_distance(problem.route_distance(&nodes));
            solution.add_route(route);
        }

        for poi in 1..=problem.poi_count() {
            if !self.is_routed(poi) {
                solution.add_unrouted(poi);
            }
        }
        solution
    }
}

/// Iterator over the POIs of one route, depot excluded.
pub struct RouteIter<'s> {
    successor: &'s [usize],
    depot: usize,
    current: usize,
}

impl Iterator for RouteIter<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let next = *self.successor.get(self.current)?;
        if next == self.depot || next == UNLINKED {
            return None;
        }
        self.current = next;
        Some(next)
    }
}
