//! Solution and violation types.

use std::fmt;

use serde::Serialize;

use super::Route;

/// A type of constraint violation in a route or solution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ViolationType {
    /// Arrival after the POI's time window closes.
    TimeWindowViolated {
        /// POI where the violation occurred.
        poi_id: usize,
        /// Actual arrival time.
        arrival: f64,
        /// Time window due date.
        due: f64,
    },
    /// Service started before the POI's window opened.
    EarlyService {
        /// POI where the violation occurred.
        poi_id: usize,
        /// Recorded service start.
        service_start: f64,
        /// Time window ready time.
        ready: f64,
    },
    /// Route returns to the depot after the maximum route duration.
    MaxDurationExceeded {
        /// Route index.
        route_index: usize,
        /// Arrival time back at the depot.
        end_time: f64,
        /// Maximum allowed route time.
        max_duration: f64,
    },
    /// A visit refers to the depot or to an id outside the instance.
    UnknownPoi {
        /// The offending id.
        poi_id: usize,
    },
    /// A POI appears more than once across the solution.
    DuplicateVisit {
        /// The repeated POI.
        poi_id: usize,
    },
}

/// A constraint violation in a solution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Violation {
    /// The type of violation.
    pub kind: ViolationType,
}

impl Violation {
    /// Creates a new violation.
    pub fn new(kind: ViolationType) -> Self {
        Self { kind }
    }
}

/// A finished TOPTW solution: routes, unrouted POIs, collected score.
///
/// # Examples
///
/// ```
/// use u_orienteering::models::{Route, Solution};
///
/// let mut sol = Solution::new();
/// sol.add_route(Route::new(0));
/// sol.add_unrouted(4);
/// assert_eq!(sol.num_routes(), 1);
/// assert_eq!(sol.unrouted(), &[4]);
/// assert_eq!(sol.fitness(), 0.0);
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct Solution {
    routes: Vec<Route>,
    unrouted: Vec<usize>,
}

impl Solution {
    /// Creates an empty solution.
    pub fn new() -> Self {
        Self {
            routes: Vec::new(),
            unrouted: Vec::new(),
        }
    }

    /// Adds a route to this solution.
    pub fn add_route(&mut self, route: Route) {
        self.routes.push(route);
    }

    /// Marks a POI as left out of every route.
    pub fn add_unrouted(&mut self, poi_id: usize) {
        self.unrouted.push(poi_id);
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Number of routes opened.
    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    /// POIs not visited by any route.
    pub fn unrouted(&self) -> &[usize] {
        &self.unrouted
    }

    /// Sum of the scores of all routed POIs.
    pub fn fitness(&self) -> f64 {
        self.routes.iter().map(Route::score).sum()
    }

    /// Total distance across all routes.
    pub fn total_distance(&self) -> f64 {
        self.routes.iter().map(Route::total_distance).sum()
    }

    /// Total number of POIs served across all routes.
    pub fn num_served(&self) -> usize {
        self.routes.iter().map(Route::len).sum()
    }
}

impl Default for Solution {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "fitness: {:.2}  routes: {}  served: {}  distance: {:.2}",
            self.fitness(),
            self.num_routes(),
            self.num_served(),
            self.total_distance()
        )?;
        for route in &self.routes {
            write!(f, "  route {}: depot", route.route_index())?;
            for visit in route.visits() {
                write!(f, " -> {}", visit.poi_id)?;
            }
            writeln!(
                f,
                " -> depot  (score {:.2}, end {:.2})",
                route.score(),
                route.end_time()
            )?;
        }
        if !self.unrouted.is_empty() {
            let ids: Vec<String> = self.unrouted.iter().map(|id| id.to_string()).collect();
            writeln!(f, "  unrouted: {}", ids.join(", "))?;
        }
        Ok(())
    }
}
