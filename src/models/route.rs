//! Route and visit snapshots.

use serde::Serialize;

/// A single visit to a POI within a finished route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Visit {
    /// POI being visited.
    pub poi_id: usize,
    /// Arrival time at this POI.
    pub arrival_time: f64,
    /// Service start (arrival, or the window's ready time if early).
    pub service_start: f64,
    /// Departure time (service start + service duration).
    pub departure_time: f64,
}

/// An ordered sequence of POI visits served by one vehicle.
///
/// A route starts and ends at the depot (not stored in `visits`).
///
/// # Examples
///
/// ```
/// use u_orienteering::models::{Route, Visit};
///
/// let mut route = Route::new(0);
/// route.push_visit(
///     Visit {
///         poi_id: 1,
///         arrival_time: 10.0,
///         service_start: 10.0,
///         departure_time: 20.0,
///     },
///     7.5,
/// );
/// assert_eq!(route.len(), 1);
/// assert_eq!(route.score(), 7.5);
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct Route {
    route_index: usize,
    visits: Vec<Visit>,
    score: f64,
    total_distance: f64,
    end_time: f64,
}

impl Route {
    /// Creates an empty route for the given route slot.
    pub fn new(route_index: usize) -> Self {
        Self {
            route_index,
            visits: Vec::new(),
            score: 0.0,
            total_distance: 0.0,
            end_time: 0.0,
        }
    }

    /// Appends a visit and adds its score.
    pub fn push_visit(&mut self, visit: Visit, score: f64) {
        self.score += score;
        self.visits.push(visit);
    }

    /// Position of this route in the solution (0-based vehicle slot).
    pub fn route_index(&self) -> usize {
        self.route_index
    }

    pub fn visits(&self) -> &[Visit] {
        &self.visits
    }

    /// Number of POI visits (excluding depot).
    pub fn len(&self) -> usize {
        self.visits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visits.is_empty()
    }

    /// POI IDs in visit order.
    pub fn poi_ids(&self) -> Vec<usize> {
        self.visits.iter().map(|v| v.poi_id).collect()
    }

    /// Sum of the scores collected on this route.
    pub fn score(&self) -> f64 {
        self.score
    }

    /// Depot-to-depot travel distance.
    pub fn total_distance(&self) -> f64 {
        self.total_distance
    }

    /// Arrival time back at the depot.
    pub fn end_time(&self) -> f64 {
        self.end_time
    }

    pub fn set_total_distance(&mut self, d: f64) {
        self.total_distance = d;
    }

    pub fn set_end_time(&mut self, t: f64) {
        self.end_time = t;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn visit(poi_id: usize, arrival: f64) -> Visit {
        Visit {
            poi_id,
            arrival_time: arrival,
            service_start: arrival,
            departure_time: arrival + 1.0,
        }
    }

    #[test]
    fn test_route_empty() {
        let r = Route::new(2);
        assert!(r.is_empty());
        assert_eq!(r.route_index(), 2);
        assert_eq!(r.score(), 0.0);
        assert_eq!(r.total_distance(), 0.0);
    }

    #[test]
    fn test_route_push_visit() {
        let mut r = Route::new(0);
        r.push_visit(visit(5, 10.0), 3.0);
        r.push_visit(visit(3, 20.0), 4.0);
        r.set_total_distance(42.0);
        r.set_end_time(30.0);
        assert_eq!(r.len(), 2);
        assert_eq!(r.poi_ids(), vec![5, 3]);
        assert_eq!(r.score(), 7.0);
        assert_eq!(r.total_distance(), 42.0);
        assert_eq!(r.end_time(), 30.0);
    }
}
