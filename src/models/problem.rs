//! Team Orienteering Problem with Time Windows instance.

use thiserror::Error;

use super::Poi;
use crate::distance::DistanceMatrix;

/// Reasons a problem instance cannot be assembled.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ProblemError {
    /// The POI list does not start with a depot.
    #[error("instance has no depot")]
    MissingDepot,
    /// A POI's id does not match its position.
    #[error("POI at position {position} has id {id}")]
    IdMismatch { position: usize, id: usize },
    /// A POI carries a non-finite or negative value.
    #[error("POI {id} has invalid {field}: {value}")]
    InvalidValue {
        id: usize,
        field: &'static str,
        value: f64,
    },
    /// The fleet is too large to give every route its own depot id.
    #[error("fleet of {vehicles} vehicles is too large for {pois} POIs")]
    FleetTooLarge { vehicles: usize, pois: usize },
}

/// An immutable TOPTW instance: depot, POIs, fleet size and distances.
///
/// Index 0 is the depot and `1..=poi_count()` are the POIs. Indices above
/// `poi_count()` are depot aliases: each route gets its own depot id, and
/// every accessor maps such an id back to the depot. Callers should go
/// through these accessors instead of indexing the POI list directly.
///
/// # Examples
///
/// ```
/// use u_orienteering::models::{Poi, TimeWindow, TopTwProblem};
///
/// let pois = vec![
///     Poi::depot(0.0, 0.0, TimeWindow::new(0.0, 100.0).unwrap()),
///     Poi::new(1, 3.0, 4.0, 10.0, 1.0),
///     Poi::new(2, 6.0, 8.0, 20.0, 1.0),
/// ];
/// let problem = TopTwProblem::new(pois, 2).unwrap();
/// assert_eq!(problem.poi_count(), 2);
/// assert_eq!(problem.max_time_per_route(), 100.0);
/// // 3 is the depot alias of the first route
/// assert!(problem.is_depot(3));
/// assert!((problem.distance(3, 1) - 5.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct TopTwProblem {
    pois: Vec<Poi>,
    vehicle_count: usize,
    distances: DistanceMatrix,
    max_time_per_route: f64,
    max_score: f64,
}

impl TopTwProblem {
    /// Builds an instance and its distance matrix.
    ///
    /// `pois[0]` is the depot; its due time becomes the maximum route
    /// duration.
    pub fn new(pois: Vec<Poi>, vehicle_count: usize) -> Result<Self, ProblemError> {
        let depot = pois.first().ok_or(ProblemError::MissingDepot)?;
        let max_time_per_route = depot.time_window().due();
        // one node per POI plus one depot alias per route
        if pois.len().checked_add(vehicle_count).is_none() {
            return Err(ProblemError::FleetTooLarge {
                vehicles: vehicle_count,
                pois: pois.len() - 1,
            });
        }

        for (position, poi) in pois.iter().enumerate() {
            if poi.id() != position {
                return Err(ProblemError::IdMismatch {
                    position,
                    id: poi.id(),
                });
            }
            check_value(poi.id(), "x", poi.x(), false)?;
            check_value(poi.id(), "y", poi.y(), false)?;
            check_value(poi.id(), "score", poi.score(), true)?;
            check_value(poi.id(), "service time", poi.service_time(), true)?;
        }

        let max_score = pois[1..].iter().map(Poi::score).fold(0.0_f64, f64::max);
        let distances = DistanceMatrix::from_pois(&pois);

        Ok(Self {
            pois,
            vehicle_count,
            distances,
            max_time_per_route,
            max_score,
        })
    }

    /// Number of POIs, excluding the depot.
    pub fn poi_count(&self) -> usize {
        self.pois.len() - 1
    }

    /// Number of vehicles, i.e. the maximum number of routes.
    pub fn vehicle_count(&self) -> usize {
        self.vehicle_count
    }

    /// Returns `true` if `node` is a per-route depot alias.
    ///
    /// Index 0 itself is the geographic depot but never appears in a route.
    pub fn is_depot(&self, node: usize) -> bool {
        node > self.poi_count()
    }

    /// Maps depot aliases to index 0, leaves POIs untouched.
    fn canonical(&self, node: usize) -> usize {
        if self.is_depot(node) {
            0
        } else {
            node
        }
    }

    /// All locations; index 0 is the depot.
    pub fn pois(&self) -> &[Poi] {
        &self.pois
    }

    /// POI behind `node`, resolving depot aliases.
    pub fn poi(&self, node: usize) -> &Poi {
        &self.pois[self.canonical(node)]
    }

    /// Travel distance (and time) between two nodes.
    pub fn distance(&self, from: usize, to: usize) -> f64 {
        self.distances.get(self.canonical(from), self.canonical(to))
    }

    /// Total travel distance along a node sequence.
    pub fn route_distance(&self, nodes: &[usize]) -> f64 {
        nodes.windows(2).map(|w| self.distance(w[0], w[1])).sum()
    }

    pub fn x(&self, node: usize) -> f64 {
        self.poi(node).x()
    }

    pub fn y(&self, node: usize) -> f64 {
        self.poi(node).y()
    }

    pub fn score(&self, node: usize) -> f64 {
        self.poi(node).score()
    }

    pub fn ready_time(&self, node: usize) -> f64 {
        self.poi(node).time_window().ready()
    }

    pub fn due_time(&self, node: usize) -> f64 {
        self.poi(node).time_window().due()
    }

    pub fn service_time(&self, node: usize) -> f64 {
        self.poi(node).service_time()
    }

    /// Latest time a vehicle may be back at the depot.
    pub fn max_time_per_route(&self) -> f64 {
        self.max_time_per_route
    }

    /// Highest single-POI score in the instance, zero if there are no POIs.
    ///
    /// Normalizes fuzzy membership values into `[0, 1]`.
    pub fn max_score(&self) -> f64 {
        self.max_score
    }

    /// The underlying distance matrix (depot at index 0, no aliases).
    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }
}

fn check_value(
    id: usize,
    field: &'static str,
    value: f64,
    non_negative: bool,
) -> Result<(), ProblemError> {
    if !value.is_finite() || (non_negative && value < 0.0) {
        return Err(ProblemError::InvalidValue { id, field, value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TimeWindow;

    fn sample() -> TopTwProblem {
        let pois = vec![
            Poi::depot(0.0, 0.0, TimeWindow::new(0.0, 50.0).expect("valid")),
            Poi::new(1, 3.0, 4.0, 10.0, 2.0)
                .with_time_window(TimeWindow::new(5.0, 30.0).expect("valid")),
            Poi::new(2, 0.0, 8.0, 25.0, 3.0),
        ];
        TopTwProblem::new(pois, 2).expect("valid problem")
    }

    #[test]
    fn test_counts() {
        let p = sample();
        assert_eq!(p.poi_count(), 2);
        assert_eq!(p.vehicle_count(), 2);
        assert_eq!(p.max_time_per_route(), 50.0);
    }

    #[test]
    fn test_depot_aliases() {
        let p = sample();
        assert!(!p.is_depot(0));
        assert!(!p.is_depot(2));
        assert!(p.is_depot(3));
        assert!(p.is_depot(4));
        assert_eq!(p.due_time(4), 50.0);
        assert_eq!(p.score(3), 0.0);
        assert!((p.distance(4, 2) - 8.0).abs() < 1e-10);
        assert!((p.distance(3, 4)).abs() < 1e-10);
        assert_eq!(p.x(3), 0.0);
    }

    #[test]
    fn test_poi_accessors() {
        let p = sample();
        assert_eq!(p.ready_time(1), 5.0);
        assert_eq!(p.due_time(1), 30.0);
        assert_eq!(p.service_time(2), 3.0);
        assert_eq!(p.score(2), 25.0);
    }

    #[test]
    fn test_max_score_ignores_depot() {
        assert_eq!(sample().max_score(), 25.0);
    }

    #[test]
    fn test_route_distance() {
        let p = sample();
        // depot -> 1 -> 2 -> depot = 5 + 5 + 8
        assert!((p.route_distance(&[3, 1, 2, 3]) - 18.0).abs() < 1e-10);
        assert_eq!(p.route_distance(&[3]), 0.0);
    }

    #[test]
    fn test_missing_depot() {
        assert_eq!(TopTwProblem::new(vec![], 1).unwrap_err(), ProblemError::MissingDepot);
    }

    #[test]
    fn test_id_mismatch() {
        let pois = vec![
            Poi::depot(0.0, 0.0, TimeWindow::unbounded()),
            Poi::new(5, 1.0, 1.0, 1.0, 0.0),
        ];
        assert!(matches!(
            TopTwProblem::new(pois, 1),
            Err(ProblemError::IdMismatch { position: 1, id: 5 })
        ));
    }

    #[test]
    fn test_negative_score_rejected() {
        let pois = vec![
            Poi::depot(0.0, 0.0, TimeWindow::unbounded()),
            Poi::new(1, 1.0, 1.0, -3.0, 0.0),
        ];
        assert!(matches!(
            TopTwProblem::new(pois, 1),
            Err(ProblemError::InvalidValue { id: 1, field: "score", .. })
        ));
    }

    #[test]
    fn test_fleet_overflowing_node_ids() {
        let pois = vec![
            Poi::depot(0.0, 0.0, TimeWindow::unbounded()),
            Poi::new(1, 1.0, 1.0, 5.0, 0.0),
        ];
        assert_eq!(
            TopTwProblem::new(pois.clone(), usize::MAX).unwrap_err(),
            ProblemError::FleetTooLarge {
                vehicles: usize::MAX,
                pois: 1
            }
        );
        assert!(TopTwProblem::new(pois, usize::MAX - 2).is_ok());
    }
}
