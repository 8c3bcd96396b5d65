//! Point-of-interest and time window types.

use serde::{Deserialize, Serialize};

/// A time window during which service at a POI may start.
///
/// The vehicle must arrive no later than `due` and may arrive as early as
/// `ready` (waiting is allowed if early).
///
/// # Examples
///
/// ```
/// use u_orienteering::models::TimeWindow;
///
/// let tw = TimeWindow::new(100.0, 200.0).unwrap();
/// assert_eq!(tw.service_start(80.0), 100.0);
/// assert!(tw.is_late(250.0, 0.0));
/// assert!(!tw.is_late(200.5, 1.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeWindow {
    ready: f64,
    due: f64,
}

impl TimeWindow {
    /// Creates a new time window.
    ///
    /// Returns `None` if `ready > due` or either value is non-finite.
    pub fn new(ready: f64, due: f64) -> Option<Self> {
        if !ready.is_finite() || !due.is_finite() || ready > due {
            return None;
        }
        Some(Self { ready, due })
    }

    /// A window that opens at zero and never closes.
    pub fn unbounded() -> Self {
        Self {
            ready: 0.0,
            due: f64::MAX,
        }
    }

    /// Earliest allowable service start.
    pub fn ready(&self) -> f64 {
        self.ready
    }

    /// Latest allowable arrival time.
    pub fn due(&self) -> f64 {
        self.due
    }

    /// Time at which service starts for a vehicle arriving at `arrival`.
    pub fn service_start(&self, arrival: f64) -> f64 {
        arrival.max(self.ready)
    }

    /// Returns `true` if `arrival` is past the due time by more than `slack`.
    pub fn is_late(&self, arrival: f64, slack: f64) -> bool {
        arrival > self.due + slack
    }
}

/// A point of interest (or the depot) in an orienteering instance.
///
/// POI 0 is conventionally the depot. Every POI has a location, a score
/// collected when it is visited, a service duration, and a time window.
///
/// # Examples
///
/// ```
/// use u_orienteering::models::{Poi, TimeWindow};
///
/// let depot = Poi::depot(35.0, 35.0, TimeWindow::new(0.0, 480.0).unwrap());
/// assert_eq!(depot.id(), 0);
/// assert_eq!(depot.score(), 0.0);
///
/// let p = Poi::new(1, 41.0, 49.0, 12.0, 10.0);
/// assert_eq!(p.score(), 12.0);
/// assert_eq!(p.time_window().ready(), 0.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Poi {
    id: usize,
    x: f64,
    y: f64,
    score: f64,
    service_time: f64,
    time_window: TimeWindow,
}

impl Poi {
    /// Creates a POI with an unbounded time window.
    pub fn new(id: usize, x: f64, y: f64, score: f64, service_time: f64) -> Self {
        Self {
            id,
            x,
            y,
            score,
            service_time,
            time_window: TimeWindow::unbounded(),
        }
    }

    /// Creates a depot at the given coordinates (id=0, no score, no service).
    ///
    /// The depot's window bounds every route: its due time is the maximum
    /// route duration.
    pub fn depot(x: f64, y: f64, time_window: TimeWindow) -> Self {
        Self::new(0, x, y, 0.0, 0.0).with_time_window(time_window)
    }

    /// Sets the time window for this POI.
    pub fn with_time_window(mut self, tw: TimeWindow) -> Self {
        self.time_window = tw;
        self
    }

    /// POI ID (0 = depot).
    pub fn id(&self) -> usize {
        self.id
    }

    /// X-coordinate.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Y-coordinate.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Score collected by visiting this POI.
    pub fn score(&self) -> f64 {
        self.score
    }

    /// Service duration at this POI.
    pub fn service_time(&self) -> f64 {
        self.service_time
    }

    /// Time window constraint.
    pub fn time_window(&self) -> &TimeWindow {
        &self.time_window
    }

    /// Euclidean distance to another POI.
    pub fn distance_to(&self, other: &Poi) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}
