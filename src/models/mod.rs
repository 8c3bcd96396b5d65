//! Domain model types for the Team Orienteering Problem with Time Windows.
//!
//! Provides the core abstractions: scored POIs with time windows, the
//! immutable problem instance with per-route depot aliases, and the route
//! and solution snapshots handed to reporting.

mod poi;
mod problem;
mod route;
mod solution;

pub use poi::{Poi, TimeWindow};
pub use problem::{ProblemError, TopTwProblem};
pub use route::{Route, Visit};
pub use solution::{Solution, Violation, ViolationType};
