//! # u-orienteering
//!
//! GRASP construction heuristics for the Team Orienteering Problem with
//! Time Windows (TOPTW): a fleet of routes leaves a depot, collects score
//! at points of interest inside their time windows, and returns before the
//! depot closes.
//!
//! ## Modules
//!
//! - [`models`]: instance, POIs, time windows, finished solutions
//! - [`distance`]: Euclidean distance matrix
//! - [`state`]: mutable linked-list routes under construction
//! - [`evaluation`]: feasible insertion search and solution audit
//! - [`grasp`]: restricted candidate list, greedy construction, multi-start driver
//! - [`io`]: benchmark instance reader

pub mod distance;
pub mod evaluation;
pub mod grasp;
pub mod io;
pub mod models;
pub mod state;
