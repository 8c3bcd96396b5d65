//! Distances between POIs.
//!
//! Euclidean distances are computed once at load time; travel time equals
//! distance (unit speed).

mod matrix;

pub use matrix::DistanceMatrix;
