//! Mutable route representation used during construction.
//!
//! - [`RouteState`]: arena-style circular linked routes with incremental
//!   departure-time propagation
//! - [`RouteIter`]: walks one route from its depot

mod route_state;

pub use route_state::{RouteIter, RouteState};
