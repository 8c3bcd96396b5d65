//! GRASP construction for the TOPTW.
//!
//! - [`rcl`]: restricted candidate list and selection policies
//! - [`GreedyConstructor`]: one randomized greedy solution
//! - [`Grasp`]: repeated constructions, best solution kept
//! - [`GraspConfig`]: run parameters

mod config;
mod constructor;
mod driver;
pub mod rcl;

pub use config::{ConfigError, GraspConfig};
pub use constructor::{ConstructionStats, GreedyConstructor, Step};
pub use driver::{Grasp, GraspReport};
pub use rcl::{build_rcl, membership, select, SelectionPolicy};
