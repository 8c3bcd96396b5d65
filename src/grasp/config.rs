//! GRASP run configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::SelectionPolicy;

/// Invalid configuration values.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("max_iterations must be at least 1")]
    ZeroIterations,
    #[error("rcl_size must be at least 1")]
    ZeroRclSize,
    #[error("initial_routes must be at least 1")]
    ZeroInitialRoutes,
    #[error("alpha must lie in [0, 1], got {0}")]
    AlphaOutOfRange(f64),
}

/// Parameters of a GRASP run.
///
/// # Examples
///
/// ```
/// use u_orienteering::grasp::{GraspConfig, SelectionPolicy};
///
/// let config = GraspConfig::default()
///     .with_max_iterations(50)
///     .with_rcl_size(4)
///     .with_policy(SelectionPolicy::FuzzyBest)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.seed, Some(42));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraspConfig {
    /// Number of independent greedy constructions.
    pub max_iterations: usize,
    /// Maximum restricted candidate list length.
    pub rcl_size: usize,
    /// How a candidate is drawn from the list.
    pub policy: SelectionPolicy,
    /// Routes opened before the first insertion (capped by the fleet size).
    pub initial_routes: usize,
    /// Seed of the random source; drawn at random when absent.
    pub seed: Option<u64>,
}

impl Default for GraspConfig {
    fn default() -> Self {
        Self {
            max_iterations: 10,
            rcl_size: 3,
            policy: SelectionPolicy::default(),
            initial_routes: 1,
            seed: None,
        }
    }
}

impl GraspConfig {
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_rcl_size(mut self, n: usize) -> Self {
        self.rcl_size = n;
        self
    }

    pub fn with_policy(mut self, policy: SelectionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_initial_routes(mut self, n: usize) -> Self {
        self.initial_routes = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks every field is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_iterations == 0 {
            return Err(ConfigError::ZeroIterations);
        }
        if self.rcl_size == 0 {
            return Err(ConfigError::ZeroRclSize);
        }
        if self.initial_routes == 0 {
            return Err(ConfigError::ZeroInitialRoutes);
        }
        if let SelectionPolicy::FuzzyAlphaCut { alpha } = self.policy {
            if !(0.0..=1.0).contains(&alpha) {
                return Err(ConfigError::AlphaOutOfRange(alpha));
            }
        }
        Ok(())
    }
}
