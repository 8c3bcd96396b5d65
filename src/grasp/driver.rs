//! Multi-start GRASP driver.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, info, warn};

use super::{ConfigError, GraspConfig, GreedyConstructor};
use crate::evaluation::audit_solution;
use crate::models::{Solution, TopTwProblem};
use crate::state::RouteState;

/// Result of a GRASP run.
#[derive(Debug, Clone, Serialize)]
pub struct GraspReport {
    /// Constructions performed.
    pub iterations: usize,
    /// Seed the random source started from.
    pub seed: u64,
    /// Fitness of the best solution.
    pub best_fitness: f64,
    /// Mean fitness over all constructions.
    pub mean_fitness: f64,
    /// Fitness of each construction, in order.
    pub fitness_history: Vec<f64>,
    /// Best solution found (earliest on ties).
    pub best_solution: Solution,
}

/// Repeats the greedy construction and keeps the best solution.
///
/// # Examples
///
/// ```
/// use u_orienteering::models::{Poi, TimeWindow, TopTwProblem};
/// use u_orienteering::grasp::{Grasp, GraspConfig};
///
/// let pois = vec![
///     Poi::depot(0.0, 0.0, TimeWindow::new(0.0, 50.0).unwrap()),
///     Poi::new(1, 5.0, 0.0, 10.0, 1.0),
///     Poi::new(2, 0.0, 5.0, 15.0, 1.0),
/// ];
/// let problem = TopTwProblem::new(pois, 1).unwrap();
/// let config = GraspConfig::default().with_max_iterations(5).with_seed(7);
///
/// let report = Grasp::new(&problem, config).run().unwrap();
/// assert_eq!(report.iterations, 5);
/// assert_eq!(report.best_fitness, 25.0);
/// ```
pub struct Grasp<'a> {
    problem: &'a TopTwProblem,
    config: GraspConfig,
}

impl<'a> Grasp<'a> {
    pub fn new(problem: &'a TopTwProblem, config: GraspConfig) -> Self {
        Self { problem, config }
    }

    pub fn config(&self) -> &GraspConfig {
        &self.config
    }

    /// Runs with a source seeded from the configuration, or from entropy
    /// when no seed is configured.
    pub fn run(&self) -> Result<GraspReport, ConfigError> {
        let seed = match self.config.seed {
            Some(seed) => seed,
            None => {
                let seed = rand::rng().random::<u64>();
                info!(seed, "no seed configured, drew one");
                seed
            }
        };
        let mut rng = StdRng::seed_from_u64(seed);
        let mut report = self.run_with_rng(&mut rng)?;
        report.seed = seed;
        Ok(report)
    }

    /// Runs with the caller's random source.
    ///
    /// The reported seed is the configured one, or 0.
    pub fn run_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<GraspReport, ConfigError> {
        self.config.validate()?;

        let constructor = GreedyConstructor::from_config(self.problem, &self.config);
        let mut state = RouteState::new(self.problem);
        let mut best: Option<Solution> = None;
        let mut history = Vec::with_capacity(self.config.max_iterations);

        for iteration in 0..self.config.max_iterations {
            let stats = constructor.construct(&mut state, rng);
            let solution = state.to_solution();
            let fitness = solution.fitness();

            let violations = audit_solution(self.problem, &solution);
            if !violations.is_empty() {
                warn!(iteration, count = violations.len(), "constructed solution fails audit");
                for v in &violations {
                    debug!(kind = ?v.kind, "violation");
                }
            }

            info!(
                iteration,
                fitness,
                routes = solution.num_routes(),
                served = solution.num_served(),
                unrouted = stats.unrouted,
                "construction finished"
            );
            debug!(iteration, solution = %solution, "constructed");

            history.push(fitness);
            if best.as_ref().is_none_or(|b| fitness > b.fitness()) {
                best = Some(solution);
            }
        }

        let best_solution = best.unwrap_or_default();
        let best_fitness = best_solution.fitness();
        let mean_fitness = history.iter().sum::<f64>() / history.len() as f64;
        info!(best_fitness, mean_fitness, "grasp finished");

        Ok(GraspReport {
            iterations: history.len(),
            seed: self.config.seed.unwrap_or(0),
            best_fitness,
            mean_fitness,
            fitness_history: history,
            best_solution,
        })
    }
}
