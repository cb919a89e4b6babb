//! Time-bounded parallel solvers.
//!
//! - [`RunConfig`] — run parameters (instance, seed, budget, workers)
//! - [`Worker`] / [`ResultSlot`] — one restart loop and its best tour
//! - [`Orchestrator`] — worker pool, deadline and reduction
//! - [`Solver`] / [`SolverKind`] — the `run(config) -> Tour` capability and its registry

mod config;
mod multistart;
mod orchestrator;
mod registry;
mod worker;

pub use config::{RunConfig, DEFAULT_GRACE_MS};
pub use multistart::MultiStartSolver;
pub use orchestrator::{select_best, OrchestrationReport, Orchestrator};
pub use registry::SolverKind;
pub use worker::{random_tour, worker_rng, ResultSlot, Worker, WorkerReport};

use std::sync::Arc;

use crate::distance::DistanceModel;
use crate::error::{ConfigError, Result};
use crate::instance::read_tsplib;
use crate::models::Tour;

/// A TSP solver variant.
///
/// Implementations hold no state between calls, so `run` can be called
/// repeatedly, e.g. from a benchmark loop.
pub trait Solver: Send + Sync {
    /// Registry name of this solver.
    fn name(&self) -> &'static str;

    /// Solves the given distance model under `config`'s budget.
    ///
    /// `config.instance` is ignored.
    fn run_with_model(&self, model: Arc<dyn DistanceModel>, config: &RunConfig) -> Result<Tour>;

    /// Loads `config.instance` as a TSPLIB file and solves it.
    ///
    /// Configuration and instance errors are returned before any worker starts.
    fn run(&self, config: &RunConfig) -> Result<Tour> {
        config.validate()?;
        let path = config
            .instance
            .as_ref()
            .ok_or(ConfigError::Missing { key: "instance" })?;
        let instance = read_tsplib(path)?;
        log::info!(
            "solver: loaded instance name={} n={} solver={}",
            instance.name(),
            instance.n(),
            self.name()
        );
        self.run_with_model(Arc::new(instance.distance_matrix()), config)
    }
}

/// Runs the solver variant named by `config.algorithm`.
///
/// # Examples
///
/// ```no_run
/// use u_tsp::solver::{run, RunConfig};
///
/// let config = RunConfig::new(3).with_instance("data/qa194.tsp").with_seed(1);
/// let tour = run(&config).unwrap();
/// println!("cost = {}", tour.cost());
/// ```
pub fn run(config: &RunConfig) -> Result<Tour> {
    config.algorithm.solver().run(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, InstanceError};

    #[test]
    fn test_run_requires_instance() {
        let err = run(&RunConfig::new(1)).expect_err("no instance");
        assert!(matches!(err, Error::Config(ConfigError::Missing { key: "instance" })));
    }

    #[test]
    fn test_run_missing_file_is_instance_error() {
        let config = RunConfig::new(1).with_instance("/nonexistent/u-tsp/none.tsp");
        let err = run(&config).expect_err("missing file");
        assert!(matches!(err, Error::Instance(InstanceError::Io { .. })));
    }
}
