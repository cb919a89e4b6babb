//! Parallel multi-start steepest descent.

use std::sync::Arc;

use super::{Orchestrator, OrchestrationReport, RunConfig, Solver};
use crate::distance::DistanceModel;
use crate::error::{InstanceError, Result};
use crate::local_search::{Neighborhood, SteepestDescent};
use crate::models::Tour;

/// Every ordering of at most this many cities describes the same cycle.
const TRIVIAL_SIZE: usize = 3;

/// Random restarts improved by steepest descent on `maxthreads` workers.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use u_tsp::distance::DistanceMatrix;
/// use u_tsp::local_search::Neighborhood;
/// use u_tsp::models::City;
/// use u_tsp::solver::{MultiStartSolver, RunConfig, Solver};
///
/// let dm = DistanceMatrix::from_cities(&[
///     City::new(0, 0.0, 0.0),
///     City::new(1, 1.0, 0.0),
///     City::new(2, 1.0, 1.0),
///     City::new(3, 0.0, 1.0),
///     City::new(4, 0.5, 2.0),
/// ]);
/// let config = RunConfig::new(0).with_seed(1).with_max_threads(2);
/// let tour = MultiStartSolver::new(Neighborhood::Swap)
///     .run_with_model(Arc::new(dm), &config)
///     .unwrap();
/// assert!(tour.is_permutation_of(5));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MultiStartSolver {
    neighborhood: Neighborhood,
}

impl MultiStartSolver {
    pub fn new(neighborhood: Neighborhood) -> Self {
        Self { neighborhood }
    }

    /// Runs the solver and returns the full orchestration report.
    ///
    /// Instances of at most three cities are answered directly with the
    /// identity tour, without spawning workers.
    pub fn run_report(
        &self,
        model: Arc<dyn DistanceModel>,
        config: &RunConfig,
    ) -> Result<OrchestrationReport> {
        config.validate()?;
        let n = model.n();
        if n == 0 {
            return Err(InstanceError::Empty.into());
        }
        if n <= TRIVIAL_SIZE {
            log::debug!("multistart: trivial instance n={n}");
            return Ok(OrchestrationReport {
                tour: Tour::identity(&*model),
                worker: 0,
                restarts: Vec::new(),
                converged: Vec::new(),
                elapsed: Default::default(),
                shutdown: Default::default(),
            });
        }

        let report = Orchestrator::new(config.worker_count(), config.time_budget())
            .with_grace_period(config.grace_period())
            .with_optional_seed(config.seed)
            .with_engine(SteepestDescent::new(self.neighborhood))
            .with_verbose(config.verbose)
            .run(model)?;
        Ok(report)
    }
}

impl Solver for MultiStartSolver {
    fn name(&self) -> &'static str {
        match self.neighborhood {
            Neighborhood::Swap => "swap-descent",
            Neighborhood::Reversal => "two-opt-descent",
        }
    }

    fn run_with_model(&self, model: Arc<dyn DistanceModel>, config: &RunConfig) -> Result<Tour> {
        self.run_report(model, config).map(|report| report.tour)
    }
}
