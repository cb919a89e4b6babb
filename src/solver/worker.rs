//! Restart worker and its result slot.

use log::Level;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::cancel::CancellationToken;
use crate::distance::DistanceModel;
use crate::local_search::{SearchOutcome, SteepestDescent};
use crate::models::Tour;

/// The best tour found so far by one worker.
///
/// Starts empty with an infinite cost. A slot is moved into its worker at
/// spawn time and handed back inside the [`WorkerReport`] when the worker
/// returns, so only one thread ever holds it.
#[derive(Debug, Clone, Default)]
pub struct ResultSlot {
    best: Option<Tour>,
}

impl ResultSlot {
    /// Creates an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cost of the held tour, or `f64::INFINITY` when empty.
    pub fn cost(&self) -> f64 {
        self.best.as_ref().map_or(f64::INFINITY, Tour::cost)
    }

    /// The held tour, if any.
    pub fn tour(&self) -> Option<&Tour> {
        self.best.as_ref()
    }

    /// Consumes the slot, returning the held tour.
    pub fn into_tour(self) -> Option<Tour> {
        self.best
    }

    /// Replaces the held tour if `tour` is strictly cheaper. Returns `true` on replacement.
    pub fn offer(&mut self, tour: Tour) -> bool {
        if tour.cost() < self.cost() {
            self.best = Some(tour);
            true
        } else {
            false
        }
    }
}

/// What a worker hands back to the orchestrator when it stops.
#[derive(Debug, Clone)]
pub struct WorkerReport {
    /// Worker index.
    pub index: usize,
    /// The worker's best tour.
    pub slot: ResultSlot,
    /// Random restarts started.
    pub restarts: usize,
    /// Restarts whose local search ran to convergence.
    pub converged: usize,
}

/// Creates the random stream of worker `index`.
///
/// With a run seed the stream is a pure function of `(seed, index)`, so the
/// first random tour of each worker is reproducible. Without one, the stream
/// is seeded from entropy.
///
/// # Examples
///
/// ```
/// use rand::Rng;
/// use u_tsp::solver::worker_rng;
///
/// let a: u64 = worker_rng(Some(42), 3).random();
/// let b: u64 = worker_rng(Some(42), 3).random();
/// let c: u64 = worker_rng(Some(42), 4).random();
/// assert_eq!(a, b);
/// assert_ne!(a, c);
/// ```
pub fn worker_rng(seed: Option<u64>, index: usize) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(index as u64)),
        None => StdRng::seed_from_u64(rand::random()),
    }
}

/// Generates a uniformly random tour over all cities of `model`.
pub fn random_tour<M: DistanceModel + ?Sized, R: Rng>(model: &M, rng: &mut R) -> Tour {
    let mut perm: Vec<usize> = (0..model.n()).collect();

    // Fisher-Yates shuffle
    for i in (1..perm.len()).rev() {
        let j = rng.random_range(0..=i as u64) as usize;
        perm.swap(i, j);
    }

    Tour::from_order(perm, model)
}

/// One restart loop: random tour, steepest descent, keep the best.
///
/// The loop body always runs at least once before the cancellation token is
/// consulted, so even a zero time budget leaves a tour in the slot.
pub struct Worker<'a, M: DistanceModel + ?Sized> {
    index: usize,
    model: &'a M,
    engine: SteepestDescent,
    rng: StdRng,
    slot: ResultSlot,
    verbose: bool,
}

impl<'a, M: DistanceModel + ?Sized> Worker<'a, M> {
    /// Creates worker `index` with an empty slot.
    pub fn new(index: usize, model: &'a M, engine: SteepestDescent, rng: StdRng) -> Self {
        Self {
            index,
            model,
            engine,
            rng,
            slot: ResultSlot::new(),
            verbose: false,
        }
    }

    /// Logs improvements at debug level instead of trace.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Runs restarts until `cancel` fires, then returns the slot.
    pub fn run(mut self, cancel: &CancellationToken) -> WorkerReport {
        let level = if self.verbose {
            Level::Debug
        } else {
            Level::Trace
        };
        let mut restarts = 0;
        let mut converged = 0;

        loop {
            let start = random_tour(self.model, &mut self.rng);
            restarts += 1;

            let result = self.engine.improve(start, self.model, cancel);
            if result.outcome == SearchOutcome::Converged {
                converged += 1;
            }

            let cost = result.tour.cost();
            if self.slot.offer(result.tour) {
                log::log!(
                    level,
                    "worker.improve: worker={} restart={} cost={:.4}",
                    self.index,
                    restarts,
                    cost
                );
            }

            if cancel.is_cancelled() {
                break;
            }
        }

        WorkerReport {
            index: self.index,
            slot: self.slot,
            restarts,
            converged,
        }
    }
}
