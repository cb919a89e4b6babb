//! Worker pool with a deadline.
//!
//! The orchestrator spawns one thread per worker, each owning its
//! [`ResultSlot`]. The control thread doubles as the deadline timer: it
//! waits on the result channel until the budget is spent, raises the
//! cancellation token, and then gives the remaining workers a grace period
//! to hand their slots back. Slots are only read after they have been sent
//! back by a worker that has left its loop.
//!
//! # Shutdown latency
//!
//! After cancellation a worker finishes at most the current outer index of
//! a sweep (`n - 1` delta evaluations), one O(n) reconciliation and its slot
//! update. The measured latency is reported as
//! [`OrchestrationReport::shutdown`].

use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use super::config::DEFAULT_GRACE_MS;
use super::worker::{worker_rng, ResultSlot, Worker, WorkerReport};
use crate::cancel::CancellationToken;
use crate::distance::DistanceModel;
use crate::error::ExecutionError;
use crate::local_search::SteepestDescent;
use crate::models::Tour;

/// Outcome of an orchestration.
#[derive(Debug, Clone)]
pub struct OrchestrationReport {
    /// Cheapest tour across all workers.
    pub tour: Tour,
    /// Index of the worker that found it.
    pub worker: usize,
    /// Restarts performed by each worker, by index.
    pub restarts: Vec<usize>,
    /// Restarts of each worker whose descent ran to convergence, by index.
    pub converged: Vec<usize>,
    /// Wall-clock time from start to the last worker returning.
    pub elapsed: Duration,
    /// Time from cancellation to the last worker returning.
    pub shutdown: Duration,
}

/// Runs `workers` restart loops in parallel for a fixed time budget.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use std::time::Duration;
/// use u_tsp::distance::DistanceMatrix;
/// use u_tsp::models::City;
/// use u_tsp::solver::Orchestrator;
///
/// let dm = DistanceMatrix::from_cities(&[
///     City::new(0, 0.0, 0.0),
///     City::new(1, 1.0, 0.0),
///     City::new(2, 1.0, 1.0),
///     City::new(3, 0.0, 1.0),
/// ]);
/// let report = Orchestrator::new(2, Duration::from_millis(50))
///     .with_seed(7)
///     .run(Arc::new(dm))
///     .unwrap();
/// assert!((report.tour.cost() - 4.0).abs() < 1e-10);
/// assert_eq!(report.restarts.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Orchestrator {
    workers: usize,
    time_budget: Duration,
    grace_period: Duration,
    seed: Option<u64>,
    engine: SteepestDescent,
    verbose: bool,
}

impl Orchestrator {
    /// Creates an orchestrator with the default grace period and a swap-neighborhood engine.
    pub fn new(workers: usize, time_budget: Duration) -> Self {
        Self {
            workers,
            time_budget,
            grace_period: Duration::from_millis(DEFAULT_GRACE_MS),
            seed: None,
            engine: SteepestDescent::default(),
            verbose: false,
        }
    }

    /// Sets how long workers may take to return after cancellation.
    pub fn with_grace_period(mut self, grace: Duration) -> Self {
        self.grace_period = grace;
        self
    }

    /// Seeds every worker's random stream from `seed`.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Like [`with_seed`](Self::with_seed); `None` seeds from entropy.
    pub fn with_optional_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the local search engine every worker runs.
    pub fn with_engine(mut self, engine: SteepestDescent) -> Self {
        self.engine = engine;
        self
    }

    /// Logs worker improvements at debug level.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Runs until the time budget is spent.
    pub fn run<M>(&self, model: Arc<M>) -> Result<OrchestrationReport, ExecutionError>
    where
        M: DistanceModel + ?Sized + 'static,
    {
        self.run_with_cancel(model, CancellationToken::new())
    }

    /// Runs until the time budget is spent or `cancel` fires, whichever comes first.
    pub fn run_with_cancel<M>(
        &self,
        model: Arc<M>,
        cancel: CancellationToken,
    ) -> Result<OrchestrationReport, ExecutionError>
    where
        M: DistanceModel + ?Sized + 'static,
    {
        if self.workers == 0 {
            return Err(ExecutionError::NoWorkers);
        }

        log::info!(
            "orchestrator: start n={} workers={} budget_ms={} neighborhood={:?}",
            model.n(),
            self.workers,
            self.time_budget.as_millis(),
            self.engine.neighborhood()
        );

        let started = Instant::now();
        let deadline = started.checked_add(self.time_budget);
        let (tx, rx) = mpsc::channel::<WorkerReport>();
        let mut handles: Vec<JoinHandle<()>> = Vec::with_capacity(self.workers);

        for index in 0..self.workers {
            let model = Arc::clone(&model);
            let cancel_rx = cancel.clone();
            let tx = tx.clone();
            let engine = self.engine;
            let rng = worker_rng(self.seed, index);
            let verbose = self.verbose;

            let spawned = thread::Builder::new()
                .name(format!("tsp-worker-{index}"))
                .spawn(move || {
                    let report = Worker::new(index, &*model, engine, rng)
                        .with_verbose(verbose)
                        .run(&cancel_rx);
                    // the receiver is gone if the orchestrator already gave up
                    let _ = tx.send(report);
                });

            match spawned {
                Ok(handle) => handles.push(handle),
                Err(source) => {
                    cancel.cancel();
                    return Err(ExecutionError::Spawn {
                        worker: index,
                        source,
                    });
                }
            }
        }
        drop(tx);

        let mut reports: Vec<Option<WorkerReport>> = (0..self.workers).map(|_| None).collect();
        let mut received = 0;
        let mut disconnected = false;

        // Deadline phase: workers only return early on external cancellation.
        while received < self.workers {
            let remaining = remaining_until(deadline);
            if remaining.is_zero() || cancel.is_cancelled() {
                break;
            }
            match rx.recv_timeout(remaining) {
                Ok(report) => {
                    let index = report.index;
                    reports[index] = Some(report);
                    received += 1;
                }
                Err(RecvTimeoutError::Timeout) => break,
                Err(RecvTimeoutError::Disconnected) => {
                    disconnected = true;
                    break;
                }
            }
        }

        cancel.cancel();
        let cancelled_at = Instant::now();
        let grace_deadline = cancelled_at.checked_add(self.grace_period);

        // Grace phase.
        while received < self.workers && !disconnected {
            match rx.recv_timeout(remaining_until(grace_deadline)) {
                Ok(report) => {
                    let index = report.index;
                    reports[index] = Some(report);
                    received += 1;
                }
                Err(RecvTimeoutError::Timeout) => {
                    let pending = self.workers - received;
                    log::warn!(
                        "orchestrator: workers missed grace period pending={} grace_ms={}",
                        pending,
                        self.grace_period.as_millis()
                    );
                    return Err(ExecutionError::WorkerStuck {
                        pending,
                        grace: self.grace_period,
                    });
                }
                Err(RecvTimeoutError::Disconnected) => disconnected = true,
            }
        }
        let shutdown = cancelled_at.elapsed();

        // Every sender is dropped by now, so the joins do not block for long.
        for (index, handle) in handles.into_iter().enumerate() {
            if handle.join().is_err() || reports[index].is_none() {
                return Err(ExecutionError::WorkerPanicked { worker: index });
            }
        }

        let reports: Vec<WorkerReport> = reports.into_iter().flatten().collect();
        let restarts: Vec<usize> = reports.iter().map(|r| r.restarts).collect();
        let converged: Vec<usize> = reports.iter().map(|r| r.converged).collect();
        let slots: Vec<ResultSlot> = reports.into_iter().map(|r| r.slot).collect();
        let (worker, tour) = select_best(slots).ok_or(ExecutionError::NoSolution)?;
        let elapsed = started.elapsed();

        log::info!(
            "orchestrator: done best_cost={:.4} best_worker={} restarts={} converged={} \
             elapsed_ms={} shutdown_ms={}",
            tour.cost(),
            worker,
            restarts.iter().sum::<usize>(),
            converged.iter().sum::<usize>(),
            elapsed.as_millis(),
            shutdown.as_millis()
        );

        Ok(OrchestrationReport {
            tour,
            worker,
            restarts,
            converged,
            elapsed,
            shutdown,
        })
    }
}

/// Time left until `deadline`; `None` stands for a deadline beyond `Instant`'s range.
fn remaining_until(deadline: Option<Instant>) -> Duration {
    match deadline {
        Some(deadline) => deadline.saturating_duration_since(Instant::now()),
        None => Duration::MAX,
    }
}

/// Picks the cheapest tour among the slots, in index order.
///
/// Ties go to the lowest index; empty slots are skipped. Returns `None` when
/// every slot is empty.
///
/// # Examples
///
/// ```
/// use u_tsp::solver::{select_best, ResultSlot};
///
/// assert!(select_best(vec![ResultSlot::new(), ResultSlot::new()]).is_none());
/// ```
pub fn select_best<I>(slots: I) -> Option<(usize, Tour)>
where
    I: IntoIterator<Item = ResultSlot>,
{
    let mut best: Option<(usize, Tour)> = None;
    for (index, slot) in slots.into_iter().enumerate() {
        let Some(tour) = slot.into_tour() else {
            continue;
        };
        let better = match &best {
            Some((_, current)) => tour.cost() < current.cost(),
            None => true,
        };
        if better {
            best = Some((index, tour));
        }
    }
    best
}
