//! Steepest-descent local search.
//!
//! # Algorithm
//!
//! Each sweep enumerates every unordered position pair `(i, j)`, `i < j`, and
//! ranks the moves by their incremental delta. Only the best move of the
//! whole sweep is considered. It is applied to a copy, the copy's cost is
//! recomputed with [`full_cost`](crate::evaluation::full_cost), and the copy
//! replaces the current tour only if that recomputed cost is lower by more
//! than [`IMPROVEMENT_EPSILON`]. Otherwise the search has converged.
//!
//! # Cancellation
//!
//! The token is polled once per outer index `i`, so after it fires a sweep
//! performs at most `n - 1` further delta evaluations (at most eight
//! distance lookups each) before returning. The returned tour is always the
//! last accepted one, so a cancelled search is never worse than its input.
//!
//! # Complexity
//!
//! O(n²) per sweep plus O(n) for the reconciliation of the chosen move.

use crate::cancel::CancellationToken;
use crate::distance::DistanceModel;
use crate::models::Tour;

use super::Neighborhood;

/// Minimum recomputed cost decrease for a move to be accepted.
pub const IMPROVEMENT_EPSILON: f64 = 1e-10;

/// How a local search invocation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// A full sweep found no strictly improving move.
    Converged,
    /// The cancellation token fired before convergence.
    Cancelled,
}

/// Result of one local search invocation.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Best tour reached; its cost is a full recomputation.
    pub tour: Tour,
    /// Whether the search converged or was cancelled.
    pub outcome: SearchOutcome,
    /// Number of completed sweeps.
    pub sweeps: usize,
    /// Cost of the starting tour followed by the cost after each accepted move.
    pub cost_history: Vec<f64>,
}

impl SearchResult {
    /// Number of accepted moves.
    pub fn improvements(&self) -> usize {
        self.cost_history.len().saturating_sub(1)
    }
}

enum Sweep {
    Cancelled,
    Exhausted,
    Best { i: usize, j: usize },
}

/// Steepest-descent search over a pairwise [`Neighborhood`].
///
/// # Examples
///
/// ```
/// use u_tsp::cancel::CancellationToken;
/// use u_tsp::distance::DistanceMatrix;
/// use u_tsp::local_search::{Neighborhood, SearchOutcome, SteepestDescent};
/// use u_tsp::models::{City, Tour};
///
/// let dm = DistanceMatrix::from_cities(&[
///     City::new(0, 0.0, 0.0),
///     City::new(1, 1.0, 1.0),
///     City::new(2, 1.0, 0.0),
///     City::new(3, 0.0, 1.0),
/// ]);
/// let start = Tour::identity(&dm); // crossing tour
///
/// let engine = SteepestDescent::new(Neighborhood::Swap);
/// let result = engine.improve(start, &dm, &CancellationToken::new());
/// assert_eq!(result.outcome, SearchOutcome::Converged);
/// assert!((result.tour.cost() - 4.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SteepestDescent {
    neighborhood: Neighborhood,
}

impl SteepestDescent {
    /// Creates an engine over the given neighborhood.
    pub fn new(neighborhood: Neighborhood) -> Self {
        Self { neighborhood }
    }

    /// The neighborhood explored by each sweep.
    pub fn neighborhood(&self) -> Neighborhood {
        self.neighborhood
    }

    /// Runs sweeps from `start` until convergence or cancellation.
    ///
    /// The starting tour's cached cost is trusted as the baseline.
    pub fn improve<M: DistanceModel + ?Sized>(
        &self,
        start: Tour,
        model: &M,
        cancel: &CancellationToken,
    ) -> SearchResult {
        let mut current = start;
        let mut cost_history = vec![current.cost()];
        let mut sweeps = 0;

        loop {
            let (i, j) = match self.sweep(&current, model, cancel) {
                Sweep::Cancelled => {
                    return SearchResult {
                        tour: current,
                        outcome: SearchOutcome::Cancelled,
                        sweeps,
                        cost_history,
                    }
                }
                Sweep::Exhausted => {
                    sweeps += 1;
                    break;
                }
                Sweep::Best { i, j } => {
                    sweeps += 1;
                    (i, j)
                }
            };

            let mut candidate = current.clone();
            self.neighborhood.apply(&mut candidate, i, j);
            let cost = candidate.recompute_cost(model);
            if cost < current.cost() - IMPROVEMENT_EPSILON {
                current = candidate;
                cost_history.push(cost);
            } else {
                // delta said improving, full cost disagrees: treat as converged
                break;
            }
        }

        SearchResult {
            tour: current,
            outcome: SearchOutcome::Converged,
            sweeps,
            cost_history,
        }
    }

    /// One full neighborhood sweep, returning the best strictly improving move.
    fn sweep<M: DistanceModel + ?Sized>(
        &self,
        tour: &Tour,
        model: &M,
        cancel: &CancellationToken,
    ) -> Sweep {
        let cities = tour.cities();
        let n = cities.len();
        let mut best_delta = -IMPROVEMENT_EPSILON;
        let mut best = None;

        for i in 0..n.saturating_sub(1) {
            if cancel.is_cancelled() {
                return Sweep::Cancelled;
            }
            for j in (i + 1)..n {
                let delta = self.neighborhood.delta(cities, model, i, j);
                if delta < best_delta {
                    best_delta = delta;
                    best = Some((i, j));
                }
            }
        }

        match best {
            Some((i, j)) => Sweep::Best { i, j },
            None => Sweep::Exhausted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::DistanceMatrix;
    use crate::evaluation::full_cost;
    use crate::models::City;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_instance(n: usize, seed: u64) -> DistanceMatrix {
        let mut rng = StdRng::seed_from_u64(seed);
        let cities: Vec<City> = (0..n)
            .map(|i| City::new(i, rng.random_range(0.0..100.0), rng.random_range(0.0..100.0)))
            .collect();
        DistanceMatrix::from_cities(&cities)
    }

    #[test]
    fn test_converges_on_unit_square() {
        let dm = DistanceMatrix::from_cities(&[
            City::new(0, 0.0, 0.0),
            City::new(1, 1.0, 0.0),
            City::new(2, 1.0, 1.0),
            City::new(3, 0.0, 1.0),
        ]);
        for nb in [Neighborhood::Swap, Neighborhood::Reversal] {
            let start = Tour::from_order(vec![0, 2, 1, 3], &dm);
            let result = SteepestDescent::new(nb).improve(start, &dm, &CancellationToken::new());
            assert_eq!(result.outcome, SearchOutcome::Converged);
            assert!((result.tour.cost() - 4.0).abs() < 1e-10);
            assert!(result.tour.is_permutation_of(4));
        }
    }

    #[test]
    fn test_accepted_moves_strictly_decrease() {
        let dm = random_instance(40, 7);
        let start = Tour::identity(&dm);
        let start_cost = start.cost();
        let result = SteepestDescent::new(Neighborhood::Swap).improve(
            start,
            &dm,
            &CancellationToken::new(),
        );
        assert_eq!(result.cost_history[0], start_cost);
        for w in result.cost_history.windows(2) {
            assert!(w[1] < w[0], "accepted move did not improve: {} -> {}", w[0], w[1]);
        }
        assert!(result.tour.cost() <= start_cost);
        assert!(result.improvements() > 0);
    }

    #[test]
    fn test_cached_cost_matches_full_cost() {
        let dm = random_instance(30, 11);
        for nb in [Neighborhood::Swap, Neighborhood::Reversal] {
            let cancel = CancellationToken::new();
            let result = SteepestDescent::new(nb).improve(Tour::identity(&dm), &dm, &cancel);
            let recomputed = full_cost(result.tour.cities(), &dm);
            assert!((recomputed - result.tour.cost()).abs() <= 1e-6 * recomputed.max(1.0));
            assert!(result.tour.is_permutation_of(30));
        }
    }

    #[test]
    fn test_converged_tour_is_local_optimum() {
        let dm = random_instance(20, 3);
        let engine = SteepestDescent::new(Neighborhood::Swap);
        let result = engine.improve(Tour::identity(&dm), &dm, &CancellationToken::new());
        let cities = result.tour.cities();
        for i in 0..cities.len() {
            for j in (i + 1)..cities.len() {
                assert!(Neighborhood::Swap.delta(cities, &dm, i, j) >= -1e-6);
            }
        }
    }

    #[test]
    fn test_pre_cancelled_returns_input() {
        let dm = random_instance(25, 5);
        let start = Tour::identity(&dm);
        let cancel = CancellationToken::new();
        cancel.cancel();
        let result = SteepestDescent::default().improve(start.clone(), &dm, &cancel);
        assert_eq!(result.outcome, SearchOutcome::Cancelled);
        assert_eq!(result.tour, start);
        assert_eq!(result.sweeps, 0);
    }

    #[test]
    fn test_single_city_converges_immediately() {
        let dm = DistanceMatrix::from_cities(&[City::new(0, 5.0, 5.0)]);
        let result = SteepestDescent::default().improve(
            Tour::identity(&dm),
            &dm,
            &CancellationToken::new(),
        );
        assert_eq!(result.outcome, SearchOutcome::Converged);
        assert_eq!(result.improvements(), 0);
        assert_eq!(result.tour.cost(), 0.0);
    }
}
