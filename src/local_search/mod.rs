//! Local search over a single tour.
//!
//! - [`Neighborhood`] — pairwise swap and segment reversal (2-opt) moves
//! - [`SteepestDescent`] — best-improvement sweeps until convergence, cancellable mid-sweep

mod neighborhood;
mod steepest;

pub use neighborhood::Neighborhood;
pub use steepest::{SearchOutcome, SearchResult, SteepestDescent, IMPROVEMENT_EPSILON};
