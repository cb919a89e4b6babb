//! Distance models.
//!
//! Solvers only see the [`DistanceModel`] trait; [`DistanceMatrix`] is the
//! dense implementation built from an instance.

mod matrix;

pub use matrix::DistanceMatrix;

/// Immutable city count plus a symmetric pairwise distance function.
///
/// Implementations must satisfy `distance(i, i) == 0`,
/// `distance(i, j) == distance(j, i)` and `distance(i, j) >= 0` for every
/// `0 <= i, j < n()`. A model is built once before any worker starts and is
/// shared by reference across threads, hence `Send + Sync`.
pub trait DistanceModel: Send + Sync {
    /// Number of cities.
    fn n(&self) -> usize;

    /// Distance between cities `i` and `j`.
    fn distance(&self, i: usize, j: usize) -> f64;
}
