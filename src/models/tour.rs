//! Closed tour type.

use crate::distance::DistanceModel;
use crate::evaluation::full_cost;

/// A closed tour: an ordering of city indices plus its cached cost.
///
/// The cost is the length of the closed route, including the edge from the
/// last city back to the first. In-place mutations ([`swap`](Self::swap),
/// [`reverse`](Self::reverse)) leave the cached cost untouched; callers
/// finalize a mutated tour with [`recompute_cost`](Self::recompute_cost).
///
/// # Examples
///
/// ```
/// use u_tsp::distance::DistanceMatrix;
/// use u_tsp::models::{City, Tour};
///
/// let cities = vec![
///     City::new(0, 0.0, 0.0),
///     City::new(1, 1.0, 0.0),
///     City::new(2, 1.0, 1.0),
///     City::new(3, 0.0, 1.0),
/// ];
/// let dm = DistanceMatrix::from_cities(&cities);
///
/// let tour = Tour::from_order(vec![0, 1, 2, 3], &dm);
/// assert!((tour.cost() - 4.0).abs() < 1e-10);
/// assert!(tour.is_permutation_of(4));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Tour {
    cities: Vec<usize>,
    cost: f64,
}

impl Tour {
    /// Creates a tour from a city ordering, computing its full cost.
    pub fn from_order<M: DistanceModel + ?Sized>(cities: Vec<usize>, model: &M) -> Self {
        let cost = full_cost(&cities, model);
        Self { cities, cost }
    }

    /// Creates the tour visiting cities `0, 1, ..., n-1` in order.
    pub fn identity<M: DistanceModel + ?Sized>(model: &M) -> Self {
        Self::from_order((0..model.n()).collect(), model)
    }

    /// Creates a tour with a caller-supplied cost.
    ///
    /// The cost is trusted as-is.
    #[cfg(test)]
    pub(crate) fn with_cost(cities: Vec<usize>, cost: f64) -> Self {
        Self { cities, cost }
    }

    /// City indices in visiting order.
    pub fn cities(&self) -> &[usize] {
        &self.cities
    }

    /// Consumes the tour, returning the city ordering.
    pub fn into_cities(self) -> Vec<usize> {
        self.cities
    }

    /// Number of cities in the tour.
    pub fn len(&self) -> usize {
        self.cities.len()
    }

    /// Returns `true` if the tour visits no city.
    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    /// Cached tour length.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Exchanges the cities at positions `i` and `j`.
    ///
    /// A no-op when `i == j`. Positions are plain indices into the ordering:
    /// swapping the first and last position is an ordinary exchange, the
    /// wrap-around edge only matters to cost evaluation.
    ///
    /// # Panics
    ///
    /// Panics if either position is out of bounds.
    pub fn swap(&mut self, i: usize, j: usize) {
        self.cities.swap(i, j);
    }

    /// Reverses the segment of positions `i..=j` (`i <= j`).
    ///
    /// # Panics
    ///
    /// Panics if `j` is out of bounds or `i > j`.
    pub fn reverse(&mut self, i: usize, j: usize) {
        self.cities[i..=j].reverse();
    }

    /// Recomputes the cached cost from scratch and returns it.
    pub fn recompute_cost<M: DistanceModel + ?Sized>(&mut self, model: &M) -> f64 {
        self.cost = full_cost(&self.cities, model);
        self.cost
    }

    /// Returns `true` if the ordering is a permutation of `0..n`.
    pub fn is_permutation_of(&self, n: usize) -> bool {
        if self.cities.len() != n {
            return false;
        }
        let mut seen = vec![false; n];
        for &c in &self.cities {
            if c >= n || seen[c] {
                return false;
            }
            seen[c] = true;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::DistanceMatrix;
    use crate::models::City;
    use proptest::prelude::*;

    fn unit_square() -> DistanceMatrix {
        DistanceMatrix::from_cities(&[
            City::new(0, 0.0, 0.0),
            City::new(1, 1.0, 0.0),
            City::new(2, 1.0, 1.0),
            City::new(3, 0.0, 1.0),
        ])
    }

    #[test]
    fn test_from_order_cost() {
        let dm = unit_square();
        let tour = Tour::from_order(vec![0, 2, 1, 3], &dm);
        let expected = 2.0 * 2f64.sqrt() + 2.0;
        assert!((tour.cost() - expected).abs() < 1e-10);
    }

    #[test]
    fn test_identity() {
        let dm = unit_square();
        let tour = Tour::identity(&dm);
        assert_eq!(tour.cities(), &[0, 1, 2, 3]);
        assert!((tour.cost() - 4.0).abs() < 1e-10);
    }

    #[test]
    fn test_swap_same_position_is_noop() {
        let dm = unit_square();
        let mut tour = Tour::identity(&dm);
        tour.swap(2, 2);
        assert_eq!(tour.cities(), &[0, 1, 2, 3]);
    }

    #[test]
    fn test_swap_wrap_positions() {
        let dm = unit_square();
        let mut tour = Tour::identity(&dm);
        tour.swap(0, 3);
        assert_eq!(tour.cities(), &[3, 1, 2, 0]);
        // cached cost is stale until recomputed
        assert!((tour.cost() - 4.0).abs() < 1e-10);
        let recomputed = tour.recompute_cost(&dm);
        assert!((recomputed - tour.cost()).abs() < 1e-15);
    }

    #[test]
    fn test_clone_is_independent() {
        let dm = unit_square();
        let original = Tour::identity(&dm);
        let mut copy = original.clone();
        copy.swap(1, 2);
        copy.recompute_cost(&dm);
        assert_eq!(original.cities(), &[0, 1, 2, 3]);
        assert!((original.cost() - 4.0).abs() < 1e-10);
        assert_eq!(copy.cities(), &[0, 2, 1, 3]);
        let crossed = 2.0 + 2.0 * 2f64.sqrt();
        assert!((copy.cost() - crossed).abs() < 1e-10);
    }

    #[test]
    fn test_reverse_segment() {
        let dm = unit_square();
        let mut tour = Tour::identity(&dm);
        tour.reverse(1, 3);
        assert_eq!(tour.cities(), &[0, 3, 2, 1]);
    }

    #[test]
    fn test_is_permutation_of() {
        assert!(Tour::with_cost(vec![2, 0, 1], 0.0).is_permutation_of(3));
        assert!(!Tour::with_cost(vec![0, 0, 1], 0.0).is_permutation_of(3));
        assert!(!Tour::with_cost(vec![0, 1, 3], 0.0).is_permutation_of(3));
        assert!(!Tour::with_cost(vec![0, 1], 0.0).is_permutation_of(3));
        assert!(Tour::with_cost(vec![], 0.0).is_permutation_of(0));
    }

    proptest! {
        #[test]
        fn prop_swap_twice_restores(
            perm in Just((0..12usize).collect::<Vec<_>>()).prop_shuffle(),
            i in 0..12usize,
            j in 0..12usize,
        ) {
            let mut tour = Tour::with_cost(perm.clone(), 0.0);
            tour.swap(i, j);
            prop_assert!(tour.is_permutation_of(12));
            tour.swap(i, j);
            prop_assert_eq!(tour.cities(), perm.as_slice());
        }
    }
}
