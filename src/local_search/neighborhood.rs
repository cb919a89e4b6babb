//! Pairwise move neighborhoods.

use serde::{Deserialize, Serialize};

use crate::distance::DistanceModel;
use crate::evaluation::{reversal_delta_cost, swap_delta_cost};
use crate::models::Tour;

/// A neighborhood of moves indexed by an unordered position pair `i < j`.
///
/// - `Swap` exchanges the cities at positions `i` and `j`, altering up to
///   four edges.
/// - `Reversal` reverses the segment `i..=j` (classic 2-opt), altering two
///   edges.
///
/// # Examples
///
/// ```
/// use u_tsp::local_search::Neighborhood;
///
/// let n: Neighborhood = serde_json::from_str("\"reversal\"").unwrap();
/// assert_eq!(n, Neighborhood::Reversal);
/// assert_eq!(Neighborhood::default(), Neighborhood::Swap);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Neighborhood {
    #[default]
    Swap,
    Reversal,
}

impl Neighborhood {
    /// Cost change of the move `(i, j)` on `cities`, without applying it.
    #[inline]
    pub fn delta<M: DistanceModel + ?Sized>(
        &self,
        cities: &[usize],
        model: &M,
        i: usize,
        j: usize,
    ) -> f64 {
        match self {
            Neighborhood::Swap => swap_delta_cost(cities, model, i, j),
            Neighborhood::Reversal => reversal_delta_cost(cities, model, i, j),
        }
    }

    /// Applies the move `(i, j)` in place. The tour's cached cost is not updated.
    pub fn apply(&self, tour: &mut Tour, i: usize, j: usize) {
        match self {
            Neighborhood::Swap => tour.swap(i, j),
            Neighborhood::Reversal => tour.reverse(i, j),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::DistanceMatrix;
    use crate::models::City;

    fn crossing() -> DistanceMatrix {
        DistanceMatrix::from_cities(&[
            City::new(0, 0.0, 0.0),
            City::new(1, 1.0, 1.0),
            City::new(2, 1.0, 0.0),
            City::new(3, 0.0, 1.0),
        ])
    }

    #[test]
    fn test_apply_swap() {
        let dm = crossing();
        let mut tour = Tour::identity(&dm);
        Neighborhood::Swap.apply(&mut tour, 1, 2);
        assert_eq!(tour.cities(), &[0, 2, 1, 3]);
    }

    #[test]
    fn test_apply_reversal() {
        let dm = crossing();
        let mut tour = Tour::identity(&dm);
        Neighborhood::Reversal.apply(&mut tour, 0, 2);
        assert_eq!(tour.cities(), &[2, 1, 0, 3]);
    }

    #[test]
    fn test_delta_uncrosses() {
        // 0→1→2→3 crosses itself; both neighborhoods fix it with (1, 2)
        let dm = crossing();
        let tour = Tour::identity(&dm);
        for nb in [Neighborhood::Swap, Neighborhood::Reversal] {
            let delta = nb.delta(tour.cities(), &dm, 1, 2);
            let mut moved = tour.clone();
            nb.apply(&mut moved, 1, 2);
            let actual = moved.recompute_cost(&dm) - tour.cost();
            assert!(delta < 0.0);
            assert!((delta - actual).abs() < 1e-10);
        }
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(
            serde_json::to_string(&Neighborhood::Swap).expect("serialize"),
            "\"swap\""
        );
    }
}
