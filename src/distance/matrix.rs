//! Dense distance matrix.

use super::DistanceModel;
use crate::error::InstanceError;
use crate::models::City;

const SYMMETRY_TOLERANCE: f64 = 1e-9;

/// A dense n×n distance matrix stored in row-major order.
///
/// Built once per run, then shared read-only by every worker.
///
/// # Examples
///
/// ```
/// use u_tsp::models::City;
/// use u_tsp::distance::{DistanceMatrix, DistanceModel};
///
/// let cities = vec![
///     City::new(0, 0.0, 0.0),
///     City::new(1, 3.0, 4.0),
///     City::new(2, 6.0, 8.0),
/// ];
/// let dm = DistanceMatrix::from_cities(&cities);
/// assert!((dm.distance(0, 1) - 5.0).abs() < 1e-10);
/// assert_eq!(dm.n(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Creates a distance matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0.0; size * size],
            size,
        }
    }

    /// Computes a Euclidean distance matrix from city coordinates.
    pub fn from_cities(cities: &[City]) -> Self {
        let n = cities.len();
        let mut dm = Self::new(n);
        for i in 0..n {
            for j in (i + 1)..n {
                let d = cities[i].distance_to(&cities[j]);
                dm.set(i, j, d);
                dm.set(j, i, d);
            }
        }
        dm
    }

    /// Creates a distance matrix from an explicit n×n grid.
    ///
    /// Returns `None` if the data length doesn't match `size * size`.
    pub fn from_data(size: usize, data: Vec<f64>) -> Option<Self> {
        if data.len() != size * size {
            return None;
        }
        Some(Self { data, size })
    }

    /// Creates a distance matrix from an explicit n×n grid, checking that it
    /// is non-empty, finite, non-negative, zero on the diagonal and symmetric.
    pub fn try_from_data(size: usize, data: Vec<f64>) -> Result<Self, InstanceError> {
        if size == 0 {
            return Err(InstanceError::Empty);
        }
        let dm = Self::from_data(size, data).ok_or_else(|| {
            InstanceError::Invalid(format!("expected {} entries for size {size}", size * size))
        })?;
        for i in 0..size {
            if dm.get(i, i) != 0.0 {
                return Err(InstanceError::Invalid(format!("non-zero diagonal at {i}")));
            }
            for j in 0..size {
                let d = dm.get(i, j);
                if !d.is_finite() || d < 0.0 {
                    return Err(InstanceError::Invalid(format!(
                        "distance ({i}, {j}) = {d} is not a non-negative number"
                    )));
                }
            }
        }
        if !dm.is_symmetric(SYMMETRY_TOLERANCE) {
            return Err(InstanceError::Invalid("matrix is not symmetric".into()));
        }
        Ok(dm)
    }

    /// Returns the distance from location `from` to location `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Sets the distance from location `from` to location `to`.
    pub fn set(&mut self, from: usize, to: usize, distance: f64) {
        self.data[from * self.size + to] = distance;
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if the matrix is symmetric within the given tolerance.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                if (self.get(i, j) - self.get(j, i)).abs() > tol {
                    return false;
                }
            }
        }
        true
    }
}

impl DistanceModel for DistanceMatrix {
    fn n(&self) -> usize {
        self.size
    }

    #[inline]
    fn distance(&self, i: usize, j: usize) -> f64 {
        self.get(i, j)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_cities() -> Vec<City> {
        vec![
            City::new(0, 0.0, 0.0),
            City::new(1, 3.0, 4.0),
            City::new(2, 0.0, 8.0),
        ]
    }

    #[test]
    fn test_from_cities() {
        let dm = DistanceMatrix::from_cities(&sample_cities());
        assert_eq!(dm.size(), 3);
        assert!((dm.get(0, 1) - 5.0).abs() < 1e-10);
        assert!((dm.get(0, 2) - 8.0).abs() < 1e-10);
        assert!((dm.get(0, 0)).abs() < 1e-10);
        assert!(dm.is_symmetric(1e-10));
    }

    #[test]
    fn test_from_data() {
        let dm = DistanceMatrix::from_data(2, vec![0.0, 5.0, 5.0, 0.0]).expect("valid");
        assert_eq!(dm.get(0, 1), 5.0);
        assert_eq!(dm.distance(1, 0), 5.0);
        assert!(DistanceMatrix::from_data(2, vec![0.0, 1.0, 2.0]).is_none());
    }

    #[test]
    fn test_try_from_data_rejects_asymmetric() {
        let err = DistanceMatrix::try_from_data(2, vec![0.0, 10.0, 15.0, 0.0]);
        assert!(matches!(err, Err(InstanceError::Invalid(_))));
    }

    #[test]
    fn test_try_from_data_rejects_diagonal_and_negative() {
        assert!(DistanceMatrix::try_from_data(2, vec![1.0, 1.0, 1.0, 0.0]).is_err());
        assert!(DistanceMatrix::try_from_data(2, vec![0.0, -1.0, -1.0, 0.0]).is_err());
        assert!(DistanceMatrix::try_from_data(2, vec![0.0, f64::NAN, f64::NAN, 0.0]).is_err());
    }

    #[test]
    fn test_try_from_data_zero_size() {
        assert!(matches!(
            DistanceMatrix::try_from_data(0, vec![]),
            Err(InstanceError::Empty)
        ));
    }

    #[test]
    fn test_try_from_data_length_mismatch() {
        assert!(matches!(
            DistanceMatrix::try_from_data(3, vec![0.0; 4]),
            Err(InstanceError::Invalid(_))
        ));
    }
}
