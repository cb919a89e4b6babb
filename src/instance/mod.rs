//! Problem instances.
//!
//! An [`Instance`] is a validated list of cities; the solver consumes the
//! [`DistanceMatrix`] derived from it. [`read_tsplib`] loads the TSPLIB
//! coordinate files used for benchmarking.

mod tsplib;

pub use tsplib::{parse_tsplib, read_tsplib};

use crate::distance::DistanceMatrix;
use crate::error::InstanceError;
use crate::models::City;

/// A named set of cities with finite coordinates.
///
/// # Examples
///
/// ```
/// use u_tsp::instance::Instance;
/// use u_tsp::models::City;
///
/// let cities = vec![City::new(0, 0.0, 0.0), City::new(1, 0.0, 2.0)];
/// let instance = Instance::new("pair", cities).unwrap();
/// assert_eq!(instance.n(), 2);
/// assert!(Instance::new("none", vec![]).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Instance {
    name: String,
    cities: Vec<City>,
}

impl Instance {
    /// Creates an instance, rejecting empty city lists and non-finite coordinates.
    pub fn new(name: impl Into<String>, cities: Vec<City>) -> Result<Self, InstanceError> {
        if cities.is_empty() {
            return Err(InstanceError::Empty);
        }
        if let Some(pos) = cities.iter().position(|c| !c.is_finite()) {
            return Err(InstanceError::NonFinite { city: pos });
        }
        Ok(Self {
            name: name.into(),
            cities,
        })
    }

    /// Instance name (may be empty).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of cities.
    pub fn n(&self) -> usize {
        self.cities.len()
    }

    /// Cities in file order.
    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    /// Builds the Euclidean distance matrix for this instance.
    pub fn distance_matrix(&self) -> DistanceMatrix {
        DistanceMatrix::from_cities(&self.cities)
    }
}
