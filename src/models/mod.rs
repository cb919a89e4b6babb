//! Domain model types for the traveling salesman problem.
//!
//! Cities carry planar coordinates; tours are orderings of city indices with
//! a cached closed-route cost.

mod city;
mod tour;

pub use city::City;
pub use tour::Tour;
