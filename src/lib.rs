//! # u-tsp
//!
//! Time-bounded, multi-threaded heuristic solver for the symmetric Traveling
//! Salesman Problem. Independent workers repeat random restarts improved by
//! steepest-descent local search until a shared deadline fires; the best
//! tour across all workers is returned.
//!
//! ## Modules
//!
//! - [`models`] — Domain model types (City, Tour)
//! - [`distance`] — Distance model trait and dense distance matrix
//! - [`evaluation`] — Full and incremental tour cost
//! - [`local_search`] — Swap and 2-opt neighborhoods, steepest descent
//! - [`cancel`] — Cooperative cancellation token
//! - [`instance`] — TSPLIB instance reader
//! - [`solver`] — Workers, orchestrator, run configuration and solver registry
//! - [`error`] — Configuration, instance and execution errors

pub mod cancel;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod instance;
pub mod local_search;
pub mod models;
pub mod solver;

pub use error::{Error, Result};
