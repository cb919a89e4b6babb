//! Error types.
//!
//! Configuration and instance errors are raised before any worker thread
//! starts. Execution errors abort an orchestration without returning a
//! partially reduced result.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

/// A missing or unusable run configuration key.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required configuration key `{key}`")]
    Missing { key: &'static str },

    #[error("invalid value `{value}` for `{key}`: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("malformed JSON configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure to build a distance model from an instance source.
#[derive(Debug, thiserror::Error)]
pub enum InstanceError {
    #[error("cannot read instance {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error("instance has no cities")]
    Empty,

    #[error("city {city} has non-finite coordinates")]
    NonFinite { city: usize },

    #[error("invalid distance data: {0}")]
    Invalid(String),
}

/// Failure while running the worker pool.
#[derive(Debug, thiserror::Error)]
pub enum ExecutionError {
    #[error("worker pool cannot be sized to zero workers")]
    NoWorkers,

    #[error("{pending} worker(s) did not stop within {grace:?} of cancellation")]
    WorkerStuck { pending: usize, grace: Duration },

    #[error("failed to spawn worker {worker}: {source}")]
    Spawn {
        worker: usize,
        #[source]
        source: io::Error,
    },

    #[error("worker {worker} panicked")]
    WorkerPanicked { worker: usize },

    #[error("no worker produced a tour")]
    NoSolution,
}

/// Any error surfaced by a solver run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Instance(#[from] InstanceError),

    #[error(transparent)]
    Execution(#[from] ExecutionError),
}

/// Result alias used by the solver entry points.
pub type Result<T> = std::result::Result<T, Error>;
