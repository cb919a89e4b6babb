//! Run configuration.

use std::collections::HashMap;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::SolverKind;
use crate::error::ConfigError;

/// Default grace period after cancellation before a worker counts as stuck.
pub const DEFAULT_GRACE_MS: u64 = 5_000;

fn default_grace_ms() -> u64 {
    DEFAULT_GRACE_MS
}

/// Configuration of a single solver run.
///
/// Keys follow the property names of the benchmark driver: `instance`,
/// `seed`, `maxcpu` (seconds), `maxthreads` (0 = hardware parallelism),
/// `verbose`, plus `algorithm` and `grace_ms`.
///
/// # Examples
///
/// ```
/// use u_tsp::solver::{RunConfig, SolverKind};
///
/// let config = RunConfig::new(3)
///     .with_instance("data/qa194.tsp")
///     .with_seed(42)
///     .with_max_threads(4)
///     .with_algorithm(SolverKind::TwoOptDescent);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.worker_count(), 4);
///
/// let json = r#"{"instance": "data/qa194.tsp", "maxcpu": 3}"#;
/// let parsed = RunConfig::from_json(json).unwrap();
/// assert_eq!(parsed.maxthreads, 0);
/// assert_eq!(parsed.algorithm, SolverKind::SwapDescent);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Path of the TSPLIB instance. Not needed when a distance model is supplied directly.
    #[serde(default)]
    pub instance: Option<PathBuf>,

    /// Run seed; each worker derives its own stream from it. `None` seeds from entropy.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Time budget in seconds.
    pub maxcpu: u64,

    /// Number of workers; 0 uses the available hardware parallelism.
    #[serde(default)]
    pub maxthreads: usize,

    /// Logs every per-worker improvement at debug level.
    #[serde(default)]
    pub verbose: bool,

    /// Solver variant.
    #[serde(default)]
    pub algorithm: SolverKind,

    /// Milliseconds workers get to stop after cancellation.
    #[serde(default = "default_grace_ms")]
    pub grace_ms: u64,
}

impl RunConfig {
    /// Creates a configuration with the given time budget in seconds.
    pub fn new(maxcpu: u64) -> Self {
        Self {
            instance: None,
            seed: None,
            maxcpu,
            maxthreads: 0,
            verbose: false,
            algorithm: SolverKind::default(),
            grace_ms: DEFAULT_GRACE_MS,
        }
    }

    pub fn with_instance(mut self, path: impl Into<PathBuf>) -> Self {
        self.instance = Some(path.into());
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_max_threads(mut self, n: usize) -> Self {
        self.maxthreads = n;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_algorithm(mut self, kind: SolverKind) -> Self {
        self.algorithm = kind;
        self
    }

    pub fn with_grace_ms(mut self, ms: u64) -> Self {
        self.grace_ms = ms;
        self
    }

    /// Parses a JSON object with the configuration keys.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: RunConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Builds a configuration from string properties.
    ///
    /// `maxcpu` is required. Unknown keys are ignored. A negative `seed` is
    /// accepted and reinterpreted bit-for-bit as unsigned.
    pub fn from_properties(props: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let maxcpu = props
            .get("maxcpu")
            .ok_or(ConfigError::Missing { key: "maxcpu" })?;
        let mut config = RunConfig::new(parse_value("maxcpu", maxcpu)?);

        if let Some(path) = props.get("instance") {
            config.instance = Some(PathBuf::from(path.trim()));
        }
        if let Some(seed) = props.get("seed") {
            config.seed = Some(parse_seed(seed)?);
        }
        if let Some(threads) = props.get("maxthreads") {
            config.maxthreads = parse_value("maxthreads", threads)?;
        }
        if let Some(verbose) = props.get("verbose") {
            config.verbose = parse_bool("verbose", verbose)?;
        }
        if let Some(algorithm) = props.get("algorithm") {
            config.algorithm = algorithm.parse()?;
        }
        if let Some(grace) = props.get("grace_ms") {
            config.grace_ms = parse_value("grace_ms", grace)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grace_ms == 0 {
            return Err(ConfigError::Invalid {
                key: "grace_ms",
                value: "0".into(),
                reason: "grace period must be positive".into(),
            });
        }
        if let Some(path) = &self.instance {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::Invalid {
                    key: "instance",
                    value: String::new(),
                    reason: "instance path is empty".into(),
                });
            }
        }
        Ok(())
    }

    /// Wall-clock budget of the run.
    pub fn time_budget(&self) -> Duration {
        Duration::from_secs(self.maxcpu)
    }

    /// Grace period after cancellation.
    pub fn grace_period(&self) -> Duration {
        Duration::from_millis(self.grace_ms)
    }

    /// Number of workers, resolving 0 to the available hardware parallelism.
    pub fn worker_count(&self) -> usize {
        if self.maxthreads > 0 {
            return self.maxthreads;
        }
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    }
}

fn parse_value<T>(key: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse::<T>().map_err(|e| ConfigError::Invalid {
        key,
        value: value.to_string(),
        reason: e.to_string(),
    })
}

fn parse_seed(value: &str) -> Result<u64, ConfigError> {
    let trimmed = value.trim();
    trimmed
        .parse::<u64>()
        .or_else(|_| trimmed.parse::<i64>().map(|v| v as u64))
        .map_err(|e| ConfigError::Invalid {
            key: "seed",
            value: value.to_string(),
            reason: e.to_string(),
        })
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ConfigError::Invalid {
            key,
            value: value.to_string(),
            reason: "expected a boolean".into(),
        }),
    }
}
