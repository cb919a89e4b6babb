//! Solver variants selectable by name.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{MultiStartSolver, Solver};
use crate::error::ConfigError;
use crate::local_search::Neighborhood;

/// The closed set of solver variants, selected by the `algorithm` key.
///
/// # Examples
///
/// ```
/// use u_tsp::solver::{Solver, SolverKind};
///
/// let kind: SolverKind = "two-opt-descent".parse().unwrap();
/// assert_eq!(kind, SolverKind::TwoOptDescent);
/// assert_eq!(kind.solver().name(), "two-opt-descent");
/// assert!("annealing".parse::<SolverKind>().is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SolverKind {
    /// Parallel random restarts with steepest descent over position swaps.
    #[default]
    SwapDescent,
    /// Parallel random restarts with steepest descent over segment reversals.
    TwoOptDescent,
}

impl SolverKind {
    /// Every registered variant.
    pub const ALL: [SolverKind; 2] = [SolverKind::SwapDescent, SolverKind::TwoOptDescent];

    /// Registry name of this variant.
    pub fn name(&self) -> &'static str {
        match self {
            SolverKind::SwapDescent => "swap-descent",
            SolverKind::TwoOptDescent => "two-opt-descent",
        }
    }

    /// Instantiates the solver for this variant.
    pub fn solver(&self) -> Box<dyn Solver> {
        match self {
            SolverKind::SwapDescent => Box::new(MultiStartSolver::new(Neighborhood::Swap)),
            SolverKind::TwoOptDescent => Box::new(MultiStartSolver::new(Neighborhood::Reversal)),
        }
    }
}

impl fmt::Display for SolverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SolverKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SolverKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s.trim())
            .ok_or_else(|| ConfigError::Invalid {
                key: "algorithm",
                value: s.to_string(),
                reason: format!(
                    "expected one of {}",
                    SolverKind::ALL.map(|k| k.name()).join(", ")
                ),
            })
    }
}
