//! Solver boundary: configuration, results, and the backend trait.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::MipModel;

/// Configuration passed to a [`MipSolver`] on each call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Wall-clock budget for one solve. `None` = unbounded.
    pub time_limit: Option<Duration>,
    /// Largest distance from 0 or 1 still accepted as integral.
    pub integrality_tolerance: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            time_limit: None,
            integrality_tolerance: 0.1,
        }
    }
}

impl SolverConfig {
    /// Creates the default configuration (no time limit, tolerance 0.1).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the time limit.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Sets the integrality tolerance.
    pub fn with_integrality_tolerance(mut self, tolerance: f64) -> Self {
        self.integrality_tolerance = tolerance;
        self
    }
}

/// Optimal values returned by a backend.
#[derive(Debug, Clone, PartialEq)]
pub struct MipSolution {
    /// Value per variable, indexed by `VarId`.
    pub values: Vec<f64>,
    /// Achieved objective value.
    pub objective: f64,
}

/// Why a backend returned no optimal solution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MipFailure {
    /// The constraints admit no solution.
    Infeasible,
    /// Optimality was not proven within the time limit.
    Timeout,
    /// The backend failed or could not be run.
    Unavailable(String),
}

impl std::fmt::Display for MipFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MipFailure::Infeasible => write!(f, "model is infeasible"),
            MipFailure::Timeout => write!(f, "time limit reached"),
            MipFailure::Unavailable(msg) => write!(f, "backend unavailable: {msg}"),
        }
    }
}

impl std::error::Error for MipFailure {}

/// An integer-programming backend.
///
/// Implementations must return either a proven-optimal solution covering
/// every variable of the model, or a [`MipFailure`].
pub trait MipSolver {
    /// Backend name for logs.
    fn name(&self) -> &str;

    /// Solves `model` to optimality under `config`.
    fn solve(&self, model: &MipModel, config: &SolverConfig) -> Result<MipSolution, MipFailure>;
}

impl<S: MipSolver + ?Sized> MipSolver for &S {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn solve(&self, model: &MipModel, config: &SolverConfig) -> Result<MipSolution, MipFailure> {
        (**self).solve(model, config)
    }
}
