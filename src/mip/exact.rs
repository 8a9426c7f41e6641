//! Exact optimizer.
//!
//! Builds the 0/1 formulation, hands it to a [`MipSolver`], rounds the
//! returned `x` vector to colors and re-scores the result. A backend that
//! returns non-integral or infeasible values is a contract violation; it
//! is never rounded into something that merely looks valid.

use tracing::{debug, warn};

use super::{MipFailure, MipSolver, PaintShopMipBuilder, SolverConfig};
use crate::error::PaintShopError;
use crate::models::{Assignment, Color, Problem, Solution, SolutionSource};
use crate::scheduler::{score_problem, GreedySolver};

/// Change-count-minimal solver backed by an integer-programming backend.
///
/// # Example
/// ```
/// # #[cfg(feature = "microlp")]
/// # {
/// use u_paintshop::models::Problem;
/// use u_paintshop::mip::{ExactSolver, MicrolpSolver};
///
/// let problem = Problem::binary("ADEBAFCBCDEF".chars().collect()).unwrap();
/// let solution = ExactSolver::new(MicrolpSolver::new()).solve(&problem).unwrap();
/// assert_eq!(solution.change_count, 2);
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ExactSolver<S> {
    backend: S,
    config: SolverConfig,
}

impl<S: MipSolver> ExactSolver<S> {
    /// Creates a solver with the default configuration.
    pub fn new(backend: S) -> Self {
        Self {
            backend,
            config: SolverConfig::default(),
        }
    }

    /// Sets the backend configuration (time limit, tolerance).
    pub fn with_config(mut self, config: SolverConfig) -> Self {
        self.config = config;
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// The backend.
    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Returns an assignment with the minimum number of color changes.
    ///
    /// # Errors
    /// - `Infeasible` if the backend proves no assignment exists
    /// - `SolverTimeout` if optimality is not proven within the time limit
    /// - `SolverUnavailable` if the backend fails
    /// - `SolverContractViolation` if the backend's values are not integral,
    ///   do not cover the model, or fail re-scoring
    pub fn solve<T>(&self, problem: &Problem<T>) -> Result<Solution, PaintShopError> {
        let formulation = PaintShopMipBuilder::new(problem).build();

        let result = self
            .backend
            .solve(&formulation.model, &self.config)
            .map_err(|failure| self.map_failure(failure))?;

        if result.values.len() != formulation.model.variable_count() {
            return Err(PaintShopError::SolverContractViolation(format!(
                "{} returned {} values for {} variables",
                self.backend.name(),
                result.values.len(),
                formulation.model.variable_count()
            )));
        }

        let tolerance = self.config.integrality_tolerance;
        let colors = formulation
            .x
            .iter()
            .map(|&x| round_to_color(result.values[x.index()], tolerance))
            .collect::<Result<Vec<Color>, PaintShopError>>()?;

        let assignment = Assignment::new(colors);
        let score = score_problem(problem, &assignment);
        if !score.is_feasible {
            return Err(PaintShopError::SolverContractViolation(format!(
                "{} returned an assignment that violates demand",
                self.backend.name()
            )));
        }

        debug!(
            backend = self.backend.name(),
            positions = problem.len(),
            objective = result.objective,
            changes = score.change_count,
            "exact solve finished"
        );

        Ok(Solution::new(
            assignment,
            score.change_count,
            SolutionSource::Exact,
        ))
    }

    /// Solves exactly, falling back to `greedy` on a recoverable failure.
    ///
    /// Only `SolverTimeout` and `SolverUnavailable` trigger the fallback;
    /// the returned solution is then tagged `GreedyFallback`. Every other
    /// error is returned unchanged.
    pub fn solve_or_greedy<T>(
        &self,
        problem: &Problem<T>,
        greedy: &GreedySolver,
    ) -> Result<Solution, PaintShopError> {
        match self.solve(problem) {
            Err(err) if err.is_recoverable() => {
                warn!(error = %err, "exact solve failed, using greedy assignment");
                let mut solution = greedy.solve(problem)?;
                solution.source = SolutionSource::GreedyFallback;
                Ok(solution)
            }
            other => other,
        }
    }

    fn map_failure(&self, failure: MipFailure) -> PaintShopError {
        match failure {
            MipFailure::Infeasible => PaintShopError::Infeasible,
            MipFailure::Timeout => PaintShopError::SolverTimeout {
                limit: self.config.time_limit,
            },
            MipFailure::Unavailable(msg) => {
                PaintShopError::SolverUnavailable(format!("{}: {msg}", self.backend.name()))
            }
        }
    }
}

/// Maps a near-binary `x[i]` to a color.
fn round_to_color(value: f64, tolerance: f64) -> Result<Color, PaintShopError> {
    if (value - 1.0).abs() <= tolerance {
        Ok(Color::Black)
    } else if value.abs() <= tolerance {
        Ok(Color::White)
    } else {
        Err(PaintShopError::SolverContractViolation(format!(
            "non-integral value {value} for a binary variable"
        )))
    }
}
