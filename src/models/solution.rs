//! Solver output.

use serde::{Deserialize, Serialize};

use super::Assignment;

/// Which solver produced a [`Solution`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolutionSource {
    /// Greedy heuristic; change count is an upper bound on the optimum.
    Greedy,
    /// Exact optimizer; change count is minimal.
    Exact,
    /// Greedy heuristic used because the exact optimizer failed recoverably.
    GreedyFallback,
}

/// A feasible assignment together with its change count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution {
    /// Color per sequence position.
    pub assignment: Assignment,
    /// Number of color changes in `assignment`.
    pub change_count: usize,
    /// Producing solver.
    pub source: SolutionSource,
}

impl Solution {
    /// Creates a solution.
    pub fn new(assignment: Assignment, change_count: usize, source: SolutionSource) -> Self {
        Self {
            assignment,
            change_count,
            source,
        }
    }

    /// Whether the change count is certified minimal.
    pub fn is_optimal(&self) -> bool {
        self.source == SolutionSource::Exact
    }
}
