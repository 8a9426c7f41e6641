//! Greedy color assignment.
//!
//! # Algorithm
//!
//! 1. Start every type with its full white/black demand as remaining capacity.
//! 2. Start in the initial color (white by default).
//! 3. Scan the sequence left to right. Keep the current color while the
//!    position's type still has capacity for it; otherwise flip once.
//! 4. Decrement the capacity of the color assigned.
//!
//! The pass never looks ahead, so its change count is only an upper bound
//! on the optimum.
//!
//! # Complexity
//! O(n) time, O(k) extra space for k distinct types.

use tracing::{debug, trace};

use crate::error::PaintShopError;
use crate::models::{Assignment, Color, Demand, Problem, Solution, SolutionSource};
use crate::scheduler::score_problem;

/// Color the greedy pass starts in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InitialColor {
    /// Always start white.
    #[default]
    White,
    /// Always start black.
    Black,
    /// Start in the color with the larger aggregate demand (white on ties).
    LargerDemand,
}

impl InitialColor {
    fn resolve<T>(self, problem: &Problem<T>) -> Color {
        match self {
            InitialColor::White => Color::White,
            InitialColor::Black => Color::Black,
            InitialColor::LargerDemand => {
                if problem.total_black() > problem.total_white() {
                    Color::Black
                } else {
                    Color::White
                }
            }
        }
    }
}

/// Remaining demand for one type during the pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Capacity {
    white_remaining: usize,
    black_remaining: usize,
}

impl Capacity {
    fn remaining(&self, color: Color) -> usize {
        match color {
            Color::White => self.white_remaining,
            Color::Black => self.black_remaining,
        }
    }

    /// Takes one unit of `color`; `false` if none is left.
    fn take(&mut self, color: Color) -> bool {
        let slot = match color {
            Color::White => &mut self.white_remaining,
            Color::Black => &mut self.black_remaining,
        };
        if *slot == 0 {
            return false;
        }
        *slot -= 1;
        true
    }

    fn is_exhausted(&self) -> bool {
        self.white_remaining == 0 && self.black_remaining == 0
    }
}

impl From<Demand> for Capacity {
    fn from(d: Demand) -> Self {
        Self {
            white_remaining: d.white,
            black_remaining: d.black,
        }
    }
}

/// Single-pass greedy solver.
///
/// Deterministic: the same problem always yields the same assignment.
///
/// # Example
///
/// ```
/// use u_paintshop::models::Problem;
/// use u_paintshop::scheduler::GreedySolver;
///
/// let problem = Problem::binary(vec!["A", "B", "A", "B"]).unwrap();
/// let solution = GreedySolver::new().solve(&problem).unwrap();
/// assert_eq!(solution.change_count, 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct GreedySolver {
    initial: InitialColor,
}

impl GreedySolver {
    /// Creates a solver that starts white.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the starting color policy.
    pub fn with_initial_color(mut self, initial: InitialColor) -> Self {
        self.initial = initial;
        self
    }

    /// Assigns a color to every position.
    ///
    /// # Errors
    /// `SolverContractViolation` if a type runs out of both colors before
    /// its last occurrence, or if the result fails re-scoring. Neither can
    /// happen for a validated problem.
    pub fn solve<T>(&self, problem: &Problem<T>) -> Result<Solution, PaintShopError> {
        let capacities: Vec<Capacity> = problem.demands().iter().map(|&d| d.into()).collect();
        let start = self.initial.resolve(problem);

        let (colors, capacities) = sweep(problem.type_indices(), capacities, start)?;

        if let Some(idx) = capacities.iter().position(|c| !c.is_exhausted()) {
            return Err(PaintShopError::SolverContractViolation(format!(
                "greedy pass left demand unmet for type index {idx}"
            )));
        }

        let assignment = Assignment::new(colors);
        let score = score_problem(problem, &assignment);
        if !score.is_feasible {
            return Err(PaintShopError::SolverContractViolation(
                "greedy assignment violates demand".into(),
            ));
        }

        debug!(
            positions = problem.len(),
            types = problem.type_count(),
            changes = score.change_count,
            "greedy solve finished"
        );

        Ok(Solution::new(
            assignment,
            score.change_count,
            SolutionSource::Greedy,
        ))
    }
}

/// Runs the left-to-right pass, consuming and returning the capacity table.
fn sweep(
    type_at: &[usize],
    mut capacities: Vec<Capacity>,
    start: Color,
) -> Result<(Vec<Color>, Vec<Capacity>), PaintShopError> {
    let mut colors = Vec::with_capacity(type_at.len());
    let mut current = start;

    for (pos, &idx) in type_at.iter().enumerate() {
        let capacity = &mut capacities[idx];
        if capacity.remaining(current) == 0 {
            current = current.flipped();
            trace!(position = pos, color = %current, "flip");
        }
        if !capacity.take(current) {
            return Err(PaintShopError::SolverContractViolation(format!(
                "type index {idx} has no remaining capacity at position {pos}"
            )));
        }
        colors.push(current);
    }

    Ok((colors, capacities))
}
