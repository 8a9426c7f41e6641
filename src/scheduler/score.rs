//! Assignment scoring and feasibility checking.
//!
//! The score of an assignment is its number of color changes. Feasibility
//! means every type receives exactly its demanded number of white and
//! black positions. Scoring is pure: no input is mutated and the same
//! inputs always give the same [`Score`].

use std::collections::HashMap;

use crate::models::{Assignment, Color, DemandTable, ItemType, Problem};

/// Change count and feasibility of an assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    /// Number of adjacent positions with different colors.
    pub change_count: usize,
    /// Whether all per-type demands are met exactly.
    pub is_feasible: bool,
}

/// Counts adjacent color disagreements.
pub fn count_changes(colors: &[Color]) -> usize {
    colors.windows(2).filter(|w| w[0] != w[1]).count()
}

/// Indices `i` with `colors[i] != colors[i - 1]`.
pub fn change_positions(colors: &[Color]) -> Vec<usize> {
    colors
        .windows(2)
        .enumerate()
        .filter(|(_, w)| w[0] != w[1])
        .map(|(i, _)| i + 1)
        .collect()
}

/// Scores an assignment against a raw sequence and demand table.
///
/// An assignment whose length differs from the sequence, or a sequence
/// type without a table entry, is infeasible. The change count is always
/// computed from the assignment alone.
///
/// # Example
///
/// ```
/// use u_paintshop::models::{Assignment, Color, DemandTable};
/// use u_paintshop::scheduler::score;
///
/// let seq = ["A", "B", "A", "B"];
/// let table = DemandTable::new().with_demand("A", 1, 1).with_demand("B", 1, 1);
/// let a = Assignment::new(vec![Color::White, Color::White, Color::Black, Color::Black]);
///
/// let s = score(&seq, &table, &a);
/// assert_eq!(s.change_count, 1);
/// assert!(s.is_feasible);
/// ```
pub fn score<T: ItemType>(
    sequence: &[T],
    demands: &DemandTable<T>,
    assignment: &Assignment,
) -> Score {
    let change_count = assignment.change_count();
    if assignment.len() != sequence.len() {
        return Score {
            change_count,
            is_feasible: false,
        };
    }

    // (white, black) tallies per type
    let mut tallies: HashMap<&T, (usize, usize)> = HashMap::new();
    for (item, color) in sequence.iter().zip(assignment.iter()) {
        let tally = tallies.entry(item).or_insert((0, 0));
        match color {
            Color::White => tally.0 += 1,
            Color::Black => tally.1 += 1,
        }
    }

    let met = tallies.iter().all(|(item, &(white, black))| {
        demands
            .get(item)
            .is_some_and(|d| d.white == white && d.black == black)
    });
    // A type the sequence never produces can only be satisfied by zero demand
    let unserved = demands
        .iter()
        .any(|(item, d)| !tallies.contains_key(item) && (d.white != 0 || d.black != 0));
    let is_feasible = met && !unserved;

    Score {
        change_count,
        is_feasible,
    }
}

/// Scores an assignment against a validated problem.
///
/// Uses the problem's precomputed type indices instead of hashing labels.
pub fn score_problem<T>(problem: &Problem<T>, assignment: &Assignment) -> Score {
    let change_count = assignment.change_count();
    if assignment.len() != problem.len() {
        return Score {
            change_count,
            is_feasible: false,
        };
    }

    let mut white = vec![0usize; problem.type_count()];
    for (&idx, color) in problem.type_indices().iter().zip(assignment.iter()) {
        if color.is_white() {
            white[idx] += 1;
        }
    }

    let is_feasible = problem
        .positions()
        .iter()
        .zip(problem.demands())
        .zip(&white)
        .all(|((positions, demand), &w)| {
            demand.white == w && demand.black == positions.len() - w
        });

    Score {
        change_count,
        is_feasible,
    }
}
