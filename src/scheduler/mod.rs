//! Greedy solver and assignment scoring.
//!
//! # Algorithm
//!
//! `GreedySolver` makes one left-to-right pass, keeping the current color
//! until the position's type has no demand left for it. It is always
//! feasible and runs in linear time, but is not optimal.
//!
//! # Scoring
//!
//! `score` / `score_problem` count color changes and check that every
//! type's white/black demand is met exactly. Both solvers re-score their
//! own output before returning it.

mod greedy;
mod score;

pub use greedy::{GreedySolver, InitialColor};
pub use score::{change_positions, count_changes, score, score_problem, Score};
