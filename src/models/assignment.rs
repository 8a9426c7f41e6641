//! Assignment (solution) model.
//!
//! An assignment gives one color per sequence position. Solvers build it
//! once and hand it out by value; nothing mutates it afterwards.

use serde::{Deserialize, Serialize};

use super::Color;

/// One color per sequence position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Assignment {
    colors: Vec<Color>,
}

impl Assignment {
    /// Creates an assignment from colors in sequence order.
    pub fn new(colors: Vec<Color>) -> Self {
        Self { colors }
    }

    /// Creates an assignment from `x[i]` flags (`true` = black).
    pub fn from_black_flags(flags: &[bool]) -> Self {
        Self::new(flags.iter().map(|&b| Color::from_black(b)).collect())
    }

    /// Colors in sequence order.
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Color at a position.
    pub fn get(&self, position: usize) -> Option<Color> {
        self.colors.get(position).copied()
    }

    /// Number of positions.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Whether the assignment covers no positions.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Iterates over colors in sequence order.
    pub fn iter(&self) -> impl Iterator<Item = Color> + '_ {
        self.colors.iter().copied()
    }

    /// Number of adjacent positions with different colors.
    pub fn change_count(&self) -> usize {
        crate::scheduler::count_changes(&self.colors)
    }

    /// Number of positions painted with `color`.
    pub fn count_of(&self, color: Color) -> usize {
        self.colors.iter().filter(|&&c| c == color).count()
    }

    /// `x[i]` flags (`true` = black).
    pub fn black_flags(&self) -> Vec<bool> {
        self.colors.iter().map(|c| c.is_black()).collect()
    }
}

impl From<Vec<Color>> for Assignment {
    fn from(colors: Vec<Color>) -> Self {
        Self::new(colors)
    }
}
