//! Coating color (the two-valued resource state).

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two states the paint resource can be in.
///
/// In the integer formulation `Black` corresponds to `x[i] = 1` and
/// `White` to `x[i] = 0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    /// Initial state of the greedy pass.
    #[default]
    White,
    /// The other state.
    Black,
}

impl Color {
    /// Returns the opposite color.
    #[inline]
    pub fn flipped(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Whether this is `Black`.
    #[inline]
    pub fn is_black(self) -> bool {
        self == Color::Black
    }

    /// Whether this is `White`.
    #[inline]
    pub fn is_white(self) -> bool {
        self == Color::White
    }

    /// Converts a black flag (`x[i]`) to a color.
    #[inline]
    pub fn from_black(black: bool) -> Self {
        if black {
            Color::Black
        } else {
            Color::White
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}
