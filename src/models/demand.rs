//! Per-type output demand.
//!
//! A demand table maps each item type to how many of its occurrences must
//! leave the paint shop white and how many black.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::hash::Hash;

use super::Color;

/// Required white/black counts for one item type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Demand {
    /// Occurrences that must be painted white.
    pub white: usize,
    /// Occurrences that must be painted black.
    pub black: usize,
}

impl Demand {
    /// Creates a demand.
    pub fn new(white: usize, black: usize) -> Self {
        Self { white, black }
    }

    /// One white and one black (binary variant).
    pub fn binary() -> Self {
        Self::new(1, 1)
    }

    /// Total occurrences this demand accounts for, `None` on overflow.
    #[inline]
    pub fn total(&self) -> Option<usize> {
        self.white.checked_add(self.black)
    }

    /// Demand for the given color.
    #[inline]
    pub fn for_color(&self, color: Color) -> usize {
        match color {
            Color::White => self.white,
            Color::Black => self.black,
        }
    }
}

/// Mapping from item type to its [`Demand`].
///
/// The table is plain input data; consistency with a sequence is checked
/// when a [`Problem`](super::Problem) is built.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(
    serialize = "T: Serialize + Eq + Hash",
    deserialize = "T: Deserialize<'de> + Eq + Hash"
))]
pub struct DemandTable<T> {
    entries: HashMap<T, Demand>,
}

impl<T: Eq + Hash> DemandTable<T> {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Adds (or replaces) the demand for a type.
    pub fn with_demand(mut self, item: T, white: usize, black: usize) -> Self {
        self.insert(item, Demand::new(white, black));
        self
    }

    /// Inserts a demand, returning the previous one if any.
    pub fn insert(&mut self, item: T, demand: Demand) -> Option<Demand> {
        self.entries.insert(item, demand)
    }

    /// Demand for a type.
    pub fn get(&self, item: &T) -> Option<&Demand> {
        self.entries.get(item)
    }

    /// Whether the table has an entry for a type.
    pub fn contains(&self, item: &T) -> bool {
        self.entries.contains_key(item)
    }

    /// Iterates over `(type, demand)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&T, &Demand)> {
        self.entries.iter()
    }

    /// Number of types in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: Eq + Hash> PartialEq for DemandTable<T> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<T: Eq + Hash> Eq for DemandTable<T> {}

impl<T: Eq + Hash> Default for DemandTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Eq + Hash> FromIterator<(T, Demand)> for DemandTable<T> {
    fn from_iter<I: IntoIterator<Item = (T, Demand)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
