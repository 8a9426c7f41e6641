//! Problem (instance) model.
//!
//! A problem is an arrival sequence of item types plus the per-type
//! white/black demand it must satisfy. It is validated once on
//! construction and read-only afterwards. Distinct types are indexed
//! densely in order of first appearance; both solvers work on those
//! indices and on the precomputed position lists instead of rescanning
//! the sequence.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use super::{Demand, DemandTable};
use crate::error::PaintShopError;
use crate::validation::{occurrences, validate_instance};

/// Bound for item type labels.
///
/// Any clonable, hashable, debug-printable value works: `&str`, `String`,
/// `char`, integer ids, or a domain enum.
pub trait ItemType: Clone + Eq + Hash + Debug {}

impl<T: Clone + Eq + Hash + Debug> ItemType for T {}

/// Which demand shape the instance was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Variant {
    /// Every type occurs twice; one white, one black.
    Binary,
    /// Arbitrary per-type demands from a table.
    General,
}

/// A validated paint shop instance.
///
/// # Example
///
/// ```
/// use u_paintshop::models::{Demand, DemandTable, Problem, Variant};
///
/// let binary = Problem::binary(vec!["A", "B", "A", "B"]).unwrap();
/// assert_eq!(binary.variant(), Variant::Binary);
/// assert_eq!(binary.positions_of(&"B"), Some(&[1, 3][..]));
///
/// let table = DemandTable::new().with_demand("A", 2, 1);
/// let general = Problem::with_demands(vec!["A", "A", "A"], table).unwrap();
/// assert_eq!(general.demand_of(&"A"), Some(Demand::new(2, 1)));
/// ```
#[derive(Debug, Clone)]
pub struct Problem<T> {
    sequence: Vec<T>,
    types: Vec<T>,
    lookup: HashMap<T, usize>,
    type_at: Vec<usize>,
    positions: Vec<Vec<usize>>,
    demands: Vec<Demand>,
    variant: Variant,
}

impl<T: ItemType> Problem<T> {
    /// Builds a problem; `None` means the binary variant.
    ///
    /// # Errors
    /// `PaintShopError::InvalidInstance` listing every detected issue.
    pub fn new(sequence: Vec<T>, demands: Option<DemandTable<T>>) -> Result<Self, PaintShopError> {
        match demands {
            Some(table) => Self::with_demands(sequence, table),
            None => Self::binary(sequence),
        }
    }

    /// Builds a binary-variant problem (every type exactly twice).
    pub fn binary(sequence: Vec<T>) -> Result<Self, PaintShopError> {
        validate_instance(&sequence, None)?;
        let demands = vec![Demand::binary(); occurrences(&sequence).len()];
        Ok(Self::index(sequence, demands, Variant::Binary))
    }

    /// Builds a general-demand problem.
    pub fn with_demands(sequence: Vec<T>, table: DemandTable<T>) -> Result<Self, PaintShopError> {
        validate_instance(&sequence, Some(&table))?;
        let demands = occurrences(&sequence)
            .into_iter()
            .map(|(item, _)| table.get(item).copied().unwrap_or_default())
            .collect();
        Ok(Self::index(sequence, demands, Variant::General))
    }

    /// `demands` is in first-appearance order of the types.
    fn index(sequence: Vec<T>, demands: Vec<Demand>, variant: Variant) -> Self {
        let mut lookup: HashMap<T, usize> = HashMap::new();
        let mut types = Vec::new();
        let mut positions: Vec<Vec<usize>> = Vec::new();
        let mut type_at = Vec::with_capacity(sequence.len());

        for (pos, item) in sequence.iter().enumerate() {
            let idx = *lookup.entry(item.clone()).or_insert_with(|| {
                types.push(item.clone());
                positions.push(Vec::new());
                types.len() - 1
            });
            positions[idx].push(pos);
            type_at.push(idx);
        }

        Self {
            sequence,
            types,
            lookup,
            type_at,
            positions,
            demands,
            variant,
        }
    }

    /// Position of a type in [`types`](Self::types).
    pub fn type_index(&self, item: &T) -> Option<usize> {
        self.lookup.get(item).copied()
    }

    /// Positions occupied by a type, ascending.
    pub fn positions_of(&self, item: &T) -> Option<&[usize]> {
        self.type_index(item).map(|idx| self.positions[idx].as_slice())
    }

    /// Demand for a type.
    pub fn demand_of(&self, item: &T) -> Option<Demand> {
        self.type_index(item).map(|idx| self.demands[idx])
    }

    /// The demand table, synthesized for binary instances.
    pub fn demand_table(&self) -> DemandTable<T> {
        self.types
            .iter()
            .cloned()
            .zip(self.demands.iter().copied())
            .collect()
    }
}

impl<T> Problem<T> {
    /// The arrival sequence.
    pub fn sequence(&self) -> &[T] {
        &self.sequence
    }

    /// Number of positions (N ≥ 1).
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    /// Always `false`; empty sequences are rejected on construction.
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Distinct types in order of first appearance.
    pub fn types(&self) -> &[T] {
        &self.types
    }

    /// Number of distinct types.
    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    /// Type index at each sequence position.
    pub fn type_indices(&self) -> &[usize] {
        &self.type_at
    }

    /// Type index at a single position.
    pub fn type_index_at(&self, position: usize) -> Option<usize> {
        self.type_at.get(position).copied()
    }

    /// Positions per type index.
    pub fn positions(&self) -> &[Vec<usize>] {
        &self.positions
    }

    /// Demand per type index.
    pub fn demands(&self) -> &[Demand] {
        &self.demands
    }

    /// Total black demand over all types.
    pub fn total_black(&self) -> usize {
        self.demands.iter().map(|d| d.black).sum()
    }

    /// Total white demand over all types.
    pub fn total_white(&self) -> usize {
        self.demands.iter().map(|d| d.white).sum()
    }

    /// Demand shape of the instance.
    pub fn variant(&self) -> Variant {
        self.variant
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    #[test]
    fn test_binary_indexing() {
        let p = Problem::binary(vec!['A', 'D', 'A', 'D']).unwrap();
        assert_eq!(p.len(), 4);
        assert_eq!(p.types(), &['A', 'D']);
        assert_eq!(p.type_indices(), &[0, 1, 0, 1]);
        assert_eq!(p.positions(), &[vec![0, 2], vec![1, 3]]);
        assert_eq!(p.demands(), &[Demand::binary(), Demand::binary()]);
        assert_eq!(p.variant(), Variant::Binary);
    }

    #[test]
    fn test_binary_rejects_wrong_counts() {
        let err = Problem::binary(vec!['A', 'A', 'A', 'B', 'B']).unwrap_err();
        let errors = err.validation_errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::OccurrenceCount);
    }

    #[test]
    fn test_empty_sequence_rejected() {
        let err = Problem::<u8>::binary(vec![]).unwrap_err();
        assert_eq!(
            err.validation_errors()[0].kind,
            ValidationErrorKind::EmptySequence
        );
    }

    #[test]
    fn test_general_demands_follow_types() {
        let table = DemandTable::new()
            .with_demand("sedan", 1, 2)
            .with_demand("van", 1, 0);
        let p = Problem::with_demands(vec!["van", "sedan", "sedan", "sedan"], table).unwrap();
        assert_eq!(p.types(), &["van", "sedan"]);
        assert_eq!(p.demands(), &[Demand::new(1, 0), Demand::new(1, 2)]);
        assert_eq!(p.positions_of(&"sedan"), Some(&[1, 2, 3][..]));
        assert_eq!(p.total_black(), 2);
        assert_eq!(p.total_white(), 2);
        assert_eq!(p.variant(), Variant::General);
    }

    #[test]
    fn test_new_dispatches_on_table() {
        let seq = vec![1u32, 2, 1, 2];
        assert_eq!(
            Problem::new(seq.clone(), None).unwrap().variant(),
            Variant::Binary
        );
        let table = DemandTable::new().with_demand(1, 2, 0).with_demand(2, 0, 2);
        assert_eq!(
            Problem::new(seq, Some(table)).unwrap().variant(),
            Variant::General
        );
    }

    #[test]
    fn test_demand_table_synthesized_for_binary() {
        let p = Problem::binary(vec!["A", "B", "B", "A"]).unwrap();
        let table = p.demand_table();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(&"A"), Some(&Demand::binary()));
        assert_eq!(table.get(&"B"), Some(&Demand::binary()));
    }

    #[test]
    fn test_lookup_unknown_type() {
        let p = Problem::binary(vec!["A", "A"]).unwrap();
        assert_eq!(p.type_index(&"Z"), None);
        assert_eq!(p.positions_of(&"Z"), None);
        assert_eq!(p.demand_of(&"Z"), None);
        assert_eq!(p.type_index_at(1), Some(0));
        assert_eq!(p.type_index_at(2), None);
    }

    #[test]
    fn test_single_position_general() {
        let table = DemandTable::new().with_demand("A", 0, 1);
        let p = Problem::with_demands(vec!["A"], table).unwrap();
        assert_eq!(p.len(), 1);
        assert!(!p.is_empty());
    }
}
