//! Input validation for paint shop instances.
//!
//! Checks that a sequence and its demand table describe a well-formed
//! instance before any solver sees it. Detects:
//! - Empty sequences
//! - Binary-variant types that do not occur exactly twice
//! - Demands that do not sum to a type's occurrence count
//! - Table entries for types that never occur in the sequence
//! - Sequence types without a table entry

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::{DemandTable, ItemType};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationErrorKind {
    /// The sequence has no positions.
    EmptySequence,
    /// A type does not occur exactly twice in a binary instance.
    OccurrenceCount,
    /// A type's white + black demand differs from its occurrence count.
    DemandMismatch,
    /// The demand table names a type absent from the sequence.
    UnknownType,
    /// A sequence type has no demand table entry.
    MissingDemand,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Counts occurrences per distinct type, in order of first appearance.
pub(crate) fn occurrences<T: ItemType>(sequence: &[T]) -> Vec<(&T, usize)> {
    let mut index: HashMap<&T, usize> = HashMap::new();
    let mut counts: Vec<(&T, usize)> = Vec::new();
    for item in sequence {
        match index.get(item) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(item, counts.len());
                counts.push((item, 1));
            }
        }
    }
    counts
}

/// Validates a paint shop instance.
///
/// With `demands == None` the binary variant is assumed and every type must
/// occur exactly twice. Otherwise the table must cover exactly the types of
/// the sequence, and each entry must sum to that type's occurrence count.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_instance<T: ItemType>(
    sequence: &[T],
    demands: Option<&DemandTable<T>>,
) -> ValidationResult {
    let mut errors = Vec::new();

    if sequence.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptySequence,
            "Sequence is empty",
        ));
    }

    let counts = occurrences(sequence);

    match demands {
        None => {
            for (item, count) in &counts {
                if *count != 2 {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::OccurrenceCount,
                        format!("Type {item:?} occurs {count} times, expected exactly 2"),
                    ));
                }
            }
        }
        Some(table) => {
            for (item, count) in &counts {
                match table.get(item) {
                    Some(demand) if demand.total() != Some(*count) => {
                        errors.push(ValidationError::new(
                            ValidationErrorKind::DemandMismatch,
                            format!(
                                "Type {item:?} occurs {count} times, demand is {}W + {}B",
                                demand.white, demand.black
                            ),
                        ));
                    }
                    Some(_) => {}
                    None => {
                        errors.push(ValidationError::new(
                            ValidationErrorKind::MissingDemand,
                            format!("Type {item:?} has no demand entry"),
                        ));
                    }
                }
            }

            let present: HashMap<&T, usize> = counts.iter().copied().collect();
            for (item, _) in table.iter() {
                if !present.contains_key(item) {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::UnknownType,
                        format!("Demand table names type {item:?} which is not in the sequence"),
                    ));
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn has_kind(errors: &[ValidationError], kind: ValidationErrorKind) -> bool {
        errors.iter().any(|e| e.kind == kind)
    }

    #[test]
    fn test_valid_binary() {
        let seq = ["A", "B", "A", "B"];
        assert!(validate_instance(&seq, None).is_ok());
    }

    #[test]
    fn test_binary_wrong_occurrence() {
        let seq = ["A", "B", "A", "A"];
        let errors = validate_instance(&seq, None).unwrap_err();
        // A occurs 3 times, B once
        assert_eq!(errors.len(), 2);
        assert!(errors
            .iter()
            .all(|e| e.kind == ValidationErrorKind::OccurrenceCount));
    }

    #[test]
    fn test_empty_sequence() {
        let seq: [&str; 0] = [];
        let errors = validate_instance(&seq, None).unwrap_err();
        assert!(has_kind(&errors, ValidationErrorKind::EmptySequence));

        let errors = validate_instance(&seq, Some(&DemandTable::new())).unwrap_err();
        assert!(has_kind(&errors, ValidationErrorKind::EmptySequence));
    }

    #[test]
    fn test_valid_general() {
        let seq = ["A", "A", "A", "B"];
        let table = DemandTable::new().with_demand("A", 2, 1).with_demand("B", 0, 1);
        assert!(validate_instance(&seq, Some(&table)).is_ok());
    }

    #[test]
    fn test_demand_mismatch() {
        let seq = ["A", "A", "A", "B"];
        let table = DemandTable::new().with_demand("A", 1, 1).with_demand("B", 0, 1);
        let errors = validate_instance(&seq, Some(&table)).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::DemandMismatch);
        assert!(errors[0].message.contains("\"A\""));
    }

    #[test]
    fn test_demand_overflow_is_mismatch() {
        let seq = ["A"];
        let table = DemandTable::new().with_demand("A", usize::MAX, 1);
        let errors = validate_instance(&seq, Some(&table)).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::DemandMismatch);
    }

    #[test]
    fn test_unknown_type() {
        let seq = ["A", "A"];
        let table = DemandTable::new().with_demand("A", 1, 1).with_demand("Z", 1, 0);
        let errors = validate_instance(&seq, Some(&table)).unwrap_err();
        assert!(has_kind(&errors, ValidationErrorKind::UnknownType));
    }

    #[test]
    fn test_missing_demand() {
        let seq = ["A", "B"];
        let table = DemandTable::new().with_demand("A", 1, 0);
        let errors = validate_instance(&seq, Some(&table)).unwrap_err();
        assert!(has_kind(&errors, ValidationErrorKind::MissingDemand));
    }

    #[test]
    fn test_multiple_errors() {
        // Mismatch on A, missing B, unknown C
        let seq = ["A", "B", "A"];
        let table = DemandTable::new().with_demand("A", 3, 0).with_demand("C", 1, 0);
        let errors = validate_instance(&seq, Some(&table)).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_occurrences_first_appearance_order() {
        let seq = ['c', 'a', 'c', 'b', 'a', 'c'];
        let counts = occurrences(&seq);
        assert_eq!(counts, vec![(&'c', 3), (&'a', 2), (&'b', 1)]);
    }
}
