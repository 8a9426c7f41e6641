//! Error type shared by the problem model and both solvers.

use std::time::Duration;

use crate::validation::ValidationError;

/// Failure of a paint shop operation.
#[derive(Debug, Clone, PartialEq)]
pub enum PaintShopError {
    /// Malformed sequence or demand table. Caller error, not retried.
    InvalidInstance(Vec<ValidationError>),
    /// A solver produced output that breaks its own contract. Always fatal.
    SolverContractViolation(String),
    /// No assignment satisfies the demands.
    Infeasible,
    /// The MILP backend did not prove optimality within its budget.
    SolverTimeout {
        /// Configured time limit, if any.
        limit: Option<Duration>,
    },
    /// The MILP backend could not be run or failed internally.
    SolverUnavailable(String),
}

impl PaintShopError {
    /// Whether a caller may fall back to the greedy heuristic.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            PaintShopError::SolverTimeout { .. } | PaintShopError::SolverUnavailable(_)
        )
    }

    /// Validation errors, if this is an `InvalidInstance`.
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            PaintShopError::InvalidInstance(errors) => errors,
            _ => &[],
        }
    }
}

impl std::fmt::Display for PaintShopError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaintShopError::InvalidInstance(errors) => {
                write!(f, "Invalid instance")?;
                for (i, e) in errors.iter().enumerate() {
                    let sep = if i == 0 { ": " } else { "; " };
                    write!(f, "{sep}{}", e.message)?;
                }
                Ok(())
            }
            PaintShopError::SolverContractViolation(msg) => {
                write!(f, "Solver contract violation: {msg}")
            }
            PaintShopError::Infeasible => write!(f, "No feasible assignment exists"),
            PaintShopError::SolverTimeout { limit: Some(limit) } => {
                write!(f, "Solver did not finish within {limit:?}")
            }
            PaintShopError::SolverTimeout { limit: None } => {
                write!(f, "Solver stopped before proving optimality")
            }
            PaintShopError::SolverUnavailable(msg) => write!(f, "Solver unavailable: {msg}"),
        }
    }
}

impl std::error::Error for PaintShopError {}

impl From<Vec<ValidationError>> for PaintShopError {
    fn from(errors: Vec<ValidationError>) -> Self {
        PaintShopError::InvalidInstance(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    #[test]
    fn test_recoverable() {
        assert!(PaintShopError::SolverTimeout { limit: None }.is_recoverable());
        assert!(PaintShopError::SolverUnavailable("down".into()).is_recoverable());
        assert!(!PaintShopError::Infeasible.is_recoverable());
        assert!(!PaintShopError::SolverContractViolation("bad".into()).is_recoverable());
        assert!(!PaintShopError::InvalidInstance(vec![]).is_recoverable());
    }

    #[test]
    fn test_display_lists_validation_messages() {
        let err = PaintShopError::from(vec![
            ValidationError::new(ValidationErrorKind::EmptySequence, "Sequence is empty"),
            ValidationError::new(ValidationErrorKind::MissingDemand, "Type 'A' has no demand"),
        ]);
        assert_eq!(
            err.to_string(),
            "Invalid instance: Sequence is empty; Type 'A' has no demand"
        );
        assert_eq!(err.validation_errors().len(), 2);
    }

    #[test]
    fn test_display_timeout() {
        let err = PaintShopError::SolverTimeout {
            limit: Some(Duration::from_secs(2)),
        };
        assert_eq!(err.to_string(), "Solver did not finish within 2s");
    }
}
