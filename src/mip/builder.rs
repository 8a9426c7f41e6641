//! Paint shop 0/1 formulation.
//!
//! One binary per position (`x[i] = 1` means black) and one binary per
//! adjacent pair (`z[i] = 1` means a change between `i` and `i + 1`).
//!
//! ```text
//! min  Σ z[i]
//! s.t. Σ_{i ∈ pos(t)} x[i]        == black[t]   ∀ t
//!      Σ_{i ∈ pos(t)} (1 - x[i])  == white[t]   ∀ t
//!      z[i] - x[i] + x[i+1]       >= 0          ∀ i < n-1
//!      z[i] + x[i] - x[i+1]       >= 0          ∀ i < n-1
//! ```
//!
//! The two `z` inequalities make `z[i] ≥ |x[i] - x[i+1]|`; minimization
//! pushes each `z[i]` down to exactly that value.

use tracing::debug;

use super::{LinearExpr, MipModel, Relation, VarId};
use crate::models::Problem;

/// A built formulation plus the handles needed to decode a solution.
#[derive(Debug, Clone)]
pub struct PaintShopFormulation {
    /// The integer program.
    pub model: MipModel,
    /// `x[i]` per sequence position.
    pub x: Vec<VarId>,
    /// `z[i]` per adjacent pair `(i, i + 1)`.
    pub z: Vec<VarId>,
}

/// Builds the integer program for a problem.
///
/// # Example
/// ```
/// use u_paintshop::models::Problem;
/// use u_paintshop::mip::PaintShopMipBuilder;
///
/// let problem = Problem::binary(vec!["A", "B", "A", "B"]).unwrap();
/// let formulation = PaintShopMipBuilder::new(&problem).build();
/// assert_eq!(formulation.x.len(), 4);
/// assert_eq!(formulation.z.len(), 3);
/// ```
pub struct PaintShopMipBuilder<'a, T> {
    problem: &'a Problem<T>,
}

impl<'a, T> PaintShopMipBuilder<'a, T> {
    /// Creates a builder for `problem`.
    pub fn new(problem: &'a Problem<T>) -> Self {
        Self { problem }
    }

    /// Builds the formulation.
    ///
    /// Creates:
    /// - A binary `x[i]` per position
    /// - A binary `z[i]` per adjacent pair
    /// - Black and white demand equalities per type
    /// - Two linearization inequalities per adjacent pair
    /// - The `Σ z` objective
    pub fn build(&self) -> PaintShopFormulation {
        let n = self.problem.len();
        let mut model = MipModel::new("paint_shop");

        let x: Vec<VarId> = (0..n).map(|i| model.add_binary(format!("x_{i}"))).collect();
        let z: Vec<VarId> = (0..n.saturating_sub(1))
            .map(|i| model.add_binary(format!("z_{i}")))
            .collect();

        // Demand per type
        for (positions, demand) in self.problem.positions().iter().zip(self.problem.demands()) {
            let black = LinearExpr::sum(positions.iter().map(|&i| x[i]));
            model.add_constraint(black, Relation::Eq, demand.black as f64);

            let white = positions
                .iter()
                .fold(LinearExpr::new(), |acc, &i| acc.with_term(x[i], -1.0))
                .with_constant(positions.len() as f64);
            model.add_constraint(white, Relation::Eq, demand.white as f64);
        }

        // z[i] >= |x[i] - x[i+1]|
        for (i, &zi) in z.iter().enumerate() {
            let up = LinearExpr::new()
                .with_term(zi, 1.0)
                .with_term(x[i], -1.0)
                .with_term(x[i + 1], 1.0);
            model.add_constraint(up, Relation::Ge, 0.0);

            let down = LinearExpr::new()
                .with_term(zi, 1.0)
                .with_term(x[i], 1.0)
                .with_term(x[i + 1], -1.0);
            model.add_constraint(down, Relation::Ge, 0.0);
        }

        model.minimize(LinearExpr::sum(z.iter().copied()));

        debug!(
            variables = model.variable_count(),
            constraints = model.constraint_count(),
            "built paint shop formulation"
        );

        PaintShopFormulation { model, x, z }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DemandTable;

    fn values_for(formulation: &PaintShopFormulation, black: &[bool]) -> Vec<f64> {
        let mut values = vec![0.0; formulation.model.variable_count()];
        for (i, &b) in black.iter().enumerate() {
            values[formulation.x[i].index()] = if b { 1.0 } else { 0.0 };
        }
        for (i, &zi) in formulation.z.iter().enumerate() {
            values[zi.index()] = if black[i] != black[i + 1] { 1.0 } else { 0.0 };
        }
        values
    }

    #[test]
    fn test_sizes_binary() {
        let problem = Problem::binary(vec!['A', 'B', 'C', 'A', 'B', 'C']).unwrap();
        let f = PaintShopMipBuilder::new(&problem).build();
        // 6 x + 5 z
        assert_eq!(f.model.variable_count(), 11);
        // 2 demand rows per type + 2 rows per pair
        assert_eq!(f.model.constraint_count(), 3 * 2 + 5 * 2);
        assert_eq!(f.model.objective().terms.len(), 5);
    }

    #[test]
    fn test_single_position_has_no_pairs() {
        let table = DemandTable::new().with_demand("A", 1, 0);
        let problem = Problem::with_demands(vec!["A"], table).unwrap();
        let f = PaintShopMipBuilder::new(&problem).build();
        assert_eq!(f.x.len(), 1);
        assert!(f.z.is_empty());
        assert_eq!(f.model.constraint_count(), 2);
        assert!(f.model.objective().terms.is_empty());
    }

    #[test]
    fn test_feasible_assignment_satisfies_model() {
        let problem = Problem::binary(vec!['A', 'B', 'A', 'B']).unwrap();
        let f = PaintShopMipBuilder::new(&problem).build();
        let values = values_for(&f, &[false, false, true, true]);
        assert!(f.model.is_satisfied_by(&values, 1e-9));
        assert_eq!(f.model.objective().evaluate(&values), 1.0);
    }

    #[test]
    fn test_infeasible_assignment_violates_model() {
        let problem = Problem::binary(vec!['A', 'B', 'A', 'B']).unwrap();
        let f = PaintShopMipBuilder::new(&problem).build();
        // Both A's black
        let values = values_for(&f, &[true, false, true, false]);
        assert!(!f.model.is_satisfied_by(&values, 1e-9));
    }

    #[test]
    fn test_z_must_cover_change() {
        let problem = Problem::binary(vec!['A', 'A']).unwrap();
        let f = PaintShopMipBuilder::new(&problem).build();
        let mut values = values_for(&f, &[false, true]);
        assert!(f.model.is_satisfied_by(&values, 1e-9));
        values[f.z[0].index()] = 0.0;
        assert!(!f.model.is_satisfied_by(&values, 1e-9));
    }
}
