//! Backend-neutral 0/1 integer program.
//!
//! A `MipModel` is the narrow interface between the paint shop formulation
//! and whatever integer-programming backend solves it: binary variables,
//! linear constraints, and a linear objective to minimize.

use std::fmt;

/// Handle to a binary variable in a [`MipModel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VarId(usize);

impl VarId {
    /// Dense index of the variable.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for VarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// `constant + Σ coeff · var`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinearExpr {
    /// Variable terms.
    pub terms: Vec<(VarId, f64)>,
    /// Constant offset.
    pub constant: f64,
}

impl LinearExpr {
    /// Creates an empty (zero) expression.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `coeff · var`.
    pub fn with_term(mut self, var: VarId, coeff: f64) -> Self {
        self.terms.push((var, coeff));
        self
    }

    /// Sets the constant offset.
    pub fn with_constant(mut self, constant: f64) -> Self {
        self.constant = constant;
        self
    }

    /// Sum of the given variables with coefficient 1.
    pub fn sum(vars: impl IntoIterator<Item = VarId>) -> Self {
        Self {
            terms: vars.into_iter().map(|v| (v, 1.0)).collect(),
            constant: 0.0,
        }
    }

    /// Evaluates the expression at `values` (indexed by `VarId`).
    pub fn evaluate(&self, values: &[f64]) -> f64 {
        self.terms
            .iter()
            .map(|&(v, c)| c * values.get(v.index()).copied().unwrap_or(0.0))
            .sum::<f64>()
            + self.constant
    }
}

/// Comparison of a constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    /// `expr == rhs`
    Eq,
    /// `expr <= rhs`
    Le,
    /// `expr >= rhs`
    Ge,
}

/// `expr (relation) rhs`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearConstraint {
    /// Left-hand side.
    pub expr: LinearExpr,
    /// Comparison.
    pub relation: Relation,
    /// Right-hand side.
    pub rhs: f64,
}

impl LinearConstraint {
    /// Whether `values` satisfy this constraint within `tolerance`.
    pub fn is_satisfied(&self, values: &[f64], tolerance: f64) -> bool {
        let lhs = self.expr.evaluate(values);
        match self.relation {
            Relation::Eq => (lhs - self.rhs).abs() <= tolerance,
            Relation::Le => lhs <= self.rhs + tolerance,
            Relation::Ge => lhs + tolerance >= self.rhs,
        }
    }
}

/// A pure 0/1 minimization program.
#[derive(Debug, Clone, Default)]
pub struct MipModel {
    name: String,
    variables: Vec<String>,
    constraints: Vec<LinearConstraint>,
    objective: LinearExpr,
}

impl MipModel {
    /// Creates an empty model.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Adds a binary variable.
    pub fn add_binary(&mut self, name: impl Into<String>) -> VarId {
        self.variables.push(name.into());
        VarId(self.variables.len() - 1)
    }

    /// Adds `expr (relation) rhs`.
    pub fn add_constraint(&mut self, expr: LinearExpr, relation: Relation, rhs: f64) {
        self.constraints.push(LinearConstraint {
            expr,
            relation,
            rhs,
        });
    }

    /// Sets the expression to minimize.
    pub fn minimize(&mut self, objective: LinearExpr) {
        self.objective = objective;
    }

    /// Model name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Variable names, indexed by `VarId`.
    pub fn variable_names(&self) -> &[String] {
        &self.variables
    }

    /// Number of binary variables.
    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    /// Constraints in insertion order.
    pub fn constraints(&self) -> &[LinearConstraint] {
        &self.constraints
    }

    /// Number of constraints.
    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    /// Objective to minimize.
    pub fn objective(&self) -> &LinearExpr {
        &self.objective
    }

    /// Whether `values` satisfy every constraint within `tolerance`.
    pub fn is_satisfied_by(&self, values: &[f64], tolerance: f64) -> bool {
        values.len() == self.variables.len()
            && self.constraints.iter().all(|c| c.is_satisfied(values, tolerance))
    }
}
