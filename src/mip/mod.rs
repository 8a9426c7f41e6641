//! Exact paint shop optimization as a 0/1 integer program.
//!
//! Bridges the paint shop model to an integer-programming backend.
//! `PaintShopMipBuilder` turns a `Problem` into a backend-neutral
//! `MipModel`; any `MipSolver` implementation solves it; `ExactSolver`
//! decodes, rounds and re-validates the optimal `x` vector.
//!
//! # Backends
//!
//! | Feature | Type | Notes |
//! |---------|------|-------|
//! | `microlp` (default) | `MicrolpSolver` | Pure Rust; limit enforced by capped worker threads |
//! | `highs` | `HighsSolver` | HiGHS native time limit |
//!
//! # Reference
//! - Epping, Hochstättler & Oertel (2004), "Complexity results on a paint shop problem"
//! - Meunier & Sebő (2009), "Paintshop, odd cycles and necklace splitting"

mod backend;
mod builder;
mod exact;
mod model;
mod solver;

#[cfg(feature = "highs")]
pub use backend::HighsSolver;
#[cfg(feature = "microlp")]
pub use backend::{MicrolpSolver, MAX_MICROLP_WORKERS};
pub use builder::{PaintShopFormulation, PaintShopMipBuilder};
pub use exact::ExactSolver;
pub use model::{LinearConstraint, LinearExpr, MipModel, Relation, VarId};
pub use solver::{MipFailure, MipSolution, MipSolver, SolverConfig};
