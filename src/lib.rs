//! Paint shop sequencing for the U-Engine ecosystem.
//!
//! Items of various types arrive in a fixed order at a single paint
//! resource that is either white or black. Each type must leave with a
//! given number of white and black units. The goal is an assignment of
//! colors to positions that meets every demand exactly with as few color
//! changes as possible.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Problem`, `Demand`, `DemandTable`, `Color`,
//!   `Assignment`, `Solution`
//! - **`validation`**: Instance integrity checks (occurrence counts, demand sums)
//! - **`scheduler`**: Greedy single-pass solver and assignment scoring
//! - **`mip`**: Exact 0/1 formulation, backend trait, and `good_lp` backends
//!
//! # Example
//!
//! ```
//! use u_paintshop::models::Problem;
//! use u_paintshop::scheduler::{score_problem, GreedySolver};
//!
//! let problem = Problem::binary("ADEBAFCBCDEF".chars().collect()).unwrap();
//! let greedy = GreedySolver::new().solve(&problem).unwrap();
//! assert_eq!(greedy.change_count, 4);
//! assert!(score_problem(&problem, &greedy.assignment).is_feasible);
//! ```
//!
//! # References
//!
//! - Epping, Hochstättler & Oertel (2004), "Complexity results on a paint shop problem"
//! - Amini, Meunier, Michel & Mohajer (2010), "Greedy colorings for the binary paintshop problem"

pub mod error;
pub mod mip;
pub mod models;
pub mod scheduler;
pub mod validation;

pub use error::PaintShopError;
