//! Paint shop domain models.
//!
//! Provides the data types for describing a sequencing instance and the
//! assignments solvers return.
//!
//! | Type | Meaning |
//! |------|---------|
//! | `Problem` | Validated arrival sequence + per-type demand |
//! | `Demand` / `DemandTable` | White/black counts each type must receive |
//! | `Color` | Resource state (white or black) |
//! | `Assignment` | One color per sequence position |
//! | `Solution` | Assignment + change count + producing solver |

mod assignment;
mod color;
mod demand;
mod problem;
mod solution;

pub use assignment::Assignment;
pub use color::Color;
pub use demand::{Demand, DemandTable};
pub use problem::{ItemType, Problem, Variant};
pub use solution::{Solution, SolutionSource};
