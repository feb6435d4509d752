//! Pattern storage and per-metric planning.
//!
//! A plan copies the pattern once into contiguous storage and precomputes the
//! pattern-side quantities a kernel needs at every anchor.

mod plan;

pub use plan::{DistancePlan, NccPlan};
