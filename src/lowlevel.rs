//! Low-level building blocks for custom matching pipelines.
//!
//! These expose pattern plans, kernels and the generic scan loops for callers
//! that want to reuse a plan across images or plug in their own selection.
//! Most users should prefer the surface functions and `Searcher` at the crate
//! root.

pub use crate::candidate::nms::nms_2d;
pub use crate::candidate::topk::{Peak, TopK};
pub use crate::kernel::scalar::{MeanAbsErrorScalar, NccScalar, UNDEFINED_CORRELATION};
pub use crate::kernel::{Kernel, ScoreOrder};
pub use crate::pattern::{DistancePlan, NccPlan};
pub use crate::search::scan::{folded_surface, score_surface};

#[cfg(feature = "rayon")]
pub use crate::kernel::rayon::{folded_surface_par, score_surface_par};
