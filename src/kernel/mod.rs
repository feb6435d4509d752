//! Window scoring kernels.
//!
//! A kernel turns one pattern placement into one score. The scan loops in
//! `search::scan` (and `kernel::rayon` when enabled) call a kernel once per
//! anchor to fill a score surface.

use crate::image::ImageView;
use crate::kernel::sample::Sample;
use crate::util::{SlideMatchError, SlideMatchResult};

pub mod boundary;
pub mod sample;
pub mod scalar;
pub mod stats;

#[cfg(feature = "rayon")]
pub mod rayon;

/// Which end of a score surface holds the best matches.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScoreOrder {
    /// Distances: smaller scores are better.
    LowerIsBetter,
    /// Similarities: larger scores are better.
    HigherIsBetter,
}

impl ScoreOrder {
    /// Returns `true` when the smallest score ranks first.
    pub fn smallest_first(self) -> bool {
        matches!(self, Self::LowerIsBetter)
    }
}

/// Kernel trait for scoring a pattern at one anchor.
pub trait Kernel<S: Sample> {
    /// Precomputed pattern data.
    type Plan: Sync;

    /// Ranking direction of the produced scores.
    const ORDER: ScoreOrder;

    /// Precomputes the pattern-side data.
    fn plan(pattern: ImageView<'_, S>) -> Self::Plan;

    /// Returns the pattern `(width, height)` recorded in a plan.
    fn plan_size(plan: &Self::Plan) -> (usize, usize);

    /// Scores a placement the caller has already checked to lie inside the image.
    fn score_fitted(image: ImageView<'_, S>, plan: &Self::Plan, row: usize, col: usize) -> f64;

    /// Scores the placement anchored at `(row, col)`.
    ///
    /// The pattern must lie fully inside the image at that anchor.
    fn score_at(
        image: ImageView<'_, S>,
        plan: &Self::Plan,
        row: usize,
        col: usize,
    ) -> SlideMatchResult<f64> {
        let (width, height) = Self::plan_size(plan);
        ensure_window_fits(image, row, col, width, height)?;
        Ok(Self::score_fitted(image, plan, row, col))
    }
}

pub(crate) fn ensure_window_fits<T>(
    image: ImageView<'_, T>,
    row: usize,
    col: usize,
    width: usize,
    height: usize,
) -> SlideMatchResult<()> {
    let fits = matches!(row.checked_add(height), Some(end) if end <= image.height())
        && matches!(col.checked_add(width), Some(end) if end <= image.width());
    if fits {
        Ok(())
    } else {
        Err(SlideMatchError::WindowOutOfBounds {
            row,
            col,
            width,
            height,
            img_width: image.width(),
            img_height: image.height(),
        })
    }
}
