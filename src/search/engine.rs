//! Distance and similarity engines over packed-color and grayscale grids.
//!
//! These are the plain entry points: build a plan for the pattern, run one
//! scan, return the surface. Lower distance scores and higher similarity
//! scores are better.

use crate::image::{ImageView, Rgb};
use crate::kernel::boundary::Boundary;
use crate::kernel::scalar::{MeanAbsErrorScalar, NccScalar};
use crate::kernel::Kernel;
use crate::pattern::{DistancePlan, NccPlan};
use crate::search::scan::{folded_cell, folded_surface, score_surface, ScoreSurface};
use crate::util::SlideMatchResult;

/// Mean absolute pixel error of `pattern` anchored at `(row, col)` in `image`.
///
/// The pattern must lie fully inside the image at that anchor.
pub fn mean_absolute_error(
    row: usize,
    col: usize,
    pattern: ImageView<'_, Rgb>,
    image: ImageView<'_, Rgb>,
) -> SlideMatchResult<f64> {
    let plan = DistancePlan::from_view(pattern);
    MeanAbsErrorScalar::score_at(image, &plan, row, col)
}

/// Mean absolute pixel error at `(row, col)` with out-of-range samples folded
/// through `boundary`.
pub fn mean_absolute_error_folded(
    row: usize,
    col: usize,
    pattern: ImageView<'_, Rgb>,
    image: ImageView<'_, Rgb>,
    boundary: Boundary,
) -> SlideMatchResult<f64> {
    let plan = DistancePlan::from_view(pattern);
    folded_cell(image, &plan, row, col, boundary)
}

/// Distance surface over every valid placement (lower is better).
pub fn distance_matrix(
    pattern: ImageView<'_, Rgb>,
    image: ImageView<'_, Rgb>,
) -> SlideMatchResult<ScoreSurface> {
    let plan = DistancePlan::from_view(pattern);
    score_surface::<MeanAbsErrorScalar, Rgb>(image, &plan)
}

/// Distance surface with one cell per image pixel, folding samples that leave
/// the image through `boundary`.
///
/// `Boundary::Valid` returns the same surface as [`distance_matrix`].
pub fn distance_matrix_with(
    pattern: ImageView<'_, Rgb>,
    image: ImageView<'_, Rgb>,
    boundary: Boundary,
) -> SlideMatchResult<ScoreSurface> {
    let plan = DistancePlan::from_view(pattern);
    folded_surface(image, &plan, boundary)
}

/// Named form of [`distance_matrix_with`]; accepts `"wrap"` and `"mirror"` only.
pub fn distance_matrix_strategy(
    pattern: ImageView<'_, Rgb>,
    image: ImageView<'_, Rgb>,
    strategy: &str,
) -> SlideMatchResult<ScoreSurface> {
    let boundary = Boundary::parse_folding(strategy)?;
    distance_matrix_with(pattern, image, boundary)
}

/// Normalized cross-correlation of `pattern` anchored at `(row, col)` in `image`.
///
/// Returns `-1` when the correlation is undefined (constant pattern or window).
pub fn normalized_cross_correlation(
    row: usize,
    col: usize,
    pattern: ImageView<'_, f64>,
    image: ImageView<'_, f64>,
) -> SlideMatchResult<f64> {
    let plan = NccPlan::from_view(pattern);
    NccScalar::score_at(image, &plan, row, col)
}

/// Similarity surface over every valid placement (higher is better).
pub fn similarity_matrix(
    pattern: ImageView<'_, f64>,
    image: ImageView<'_, f64>,
) -> SlideMatchResult<ScoreSurface> {
    let plan = <NccScalar as Kernel<f64>>::plan(pattern);
    score_surface::<NccScalar, f64>(image, &plan)
}
