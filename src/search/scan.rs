//! Dense scans that fill a score surface, one cell per anchor.

use crate::image::{ImageView, OwnedImage};
use crate::kernel::boundary::Boundary;
use crate::kernel::sample::Sample;
use crate::kernel::scalar::MeanAbsErrorScalar;
use crate::kernel::Kernel;
use crate::pattern::DistancePlan;
use crate::trace::{trace_debug, trace_event, trace_span};
use crate::util::{SlideMatchError, SlideMatchResult};

/// Grid of per-anchor scores; cell `(row, col)` scores the pattern anchored there.
pub type ScoreSurface = OwnedImage<f64>;

/// Scores every valid placement of a planned pattern.
///
/// The surface is `(H - h + 1) x (W - w + 1)`; a pattern larger than the
/// image in either axis is rejected.
pub fn score_surface<K, S>(
    image: ImageView<'_, S>,
    plan: &K::Plan,
) -> SlideMatchResult<ScoreSurface>
where
    K: Kernel<S>,
    S: Sample,
{
    let (pattern_width, pattern_height) = K::plan_size(plan);
    let (width, height) =
        Boundary::Valid.surface_size(image.width(), image.height(), pattern_width, pattern_height)?;
    let _span = trace_span!("score_surface", width = width, height = height).entered();

    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            data.push(K::score_fitted(image, plan, row, col));
        }
        trace_debug!("surface_row", row = row);
    }

    trace_event!("surface_cells", cells = data.len());
    Ok(OwnedImage::from_parts(data, width, height))
}

/// Scores every image pixel as an anchor, folding samples that leave the image.
///
/// `Boundary::Valid` falls back to [`score_surface`] with the distance kernel.
pub fn folded_surface<S: Sample>(
    image: ImageView<'_, S>,
    plan: &DistancePlan<S>,
    boundary: Boundary,
) -> SlideMatchResult<ScoreSurface> {
    if boundary == Boundary::Valid {
        return score_surface::<MeanAbsErrorScalar, S>(image, plan);
    }
    let (width, height) =
        boundary.surface_size(image.width(), image.height(), plan.width(), plan.height())?;
    let _span = trace_span!(
        "folded_surface",
        boundary = boundary.as_str(),
        width = width,
        height = height
    )
    .entered();

    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            data.push(folded_cell(image, plan, row, col, boundary)?);
        }
        trace_debug!("surface_row", row = row);
    }

    trace_event!("surface_cells", cells = data.len());
    Ok(OwnedImage::from_parts(data, width, height))
}

pub(crate) fn folded_cell<S: Sample>(
    image: ImageView<'_, S>,
    plan: &DistancePlan<S>,
    row: usize,
    col: usize,
    boundary: Boundary,
) -> SlideMatchResult<f64> {
    MeanAbsErrorScalar::score_folded(image, plan, row, col, boundary).ok_or(
        SlideMatchError::PatternTooLarge {
            pattern_width: plan.width(),
            pattern_height: plan.height(),
            img_width: image.width(),
            img_height: image.height(),
        },
    )
}
