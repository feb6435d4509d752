//! Rayon row-parallel surface scans (feature-gated).
//!
//! Each surface row is computed by one task and every cell owns its
//! accumulators, so the parallel surfaces are bit-identical to the
//! sequential ones in `search::scan`.

use crate::image::{ImageView, OwnedImage};
use crate::kernel::boundary::Boundary;
use crate::kernel::sample::Sample;
use crate::kernel::scalar::MeanAbsErrorScalar;
use crate::kernel::Kernel;
use crate::pattern::DistancePlan;
use crate::search::scan::{folded_cell, ScoreSurface};
use crate::trace::{trace_event, trace_span};
use crate::util::SlideMatchResult;
use rayon::prelude::*;

/// Row-parallel counterpart of `search::scan::score_surface`.
pub fn score_surface_par<K, S>(
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
    let _span = trace_span!(
        "score_surface",
        width = width,
        height = height,
        parallel = true
    )
    .entered();

    let mut data = vec![0.0f64; width * height];
    data.par_chunks_mut(width)
        .enumerate()
        .for_each(|(row, cells)| {
            for (col, cell) in cells.iter_mut().enumerate() {
                *cell = K::score_fitted(image, plan, row, col);
            }
        });

    trace_event!("surface_cells", cells = data.len());
    Ok(OwnedImage::from_parts(data, width, height))
}

/// Row-parallel counterpart of `search::scan::folded_surface`.
pub fn folded_surface_par<S: Sample>(
    image: ImageView<'_, S>,
    plan: &DistancePlan<S>,
    boundary: Boundary,
) -> SlideMatchResult<ScoreSurface> {
    if boundary == Boundary::Valid {
        return score_surface_par::<MeanAbsErrorScalar, S>(image, plan);
    }
    let (width, height) =
        boundary.surface_size(image.width(), image.height(), plan.width(), plan.height())?;
    let _span = trace_span!(
        "folded_surface",
        boundary = boundary.as_str(),
        width = width,
        height = height,
        parallel = true
    )
    .entered();

    let rows: Vec<Vec<f64>> = (0..height)
        .into_par_iter()
        .map(|row| {
            (0..width)
                .map(|col| folded_cell(image, plan, row, col, boundary))
                .collect::<SlideMatchResult<Vec<f64>>>()
        })
        .collect::<SlideMatchResult<Vec<_>>>()?;

    let data: Vec<f64> = rows.into_iter().flatten().collect();
    trace_event!("surface_cells", cells = data.len());
    Ok(OwnedImage::from_parts(data, width, height))
}
