//! Window statistics over grayscale grids.

use crate::image::ImageView;
use crate::kernel::sample::Sample;
use crate::util::SlideMatchResult;

/// Arithmetic mean of every cell's gray level, summed in row-major order.
///
/// Views are non-empty by construction, so the mean is always defined.
pub fn mean<S: Sample>(region: ImageView<'_, S>) -> f64 {
    let mut sum = 0.0f64;
    for row in region.rows() {
        for &value in row {
            sum += value.gray();
        }
    }
    sum / region.cell_count() as f64
}

/// Mean of the `width x height` sub-region anchored at `(row, col)`.
pub fn window_mean<S: Sample>(
    matrix: ImageView<'_, S>,
    row: usize,
    col: usize,
    width: usize,
    height: usize,
) -> SlideMatchResult<f64> {
    let window = matrix.roi(row, col, width, height)?;
    Ok(mean(window))
}
