//! Pattern plan precomputation for distance and correlation kernels.

use crate::image::ImageView;
use crate::kernel::sample::Sample;
use crate::kernel::stats::mean;

/// Contiguous pattern samples for the mean absolute error kernel.
pub struct DistancePlan<S> {
    width: usize,
    height: usize,
    samples: Vec<S>,
}

impl<S: Sample> DistancePlan<S> {
    /// Builds a plan from a pattern view.
    pub fn from_view(pattern: ImageView<'_, S>) -> Self {
        let mut samples = Vec::with_capacity(pattern.cell_count());
        for row in pattern.rows() {
            samples.extend_from_slice(row);
        }
        Self {
            width: pattern.width(),
            height: pattern.height(),
            samples,
        }
    }

    /// Returns the pattern width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the pattern height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the pattern samples in row-major order.
    pub fn samples(&self) -> &[S] {
        &self.samples
    }

    /// Returns the samples of pattern row `row`.
    #[inline]
    pub(crate) fn row(&self, row: usize) -> &[S] {
        let start = row * self.width;
        &self.samples[start..start + self.width]
    }
}

/// Pattern mean and zero-mean buffer for normalized cross-correlation.
pub struct NccPlan {
    width: usize,
    height: usize,
    mean: f64,
    zero_mean: Vec<f64>,
    sum_sq_dev: f64,
}

impl NccPlan {
    /// Builds a plan from a pattern view, reading every sample as a gray level.
    ///
    /// Constant patterns are accepted: their `sum_sq_dev` is zero and every
    /// correlation against them takes the undefined-correlation branch.
    pub fn from_view<S: Sample>(pattern: ImageView<'_, S>) -> Self {
        let mean = mean(pattern);

        let mut sum_sq_dev = 0.0f64;
        let mut zero_mean = Vec::with_capacity(pattern.cell_count());
        for row in pattern.rows() {
            for &px in row {
                let dev = px.gray() - mean;
                sum_sq_dev += dev * dev;
                zero_mean.push(dev);
            }
        }

        Self {
            width: pattern.width(),
            height: pattern.height(),
            mean,
            zero_mean,
            sum_sq_dev,
        }
    }

    /// Returns the pattern width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the pattern height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the mean gray level of the pattern.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Returns `pattern - mean` in row-major order.
    pub fn zero_mean(&self) -> &[f64] {
        &self.zero_mean
    }

    /// Returns the sum of squared deviations from the mean.
    pub fn sum_sq_dev(&self) -> f64 {
        self.sum_sq_dev
    }
}

#[cfg(test)]
mod tests {
    use super::{DistancePlan, NccPlan};
    use crate::image::{OwnedImage, Rgb};

    #[test]
    fn ncc_plan_matches_known_stats() {
        let tpl = OwnedImage::new(vec![0.0f64, 1.0, 2.0, 3.0], 2, 2).unwrap();
        let plan = NccPlan::from_view(tpl.view());
        assert_eq!((plan.width(), plan.height()), (2, 2));
        assert_eq!(plan.mean(), 1.5);
        assert_eq!(plan.zero_mean(), &[-1.5, -0.5, 0.5, 1.5]);
        assert_eq!(plan.sum_sq_dev(), 5.0);
    }

    #[test]
    fn ncc_plan_reads_packed_colors_as_gray() {
        let tpl = OwnedImage::new(vec![Rgb(0x030303), Rgb(0x090909)], 2, 1).unwrap();
        let plan = NccPlan::from_view(tpl.view());
        assert_eq!(plan.mean(), 6.0);
        assert_eq!(plan.sum_sq_dev(), 18.0);
    }

    #[test]
    fn constant_pattern_has_zero_deviation() {
        let tpl = OwnedImage::new(vec![7.0f64; 6], 3, 2).unwrap();
        assert_eq!(NccPlan::from_view(tpl.view()).sum_sq_dev(), 0.0);
    }

    #[test]
    fn distance_plan_copies_strided_rows() {
        let data = [Rgb(1), Rgb(2), Rgb(0), Rgb(3), Rgb(4), Rgb(0)];
        let view = crate::ImageView::new(&data, 2, 2, 3).unwrap();
        let plan = DistancePlan::from_view(view);
        assert_eq!(plan.samples(), &[Rgb(1), Rgb(2), Rgb(3), Rgb(4)]);
        assert_eq!(plan.row(1), &[Rgb(3), Rgb(4)]);
    }
}
