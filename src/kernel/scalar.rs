//! Scalar reference kernels for score evaluation.

use crate::image::ImageView;
use crate::kernel::boundary::Boundary;
use crate::kernel::sample::Sample;
use crate::kernel::{Kernel, ScoreOrder};
use crate::pattern::{DistancePlan, NccPlan};
use crate::util::math::round_half_up;

/// Score returned when the correlation denominator rounds to zero.
pub const UNDEFINED_CORRELATION: f64 = -1.0;

/// Scalar mean absolute error kernel.
pub struct MeanAbsErrorScalar;

/// Scalar normalized cross-correlation kernel.
pub struct NccScalar;

impl<S: Sample> Kernel<S> for MeanAbsErrorScalar {
    type Plan = DistancePlan<S>;

    const ORDER: ScoreOrder = ScoreOrder::LowerIsBetter;

    fn plan(pattern: ImageView<'_, S>) -> Self::Plan {
        DistancePlan::from_view(pattern)
    }

    fn plan_size(plan: &Self::Plan) -> (usize, usize) {
        (plan.width(), plan.height())
    }

    fn score_fitted(image: ImageView<'_, S>, plan: &Self::Plan, row: usize, col: usize) -> f64 {
        let width = plan.width();
        let mut sum = 0.0f64;
        for ty in 0..plan.height() {
            let img_row = &image.row_at(row + ty)[col..col + width];
            for (&tpl_px, &img_px) in plan.row(ty).iter().zip(img_row) {
                sum += tpl_px.abs_error(img_px);
            }
        }
        sum / (width * plan.height()) as f64
    }
}

impl MeanAbsErrorScalar {
    /// Scores a placement whose samples may leave the image, folding every
    /// index through `boundary` independently per axis.
    ///
    /// Returns `None` if some index has no sample under the boundary.
    pub fn score_folded<S: Sample>(
        image: ImageView<'_, S>,
        plan: &DistancePlan<S>,
        row: usize,
        col: usize,
        boundary: Boundary,
    ) -> Option<f64> {
        let img_width = image.width();
        let img_height = image.height();
        let width = plan.width();

        let mut sum = 0.0f64;
        for ty in 0..plan.height() {
            let img_row = image.row_at(boundary.fold(row + ty, img_height)?);
            for (tx, &tpl_px) in plan.row(ty).iter().enumerate() {
                let img_col = boundary.fold(col + tx, img_width)?;
                sum += tpl_px.abs_error(img_row[img_col]);
            }
        }
        Some(sum / (width * plan.height()) as f64)
    }
}

impl<S: Sample> Kernel<S> for NccScalar {
    type Plan = NccPlan;

    const ORDER: ScoreOrder = ScoreOrder::HigherIsBetter;

    fn plan(pattern: ImageView<'_, S>) -> Self::Plan {
        NccPlan::from_view(pattern)
    }

    fn plan_size(plan: &Self::Plan) -> (usize, usize) {
        (plan.width(), plan.height())
    }

    fn score_fitted(image: ImageView<'_, S>, plan: &Self::Plan, row: usize, col: usize) -> f64 {
        let width = plan.width();
        let height = plan.height();

        let mut sum_i = 0.0f64;
        for ty in 0..height {
            for &px in &image.row_at(row + ty)[col..col + width] {
                sum_i += px.gray();
            }
        }
        let window_mean = sum_i / (width * height) as f64;

        let zero_mean = plan.zero_mean();
        let mut num = 0.0f64;
        let mut var_i = 0.0f64;
        for ty in 0..height {
            let img_row = &image.row_at(row + ty)[col..col + width];
            let tpl_row = &zero_mean[ty * width..(ty + 1) * width];
            for (&px, &t_dev) in img_row.iter().zip(tpl_row) {
                let i_dev = px.gray() - window_mean;
                num += i_dev * t_dev;
                var_i += i_dev * i_dev;
            }
        }

        // Accumulated zero variance can drift away from exactly 0.0, so the
        // product is rounded before the comparison.
        let denom_sq = var_i * plan.sum_sq_dev();
        if denom_sq.is_nan() || round_half_up(denom_sq) == 0.0 {
            return UNDEFINED_CORRELATION;
        }
        num / denom_sq.sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::{MeanAbsErrorScalar, NccScalar, UNDEFINED_CORRELATION};
    use crate::image::{OwnedImage, Rgb};
    use crate::kernel::boundary::Boundary;
    use crate::kernel::Kernel;
    use crate::util::SlideMatchError;

    fn gray(rows: Vec<Vec<f64>>) -> OwnedImage<f64> {
        OwnedImage::from_rows(rows).unwrap()
    }

    #[test]
    fn mae_matches_bruteforce() {
        let image = OwnedImage::from_fn(5, 4, |r, c| Rgb(((r * 37 + c * 91) * 0x010203) as u32))
            .unwrap();
        let pattern = OwnedImage::from_fn(2, 3, |r, c| Rgb(((r * 11 + c * 7) * 0x030201) as u32))
            .unwrap();
        let plan = <MeanAbsErrorScalar as Kernel<Rgb>>::plan(pattern.view());

        let score = MeanAbsErrorScalar::score_at(image.view(), &plan, 1, 2).unwrap();
        let mut expected = 0.0f64;
        for i in 0..3 {
            for j in 0..2 {
                let a = pattern.get(i, j).unwrap().channels();
                let b = image.get(1 + i, 2 + j).unwrap().channels();
                let diff: i32 = (0..3).map(|k| (a[k] as i32 - b[k] as i32).abs()).sum();
                expected += f64::from(diff) / 3.0;
            }
        }
        expected /= 6.0;
        assert!((score - expected).abs() < 1e-12);
    }

    #[test]
    fn score_at_rejects_window_past_edge() {
        let image = gray(vec![vec![0.0; 3]; 3]);
        let pattern = gray(vec![vec![1.0; 2]; 2]);
        let plan = <MeanAbsErrorScalar as Kernel<f64>>::plan(pattern.view());
        let err = MeanAbsErrorScalar::score_at(image.view(), &plan, 2, 0).unwrap_err();
        assert_eq!(
            err,
            SlideMatchError::WindowOutOfBounds {
                row: 2,
                col: 0,
                width: 2,
                height: 2,
                img_width: 3,
                img_height: 3,
            }
        );
    }

    #[test]
    fn folded_mirror_reads_reflected_cells() {
        // Row index 3 in a height-3 image folds to 3 - 2 - 0 = 1.
        let image = gray(vec![
            vec![1.0, 2.0, 3.0],
            vec![4.0, 5.0, 6.0],
            vec![7.0, 8.0, 9.0],
        ]);
        let pattern = gray(vec![vec![0.0], vec![0.0]]);
        let plan = <MeanAbsErrorScalar as Kernel<f64>>::plan(pattern.view());
        let score =
            MeanAbsErrorScalar::score_folded(image.view(), &plan, 2, 2, Boundary::Mirror).unwrap();
        assert_eq!(score, (9.0 + 6.0) / 2.0);
    }

    #[test]
    fn folded_valid_has_no_sample_past_edge() {
        let image = gray(vec![vec![1.0, 2.0]]);
        let pattern = gray(vec![vec![0.0, 0.0]]);
        let plan = <MeanAbsErrorScalar as Kernel<f64>>::plan(pattern.view());
        assert!(
            MeanAbsErrorScalar::score_folded(image.view(), &plan, 0, 1, Boundary::Valid).is_none()
        );
    }

    #[test]
    fn ncc_of_identical_window_is_one() {
        let image = gray(vec![
            vec![10.0, 20.0, 30.0, 40.0],
            vec![50.0, 15.0, 25.0, 35.0],
            vec![45.0, 55.0, 5.0, 60.0],
        ]);
        let pattern = gray(vec![vec![15.0, 25.0], vec![55.0, 5.0]]);
        let plan = <NccScalar as Kernel<f64>>::plan(pattern.view());
        let score = NccScalar::score_at(image.view(), &plan, 1, 1).unwrap();
        assert!((score - 1.0).abs() < 1e-12);
    }

    #[test]
    fn ncc_of_inverted_window_is_minus_one() {
        let image = gray(vec![vec![0.0, 10.0, 20.0]]);
        let pattern = gray(vec![vec![20.0, 10.0, 0.0]]);
        let plan = <NccScalar as Kernel<f64>>::plan(pattern.view());
        let score = NccScalar::score_at(image.view(), &plan, 0, 0).unwrap();
        assert!((score + 1.0).abs() < 1e-12);
    }

    #[test]
    fn ncc_constant_pattern_returns_sentinel() {
        let image = gray(vec![vec![0.0, 10.0, 20.0]]);
        let pattern = gray(vec![vec![4.0, 4.0]]);
        let plan = <NccScalar as Kernel<f64>>::plan(pattern.view());
        for col in 0..2 {
            let score = NccScalar::score_at(image.view(), &plan, 0, col).unwrap();
            assert_eq!(score, UNDEFINED_CORRELATION);
        }
    }

    #[test]
    fn ncc_tiny_denominator_rounds_to_sentinel() {
        // var_i = 0.02, var_t = 2.0: the product 0.04 rounds to zero.
        let image = gray(vec![vec![0.0, 0.2]]);
        let pattern = gray(vec![vec![0.0, 2.0]]);
        let plan = <NccScalar as Kernel<f64>>::plan(pattern.view());
        let score = NccScalar::score_at(image.view(), &plan, 0, 0).unwrap();
        assert_eq!(score, UNDEFINED_CORRELATION);
    }
}
