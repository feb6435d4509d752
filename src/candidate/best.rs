//! Best-cell selection over score surfaces.

use crate::candidate::nms::nms_2d;
use crate::candidate::topk::{Peak, TopK};
use crate::image::ImageView;
use crate::trace::{trace_event, trace_span};
use crate::util::{SlideMatchError, SlideMatchResult};

#[inline]
fn strictly_better(candidate: f64, current: f64, smallest_first: bool) -> bool {
    if candidate.is_nan() {
        return false;
    }
    if current.is_nan() {
        return true;
    }
    if smallest_first {
        candidate < current
    } else {
        candidate > current
    }
}

/// Returns the best cell of a surface.
///
/// Scans in row-major order starting from `(0, 0)` and only moves on a
/// strictly better score, so ties keep the earliest cell.
///
/// NaN cells never beat a number, and any number replaces a NaN best. A NaN
/// at `(0, 0)` therefore gives way to the first numeric cell instead of being
/// kept as a plain strict comparison would; `(0, 0)` is returned only when
/// every cell is NaN.
pub fn find_best(surface: ImageView<'_, f64>, smallest_first: bool) -> Peak {
    let mut best = Peak {
        row: 0,
        col: 0,
        score: surface.row_at(0)[0],
    };
    for (row, cells) in surface.rows().enumerate() {
        for (col, &score) in cells.iter().enumerate() {
            if strictly_better(score, best.score, smallest_first) {
                best = Peak { row, col, score };
            }
        }
    }
    best
}

fn ensure_enough_cells(n: usize, surface: ImageView<'_, f64>) -> SlideMatchResult<()> {
    let available = surface.cell_count();
    if n > available {
        return Err(SlideMatchError::TooManyPeaks {
            requested: n,
            available,
        });
    }
    Ok(())
}

/// Returns the `n` best cells of a surface, best first.
///
/// Each cell is selected at most once and only the selected cell itself is
/// excluded from later picks: neighbours of a strong match stay eligible, so
/// the result may cluster around a single match. Use [`find_n_distinct`] for
/// spatially separated results.
pub fn find_n_best(
    n: usize,
    surface: ImageView<'_, f64>,
    smallest_first: bool,
) -> SlideMatchResult<Vec<Peak>> {
    ensure_enough_cells(n, surface)?;
    let _span = trace_span!("select_peaks", requested = n, cells = surface.cell_count()).entered();

    let mut topk = TopK::new(n, smallest_first);
    for (row, cells) in surface.rows().enumerate() {
        for (col, &score) in cells.iter().enumerate() {
            topk.push(Peak { row, col, score });
        }
    }
    let peaks = topk.into_sorted();
    trace_event!("selected_peaks", count = peaks.len());
    Ok(peaks)
}

/// Returns up to `n` best cells that are pairwise farther than `radius` apart.
///
/// Distance is Chebyshev distance between cells. Fewer than `n` peaks are
/// returned when suppression exhausts the surface. `radius == 0` selects the
/// same cells as [`find_n_best`].
pub fn find_n_distinct(
    n: usize,
    surface: ImageView<'_, f64>,
    smallest_first: bool,
    radius: usize,
) -> SlideMatchResult<Vec<Peak>> {
    ensure_enough_cells(n, surface)?;
    let _span = trace_span!("select_distinct_peaks", requested = n, radius = radius).entered();

    let mut peaks = Vec::with_capacity(surface.cell_count());
    for (row, cells) in surface.rows().enumerate() {
        for (col, &score) in cells.iter().enumerate() {
            peaks.push(Peak { row, col, score });
        }
    }
    let kept = nms_2d(&mut peaks, radius, smallest_first, n);
    trace_event!("selected_peaks", count = kept.len());
    Ok(kept)
}

#[cfg(test)]
mod tests {
    use super::{find_best, find_n_best, find_n_distinct};
    use crate::image::OwnedImage;
    use crate::util::SlideMatchError;

    fn surface(rows: Vec<Vec<f64>>) -> OwnedImage<f64> {
        OwnedImage::from_rows(rows).unwrap()
    }

    #[test]
    fn find_best_picks_extremes() {
        let s = surface(vec![vec![3.0, 1.0, 4.0], vec![1.5, 9.0, 2.0]]);
        let min = find_best(s.view(), true);
        assert_eq!((min.row, min.col, min.score), (0, 1, 1.0));
        let max = find_best(s.view(), false);
        assert_eq!((max.row, max.col, max.score), (1, 1, 9.0));
    }

    #[test]
    fn find_best_ties_keep_first_in_scan_order() {
        let s = surface(vec![vec![5.0, 2.0], vec![2.0, 5.0]]);
        let min = find_best(s.view(), true);
        assert_eq!((min.row, min.col), (0, 1));
        let max = find_best(s.view(), false);
        assert_eq!((max.row, max.col), (0, 0));
    }

    #[test]
    fn find_best_skips_leading_nan() {
        let s = surface(vec![vec![f64::NAN, 7.0, 3.0]]);
        let max = find_best(s.view(), false);
        assert_eq!((max.row, max.col), (0, 1));
        let s = surface(vec![vec![f64::NAN, 1.0, 2.0]]);
        let min = find_best(s.view(), true);
        assert_eq!((min.row, min.col, min.score), (0, 1, 1.0));
    }

    #[test]
    fn find_best_all_nan_keeps_origin() {
        let s = surface(vec![vec![f64::NAN, f64::NAN], vec![f64::NAN, f64::NAN]]);
        let best = find_best(s.view(), true);
        assert_eq!((best.row, best.col), (0, 0));
        assert!(best.score.is_nan());
    }

    #[test]
    fn find_n_best_orders_and_breaks_ties() {
        let s = surface(vec![vec![0.5, 0.9, 0.9], vec![0.1, 0.9, 0.3]]);
        let peaks = find_n_best(4, s.view(), false).unwrap();
        let coords: Vec<_> = peaks.iter().map(|p| (p.row, p.col)).collect();
        assert_eq!(coords, vec![(0, 1), (0, 2), (1, 1), (0, 0)]);
    }

    #[test]
    fn find_n_best_does_not_suppress_neighbours() {
        let s = surface(vec![vec![0.0, 0.1, 5.0, 5.0, 0.2]]);
        let peaks = find_n_best(3, s.view(), true).unwrap();
        let cols: Vec<_> = peaks.iter().map(|p| p.col).collect();
        assert_eq!(cols, vec![0, 1, 4]);
    }

    #[test]
    fn find_n_best_leaves_input_untouched() {
        let s = surface(vec![vec![2.0, 1.0], vec![4.0, 3.0]]);
        let before = s.clone();
        let _ = find_n_best(4, s.view(), true).unwrap();
        assert_eq!(s, before);
    }

    #[test]
    fn find_n_best_rejects_too_many() {
        let s = surface(vec![vec![1.0, 2.0]]);
        let err = find_n_best(3, s.view(), true).unwrap_err();
        assert_eq!(
            err,
            SlideMatchError::TooManyPeaks {
                requested: 3,
                available: 2,
            }
        );
        assert!(find_n_best(0, s.view(), true).unwrap().is_empty());
    }

    #[test]
    fn find_n_distinct_spreads_results() {
        let s = surface(vec![vec![0.0, 0.1, 5.0, 5.0, 0.2]]);
        let peaks = find_n_distinct(3, s.view(), true, 1).unwrap();
        let cols: Vec<_> = peaks.iter().map(|p| p.col).collect();
        // Column 1 sits within the radius of column 0.
        assert_eq!(cols, vec![0, 4, 2]);
    }

    #[test]
    fn find_n_distinct_radius_zero_matches_find_n_best() {
        let s = surface(vec![vec![0.3, 0.2, 0.8], vec![0.8, 0.1, 0.5]]);
        let plain = find_n_best(5, s.view(), false).unwrap();
        let distinct = find_n_distinct(5, s.view(), false, 0).unwrap();
        assert_eq!(plain, distinct);
    }
}
