//! Non-maximum suppression for selected cells.

use crate::candidate::topk::{sort_peaks, Peak};

/// Applies 2D non-maximum suppression using Chebyshev distance.
///
/// Peaks are ranked best first and kept if they are farther than `radius` in
/// Chebyshev distance from every previously kept peak. Stops once `limit`
/// peaks are kept.
pub fn nms_2d(peaks: &mut [Peak], radius: usize, smallest_first: bool, limit: usize) -> Vec<Peak> {
    sort_peaks(peaks, smallest_first);
    if radius == 0 {
        return peaks.iter().copied().take(limit).collect();
    }

    let mut kept: Vec<Peak> = Vec::new();
    'outer: for peak in peaks.iter().copied() {
        if kept.len() >= limit {
            break;
        }
        for kept_peak in kept.iter() {
            let dr = peak.row.abs_diff(kept_peak.row);
            let dc = peak.col.abs_diff(kept_peak.col);
            if dr.max(dc) <= radius {
                continue 'outer;
            }
        }
        kept.push(peak);
    }

    kept
}
