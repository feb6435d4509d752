//! Bounded best-N tracking for surface cells.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// A selected surface cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Peak {
    /// Row of the cell (anchor row of the pattern placement).
    pub row: usize,
    /// Column of the cell (anchor column of the pattern placement).
    pub col: usize,
    /// Score stored in the cell.
    pub score: f64,
}

/// Orders two peaks so that `Less` means `a` ranks ahead of `b`.
///
/// Scores compare in the requested direction with NaN ranked last; equal
/// scores fall back to row-major position, earliest first.
pub(crate) fn rank_cmp(a: &Peak, b: &Peak, smallest_first: bool) -> Ordering {
    let by_score = match (a.score.is_nan(), b.score.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => {
            let ord = a.score.partial_cmp(&b.score).unwrap_or(Ordering::Equal);
            if smallest_first {
                ord
            } else {
                ord.reverse()
            }
        }
    };
    by_score
        .then_with(|| a.row.cmp(&b.row))
        .then_with(|| a.col.cmp(&b.col))
}

/// Sorts peaks best first.
pub(crate) fn sort_peaks(peaks: &mut [Peak], smallest_first: bool) {
    peaks.sort_by(|a, b| rank_cmp(a, b, smallest_first));
}

struct Ranked {
    peak: Peak,
    smallest_first: bool,
}

impl PartialEq for Ranked {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Ranked {}

impl PartialOrd for Ranked {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Ranked {
    fn cmp(&self, other: &Self) -> Ordering {
        rank_cmp(&self.peak, &other.peak, self.smallest_first)
    }
}

/// Top-N container backed by a max-heap of the worst retained peak.
///
/// Insertion costs `O(log n)`; the heap root is the peak that would be
/// evicted next.
pub struct TopK {
    k: usize,
    smallest_first: bool,
    heap: BinaryHeap<Ranked>,
}

impl TopK {
    /// Creates a collector keeping the `k` best peaks.
    pub fn new(k: usize, smallest_first: bool) -> Self {
        Self {
            k,
            smallest_first,
            heap: BinaryHeap::with_capacity(k.saturating_add(1)),
        }
    }

    /// Returns the number of retained peaks.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Returns `true` if no peak is retained.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Pushes a peak, evicting the worst one if at capacity.
    pub fn push(&mut self, peak: Peak) {
        if self.k == 0 {
            return;
        }
        let item = Ranked {
            peak,
            smallest_first: self.smallest_first,
        };
        if self.heap.len() < self.k {
            self.heap.push(item);
            return;
        }
        if let Some(mut worst) = self.heap.peek_mut() {
            if item < *worst {
                *worst = item;
            }
        }
    }

    /// Returns the retained peaks, best first.
    pub fn into_sorted(self) -> Vec<Peak> {
        self.heap
            .into_sorted_vec()
            .into_iter()
            .map(|ranked| ranked.peak)
            .collect()
    }
}
