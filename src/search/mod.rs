//! Search entry points for locating a pattern.
//!
//! `engine` exposes the plain surface functions, `scan` the generic scan
//! loops behind them, and `Searcher` chains a surface with peak selection.

mod engine;
pub mod scan;

use crate::candidate::best::{find_n_best, find_n_distinct};
use crate::image::pixel::to_gray;
use crate::image::{ImageView, Rgb};
use crate::kernel::boundary::Boundary;
use crate::kernel::scalar::{MeanAbsErrorScalar, NccScalar};
use crate::kernel::{Kernel, ScoreOrder};
use crate::pattern::{DistancePlan, NccPlan};
use crate::search::scan::ScoreSurface;
use crate::trace::{trace_event, trace_span};
use crate::util::{SlideMatchError, SlideMatchResult};
use std::fmt;
use std::str::FromStr;

pub use engine::{
    distance_matrix, distance_matrix_strategy, distance_matrix_with, mean_absolute_error,
    mean_absolute_error_folded, normalized_cross_correlation, similarity_matrix,
};

/// Scoring metric used for matching.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Metric {
    /// Mean absolute error over packed colors (lower is better).
    #[default]
    MeanAbsoluteError,
    /// Normalized cross-correlation over gray levels (higher is better).
    NormalizedCrossCorrelation,
}

impl Metric {
    /// Returns the short metric name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MeanAbsoluteError => "mae",
            Self::NormalizedCrossCorrelation => "ncc",
        }
    }

    /// Returns which end of the metric's surface holds the best matches.
    pub fn order(self) -> ScoreOrder {
        match self {
            Self::MeanAbsoluteError => <MeanAbsErrorScalar as Kernel<Rgb>>::ORDER,
            Self::NormalizedCrossCorrelation => <NccScalar as Kernel<f64>>::ORDER,
        }
    }
}

impl FromStr for Metric {
    type Err = SlideMatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mae" => Ok(Self::MeanAbsoluteError),
            "ncc" => Ok(Self::NormalizedCrossCorrelation),
            _ => Err(SlideMatchError::UnknownMetric { name: s.to_owned() }),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration for a search.
#[derive(Clone, Debug)]
pub struct SearchConfig {
    /// Scoring metric.
    pub metric: Metric,
    /// Placement strategy; `Wrap` and `Mirror` apply to the distance metric only.
    pub boundary: Boundary,
    /// Number of matches to return.
    pub topk: usize,
    /// Chebyshev suppression radius between matches; 0 disables suppression.
    pub nms_radius: usize,
    /// Use row-parallel scans when the `rayon` feature is enabled.
    pub parallel: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            metric: Metric::MeanAbsoluteError,
            boundary: Boundary::Valid,
            topk: 1,
            nms_radius: 0,
            parallel: false,
        }
    }
}

/// One located pattern placement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Match {
    /// Anchor row (top edge) of the placement.
    pub row: usize,
    /// Anchor column (left edge) of the placement.
    pub col: usize,
    /// Metric score at the anchor.
    pub score: f64,
}

/// Computes a score surface and selects the best placements from it.
pub struct Searcher {
    cfg: SearchConfig,
}

impl Searcher {
    /// Creates a searcher with the given configuration.
    pub fn new(cfg: SearchConfig) -> Self {
        Self { cfg }
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.cfg
    }

    /// Computes the configured score surface for packed color inputs.
    ///
    /// The correlation metric converts both inputs to gray levels first and
    /// supports only `Boundary::Valid`.
    pub fn surface(
        &self,
        image: ImageView<'_, Rgb>,
        pattern: ImageView<'_, Rgb>,
    ) -> SlideMatchResult<ScoreSurface> {
        match self.cfg.metric {
            Metric::MeanAbsoluteError => {
                let plan = DistancePlan::from_view(pattern);
                self.distance_surface(image, &plan)
            }
            Metric::NormalizedCrossCorrelation => {
                if self.cfg.boundary != Boundary::Valid {
                    return Err(SlideMatchError::InvalidInput(
                        "normalized cross-correlation supports valid placement only",
                    ));
                }
                let gray_image = to_gray(&image.to_owned_image());
                let plan = NccPlan::from_view(to_gray(&pattern.to_owned_image()).view());
                self.similarity_surface(gray_image.view(), &plan)
            }
        }
    }

    /// Locates the configured number of best placements, best first.
    pub fn locate(
        &self,
        image: ImageView<'_, Rgb>,
        pattern: ImageView<'_, Rgb>,
    ) -> SlideMatchResult<Vec<Match>> {
        let (_, matches) = self.locate_with_surface(image, pattern)?;
        Ok(matches)
    }

    /// Like [`Searcher::locate`], but also returns the score surface the
    /// matches were selected from.
    pub fn locate_with_surface(
        &self,
        image: ImageView<'_, Rgb>,
        pattern: ImageView<'_, Rgb>,
    ) -> SlideMatchResult<(ScoreSurface, Vec<Match>)> {
        let _span = trace_span!(
            "locate",
            metric = self.cfg.metric.as_str(),
            boundary = self.cfg.boundary.as_str()
        )
        .entered();

        let surface = self.surface(image, pattern)?;
        let matches = self.select(surface.view())?;
        Ok((surface, matches))
    }

    fn select(&self, surface: ImageView<'_, f64>) -> SlideMatchResult<Vec<Match>> {
        let smallest_first = self.cfg.metric.order().smallest_first();
        let peaks = if self.cfg.nms_radius > 0 {
            find_n_distinct(
                self.cfg.topk,
                surface,
                smallest_first,
                self.cfg.nms_radius,
            )?
        } else {
            find_n_best(self.cfg.topk, surface, smallest_first)?
        };

        trace_event!("matches", count = peaks.len());
        Ok(peaks
            .into_iter()
            .map(|peak| Match {
                row: peak.row,
                col: peak.col,
                score: peak.score,
            })
            .collect())
    }

    #[cfg(feature = "rayon")]
    fn distance_surface(
        &self,
        image: ImageView<'_, Rgb>,
        plan: &DistancePlan<Rgb>,
    ) -> SlideMatchResult<ScoreSurface> {
        if self.cfg.parallel {
            return crate::kernel::rayon::folded_surface_par(image, plan, self.cfg.boundary);
        }
        scan::folded_surface(image, plan, self.cfg.boundary)
    }

    #[cfg(not(feature = "rayon"))]
    fn distance_surface(
        &self,
        image: ImageView<'_, Rgb>,
        plan: &DistancePlan<Rgb>,
    ) -> SlideMatchResult<ScoreSurface> {
        scan::folded_surface(image, plan, self.cfg.boundary)
    }

    #[cfg(feature = "rayon")]
    fn similarity_surface(
        &self,
        image: ImageView<'_, f64>,
        plan: &NccPlan,
    ) -> SlideMatchResult<ScoreSurface> {
        if self.cfg.parallel {
            return crate::kernel::rayon::score_surface_par::<NccScalar, f64>(image, plan);
        }
        scan::score_surface::<NccScalar, f64>(image, plan)
    }

    #[cfg(not(feature = "rayon"))]
    fn similarity_surface(
        &self,
        image: ImageView<'_, f64>,
        plan: &NccPlan,
    ) -> SlideMatchResult<ScoreSurface> {
        scan::score_surface::<NccScalar, f64>(image, plan)
    }
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::{Metric, SearchConfig, Searcher};
    use crate::image::{OwnedImage, Rgb};
    use crate::kernel::boundary::Boundary;
    use crate::kernel::ScoreOrder;
    use crate::util::SlideMatchError;

    #[test]
    fn metric_names_round_trip() {
        for metric in [
            Metric::MeanAbsoluteError,
            Metric::NormalizedCrossCorrelation,
        ] {
            assert_eq!(metric.to_string().parse::<Metric>().unwrap(), metric);
        }
        assert!("sad".parse::<Metric>().is_err());
        assert_eq!(Metric::MeanAbsoluteError.order(), ScoreOrder::LowerIsBetter);
        assert_eq!(
            Metric::NormalizedCrossCorrelation.order(),
            ScoreOrder::HigherIsBetter
        );
    }

    #[test]
    fn locate_with_surface_returns_selection_source() {
        let image =
            OwnedImage::from_fn(6, 5, |r, c| Rgb(((r * 6 + c) * 0x0A0B0C) as u32)).unwrap();
        let pattern = image.view().roi(2, 3, 2, 2).unwrap().to_owned_image();
        let searcher = Searcher::new(SearchConfig {
            topk: 3,
            ..SearchConfig::default()
        });

        let (surface, matches) = searcher
            .locate_with_surface(image.view(), pattern.view())
            .unwrap();
        assert_eq!(
            surface,
            searcher.surface(image.view(), pattern.view()).unwrap()
        );
        assert_eq!(
            matches,
            searcher.locate(image.view(), pattern.view()).unwrap()
        );
        let best = matches[0];
        assert_eq!((best.row, best.col, best.score), (2, 3, 0.0));
        for m in &matches {
            assert_eq!(surface.get(m.row, m.col), Some(&m.score));
        }
    }

    #[test]
    fn ncc_rejects_folding_boundary() {
        let image = OwnedImage::new(vec![Rgb(0); 4], 2, 2).unwrap();
        let searcher = Searcher::new(SearchConfig {
            metric: Metric::NormalizedCrossCorrelation,
            boundary: Boundary::Wrap,
            ..SearchConfig::default()
        });
        let err = searcher.locate(image.view(), image.view()).unwrap_err();
        assert!(matches!(err, SlideMatchError::InvalidInput(_)));
    }
}
