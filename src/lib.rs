//! SlideMatch locates a small pattern inside a larger image by exhaustive
//! sliding-window comparison.
//!
//! Two engines produce score surfaces: mean absolute error over packed RGB
//! colors (lower is better, with valid, wrap or mirror placement) and
//! normalized cross-correlation over gray levels (higher is better, valid
//! placement). Selectors then pull the best cells out of a surface. Row
//! parallel scans are available through the `rayon` feature.

mod candidate;
pub mod image;
pub mod kernel;
pub mod lowlevel;
pub mod pattern;
pub mod search;
mod trace;
pub mod util;

#[cfg(feature = "image-io")]
pub use self::image::io;

pub use self::image::pixel::{to_gray, to_rgb};
pub use self::image::render::{draw_box, surface_to_rgb};
pub use self::image::{ImageView, OwnedImage, Rgb};
pub use candidate::best::{find_best, find_n_best, find_n_distinct};
pub use candidate::topk::Peak;
pub use kernel::boundary::Boundary;
pub use kernel::sample::{pixel_absolute_error, Sample};
pub use kernel::stats::{mean, window_mean};
pub use kernel::{Kernel, ScoreOrder};
pub use search::scan::ScoreSurface;
pub use search::{
    distance_matrix, distance_matrix_strategy, distance_matrix_with, mean_absolute_error,
    mean_absolute_error_folded, normalized_cross_correlation, similarity_matrix, Match, Metric,
    SearchConfig, Searcher,
};
pub use util::{SlideMatchError, SlideMatchResult};
