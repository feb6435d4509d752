//! Boundary strategies for pattern placements that leave the image.

use crate::util::{SlideMatchError, SlideMatchResult};
use std::fmt;
use std::str::FromStr;

/// How a pattern sample outside the image is mapped back onto it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Boundary {
    /// Placements never leave the image; out-of-range indices have no sample.
    #[default]
    Valid,
    /// Toroidal wraparound: index modulo the dimension.
    Wrap,
    /// Reflection at the far edge: `dim - 2 - (index mod dim)` past the last index.
    Mirror,
}

impl Boundary {
    /// Parses the strategy names accepted by the folding distance overload.
    ///
    /// Only `"wrap"` and `"mirror"` are accepted; `"valid"` is rejected
    /// because the folding overload always evaluates every image pixel as an
    /// anchor.
    pub fn parse_folding(name: &str) -> SlideMatchResult<Self> {
        match name {
            "wrap" => Ok(Self::Wrap),
            "mirror" => Ok(Self::Mirror),
            _ => Err(SlideMatchError::UnknownStrategy {
                name: name.to_owned(),
            }),
        }
    }

    /// Returns the lowercase strategy name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Valid => "valid",
            Self::Wrap => "wrap",
            Self::Mirror => "mirror",
        }
    }

    /// Maps a logical index along an axis of length `dim` to a physical index.
    ///
    /// Returns `None` when the strategy has no sample for the index: any
    /// out-of-range index under `Valid`, and mirror folds whose formula goes
    /// negative (`index mod dim == dim - 1`).
    #[inline]
    pub fn fold(self, logical: usize, dim: usize) -> Option<usize> {
        if dim == 0 {
            return None;
        }
        if logical < dim {
            return Some(logical);
        }
        match self {
            Self::Valid => None,
            Self::Wrap => Some(logical % dim),
            Self::Mirror => dim.checked_sub(2 + logical % dim),
        }
    }

    /// Returns the surface size `(width, height)` for a pattern over an image.
    ///
    /// `Valid` needs the pattern to fit; `Mirror` needs it too, since larger
    /// patterns reach indices the reflection formula cannot fold. `Wrap`
    /// accepts any size.
    pub fn surface_size(
        self,
        img_width: usize,
        img_height: usize,
        pattern_width: usize,
        pattern_height: usize,
    ) -> SlideMatchResult<(usize, usize)> {
        let fits = pattern_width <= img_width && pattern_height <= img_height;
        match self {
            Self::Valid if fits => Ok((
                img_width - pattern_width + 1,
                img_height - pattern_height + 1,
            )),
            Self::Wrap => Ok((img_width, img_height)),
            Self::Mirror if fits => Ok((img_width, img_height)),
            _ => Err(SlideMatchError::PatternTooLarge {
                pattern_width,
                pattern_height,
                img_width,
                img_height,
            }),
        }
    }
}

impl FromStr for Boundary {
    type Err = SlideMatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "valid" => Ok(Self::Valid),
            other => Self::parse_folding(other),
        }
    }
}

impl fmt::Display for Boundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
