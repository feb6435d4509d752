//! Per-pixel comparison for the supported sample types.

use crate::image::Rgb;

/// A pixel sample the matching kernels can compare.
///
/// Packed colors and grayscale levels share the kernels through this trait:
/// the distance kernel uses `abs_error`, the correlation kernel uses `gray`.
pub trait Sample: Copy + Send + Sync {
    /// Absolute dissimilarity between two samples, in `[0, 255]` for valid inputs.
    fn abs_error(self, other: Self) -> f64;

    /// Intensity of the sample on the `[0, 255]` gray scale.
    fn gray(self) -> f64;
}

impl Sample for Rgb {
    #[inline]
    fn abs_error(self, other: Self) -> f64 {
        pixel_absolute_error(self, other)
    }

    #[inline]
    fn gray(self) -> f64 {
        Rgb::gray(self)
    }
}

impl Sample for f64 {
    #[inline]
    fn abs_error(self, other: Self) -> f64 {
        (self - other).abs()
    }

    #[inline]
    fn gray(self) -> f64 {
        self
    }
}

/// Mean over the three channels of the absolute channel differences.
#[inline]
pub fn pixel_absolute_error(pattern_px: Rgb, image_px: Rgb) -> f64 {
    let diff = |a: u8, b: u8| u32::from(a.abs_diff(b));
    let sum = diff(pattern_px.red(), image_px.red())
        + diff(pattern_px.green(), image_px.green())
        + diff(pattern_px.blue(), image_px.blue());
    f64::from(sum) / 3.0
}
