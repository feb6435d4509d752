//! Packed RGB pixels and grayscale conversion.
//!
//! A packed color stores three 8-bit channels as `0xRRGGBB` in the low 24 bits
//! of a `u32`; any higher bits are ignored when decoding.

use crate::image::OwnedImage;
use crate::util::math::{clamp_channel, round_half_up};

/// Packed 24-bit RGB color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb(pub u32);

impl Rgb {
    /// Packs three channel values, clamping each into `[0, 255]`.
    pub fn from_channels(red: i64, green: i64, blue: i64) -> Self {
        let r = u32::from(clamp_channel(red));
        let g = u32::from(clamp_channel(green));
        let b = u32::from(clamp_channel(blue));
        Self((r << 16) | (g << 8) | b)
    }

    /// Packs a gray level into a neutral color, rounding to the nearest integer.
    pub fn from_gray(gray: f64) -> Self {
        let level = round_half_up(gray) as i64;
        Self::from_channels(level, level, level)
    }

    /// Returns the red channel.
    #[inline]
    pub fn red(self) -> u8 {
        ((self.0 >> 16) & 0xFF) as u8
    }

    /// Returns the green channel.
    #[inline]
    pub fn green(self) -> u8 {
        ((self.0 >> 8) & 0xFF) as u8
    }

    /// Returns the blue channel.
    #[inline]
    pub fn blue(self) -> u8 {
        (self.0 & 0xFF) as u8
    }

    /// Returns the channels as `[red, green, blue]`.
    pub fn channels(self) -> [u8; 3] {
        [self.red(), self.green(), self.blue()]
    }

    /// Returns the mean of the three channels, in `[0, 255]`.
    #[inline]
    pub fn gray(self) -> f64 {
        let sum = u32::from(self.red()) + u32::from(self.green()) + u32::from(self.blue());
        f64::from(sum) / 3.0
    }
}

impl From<u32> for Rgb {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// Converts a packed color image into a grayscale grid (channel mean per pixel).
pub fn to_gray(image: &OwnedImage<Rgb>) -> OwnedImage<f64> {
    image.map(|px| px.gray())
}

/// Converts a grayscale grid back into neutral packed colors.
pub fn to_rgb(gray: &OwnedImage<f64>) -> OwnedImage<Rgb> {
    gray.map(|&value| Rgb::from_gray(value))
}
