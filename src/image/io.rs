//! Convenience helpers for loading and saving images via the `image` crate.
//!
//! Available when the `image-io` feature is enabled.

use crate::image::{OwnedImage, Rgb};
use crate::util::{SlideMatchError, SlideMatchResult};
use std::path::Path;

/// Creates a packed color image from an RGB image buffer.
pub fn owned_from_rgb_image(img: &image::RgbImage) -> SlideMatchResult<OwnedImage<Rgb>> {
    let width = img.width() as usize;
    let height = img.height() as usize;
    let data = img
        .pixels()
        .map(|px| {
            let [r, g, b] = px.0;
            Rgb::from_channels(i64::from(r), i64::from(g), i64::from(b))
        })
        .collect();
    OwnedImage::new(data, width, height)
}

/// Creates a packed color image from a dynamic image, dropping any alpha.
pub fn owned_from_dynamic_image(img: &image::DynamicImage) -> SlideMatchResult<OwnedImage<Rgb>> {
    owned_from_rgb_image(&img.to_rgb8())
}

/// Converts a packed color image into an RGB image buffer.
pub fn rgb_image_from_owned(img: &OwnedImage<Rgb>) -> SlideMatchResult<image::RgbImage> {
    let width = u32::try_from(img.width())
        .map_err(|_| SlideMatchError::InvalidInput("image width exceeds u32"))?;
    let height = u32::try_from(img.height())
        .map_err(|_| SlideMatchError::InvalidInput("image height exceeds u32"))?;
    let raw: Vec<u8> = img.data().iter().flat_map(|px| px.channels()).collect();
    image::RgbImage::from_raw(width, height, raw).ok_or(SlideMatchError::BufferTooSmall {
        needed: img.cell_count() * 3,
        got: img.cell_count() * 3,
    })
}

/// Loads an image from disk as packed colors.
pub fn load_rgb_image<P: AsRef<Path>>(path: P) -> SlideMatchResult<OwnedImage<Rgb>> {
    let img = image::open(path).map_err(|err| SlideMatchError::ImageIo {
        reason: err.to_string(),
    })?;
    owned_from_dynamic_image(&img)
}

/// Saves packed colors to disk; the format follows the file extension.
pub fn save_rgb_image<P: AsRef<Path>>(img: &OwnedImage<Rgb>, path: P) -> SlideMatchResult<()> {
    rgb_image_from_owned(img)?
        .save(path)
        .map_err(|err| SlideMatchError::ImageIo {
            reason: err.to_string(),
        })
}
