//! Visualization helpers for score surfaces and match boxes.

use crate::image::{ImageView, OwnedImage, Rgb};
use crate::util::math::round_half_up;
use crate::util::{SlideMatchError, SlideMatchResult};

/// Maps a score surface onto gray levels.
///
/// `min` maps to black and `max` to white; values outside the range saturate.
pub fn surface_to_rgb(
    surface: ImageView<'_, f64>,
    min: f64,
    max: f64,
) -> SlideMatchResult<OwnedImage<Rgb>> {
    let span = max - min;
    if !span.is_finite() || span == 0.0 {
        return Err(SlideMatchError::InvalidInput("surface range must be finite and non-empty"));
    }
    let mut data = Vec::with_capacity(surface.cell_count());
    for row in surface.rows() {
        for &score in row {
            let level = round_half_up((score - min) / span * 255.0) as i64;
            data.push(Rgb::from_channels(level, level, level));
        }
    }
    OwnedImage::new(data, surface.width(), surface.height())
}

/// Draws a one-pixel rectangle outline anchored at `(row, col)`.
///
/// Parts of the outline falling outside the image are skipped.
pub fn draw_box(
    image: &mut OwnedImage<Rgb>,
    row: usize,
    col: usize,
    width: usize,
    height: usize,
    color: Rgb,
) {
    if width == 0 || height == 0 {
        return;
    }
    let last_row = row.saturating_add(height - 1);
    let last_col = col.saturating_add(width - 1);
    for c in col..=last_col.min(image.width().saturating_sub(1)) {
        for r in [row, last_row] {
            if let Some(px) = image.get_mut(r, c) {
                *px = color;
            }
        }
    }
    for r in row..=last_row.min(image.height().saturating_sub(1)) {
        for c in [col, last_col] {
            if let Some(px) = image.get_mut(r, c) {
                *px = color;
            }
        }
    }
}
