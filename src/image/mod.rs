//! Image views and owned grids.
//!
//! `ImageView` is a borrowed 2D view into a 1D buffer with an explicit stride.
//! The stride counts elements between the starts of consecutive rows, so a
//! stride larger than the width represents padded rows. ROI slices are zero-copy
//! views into the same backing slice and retain the original stride.
//!
//! Coordinates are `(row, col)` throughout, matching the orientation of score
//! surfaces: the row selects the line, the column the element within it.

use crate::util::{SlideMatchError, SlideMatchResult};

mod owned;
pub mod pixel;
pub mod render;

#[cfg(feature = "image-io")]
pub mod io;

pub use owned::OwnedImage;
pub use pixel::Rgb;

/// Borrowed 2D image view with an explicit stride.
#[derive(Copy, Clone, Debug)]
pub struct ImageView<'a, T> {
    data: &'a [T],
    width: usize,
    height: usize,
    stride: usize,
}

impl<'a, T> ImageView<'a, T> {
    /// Creates a contiguous view with `stride == width`.
    pub fn from_slice(data: &'a [T], width: usize, height: usize) -> SlideMatchResult<Self> {
        Self::new(data, width, height, width)
    }

    /// Creates a view with an explicit stride.
    pub fn new(
        data: &'a [T],
        width: usize,
        height: usize,
        stride: usize,
    ) -> SlideMatchResult<Self> {
        let needed = required_len(width, height, stride)?;
        if data.len() < needed {
            return Err(SlideMatchError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            stride,
        })
    }

    /// Returns the number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the stride in elements between row starts.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Returns `width * height`.
    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }

    /// Returns the backing slice including any row padding.
    pub fn as_slice(&self) -> &'a [T] {
        self.data
    }

    /// Returns the element at `(row, col)` if it is within bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<&'a T> {
        if row >= self.height || col >= self.width {
            return None;
        }
        let idx = row.checked_mul(self.stride)?.checked_add(col)?;
        self.data.get(idx)
    }

    /// Returns a contiguous slice for `row` with length `width`.
    pub fn row(&self, row: usize) -> Option<&'a [T]> {
        if row >= self.height {
            return None;
        }
        let start = row.checked_mul(self.stride)?;
        let end = start.checked_add(self.width)?;
        self.data.get(start..end)
    }

    /// Row slice for an index the caller has already bounds-checked.
    ///
    /// Construction guarantees every row in `0..height` lies in the buffer.
    #[inline]
    pub(crate) fn row_at(&self, row: usize) -> &'a [T] {
        let start = row * self.stride;
        &self.data[start..start + self.width]
    }

    /// Iterates over the rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &'a [T]> + '_ {
        (0..self.height).map(move |r| self.row_at(r))
    }

    /// Returns a zero-copy ROI view anchored at `(row, col)`.
    pub fn roi(
        &self,
        row: usize,
        col: usize,
        width: usize,
        height: usize,
    ) -> SlideMatchResult<ImageView<'a, T>> {
        if width == 0 || height == 0 {
            return Err(SlideMatchError::InvalidDimensions { width, height });
        }

        let out_of_bounds = SlideMatchError::WindowOutOfBounds {
            row,
            col,
            width,
            height,
            img_width: self.width,
            img_height: self.height,
        };
        let end_col = col.checked_add(width).ok_or_else(|| out_of_bounds.clone())?;
        let end_row = row
            .checked_add(height)
            .ok_or_else(|| out_of_bounds.clone())?;
        if end_col > self.width || end_row > self.height {
            return Err(out_of_bounds);
        }

        let start = row
            .checked_mul(self.stride)
            .and_then(|v| v.checked_add(col))
            .ok_or(SlideMatchError::InvalidDimensions {
                width: self.width,
                height: self.height,
            })?;
        let data = self
            .data
            .get(start..)
            .ok_or(SlideMatchError::BufferTooSmall {
                needed: start.saturating_add(1),
                got: self.data.len(),
            })?;

        ImageView::new(data, width, height, self.stride)
    }
}

impl<T: Clone> ImageView<'_, T> {
    /// Copies the view into a contiguous owned image.
    pub fn to_owned_image(&self) -> OwnedImage<T> {
        let mut data = Vec::with_capacity(self.cell_count());
        for row in self.rows() {
            data.extend_from_slice(row);
        }
        OwnedImage::from_parts(data, self.width, self.height)
    }
}

fn required_len(width: usize, height: usize, stride: usize) -> SlideMatchResult<usize> {
    if width == 0 || height == 0 {
        return Err(SlideMatchError::InvalidDimensions { width, height });
    }
    if stride < width {
        return Err(SlideMatchError::InvalidStride { width, stride });
    }
    let needed = (height - 1)
        .checked_mul(stride)
        .and_then(|v| v.checked_add(width))
        .ok_or(SlideMatchError::InvalidDimensions { width, height })?;
    Ok(needed)
}

#[cfg(test)]
mod tests {
    use super::ImageView;
    use crate::util::SlideMatchError;

    #[test]
    fn padded_stride_skips_padding() {
        let data = [1u8, 2, 99, 3, 4, 99];
        let view = ImageView::new(&data, 2, 2, 3).unwrap();
        assert_eq!(view.row(0).unwrap(), &[1, 2]);
        assert_eq!(view.row(1).unwrap(), &[3, 4]);
        assert_eq!(view.get(1, 1).copied(), Some(4));
        assert!(view.get(0, 2).is_none());
        assert_eq!(view.to_owned_image().data(), &[1, 2, 3, 4]);
    }

    #[test]
    fn roi_rejects_window_past_edge() {
        let data = [0u8; 9];
        let view = ImageView::from_slice(&data, 3, 3).unwrap();
        assert!(view.roi(2, 1, 2, 1).is_ok());
        let err = view.roi(2, 2, 2, 1).unwrap_err();
        assert_eq!(
            err,
            SlideMatchError::WindowOutOfBounds {
                row: 2,
                col: 2,
                width: 2,
                height: 1,
                img_width: 3,
                img_height: 3,
            }
        );
    }
}
