//! Owned contiguous grids.

use crate::image::ImageView;
use crate::util::{SlideMatchError, SlideMatchResult};

/// Owned row-major grid with `stride == width`.
///
/// Images, patterns and score surfaces all use this type; the element type
/// tells them apart (`Rgb`, `f64`).
#[derive(Clone, Debug, PartialEq)]
pub struct OwnedImage<T> {
    data: Vec<T>,
    width: usize,
    height: usize,
}

impl<T> OwnedImage<T> {
    /// Creates an image from a row-major buffer of exactly `width * height` cells.
    pub fn new(data: Vec<T>, width: usize, height: usize) -> SlideMatchResult<Self> {
        if width == 0 || height == 0 {
            return Err(SlideMatchError::InvalidDimensions { width, height });
        }
        let needed = width
            .checked_mul(height)
            .ok_or(SlideMatchError::InvalidDimensions { width, height })?;
        if data.len() < needed {
            return Err(SlideMatchError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        if data.len() > needed {
            return Err(SlideMatchError::InvalidDimensions { width, height });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Creates an image from nested rows, rejecting empty and ragged input.
    pub fn from_rows(rows: Vec<Vec<T>>) -> SlideMatchResult<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if width == 0 || height == 0 {
            return Err(SlideMatchError::InvalidDimensions { width, height });
        }
        let mut data = Vec::with_capacity(width * height);
        for (row, cells) in rows.into_iter().enumerate() {
            if cells.len() != width {
                return Err(SlideMatchError::RaggedRows {
                    row,
                    expected: width,
                    got: cells.len(),
                });
            }
            data.extend(cells);
        }
        Ok(Self::from_parts(data, width, height))
    }

    /// Builds an image by evaluating `f(row, col)` for every cell in row-major order.
    pub fn from_fn<F>(width: usize, height: usize, mut f: F) -> SlideMatchResult<Self>
    where
        F: FnMut(usize, usize) -> T,
    {
        if width == 0 || height == 0 {
            return Err(SlideMatchError::InvalidDimensions { width, height });
        }
        let mut data = Vec::with_capacity(width * height);
        for row in 0..height {
            for col in 0..width {
                data.push(f(row, col));
            }
        }
        Ok(Self::from_parts(data, width, height))
    }

    /// Wraps a buffer whose length the caller has already validated.
    pub(crate) fn from_parts(data: Vec<T>, width: usize, height: usize) -> Self {
        debug_assert!(width > 0 && height > 0 && data.len() == width * height);
        Self {
            data,
            width,
            height,
        }
    }

    /// Returns a borrowed view of the image.
    pub fn view(&self) -> ImageView<'_, T> {
        ImageView {
            data: &self.data,
            width: self.width,
            height: self.height,
            stride: self.width,
        }
    }

    /// Returns the number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns `width * height`.
    pub fn cell_count(&self) -> usize {
        self.data.len()
    }

    /// Returns the row-major cells.
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Consumes the image and returns its row-major cells.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Returns the cell at `(row, col)` if it is within bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if row >= self.height || col >= self.width {
            return None;
        }
        self.data.get(row * self.width + col)
    }

    /// Returns a mutable reference to the cell at `(row, col)` if it is within bounds.
    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut T> {
        if row >= self.height || col >= self.width {
            return None;
        }
        self.data.get_mut(row * self.width + col)
    }

    /// Applies `f` to every cell, keeping the dimensions.
    pub fn map<U, F>(&self, f: F) -> OwnedImage<U>
    where
        F: FnMut(&T) -> U,
    {
        OwnedImage::from_parts(self.data.iter().map(f).collect(), self.width, self.height)
    }
}

impl<T: Clone> OwnedImage<T> {
    /// Returns the image as nested rows.
    pub fn to_rows(&self) -> Vec<Vec<T>> {
        self.data
            .chunks(self.width)
            .map(|row| row.to_vec())
            .collect()
    }
}
