use crate::Error;

/// Owned row-major grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Image<T> {
    width: usize,
    height: usize,
    data: Vec<T>,
}

impl<T> Image<T> {
    pub fn from_vec(width: usize, height: usize, data: Vec<T>) -> Result<Self, Error> {
        let expected = width.checked_mul(height).ok_or(Error::SizeMismatch {
            expected: usize::MAX,
            actual: data.len(),
        })?;

        if data.len() != expected {
            return Err(Error::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Builds an image from nested rows; every row must have the first row's length.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self, Error> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(width * height);
        for row in rows {
            if row.len() != width {
                return Err(Error::SizeMismatch {
                    expected: width,
                    actual: row.len(),
                });
            }
            data.extend(row);
        }

        Self::from_vec(width, height, data)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// `(width, height)`.
    pub fn dims(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.width + x)
    }

    pub fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get_mut(y * self.width + x)
    }

    pub fn as_view(&self) -> ImageView<'_, T> {
        ImageView {
            width: self.width,
            height: self.height,
            data: &self.data,
        }
    }

    /// Applies `f` to every element, keeping the dimensions.
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Image<U> {
        Image {
            width: self.width,
            height: self.height,
            data: self.data.iter().map(f).collect(),
        }
    }
}

impl<T: Clone> Image<T> {
    /// Allocates a `width x height` image filled with `value`.
    ///
    /// # Panics
    /// Panics if `width * height` overflows `usize`.
    pub fn new_fill(width: usize, height: usize, value: T) -> Self {
        let len = width.checked_mul(height).expect("image size overflow");
        Self {
            width,
            height,
            data: vec![value; len],
        }
    }
}

/// Borrowed, tightly packed row-major grid. Only [`Image::as_view`] builds
/// one, so `data.len() == width * height` always holds.
#[derive(Debug, Clone, Copy)]
pub struct ImageView<'a, T> {
    width: usize,
    height: usize,
    data: &'a [T],
}

impl<'a, T> ImageView<'a, T> {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// `(width, height)`.
    pub fn dims(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Fails with [`Error::EmptyImage`] when either side is zero.
    pub fn ensure_non_empty(&self) -> Result<(), Error> {
        if self.is_empty() {
            Err(Error::EmptyImage)
        } else {
            Ok(())
        }
    }

    pub fn row(&self, y: usize) -> &'a [T] {
        assert!(y < self.height, "row index out of bounds");
        let start = y * self.width;
        &self.data[start..start + self.width]
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&'a T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = y * self.width + x;
        self.data.get(idx)
    }

    /// Returns a pixel reference without bounds checks.
    ///
    /// # Safety
    /// Caller must guarantee `x < self.width()` and `y < self.height()`.
    pub unsafe fn get_unchecked(&self, x: usize, y: usize) -> &'a T {
        // SAFETY: `x < width` and `y < height` give `y * width + x < width * height`,
        // which is `data.len()` for every view made by `Image::as_view`.
        unsafe { self.data.get_unchecked(y * self.width + x) }
    }
}

impl<T: Clone> ImageView<'_, T> {
    /// Copies the view into an owned image.
    pub fn to_image(&self) -> Image<T> {
        Image {
            width: self.width,
            height: self.height,
            data: self.data.to_vec(),
        }
    }
}
