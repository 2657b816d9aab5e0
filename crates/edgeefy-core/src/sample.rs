use crate::Error;
use crate::border::mirror_index;
use crate::image::ImageView;

/// Axis of a 1D neighborhood vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Fills `out` with the `out.len()` samples centered on `(x, y)` along `axis`.
///
/// Out-of-range positions are mirrored about the image edge, see
/// [`mirror_index`](crate::mirror_index). That includes the fixed coordinate,
/// so an out-of-range center reads the same pixels as [`sample_window_into`].
pub fn sample_vector_into<T: Copy + Into<f32>>(
    img: &ImageView<'_, T>,
    x: usize,
    y: usize,
    axis: Axis,
    out: &mut [f32],
) -> Result<(), Error> {
    let radius = odd_radius(out.len())?;
    img.ensure_non_empty()?;

    let (center, len, fixed) = match axis {
        Axis::Horizontal => (x, img.width(), mirror_index(y as isize, img.height())),
        Axis::Vertical => (y, img.height(), mirror_index(x as isize, img.width())),
    };
    let fixed = fixed.ok_or(Error::EmptyImage)?;

    for (k, o) in out.iter_mut().enumerate() {
        let i = center as isize + k as isize - radius as isize;
        let m = mirror_index(i, len).ok_or(Error::EmptyImage)?;
        let (sx, sy) = match axis {
            Axis::Horizontal => (m, fixed),
            Axis::Vertical => (fixed, m),
        };
        // SAFETY: `mirror_index` returns indices in `[0, len)` for both axes.
        *o = unsafe { (*img.get_unchecked(sx, sy)).into() };
    }

    Ok(())
}

pub fn sample_vector<T: Copy + Into<f32>>(
    img: &ImageView<'_, T>,
    x: usize,
    y: usize,
    len: usize,
    axis: Axis,
) -> Result<Vec<f32>, Error> {
    let mut out = vec![0.0f32; len];
    sample_vector_into(img, x, y, axis, &mut out)?;
    Ok(out)
}

/// Fills `out` with the `n x n` window centered on `(x, y)`, row-major, where
/// `n * n == out.len()`.
pub fn sample_window_into<T: Copy + Into<f32>>(
    img: &ImageView<'_, T>,
    x: usize,
    y: usize,
    n: usize,
    out: &mut [f32],
) -> Result<(), Error> {
    let radius = odd_radius(n)?;
    if out.len() != n * n {
        return Err(Error::SizeMismatch {
            expected: n * n,
            actual: out.len(),
        });
    }
    img.ensure_non_empty()?;

    for (j, out_row) in out.chunks_exact_mut(n).enumerate() {
        let sy = mirror_index(y as isize + j as isize - radius as isize, img.height())
            .ok_or(Error::EmptyImage)?;
        for (i, o) in out_row.iter_mut().enumerate() {
            let sx = mirror_index(x as isize + i as isize - radius as isize, img.width())
                .ok_or(Error::EmptyImage)?;
            // SAFETY: `mirror_index` returns indices in `[0, len)` for non-empty images.
            *o = unsafe { (*img.get_unchecked(sx, sy)).into() };
        }
    }

    Ok(())
}

pub fn sample_window<T: Copy + Into<f32>>(
    img: &ImageView<'_, T>,
    x: usize,
    y: usize,
    n: usize,
) -> Result<Vec<f32>, Error> {
    let mut out = vec![0.0f32; n * n];
    sample_window_into(img, x, y, n, &mut out)?;
    Ok(out)
}

fn odd_radius(len: usize) -> Result<usize, Error> {
    if len % 2 == 0 {
        return Err(Error::EvenLength { len });
    }
    Ok(len / 2)
}
