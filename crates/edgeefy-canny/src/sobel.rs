//! 3x3 Sobel gradients with a per-pixel direction field.

use edgeefy_core::{Error, Image, ImageView, Pixel, sample_window_into, saturate_u8};
#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::rows::fill_rows;

/// Horizontal Sobel kernel, row-major.
pub const SOBEL_X: [f32; 9] = [1.0, 0.0, -1.0, 2.0, 0.0, -2.0, 1.0, 0.0, -1.0];
/// Vertical Sobel kernel, row-major.
pub const SOBEL_Y: [f32; 9] = [1.0, 2.0, 1.0, 0.0, 0.0, 0.0, -1.0, -2.0, -1.0];

/// Per-pixel gradient direction in degrees, within `[-90, 90]`.
pub type DirectionField = Image<f32>;

#[derive(Debug, Clone, PartialEq)]
pub struct Gradient {
    /// `sqrt(gx^2 + gy^2)`, saturated to `u8`; opacity copied from the input.
    pub magnitude: Image<Pixel>,
    pub direction: DirectionField,
}

#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip_all, fields(w = img.width(), h = img.height()))
)]
pub fn sobel(img: &ImageView<'_, Pixel>) -> Result<Gradient, Error> {
    img.ensure_non_empty()?;
    let (w, h) = img.dims();

    let mut g = Image::new_fill(w, h, (0.0f32, 0.0f32));
    fill_rows(g.data_mut(), w, |y, row| {
        let mut win = [0.0f32; 9];
        for (x, out) in row.iter_mut().enumerate() {
            sample_window_into(img, x, y, 3, &mut win)?;
            *out = (correlate3x3(&win, &SOBEL_X), correlate3x3(&win, &SOBEL_Y));
        }
        Ok(())
    })?;

    let magnitude = Image::from_vec(
        w,
        h,
        (0..h)
            .flat_map(|y| img.row(y).iter().copied())
            .zip(g.data())
            .map(|(px, &(gx, gy))| px.with_luma(saturate_u8((gx * gx + gy * gy).sqrt())))
            .collect(),
    )?;
    let direction = g.map(|&(gx, gy)| gradient_direction(gx, gy));

    Ok(Gradient {
        magnitude,
        direction,
    })
}

/// `atan(gy / gx)` in degrees, forced into `[-90, 90]`.
///
/// Exactly `0` when either component is zero, so purely horizontal and
/// purely vertical gradients both land in the horizontal bin.
pub fn gradient_direction(gx: f32, gy: f32) -> f32 {
    if gx == 0.0 || gy == 0.0 {
        return 0.0;
    }
    (gy / gx).atan().to_degrees().clamp(-90.0, 90.0)
}

#[inline]
fn correlate3x3(window: &[f32; 9], kernel: &[f32; 9]) -> f32 {
    window.iter().zip(kernel).map(|(&a, &b)| a * b).sum()
}
