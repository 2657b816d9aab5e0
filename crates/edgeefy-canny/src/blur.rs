//! Binomial smoothing through the mirrored-border sampler.
//!
//! Two ways of combining the horizontal and vertical passes are offered, see
//! [`BlurCombine`].

use edgeefy_core::{Axis, Error, Image, ImageView, Pixel, sample_vector_into, saturate_u8};
#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::kernel::BinomialKernel1D;
use crate::rows::fill_rows;

/// How the horizontal and vertical kernel responses become one intensity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BlurCombine {
    /// Horizontal pass into a float buffer, then a vertical pass over that
    /// buffer. Flat regions stay unchanged.
    #[default]
    Separable,
    /// Both 1D responses are taken from the input and combined as
    /// `sqrt(h^2 + v^2)`. Reproduces the reference tool's output; a flat
    /// region of value `c` becomes `c * sqrt(2)` (saturated).
    Magnitude,
}

/// Smooths `img` with `kernel` and returns a new image of the same size.
///
/// Opacity is copied from the input pixel.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip_all, fields(w = img.width(), h = img.height(), len = kernel.len(), combine = ?combine))
)]
pub fn binomial_blur(
    img: &ImageView<'_, Pixel>,
    kernel: &BinomialKernel1D,
    combine: BlurCombine,
) -> Result<Image<Pixel>, Error> {
    img.ensure_non_empty()?;
    match combine {
        BlurCombine::Separable => blur_separable(img, kernel),
        BlurCombine::Magnitude => blur_magnitude(img, kernel),
    }
}

fn blur_separable(
    img: &ImageView<'_, Pixel>,
    kernel: &BinomialKernel1D,
) -> Result<Image<Pixel>, Error> {
    let (w, h) = img.dims();

    let mut tmp = Image::new_fill(w, h, 0.0f32);
    fill_rows(tmp.data_mut(), w, |y, row| {
        let mut buf = vec![0.0f32; kernel.len()];
        for (x, out) in row.iter_mut().enumerate() {
            sample_vector_into(img, x, y, Axis::Horizontal, &mut buf)?;
            *out = kernel.apply(&buf);
        }
        Ok(())
    })?;

    let tmp_view = tmp.as_view();
    let mut out = Image::new_fill(w, h, Pixel::default());
    fill_rows(out.data_mut(), w, |y, row| {
        let src = img.row(y);
        let mut buf = vec![0.0f32; kernel.len()];
        for (x, out) in row.iter_mut().enumerate() {
            sample_vector_into(&tmp_view, x, y, Axis::Vertical, &mut buf)?;
            *out = src[x].with_luma(saturate_u8(kernel.apply(&buf)));
        }
        Ok(())
    })?;

    Ok(out)
}

fn blur_magnitude(
    img: &ImageView<'_, Pixel>,
    kernel: &BinomialKernel1D,
) -> Result<Image<Pixel>, Error> {
    let (w, h) = img.dims();

    let mut out = Image::new_fill(w, h, Pixel::default());
    fill_rows(out.data_mut(), w, |y, row| {
        let src = img.row(y);
        let mut hor = vec![0.0f32; kernel.len()];
        let mut ver = vec![0.0f32; kernel.len()];
        for (x, out) in row.iter_mut().enumerate() {
            sample_vector_into(img, x, y, Axis::Horizontal, &mut hor)?;
            sample_vector_into(img, x, y, Axis::Vertical, &mut ver)?;
            let hs = kernel.apply(&hor);
            let vs = kernel.apply(&ver);
            *out = src[x].with_luma(saturate_u8((hs * hs + vs * vs).sqrt()));
        }
        Ok(())
    })?;

    Ok(out)
}
