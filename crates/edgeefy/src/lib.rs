//! Umbrella crate for the `edgeefy` workspace.
//!
//! Re-exports the pixel grid primitives and the Canny stages, and bridges
//! them to the `image` crate for decoding and encoding files.

pub mod io;

pub use edgeefy_canny::*;
pub use edgeefy_core::*;

use image::GrayAlphaImage;

/// Runs [`detect`] on an `image::GrayAlphaImage` and converts the result back.
pub fn detect_image(img: &GrayAlphaImage, cfg: &CannyConfig) -> anyhow::Result<GrayAlphaImage> {
    let grid = io::from_gray_alpha(img)?;
    let edges = detect(&grid.as_view(), cfg)?;
    io::to_gray_alpha(&edges.image)
}
