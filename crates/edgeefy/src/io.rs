//! Conversion between [`Image<Pixel>`] and `image` crate buffers, plus file
//! load/save.
//!
//! Decoding maps every source pixel through the `image` crate's luma
//! conversion and keeps its alpha. Encoding picks the format from the file
//! extension: `png` keeps alpha, anything else is written as grayscale JPEG.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use edgeefy_core::{Image, Pixel};
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, GrayAlphaImage, GrayImage, ImageFormat, ImageReader, LumaA};

pub const JPEG_QUALITY: u8 = 95;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Jpeg,
}

impl OutputFormat {
    /// `png` (any case) selects PNG; everything else, including no
    /// extension, selects JPEG.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("png") => Self::Png,
            _ => Self::Jpeg,
        }
    }
}

pub fn from_gray_alpha(img: &GrayAlphaImage) -> Result<Image<Pixel>> {
    let data = img
        .pixels()
        .map(|&LumaA([luma, alpha])| Pixel::new(luma, alpha))
        .collect();
    let grid = Image::from_vec(img.width() as usize, img.height() as usize, data)?;
    Ok(grid)
}

pub fn from_dynamic(img: &DynamicImage) -> Result<Image<Pixel>> {
    from_gray_alpha(&img.to_luma_alpha8())
}

pub fn to_gray_alpha(img: &Image<Pixel>) -> Result<GrayAlphaImage> {
    let (w, h) = dims_u32(img)?;
    let raw = img.data().iter().flat_map(|p| [p.luma, p.alpha]).collect();
    GrayAlphaImage::from_raw(w, h, raw).ok_or_else(|| anyhow!("buffer does not match {w}x{h}"))
}

pub fn to_gray(img: &Image<Pixel>) -> Result<GrayImage> {
    let (w, h) = dims_u32(img)?;
    let raw = img.data().iter().map(|p| p.luma).collect();
    GrayImage::from_raw(w, h, raw).ok_or_else(|| anyhow!("buffer does not match {w}x{h}"))
}

/// Decodes a PNG or JPEG file into a gray + alpha grid.
pub fn load(path: &Path) -> Result<Image<Pixel>> {
    let img = ImageReader::open(path)
        .with_context(|| format!("opening input image {}", path.display()))?
        .with_guessed_format()
        .with_context(|| format!("reading input image {}", path.display()))?
        .decode()
        .with_context(|| format!("decoding input image {}", path.display()))?;
    let grid = from_dynamic(&img)?;
    if grid.is_empty() {
        bail!("input image {} has no pixels", path.display());
    }
    Ok(grid)
}

/// Writes `img` in the format chosen by [`OutputFormat::from_path`].
pub fn save(img: &Image<Pixel>, path: &Path) -> Result<OutputFormat> {
    let format = OutputFormat::from_path(path);
    match format {
        OutputFormat::Png => to_gray_alpha(img)?
            .save_with_format(path, ImageFormat::Png)
            .with_context(|| format!("writing png {}", path.display()))?,
        OutputFormat::Jpeg => {
            let file = File::create(path)
                .with_context(|| format!("creating output {}", path.display()))?;
            let encoder = JpegEncoder::new_with_quality(BufWriter::new(file), JPEG_QUALITY);
            to_gray(img)?
                .write_with_encoder(encoder)
                .with_context(|| format!("writing jpeg {}", path.display()))?;
        }
    }
    Ok(format)
}

fn dims_u32(img: &Image<Pixel>) -> Result<(u32, u32)> {
    let w = u32::try_from(img.width()).context("image width exceeds u32")?;
    let h = u32::try_from(img.height()).context("image height exceeds u32")?;
    Ok((w, h))
}
