//! Non-maximum suppression along the quantized gradient direction.
//!
//! Directions in `[-90, 90]` degrees fall into one of five bins. Each bin
//! names the two neighbors lying on the gradient line; a pixel survives when
//! neither of them is brighter.

use edgeefy_core::{Coord, Error, Image, ImageView, Pixel};
#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::rows::fill_rows;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OctantBin {
    /// `[-90, -67.5)`
    SteepNegative,
    /// `[-67.5, -22.5)`
    DiagonalNegative,
    /// `[-22.5, 22.5)`
    Horizontal,
    /// `[22.5, 67.5)`
    DiagonalPositive,
    /// `[67.5, 90]`
    SteepPositive,
}

/// Lower bound (inclusive) of each bin in ascending order; the last bin also
/// includes its upper bound of 90.
const OCTANT_TABLE: [(f32, OctantBin); 5] = [
    (-90.0, OctantBin::SteepNegative),
    (-67.5, OctantBin::DiagonalNegative),
    (-22.5, OctantBin::Horizontal),
    (22.5, OctantBin::DiagonalPositive),
    (67.5, OctantBin::SteepPositive),
];

impl OctantBin {
    pub fn from_degrees(angle: f32) -> Result<Self, Error> {
        if !(-90.0..=90.0).contains(&angle) {
            return Err(Error::DirectionOutOfRange { angle });
        }
        OCTANT_TABLE
            .iter()
            .rev()
            .find(|(lower, _)| angle >= *lower)
            .map(|&(_, bin)| bin)
            .ok_or(Error::DirectionOutOfRange { angle })
    }

    /// `(dx, dy)` offsets of the two neighbors compared against the center.
    pub const fn neighbor_offsets(self) -> [(isize, isize); 2] {
        match self {
            Self::SteepNegative => [(0, -1), (0, 1)],
            Self::DiagonalNegative => [(1, -1), (-1, 1)],
            Self::Horizontal => [(1, 0), (-1, 0)],
            Self::DiagonalPositive => [(1, 1), (-1, -1)],
            Self::SteepPositive => [(0, 1), (0, -1)],
        }
    }
}

/// Zeroes every pixel that has a brighter neighbor along its gradient line.
///
/// Neighbors outside the image fall back to the center pixel, so they never
/// suppress. Surviving pixels are copied unchanged; suppressed ones keep
/// their opacity.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip_all, fields(w = magnitude.width(), h = magnitude.height()))
)]
pub fn non_max_suppression(
    magnitude: &ImageView<'_, Pixel>,
    direction: &ImageView<'_, f32>,
) -> Result<Image<Pixel>, Error> {
    magnitude.ensure_non_empty()?;
    if magnitude.dims() != direction.dims() {
        return Err(Error::DimensionMismatch {
            expected: magnitude.dims(),
            actual: direction.dims(),
        });
    }

    let (w, h) = magnitude.dims();
    let mut out = Image::new_fill(w, h, Pixel::default());
    fill_rows(out.data_mut(), w, |y, row| {
        let mag_row = magnitude.row(y);
        let dir_row = direction.row(y);
        for (x, out) in row.iter_mut().enumerate() {
            let center = mag_row[x];
            let bin = OctantBin::from_degrees(dir_row[x])?;
            let brighter = bin.neighbor_offsets().iter().any(|&(dx, dy)| {
                Coord::new(x, y)
                    .offset(dx, dy, w, h)
                    .and_then(|c| magnitude.get(c.x, c.y))
                    .is_some_and(|n| n.luma > center.luma)
            });
            *out = if brighter { center.with_luma(0) } else { center };
        }
        Ok(())
    })?;

    Ok(out)
}
