//! Pixel grids and border-aware neighborhood sampling for edgeefy.
//!
//! ## Images
//! [`Image`] owns a row-major grid; [`ImageView`] borrows one for reading.
//! Images of [`Pixel`] carry a gray intensity and an opacity value; only the
//! intensity is computed on.
//!
//! ## Border Policy
//! All neighborhood reads go through [`sample_vector_into`] or
//! [`sample_window_into`], which resolve out-of-range positions by mirroring
//! about the edge pixel without repeating it: column `-1` reads column `1`,
//! column `width` reads column `width - 2`.
//!
//! ## Coordinates
//! `x` is the column and `y` the row. Neighborhood vectors and windows are
//! centered on `(x, y)` and must have odd length.

mod border;
mod error;
mod geom;
mod image;
mod pixel;
mod sample;

pub use border::mirror_index;
pub use error::{Error, ErrorKind};
pub use geom::Coord;
pub use image::{Image, ImageView};
pub use pixel::{Pixel, saturate_u8};
pub use sample::{Axis, sample_vector, sample_vector_into, sample_window, sample_window_into};
