//! Canny edge detection over [`edgeefy_core::Image`] grids of [`Pixel`].
//!
//! Stages, in order, each producing a fresh image from its predecessor:
//! 1. [`binomial_blur`]: optional smoothing with a normalized binomial kernel.
//! 2. [`sobel`]: 3x3 Sobel magnitude plus a direction field in degrees.
//! 3. [`non_max_suppression`]: thinning along five direction bins.
//! 4. [`double_threshold`]: strong / weak / zero split relative to the peak.
//! 5. [`link_edges`]: single-pass hysteresis against the strong set.
//!
//! [`detect`] chains them according to a [`CannyConfig`].
//!
//! ## Features
//! - `rayon` – blur, Sobel and NMS fill output rows in parallel. Results are
//!   bit-identical to the serial path.
//! - `tracing` – stage spans and threshold/edge counts through `tracing`.
//!
//! [`Pixel`]: edgeefy_core::Pixel

pub mod blur;
pub mod canny;
pub mod hysteresis;
pub mod kernel;
pub mod nms;
mod rows;
pub mod sobel;
pub mod threshold;

pub use blur::{BlurCombine, binomial_blur};
pub use canny::{CannyConfig, CannyStages, detect, detect_with_stages};
pub use hysteresis::{EdgeMap, WeakEdgePolicy, link_edges};
pub use kernel::BinomialKernel1D;
pub use nms::{OctantBin, non_max_suppression};
pub use sobel::{DirectionField, Gradient, SOBEL_X, SOBEL_Y, gradient_direction, sobel};
pub use threshold::{Classified, ThresholdRatios, Thresholds, double_threshold};
