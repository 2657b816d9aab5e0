//! The full pipeline: blur, Sobel, NMS, double threshold, hysteresis.

use edgeefy_core::{Error, Image, ImageView, Pixel};
#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::blur::{BlurCombine, binomial_blur};
use crate::hysteresis::{EdgeMap, WeakEdgePolicy, link_edges};
use crate::kernel::BinomialKernel1D;
use crate::nms::non_max_suppression;
use crate::sobel::{Gradient, sobel};
use crate::threshold::{ThresholdRatios, Thresholds, double_threshold};

#[derive(Debug, Clone, PartialEq)]
pub struct CannyConfig {
    /// Smooth before taking gradients.
    pub blur: bool,
    /// Binomial kernel length, odd.
    pub kernel_size: usize,
    pub blur_combine: BlurCombine,
    pub ratios: ThresholdRatios,
    pub weak_policy: WeakEdgePolicy,
}

impl Default for CannyConfig {
    fn default() -> Self {
        Self {
            blur: true,
            kernel_size: 5,
            blur_combine: BlurCombine::default(),
            ratios: ThresholdRatios::default(),
            weak_policy: WeakEdgePolicy::default(),
        }
    }
}

impl CannyConfig {
    /// Checks everything that can be checked without an image.
    pub fn validate(&self) -> Result<(), Error> {
        if self.kernel_size % 2 == 0 {
            return Err(Error::EvenLength {
                len: self.kernel_size,
            });
        }
        ThresholdRatios::new(self.ratios.min(), self.ratios.max())?;
        Ok(())
    }
}

/// Every intermediate image of one run, for inspection.
#[derive(Debug, Clone, PartialEq)]
pub struct CannyStages {
    pub smoothed: Image<Pixel>,
    pub gradient: Gradient,
    pub suppressed: Image<Pixel>,
    pub thresholds: Thresholds,
    pub edges: EdgeMap,
}

/// Runs the pipeline and returns the final edge map.
pub fn detect(img: &ImageView<'_, Pixel>, cfg: &CannyConfig) -> Result<EdgeMap, Error> {
    detect_with_stages(img, cfg).map(|stages| stages.edges)
}

/// Runs the pipeline and keeps every intermediate image.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip_all, fields(w = img.width(), h = img.height()))
)]
pub fn detect_with_stages(
    img: &ImageView<'_, Pixel>,
    cfg: &CannyConfig,
) -> Result<CannyStages, Error> {
    cfg.validate()?;
    img.ensure_non_empty()?;

    let smoothed = if cfg.blur {
        let kernel = BinomialKernel1D::new(cfg.kernel_size)?;
        binomial_blur(img, &kernel, cfg.blur_combine)?
    } else {
        img.to_image()
    };

    let gradient = sobel(&smoothed.as_view())?;
    let suppressed =
        non_max_suppression(&gradient.magnitude.as_view(), &gradient.direction.as_view())?;
    let classified = double_threshold(suppressed.clone(), cfg.ratios)?;
    let thresholds = classified.thresholds;
    let edges = link_edges(classified, cfg.weak_policy)?;

    #[cfg(feature = "tracing")]
    tracing::debug!(
        low = thresholds.low,
        high = thresholds.high,
        strong = edges.strong.len(),
        promoted = edges.promoted.len(),
        "canny done"
    );

    Ok(CannyStages {
        smoothed,
        gradient,
        suppressed,
        thresholds,
        edges,
    })
}
