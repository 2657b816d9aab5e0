//! Double thresholding relative to the brightest pixel.

use std::collections::BTreeSet;

use edgeefy_core::{Coord, Error, Image, Pixel};
#[cfg(feature = "tracing")]
use tracing::instrument;

/// Threshold ratios relative to the image maximum, `0 < min < max < 1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdRatios {
    min: f64,
    max: f64,
}

impl ThresholdRatios {
    pub fn new(min: f64, max: f64) -> Result<Self, Error> {
        let in_unit = |v: f64| v > 0.0 && v < 1.0;
        if !in_unit(min) || !in_unit(max) || min >= max {
            return Err(Error::InvalidRatio { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Absolute thresholds for an image whose brightest pixel is `peak`.
    ///
    /// A product that lands within rounding noise of an integer is snapped
    /// to it, so a pixel at exactly `ratio * peak` sits on the boundary.
    pub fn resolve(&self, peak: u8) -> Thresholds {
        let peak = f64::from(peak);
        Thresholds {
            low: snap_to_integer(self.min * peak),
            high: snap_to_integer(self.max * peak),
        }
    }
}

fn snap_to_integer(v: f64) -> f64 {
    const EPS: f64 = 1e-9;
    let r = v.round();
    if (v - r).abs() < EPS { r } else { v }
}

impl Default for ThresholdRatios {
    fn default() -> Self {
        Self { min: 0.2, max: 0.6 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub low: f64,
    pub high: f64,
}

/// Output of [`double_threshold`]. The image has every pixel outside both
/// sets zeroed.
#[derive(Debug, Clone, PartialEq)]
pub struct Classified {
    pub image: Image<Pixel>,
    pub thresholds: Thresholds,
    pub strong: BTreeSet<Coord>,
    pub weak: BTreeSet<Coord>,
}

/// Splits pixels into strong (`> high`) and weak (`low < v <= high`); all
/// others are zeroed. Consumes the image and hands it on with the sets.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip_all, fields(w = image.width(), h = image.height()))
)]
pub fn double_threshold(
    mut image: Image<Pixel>,
    ratios: ThresholdRatios,
) -> Result<Classified, Error> {
    image.as_view().ensure_non_empty()?;

    let peak = image.data().iter().map(|p| p.luma).max().unwrap_or(0);
    let thresholds = ratios.resolve(peak);

    let w = image.width();
    let mut strong = BTreeSet::new();
    let mut weak = BTreeSet::new();
    for (idx, px) in image.data_mut().iter_mut().enumerate() {
        let v = f64::from(px.luma);
        let coord = Coord::new(idx % w, idx / w);
        if v > thresholds.high {
            strong.insert(coord);
        } else if v > thresholds.low {
            weak.insert(coord);
        } else {
            px.luma = 0;
        }
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(
        peak,
        low = thresholds.low,
        high = thresholds.high,
        strong = strong.len(),
        weak = weak.len(),
        "double threshold"
    );

    Ok(Classified {
        image,
        thresholds,
        strong,
        weak,
    })
}

#[cfg(test)]
mod tests {
    use edgeefy_core::{Coord, Error, Image, Pixel};

    use super::{ThresholdRatios, double_threshold};

    #[test]
    fn ratios_are_validated() {
        assert!(ThresholdRatios::new(0.2, 0.6).is_ok());
        for (min, max) in [
            (0.6, 0.2),
            (0.4, 0.4),
            (0.0, 0.5),
            (0.2, 1.0),
            (-0.1, 0.5),
            (f64::NAN, 0.5),
        ] {
            assert!(matches!(
                ThresholdRatios::new(min, max),
                Err(Error::InvalidRatio { .. })
            ));
        }
        assert_eq!(ThresholdRatios::default(), ThresholdRatios::new(0.2, 0.6).unwrap());
    }

    #[test]
    fn boundaries_land_in_the_expected_sets() {
        // peak 200 -> high 120, low 40
        let values = [200u8, 121, 120, 41, 40, 7];
        let img = Image::from_vec(
            values.len(),
            1,
            values.iter().map(|&v| Pixel::opaque(v)).collect(),
        )
        .expect("valid image");

        let c = double_threshold(img, ThresholdRatios::default()).expect("non-empty");
        assert!((c.thresholds.high - 120.0).abs() < 1e-3);
        assert!((c.thresholds.low - 40.0).abs() < 1e-3);

        let strong: Vec<_> = c.strong.iter().map(|p| p.x).collect();
        let weak: Vec<_> = c.weak.iter().map(|p| p.x).collect();
        assert_eq!(strong, vec![0, 1]);
        assert_eq!(weak, vec![2, 3]);

        let lumas: Vec<u8> = c.image.data().iter().map(|p| p.luma).collect();
        assert_eq!(lumas, vec![200, 121, 120, 41, 0, 0]);
    }

    #[test]
    fn sets_are_disjoint_and_use_image_coordinates() {
        #[rustfmt::skip]
        let values = [
            0u8, 100, 0,
            30, 0, 60,
        ];
        let img = Image::from_vec(3, 2, values.iter().map(|&v| Pixel::opaque(v)).collect())
            .expect("valid image");
        let c = double_threshold(img, ThresholdRatios::new(0.25, 0.5).unwrap()).expect("non-empty");

        let strong: Vec<Coord> = c.strong.iter().copied().collect();
        let weak: Vec<Coord> = c.weak.iter().copied().collect();
        assert_eq!(strong, vec![Coord::new(1, 0), Coord::new(2, 1)]);
        assert_eq!(weak, vec![Coord::new(0, 1)]);
        assert!(c.strong.is_disjoint(&c.weak));
    }

    #[test]
    fn integer_products_sit_exactly_on_the_boundary() {
        // ratio 0.53 on peak 100 is 52.99999.. in f32 and 53.00000..1 in f64
        let img = Image::from_vec(2, 1, vec![Pixel::opaque(100), Pixel::opaque(53)])
            .expect("valid image");
        let c = double_threshold(img, ThresholdRatios::new(0.53, 0.9).unwrap()).expect("non-empty");
        assert_eq!(c.thresholds.low, 53.0);
        assert!(c.weak.is_empty());
        assert_eq!(c.image.data()[1].luma, 0);

        let t = ThresholdRatios::new(0.1, 0.29).unwrap().resolve(100);
        assert_eq!(t.high, 29.0);
    }

    #[test]
    fn boundaries_hold_for_every_integer_ratio_product() {
        for pct in 1u32..=99 {
            let ratio = f64::from(pct) / 100.0;
            for peak in 1u32..=255 {
                if (pct * peak) % 100 != 0 {
                    continue;
                }
                let at = (pct * peak / 100) as u8;
                let row = |v: u8| {
                    Image::from_vec(2, 1, vec![Pixel::opaque(peak as u8), Pixel::opaque(v)])
                        .expect("valid image")
                };
                let second = Coord::new(1, 0);

                // exactly min * peak: in neither set
                let as_min = ThresholdRatios::new(ratio, (ratio + 1.0) / 2.0).unwrap();
                let c = double_threshold(row(at), as_min).expect("non-empty");
                assert!(
                    !c.weak.contains(&second) && !c.strong.contains(&second),
                    "min ratio {ratio}, peak {peak}: {at} was kept"
                );

                // exactly max * peak: weak, not strong
                let as_max = ThresholdRatios::new(ratio / 2.0, ratio).unwrap();
                let c = double_threshold(row(at), as_max).expect("non-empty");
                assert!(
                    c.weak.contains(&second) && !c.strong.contains(&second),
                    "max ratio {ratio}, peak {peak}: {at} is not weak"
                );
            }
        }
    }

    #[test]
    fn black_image_has_no_edges() {
        let img = Image::new_fill(4, 4, Pixel::opaque(0));
        let c = double_threshold(img, ThresholdRatios::default()).expect("non-empty");
        assert!(c.strong.is_empty());
        assert!(c.weak.is_empty());
    }
}
