/// A gray pixel with an opacity channel.
///
/// Only `luma` takes part in the edge computations; `alpha` is carried
/// through every stage untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Pixel {
    pub luma: u8,
    pub alpha: u8,
}

impl Pixel {
    pub const fn new(luma: u8, alpha: u8) -> Self {
        Self { luma, alpha }
    }

    pub const fn opaque(luma: u8) -> Self {
        Self { luma, alpha: 255 }
    }

    /// Same opacity, new intensity.
    pub const fn with_luma(self, luma: u8) -> Self {
        Self {
            luma,
            alpha: self.alpha,
        }
    }
}

impl From<Pixel> for f32 {
    fn from(px: Pixel) -> Self {
        px.luma as f32
    }
}

/// Rounds to nearest and saturates into the `u8` intensity range.
#[inline]
pub fn saturate_u8(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::{Pixel, saturate_u8};

    #[test]
    fn with_luma_keeps_opacity() {
        let px = Pixel::new(10, 77).with_luma(200);
        assert_eq!(px, Pixel::new(200, 77));
        assert_eq!(Pixel::opaque(3).alpha, 255);
    }

    #[test]
    fn saturate_rounds_and_clamps() {
        assert_eq!(saturate_u8(-4.0), 0);
        assert_eq!(saturate_u8(99.49), 99);
        assert_eq!(saturate_u8(99.5), 100);
        assert_eq!(saturate_u8(254.9999), 255);
        assert_eq!(saturate_u8(360.6), 255);
        assert_eq!(f32::from(Pixel::new(42, 0)), 42.0);
    }
}
