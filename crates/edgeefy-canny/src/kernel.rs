use edgeefy_core::Error;

/// Normalized 1D binomial smoothing kernel (discrete Gaussian approximation).
///
/// Conventions:
/// - `len = 2 * radius + 1`, built from row `len - 1` of Pascal's triangle.
/// - `weights` is normalized so `sum(weights) ~= 1`, which keeps mean
///   brightness unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct BinomialKernel1D {
    pub radius: usize,
    pub weights: Vec<f32>,
}

impl BinomialKernel1D {
    pub fn new(len: usize) -> Result<Self, Error> {
        if len % 2 == 0 {
            return Err(Error::EvenLength { len });
        }

        let row = pascal_row(len - 1);
        let sum: f64 = row.iter().sum();
        let weights = row.iter().map(|&c| (c / sum) as f32).collect();

        Ok(Self {
            radius: len / 2,
            weights,
        })
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Inner product of `samples` with the weights; lengths must match.
    #[inline]
    pub fn apply(&self, samples: &[f32]) -> f32 {
        debug_assert_eq!(samples.len(), self.weights.len());
        samples
            .iter()
            .zip(&self.weights)
            .map(|(&s, &w)| s * w)
            .sum()
    }
}

/// `C(n, i)` for `i` in `0..=n`, built multiplicatively in `f64`.
fn pascal_row(n: usize) -> Vec<f64> {
    let mut row = Vec::with_capacity(n + 1);
    let mut c = 1.0f64;
    row.push(c);
    for i in 1..=n {
        c = c * (n + 1 - i) as f64 / i as f64;
        row.push(c);
    }
    row
}

#[cfg(test)]
mod tests {
    use edgeefy_core::Error;

    use super::{BinomialKernel1D, pascal_row};

    #[test]
    fn pascal_rows_match_binomials() {
        assert_eq!(pascal_row(0), vec![1.0]);
        assert_eq!(pascal_row(4), vec![1.0, 4.0, 6.0, 4.0, 1.0]);
        assert_eq!(pascal_row(6), vec![1.0, 6.0, 15.0, 20.0, 15.0, 6.0, 1.0]);
    }

    #[test]
    fn kernels_have_requested_length_and_unit_sum() {
        for len in [1usize, 3, 5, 7, 9, 15, 31, 61] {
            let k = BinomialKernel1D::new(len).expect("odd length");
            assert_eq!(k.len(), len);
            assert_eq!(k.radius, len / 2);
            let sum: f32 = k.weights.iter().sum();
            assert!((sum - 1.0).abs() < 1e-5, "len {len}: sum {sum}");
        }
    }

    #[test]
    fn five_tap_kernel_is_binomial_over_sixteen() {
        let k = BinomialKernel1D::new(5).expect("odd length");
        let expected = [1.0, 4.0, 6.0, 4.0, 1.0].map(|v: f32| v / 16.0);
        for (w, e) in k.weights.iter().zip(expected) {
            assert!((w - e).abs() < 1e-7);
        }
        assert!((k.apply(&[16.0; 5]) - 16.0).abs() < 1e-5);
    }

    #[test]
    fn even_or_zero_lengths_fail() {
        assert_eq!(BinomialKernel1D::new(0), Err(Error::EvenLength { len: 0 }));
        assert_eq!(BinomialKernel1D::new(4), Err(Error::EvenLength { len: 4 }));
    }
}
