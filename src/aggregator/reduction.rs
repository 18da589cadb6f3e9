//! Per-slice reductions: energy (trapezoidal integral), peak and
//! peak-normalised profile.

/// Trapezoidal integral of uniformly spaced samples
///
/// `dx * (f[0]/2 + f[1] + ... + f[N-2] + f[N-1]/2)`; zero for fewer than
/// two samples.
pub fn trapezoid(values: &[f64], dx: f64) -> f64 {
    values
        .windows(2)
        .map(|pair| (pair[0] + pair[1]) * 0.5)
        .sum::<f64>()
        * dx
}

/// Largest sample. A NaN anywhere makes the result NaN.
pub fn peak(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::NEG_INFINITY, |acc, v| {
        if acc.is_nan() || v.is_nan() {
            f64::NAN
        } else {
            acc.max(v)
        }
    })
}

/// Divide every sample by `peak`; a zero peak returns the samples unchanged
pub fn normalize_by_peak(values: &[f64], peak: f64) -> Vec<f64> {
    if peak == 0.0 {
        return values.to_vec();
    }
    values.iter().map(|v| v / peak).collect()
}

/// Everything derived from one slice
#[derive(Debug, Clone, PartialEq)]
pub struct SliceReduction {
    pub energy: f64,
    pub peak: f64,
    pub normalized: Vec<f64>,
}

impl SliceReduction {
    pub fn from_values(values: &[f64], dx: f64) -> Self {
        let peak = peak(values);
        Self {
            energy: trapezoid(values, dx),
            peak,
            normalized: normalize_by_peak(values, peak),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trapezoid_triangle() {
        assert_eq!(trapezoid(&[0.0, 1.0, 0.0], 1.0), 1.0);
    }

    #[test]
    fn test_trapezoid_uses_step() {
        // 0.5 * (1/2 + 2 + 3 + 4/2) = 3.75
        assert_eq!(trapezoid(&[1.0, 2.0, 3.0, 4.0], 0.5), 3.75);
    }

    #[test]
    fn test_trapezoid_short_input() {
        assert_eq!(trapezoid(&[], 1.0), 0.0);
        assert_eq!(trapezoid(&[5.0], 1.0), 0.0);
    }

    #[test]
    fn test_peak() {
        assert_eq!(peak(&[0.0, 4.0, -1.0]), 4.0);
        assert_eq!(peak(&[-3.0, -2.0]), -2.0);
        assert!(peak(&[1.0, f64::NAN, 2.0]).is_nan());
    }

    #[test]
    fn test_normalize_by_peak() {
        assert_eq!(normalize_by_peak(&[0.0, 2.0, 1.0], 2.0), vec![0.0, 1.0, 0.5]);
    }

    #[test]
    fn test_normalize_zero_peak_is_identity() {
        let zeros = [0.0, 0.0, 0.0];
        let normalized = normalize_by_peak(&zeros, 0.0);
        assert_eq!(normalized, zeros.to_vec());
        assert!(normalized.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_slice_reduction() {
        let r = SliceReduction::from_values(&[0.0, 4.0, 0.0], 1.0);
        assert_eq!(r.energy, 4.0);
        assert_eq!(r.peak, 4.0);
        assert_eq!(r.normalized, vec![0.0, 1.0, 0.0]);
    }
}
