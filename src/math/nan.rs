//! NaN-aware reductions over image regions.
//!
//! Detector frames carry NaN for invalid pixels, and the background filter
//! deliberately writes NaN over faint pixels, so every reduction used by the
//! matcher skips NaN samples.

use ndarray::{Array2, ArrayView2};

/// Sum of all non-NaN samples; `0.0` when every sample is NaN (or the view is empty).
pub fn nansum(values: ArrayView2<'_, f64>) -> f64 {
    values.iter().filter(|v| !v.is_nan()).sum()
}

/// Maximum of all non-NaN samples; NaN when there is none.
pub fn nanmax(values: ArrayView2<'_, f64>) -> f64 {
    values
        .iter()
        .copied()
        .filter(|v| !v.is_nan())
        .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |m| m.max(v))))
        .unwrap_or(f64::NAN)
}

/// Replace every sample at or below half the region maximum with NaN.
///
/// The threshold is `floor(nanmax / 2)`, matching integer-style halving of the
/// peak count. A region without any valid sample comes back all-NaN.
pub fn mask_below_half_max(values: ArrayView2<'_, f64>) -> Array2<f64> {
    let threshold = (nanmax(values) / 2.0).floor();
    values.mapv(|v| if v > threshold { v } else { f64::NAN })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn reductions_skip_nan() {
        let a = array![[1.0, f64::NAN], [3.0, -2.0]];
        assert_eq!(nansum(a.view()), 2.0);
        assert_eq!(nanmax(a.view()), 3.0);
    }

    #[test]
    fn all_nan_region_reduces_to_zero_sum_and_nan_max() {
        let a = array![[f64::NAN, f64::NAN]];
        assert_eq!(nansum(a.view()), 0.0);
        assert!(nanmax(a.view()).is_nan());
    }

    #[test]
    fn half_max_mask_keeps_only_the_core() {
        // max = 9 -> threshold floor(4.5) = 4; 4 itself is dropped.
        let a = array![[9.0, 4.0], [5.0, 1.0]];
        let m = mask_below_half_max(a.view());
        assert_eq!(m[[0, 0]], 9.0);
        assert!(m[[0, 1]].is_nan());
        assert_eq!(m[[1, 0]], 5.0);
        assert!(m[[1, 1]].is_nan());
    }
}
