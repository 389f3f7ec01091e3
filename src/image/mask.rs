//! Binary masks over 2D images.

use ndarray::{Array2, ArrayView2, s};

use crate::error::ToolError;

/// Cut the masked region out of `data`.
///
/// The mask is binarized first: values `> 0` keep a pixel, everything else
/// (zero, negative, NaN) drops it. The result is the bounding box of the kept
/// pixels, with dropped pixels inside the box set to zero.
pub fn cookie_cutter(data: ArrayView2<'_, f64>, mask: ArrayView2<'_, f64>) -> Result<Array2<f64>, ToolError> {
    if data.dim() != mask.dim() {
        return Err(ToolError::InvalidShape(format!(
            "data is {:?} but mask is {:?}",
            data.dim(),
            mask.dim()
        )));
    }

    let binary = mask.mapv(|v| if v > 0.0 { 1.0 } else { 0.0 });

    let mut bbox: Option<(usize, usize, usize, usize)> = None;
    for ((y, x), &v) in binary.indexed_iter() {
        if v == 0.0 {
            continue;
        }
        bbox = Some(match bbox {
            None => (y, y, x, x),
            Some((y0, y1, x0, x1)) => (y0.min(y), y1.max(y), x0.min(x), x1.max(x)),
        });
    }
    let (y0, y1, x0, x1) = bbox.ok_or_else(|| {
        ToolError::EmptyRegion("mask does not select any pixel".to_string())
    })?;

    Ok(&data.slice(s![y0..=y1, x0..=x1]) * &binary.slice(s![y0..=y1, x0..=x1]))
}

/// Binary disk of `radius` pixels around `center = (x, y)`.
pub fn circular_mask(shape: (usize, usize), center: (f64, f64), radius: f64) -> Array2<f64> {
    let (cx, cy) = center;
    let r2 = radius * radius;
    Array2::from_shape_fn(shape, |(y, x)| {
        let dx = x as f64 - cx;
        let dy = y as f64 - cy;
        if dx * dx + dy * dy <= r2 { 1.0 } else { 0.0 }
    })
}

/// Binary rectangle covering rows `y_range` and columns `x_range` (half-open, clipped to the frame).
pub fn rectangular_mask(
    shape: (usize, usize),
    y_range: std::ops::Range<usize>,
    x_range: std::ops::Range<usize>,
) -> Array2<f64> {
    Array2::from_shape_fn(shape, |(y, x)| {
        if y_range.contains(&y) && x_range.contains(&x) { 1.0 } else { 0.0 }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array2, array};

    #[test]
    fn cuts_bounding_box_and_zeroes_outside_the_mask() {
        let data = Array2::from_shape_fn((5, 5), |(y, x)| (y * 5 + x) as f64);
        let mut mask = Array2::<f64>::zeros((5, 5));
        mask[[1, 2]] = 1.0;
        mask[[2, 1]] = 0.5;
        mask[[2, 3]] = f64::NAN;
        mask[[3, 3]] = 3.0;

        let out = cookie_cutter(data.view(), mask.view()).unwrap();
        // Rows 1..=3, columns 1..=3.
        assert_eq!(out.dim(), (3, 3));
        assert_eq!(out[[0, 1]], 7.0);
        assert_eq!(out[[1, 0]], 11.0);
        assert_eq!(out[[2, 2]], 18.0);
        // NaN in the mask drops the pixel.
        assert_eq!(out[[1, 2]], 0.0);
    }

    #[test]
    fn mismatched_shapes_are_rejected() {
        let data = Array2::<f64>::zeros((4, 4));
        let mask = Array2::<f64>::ones((4, 5));
        let err = cookie_cutter(data.view(), mask.view()).unwrap_err();
        assert!(matches!(err, ToolError::InvalidShape(_)));
    }

    #[test]
    fn empty_mask_is_an_empty_region() {
        let data = array![[1.0, 2.0], [3.0, 4.0]];
        let mask = array![[0.0, -1.0], [f64::NAN, 0.0]];
        let err = cookie_cutter(data.view(), mask.view()).unwrap_err();
        assert!(matches!(err, ToolError::EmptyRegion(_)));
    }

    #[test]
    fn circular_mask_cut_is_square() {
        let mask = circular_mask((11, 11), (5.0, 5.0), 3.0);
        assert_eq!(mask[[5, 8]], 1.0);
        assert_eq!(mask[[8, 8]], 0.0);
        let data = Array2::<f64>::ones((11, 11));
        let out = cookie_cutter(data.view(), mask.view()).unwrap();
        assert_eq!(out.dim(), (7, 7));
        assert_eq!(out.sum(), mask.sum());
    }

    #[test]
    fn rectangular_mask_is_clipped() {
        let mask = rectangular_mask((4, 4), 2..10, 1..3);
        assert_eq!(mask.sum(), 4.0);
        assert_eq!(mask[[3, 2]], 1.0);
        assert_eq!(mask[[1, 2]], 0.0);
    }
}
