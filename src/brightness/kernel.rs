//! Kernel windows around the PSF center.

use ndarray::{ArrayView2, s};

use crate::error::ToolError;

/// Crop the `(2 * radius + 1)`-wide square window centered on `center = (x, y)`.
///
/// Windows that run past the frame edge are clipped to the frame, so crops
/// near the border are smaller than nominal. A window that does not overlap
/// the frame at all is an [`ToolError::EmptyRegion`].
pub fn crop_kernel<'a>(
    frame: ArrayView2<'a, f64>,
    center: (usize, usize),
    radius: usize,
) -> Result<ArrayView2<'a, f64>, ToolError> {
    let (ny, nx) = frame.dim();
    let (cx, cy) = center;

    let y0 = cy.saturating_sub(radius).min(ny);
    let y1 = cy.saturating_add(radius).saturating_add(1).min(ny);
    let x0 = cx.saturating_sub(radius).min(nx);
    let x1 = cx.saturating_add(radius).saturating_add(1).min(nx);

    if y0 >= y1 || x0 >= x1 {
        return Err(ToolError::EmptyRegion(format!(
            "kernel of radius {radius} at (x={cx}, y={cy}) does not overlap the {ny}x{nx} frame"
        )));
    }

    Ok(frame.slice_move(s![y0..y1, x0..x1]))
}
