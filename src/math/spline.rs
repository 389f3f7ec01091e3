//! Linear interpolating spline with nearest-sample lookup.
//!
//! The evolutionary model pipeline does not evaluate the spline at the query
//! point. It evaluates the spline on a dense uniform grid spanning the data and
//! returns the sample whose abscissa is nearest the query:
//!
//! ```text
//! grid = linspace(min(x), max(x), steps)
//! i*   = argmin_i |grid_i - query|      (first index on ties)
//! out  = spline(grid_{i*})
//! ```
//!
//! Precision is therefore quantized to `(max - min) / (steps - 1)`, and queries
//! outside `[min, max]` snap to the nearest endpoint instead of extrapolating.

use crate::error::ToolError;

/// Default number of grid samples used by [`interpolate_nearest`].
pub const DEFAULT_STEPS: usize = 1000;

/// Generate `steps` evenly spaced points from `start` to `stop` (inclusive).
///
/// Mirrors the usual `linspace` layout: `start + i * step`, with the final
/// sample pinned to `stop` exactly.
pub fn linspace(start: f64, stop: f64, steps: usize) -> Vec<f64> {
    match steps {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (steps as f64 - 1.0);
            let mut out: Vec<f64> = (0..steps).map(|i| i as f64 * step + start).collect();
            out[steps - 1] = stop;
            out
        }
    }
}

/// A degree-1 interpolating spline through a set of `(x, y)` knots.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearSpline {
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl LinearSpline {
    /// Fit the spline through the given points.
    ///
    /// Points are sorted by `x`; when an abscissa repeats, the first point
    /// (after a stable sort) is kept. At least two distinct finite abscissae
    /// are required.
    pub fn fit(xs: &[f64], ys: &[f64]) -> Result<Self, ToolError> {
        if xs.len() != ys.len() {
            return Err(ToolError::InvalidShape(format!(
                "spline knots have {} x values but {} y values",
                xs.len(),
                ys.len()
            )));
        }
        if xs.iter().chain(ys).any(|v| !v.is_finite()) {
            return Err(ToolError::InvalidInput(
                "spline knots must be finite".to_string(),
            ));
        }

        let mut points: Vec<(f64, f64)> = xs.iter().copied().zip(ys.iter().copied()).collect();
        points.sort_by(|a, b| a.0.total_cmp(&b.0));
        points.dedup_by(|later, earlier| later.0 == earlier.0);

        if points.len() < 2 {
            return Err(ToolError::InsufficientData(format!(
                "need at least 2 distinct points for a spline fit, got {}",
                points.len()
            )));
        }

        let (xs, ys) = points.into_iter().unzip();
        Ok(Self { xs, ys })
    }

    pub fn x_min(&self) -> f64 {
        self.xs[0]
    }

    pub fn x_max(&self) -> f64 {
        self.xs[self.xs.len() - 1]
    }

    /// Evaluate the spline at `x`. Outside the knot range the end segments
    /// are extended linearly.
    pub fn eval(&self, x: f64) -> f64 {
        let n = self.xs.len();
        // Index of the segment [k, k + 1] containing x, clamped to the ends.
        let k = self.xs.partition_point(|&xi| xi <= x).clamp(1, n - 1) - 1;
        let (x0, x1) = (self.xs[k], self.xs[k + 1]);
        let (y0, y1) = (self.ys[k], self.ys[k + 1]);
        y0 + (y1 - y0) * (x - x0) / (x1 - x0)
    }

    /// Evaluate on `linspace(x_min, x_max, steps)` and return the value at the
    /// sample nearest `query`.
    pub fn nearest_sample(&self, query: f64, steps: usize) -> Result<f64, ToolError> {
        if steps == 0 {
            return Err(ToolError::InvalidInput(
                "interpolation needs at least one grid sample".to_string(),
            ));
        }
        if !query.is_finite() {
            return Err(ToolError::InvalidInput(format!(
                "interpolation query must be finite, got {query}"
            )));
        }

        let grid = linspace(self.x_min(), self.x_max(), steps);
        let mut best = 0;
        let mut best_dist = (grid[0] - query).abs();
        for (i, &g) in grid.iter().enumerate().skip(1) {
            let dist = (g - query).abs();
            if dist < best_dist {
                best = i;
                best_dist = dist;
            }
        }

        Ok(self.eval(grid[best]))
    }
}

/// Fit a linear spline through `(xs, ys)` and return its nearest-sample value
/// at `query` using `steps` grid points.
pub fn interpolate_nearest(query: f64, xs: &[f64], ys: &[f64], steps: usize) -> Result<f64, ToolError> {
    LinearSpline::fit(xs, ys)?.nearest_sample(query, steps)
}
