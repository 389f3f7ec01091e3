//! Mathematical utilities: NaN-aware reductions and nearest-sample spline interpolation.

pub mod nan;
pub mod spline;

pub use nan::*;
pub use spline::*;
