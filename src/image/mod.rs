//! 2D image utilities.

pub mod mask;

pub use mask::*;
