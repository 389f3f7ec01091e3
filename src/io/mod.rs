//! Input/output helpers.
//!
//! - image cube JSON read/write (`cube`)
//! - match CSV and mass JSON exports (`export`)

pub mod cube;
pub mod export;

pub use cube::*;
pub use export::*;
