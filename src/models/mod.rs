//! Evolutionary model tables and the magnitude → mass pipeline.
//!
//! - `table`: parse one model file
//! - `library`: find the model files for an instrument/mask
//! - `mass`: interpolate a mass from an age and a magnitude

pub mod library;
pub mod mass;
pub mod table;

pub use library::*;
pub use mass::*;
pub use table::*;
