//! Domain types used throughout the crate.
//!
//! This module defines:
//!
//! - image cubes and brightness-matching options/results (`ImageCube`, `MatchParams`, `MatchResult`)
//! - instrument and coronagraph selections (`Instrument`, `NircamMask`)
//! - mass interpolation outputs (`MassEstimate`)

pub mod types;

pub use types::*;
