//! `coron-tools` library crate.
//!
//! The binary (`coron`) is a thin wrapper around this library so that:
//!
//! - the matcher and mass pipeline are testable without spawning processes
//! - reduction scripts can call them directly
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod astro;
pub mod brightness;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod image;
pub mod io;
pub mod math;
pub mod models;
pub mod report;
