//! Exposure brightness matching.
//!
//! Responsibilities:
//!
//! - crop kernel windows around the PSF center (`kernel`)
//! - scan the brighter cube for the best-matching group (`matcher`)
//! - map the matcher over many science cubes (`batch`)

pub mod batch;
pub mod kernel;
pub mod matcher;

pub use batch::*;
pub use kernel::*;
pub use matcher::*;
