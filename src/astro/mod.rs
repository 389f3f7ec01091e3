//! Small astrophysics helpers used alongside the reduction tools.
//!
//! - colour temperature and Wien peak (`photometry`)
//! - sky separations and arcsec/AU projection (`separation`)

pub mod photometry;
pub mod separation;

pub use photometry::*;
pub use separation::*;
