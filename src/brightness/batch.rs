//! Matching one reference cube against several science cubes.
//!
//! Each science cube is an independent matcher call, so we map them in
//! parallel and return results in input order.

use rayon::prelude::*;

use crate::brightness::matcher::match_brightness;
use crate::domain::{ImageCube, MatchParams, MatchResult};
use crate::error::ToolError;

/// Match every science cube against `reference` with the same parameters.
///
/// The output has one entry per science cube, in the same order; a failure
/// for one cube does not prevent the others from being matched.
pub fn match_many(
    reference: &ImageCube,
    sciences: &[ImageCube],
    params: &MatchParams,
) -> Vec<Result<MatchResult, ToolError>> {
    sciences
        .par_iter()
        .map(|science| match_brightness(reference, science, params))
        .collect()
}
