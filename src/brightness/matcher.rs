//! Group-matching search between a reference and a science cube.
//!
//! The reference and science exposures of a coronagraphic sequence rarely
//! have the same count level: spectral type and the number of groups per
//! integration both shift the flux. Here we scan the brighter cube group by
//! group and pick the group whose kernel flux best matches the final group of
//! the fainter cube. The returned index can be used to truncate the brighter
//! cube before PSF subtraction.

use ndarray::{Array2, ArrayView2};

use crate::brightness::kernel::crop_kernel;
use crate::domain::{GroupMatch, ImageCube, MatchMethod, MatchParams, MatchResult};
use crate::error::ToolError;
use crate::math::{mask_below_half_max, nanmax, nansum};

/// Run the matcher and return the full result (winning group and flux).
pub fn match_brightness(
    reference: &ImageCube,
    science: &ImageCube,
    params: &MatchParams,
) -> Result<MatchResult, ToolError> {
    if params.kernel_radius == 0 {
        return Err(ToolError::InvalidInput(
            "kernel radius must be at least 1".to_string(),
        ));
    }

    // The scanned cube is always the brighter one.
    let (reference, science) = if params.science_is_brighter {
        (science, reference)
    } else {
        (reference, science)
    };

    if reference.frame_shape() != science.frame_shape() {
        return Err(ToolError::InvalidShape(format!(
            "reference frames are {:?} but science frames are {:?}",
            reference.frame_shape(),
            science.frame_shape()
        )));
    }

    let method = params.method;
    let center = reference.center();
    let radius = params.kernel_radius;

    let science_crop = prepare_crop(crop_kernel(science.last_frame(), center, radius)?, method);
    let science_peak = nanmax(science_crop.view());

    let mut best: Option<GroupMatch> = None;
    let mut groups_scanned = 0;

    for group in 0..reference.n_groups() {
        groups_scanned += 1;
        let reference_crop = prepare_crop(crop_kernel(reference.frame(group), center, radius)?, method);

        match method {
            MatchMethod::MaxPixel => {
                let reference_peak = nanmax(reference_crop.view());
                log::debug!("group {group}: science peak {science_peak}, reference peak {reference_peak}");
                if science_peak < reference_peak {
                    best = Some(GroupMatch {
                        index: group,
                        flux: reference_peak,
                    });
                    break;
                }
            }
            MatchMethod::Summed | MatchMethod::SummedNan => {
                let summed = nansum((&science_crop - &reference_crop).view());
                log::debug!("group {group}: summed difference {summed}");
                // Non-positive sums mean the reference is over-subtracting.
                if summed > 0.0 && best.is_none_or(|b| summed < b.flux) {
                    best = Some(GroupMatch {
                        index: group,
                        flux: summed,
                    });
                }
            }
        }
    }

    match best {
        Some(m) => log::info!(
            "Optimized groups using {}: {} (flux {:.4}, {groups_scanned} group(s) scanned)",
            method.display_name(),
            m.index,
            m.flux
        ),
        None => log::info!(
            "Optimized groups using {}: none ({groups_scanned} group(s) scanned)",
            method.display_name()
        ),
    }

    Ok(MatchResult {
        method,
        best,
        groups_scanned,
    })
}

/// Index of the reference group that best matches the science brightness.
///
/// `None` when no group satisfies the method's criterion.
pub fn find_matching_group(
    reference: &ImageCube,
    science: &ImageCube,
    science_is_brighter: bool,
    kernel_radius: usize,
    method: MatchMethod,
) -> Result<Option<usize>, ToolError> {
    let params = MatchParams {
        science_is_brighter,
        kernel_radius,
        method,
    };
    Ok(match_brightness(reference, science, &params)?.index())
}

fn prepare_crop(crop: ArrayView2<'_, f64>, method: MatchMethod) -> Array2<f64> {
    if method.masks_background() {
        mask_below_half_max(crop)
    } else {
        crop.to_owned()
    }
}
