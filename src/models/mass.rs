//! Magnitude → mass conversion through evolutionary model tables.
//!
//! Two nested nearest-sample spline interpolations:
//!
//! 1. per model file (one mass track each): magnitude as a function of age,
//!    evaluated at the target age
//! 2. across files: mass as a function of the magnitudes from step 1,
//!    evaluated at the target magnitude
//!
//! Ages enter in Myr and the tables are in Gyr. Masses come out of the tables
//! in solar masses and are reported in Jupiter masses.

use std::path::Path;

use crate::domain::{Instrument, MassEstimate};
use crate::error::ToolError;
use crate::math::{DEFAULT_STEPS, interpolate_nearest};
use crate::models::library::ModelLibrary;
use crate::models::table::{ModelTable, strip_zero_pairs};

/// Nominal solar mass (IAU 2015), kg.
pub const M_SUN_KG: f64 = 1.988409870698051e30;
/// Nominal Jupiter mass (IAU 2015), kg.
pub const M_JUP_KG: f64 = 1.8981245973360505e27;

pub fn msun_to_mjup(mass_msun: f64) -> f64 {
    mass_msun * M_SUN_KG / M_JUP_KG
}

/// Interpolated mass in Jupiter masses.
pub fn estimate_mass<P: AsRef<Path>>(
    age_myr: f64,
    target_magnitude: f64,
    filter_name: &str,
    model_table_paths: &[P],
) -> Result<f64, ToolError> {
    Ok(estimate_mass_detailed(age_myr, target_magnitude, filter_name, model_table_paths)?.mass_mjup)
}

/// Resolve the model files for an instrument/mask and estimate the mass.
pub fn estimate_mass_for(
    age_myr: f64,
    target_magnitude: f64,
    filter_name: &str,
    library: &ModelLibrary,
    instrument: Instrument,
    mask: Option<&str>,
) -> Result<MassEstimate, ToolError> {
    let files = library.model_files(instrument, mask)?;
    estimate_mass_detailed(age_myr, target_magnitude, filter_name, &files)
}

/// Full mass estimate with per-call diagnostics.
pub fn estimate_mass_detailed<P: AsRef<Path>>(
    age_myr: f64,
    target_magnitude: f64,
    filter_name: &str,
    model_table_paths: &[P],
) -> Result<MassEstimate, ToolError> {
    if !(age_myr.is_finite() && age_myr > 0.0) {
        return Err(ToolError::InvalidInput(format!(
            "age must be finite and > 0 Myr, got {age_myr}"
        )));
    }
    if !target_magnitude.is_finite() {
        return Err(ToolError::InvalidInput(format!(
            "target magnitude must be finite, got {target_magnitude}"
        )));
    }
    if model_table_paths.is_empty() {
        return Err(ToolError::NoModelsFound(
            "no model files were supplied".to_string(),
        ));
    }

    let age_gyr = age_myr / 1000.0;
    let mut mag_mass: Vec<(f64, f64)> = Vec::with_capacity(model_table_paths.len());
    let mut skipped = 0usize;

    for path in model_table_paths {
        let table = ModelTable::load(path.as_ref())?;
        match track_magnitude_at(&table, age_gyr, filter_name)? {
            Some(pair) => mag_mass.push(pair),
            None => {
                skipped += 1;
                log::debug!(
                    "skipping '{}': filtered ages do not cover {age_gyr} Gyr",
                    table.path().display()
                );
            }
        }
    }

    log::info!(
        "{skipped} file(s) were skipped during the interpolation since the tabulated data did not contain the age ({age_gyr} Gyr)"
    );

    if mag_mass.is_empty() {
        return Err(ToolError::NoOverlap { age_gyr, skipped });
    }

    mag_mass.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.total_cmp(&b.1)));
    let (mags, masses): (Vec<f64>, Vec<f64>) = mag_mass.iter().copied().unzip();

    let mass_msun = interpolate_nearest(target_magnitude, &mags, &masses, DEFAULT_STEPS)?;
    let mass_mjup = msun_to_mjup(mass_msun);
    log::info!("Interpolated mass at {target_magnitude} mag: {mass_mjup:.4} MJup ({mass_msun:.6} Msun)");

    Ok(MassEstimate {
        filter: filter_name.trim().to_uppercase(),
        age_gyr,
        target_magnitude,
        mass_msun,
        mass_mjup,
        files_used: mag_mass.len(),
        files_skipped: skipped,
    })
}

/// `(magnitude at age_gyr, track mass)` for one table, or `None` when the
/// table's valid ages do not cover the query.
///
/// The raw range check uses the first and last tabulated rows, which assumes
/// the file is sorted by age. Falling outside it aborts the whole estimate.
fn track_magnitude_at(
    table: &ModelTable,
    age_gyr: f64,
    filter_name: &str,
) -> Result<Option<(f64, f64)>, ToolError> {
    let ages = table.ages()?;
    let (first, last) = (ages[0], ages[ages.len() - 1]);
    if age_gyr < first || age_gyr > last {
        return Err(ToolError::AgeRangeExceeded {
            age_gyr,
            min: first,
            max: last,
            path: table.path().to_path_buf(),
        });
    }

    let mags = table.column(filter_name)?;
    let mass = table.track_mass()?;
    let (ages, mags) = strip_zero_pairs(&ages, &mags);

    let (min_age, max_age) = ages
        .iter()
        .fold(None, |acc: Option<(f64, f64)>, &a| match acc {
            None => Some((a, a)),
            Some((lo, hi)) => Some((lo.min(a), hi.max(a))),
        })
        .ok_or_else(|| {
            ToolError::InsufficientData(format!(
                "'{}' has no non-zero {} magnitudes",
                table.path().display(),
                filter_name.trim().to_uppercase()
            ))
        })?;

    if age_gyr < min_age || age_gyr > max_age {
        return Ok(None);
    }

    let magnitude = interpolate_nearest(age_gyr, &ages, &mags, DEFAULT_STEPS)?;
    Ok(Some((magnitude, mass)))
}
