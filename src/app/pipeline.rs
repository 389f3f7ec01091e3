//! Shared workflows behind the `match`, `demo` and `mass` subcommands.
//!
//! `match` and `demo` differ only in where the cubes come from, so both end
//! in [`match_cubes`]:
//! cubes -> parallel matching -> one `MatchRow` per science cube

use std::path::{Path, PathBuf};

use crate::brightness::match_many;
use crate::domain::{ImageCube, Instrument, MassEstimate, MatchParams};
use crate::error::ToolError;
use crate::io::cube::read_cube_json;
use crate::io::export::MatchRow;
use crate::models::{ModelLibrary, estimate_mass_detailed, list_model_files};

/// Outputs of a single matching run.
#[derive(Debug, Clone)]
pub struct MatchRun {
    pub params: MatchParams,
    pub rows: Vec<MatchRow>,
}

/// Load the reference and science cubes from disk and match them.
///
/// A reference that fails to load aborts the run; a science cube that fails
/// to load gets an error row and the remaining cubes are still matched.
pub fn run_match(reference: &Path, sciences: &[PathBuf], params: &MatchParams) -> Result<MatchRun, ToolError> {
    let reference_cube = read_cube_json(reference)?;
    log::info!(
        "reference '{}': {} group(s), frame {:?}",
        reference.display(),
        reference_cube.n_groups(),
        reference_cube.frame_shape()
    );

    let mut labels = Vec::new();
    let mut cubes = Vec::new();
    let mut failed = Vec::new();
    for path in sciences {
        let label = path.display().to_string();
        match read_cube_json(path) {
            Ok(cube) => {
                labels.push(label);
                cubes.push(cube);
            }
            Err(err) => {
                log::warn!("could not load science cube '{label}': {err}");
                failed.push(MatchRow::from_result(label, &Err(err)));
            }
        }
    }

    let mut run = match_cubes(&reference_cube, &labels, &cubes, params);
    run.rows.extend(failed);
    Ok(run)
}

/// Match already-loaded cubes; `labels[i]` names `sciences[i]`.
pub fn match_cubes(reference: &ImageCube, labels: &[String], sciences: &[ImageCube], params: &MatchParams) -> MatchRun {
    let results = match_many(reference, sciences, params);
    let rows = labels
        .iter()
        .zip(&results)
        .map(|(label, result)| MatchRow::from_result(label.clone(), result))
        .collect();

    MatchRun { params: *params, rows }
}

/// Where the mass pipeline finds its model tables.
#[derive(Debug, Clone)]
pub enum ModelSource {
    /// An explicit directory of `*.txt` tables.
    Directory(PathBuf),
    /// The ATMO 2020 tree under `ATMO_2020_MODELS`.
    Library { instrument: Instrument, mask: String },
}

impl ModelSource {
    pub fn model_files(&self) -> Result<Vec<PathBuf>, ToolError> {
        match self {
            ModelSource::Directory(dir) => list_model_files(dir),
            ModelSource::Library { instrument, mask } => {
                ModelLibrary::from_env()?.model_files(*instrument, Some(mask))
            }
        }
    }
}

/// Resolve the model tables and interpolate a mass.
pub fn run_mass(
    age_myr: f64,
    target_magnitude: f64,
    filter_name: &str,
    source: &ModelSource,
) -> Result<MassEstimate, ToolError> {
    let files = source.model_files()?;
    log::info!("interpolating over {} model file(s)", files.len());
    estimate_mass_detailed(age_myr, target_magnitude, filter_name, &files)
}
