//! Shared domain types.
//!
//! These types are intentionally kept lightweight so they can be:
//!
//! - built directly from in-memory arrays by a reduction pipeline
//! - loaded from / exported to JSON and CSV by the `coron` binary

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use ndarray::{Array3, ArrayD, ArrayView2, Axis, Ix3, s};
use serde::{Deserialize, Serialize};

use crate::error::ToolError;

/// How reference and science kernel fluxes are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum MatchMethod {
    /// First group whose brightest kernel pixel exceeds the science peak.
    MaxPixel,
    /// Group minimizing the positive summed difference `science - reference`.
    Summed,
    /// As `Summed`, but pixels at or below half the crop maximum are ignored.
    ///
    /// Useful for MIRI, where the PSF lobes sit on a bright background.
    SummedNan,
}

impl MatchMethod {
    pub fn display_name(self) -> &'static str {
        match self {
            MatchMethod::MaxPixel => "MaxPixel",
            MatchMethod::Summed => "Summed",
            MatchMethod::SummedNan => "Summed+Nan",
        }
    }

    pub fn is_summed(self) -> bool {
        matches!(self, MatchMethod::Summed | MatchMethod::SummedNan)
    }

    pub fn masks_background(self) -> bool {
        self == MatchMethod::SummedNan
    }
}

/// A single integration of an exposure: `[group, y, x]` samples plus the
/// pixel the PSF is centered on.
///
/// The center is in 0-based array indices `(x, y)`; NaN samples are treated
/// as invalid and ignored by the NaN-aware reductions.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageCube {
    data: Array3<f64>,
    center: (usize, usize),
}

impl ImageCube {
    pub fn new(data: Array3<f64>, center: (usize, usize)) -> Result<Self, ToolError> {
        if data.len_of(Axis(0)) == 0 {
            return Err(ToolError::InvalidShape(
                "image cube has no groups".to_string(),
            ));
        }
        Ok(Self { data, center })
    }

    /// Build a cube from a 3D `[group, y, x]` or 4D `[integration, group, y, x]`
    /// array. Only the first integration of a 4D exposure is kept.
    pub fn from_exposure(data: ArrayD<f64>, center: (usize, usize)) -> Result<Self, ToolError> {
        let cube = match data.ndim() {
            3 => data.into_dimensionality::<Ix3>(),
            4 => {
                if data.shape()[0] == 0 {
                    return Err(ToolError::InvalidShape(
                        "exposure has no integrations".to_string(),
                    ));
                }
                data.index_axis_move(Axis(0), 0).into_dimensionality::<Ix3>()
            }
            n => {
                return Err(ToolError::InvalidShape(format!(
                    "expected a 3D or 4D exposure, got {n} dimension(s)"
                )));
            }
        }
        .map_err(|e| ToolError::InvalidShape(e.to_string()))?;
        Self::new(cube, center)
    }

    pub fn n_groups(&self) -> usize {
        self.data.len_of(Axis(0))
    }

    /// Frame shape as `(ny, nx)`.
    pub fn frame_shape(&self) -> (usize, usize) {
        (self.data.len_of(Axis(1)), self.data.len_of(Axis(2)))
    }

    pub fn center(&self) -> (usize, usize) {
        self.center
    }

    pub fn frame(&self, group: usize) -> ArrayView2<'_, f64> {
        self.data.slice(s![group, .., ..])
    }

    pub fn last_frame(&self) -> ArrayView2<'_, f64> {
        self.frame(self.n_groups() - 1)
    }

    pub fn data(&self) -> &Array3<f64> {
        &self.data
    }
}

/// Options for a single brightness-matching call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchParams {
    /// The science cube is the brighter one (swap the scan roles).
    pub science_is_brighter: bool,
    /// Half-width of the square kernel; the window side is `2 * radius + 1`.
    pub kernel_radius: usize,
    pub method: MatchMethod,
}

impl Default for MatchParams {
    fn default() -> Self {
        Self {
            science_is_brighter: false,
            kernel_radius: 15,
            method: MatchMethod::Summed,
        }
    }
}

/// The winning group and the flux value that selected it.
///
/// For summed methods `flux` is the minimized positive `nansum(science - reference)`;
/// for `MaxPixel` it is the reference kernel peak that first exceeded the science peak.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GroupMatch {
    pub index: usize,
    pub flux: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MatchResult {
    pub method: MatchMethod,
    pub best: Option<GroupMatch>,
    pub groups_scanned: usize,
}

impl MatchResult {
    pub fn index(&self) -> Option<usize> {
        self.best.map(|m| m.index)
    }
}

/// JWST instruments with tabulated coronagraphic evolutionary models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "UPPERCASE")]
pub enum Instrument {
    Miri,
    Niriss,
    Nircam,
}

impl Instrument {
    pub fn display_name(self) -> &'static str {
        match self {
            Instrument::Miri => "MIRI",
            Instrument::Niriss => "NIRISS",
            Instrument::Nircam => "NIRCAM",
        }
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Instrument {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "MIRI" => Ok(Instrument::Miri),
            "NIRISS" => Ok(Instrument::Niriss),
            "NIRCAM" => Ok(Instrument::Nircam),
            other => Err(ToolError::NoModelsFound(format!(
                "unrecognized instrument '{other}'"
            ))),
        }
    }
}

/// NIRCam coronagraphic masks with their own model grids.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NircamMask {
    Mask210R,
    #[default]
    Mask335R,
    Mask430R,
    MaskLwb,
    MaskSwb,
}

impl NircamMask {
    pub const ALL: [NircamMask; 5] = [
        NircamMask::Mask210R,
        NircamMask::Mask335R,
        NircamMask::Mask430R,
        NircamMask::MaskLwb,
        NircamMask::MaskSwb,
    ];

    pub fn name(self) -> &'static str {
        match self {
            NircamMask::Mask210R => "MASK210R",
            NircamMask::Mask335R => "MASK335R",
            NircamMask::Mask430R => "MASK430R",
            NircamMask::MaskLwb => "MASKLWB",
            NircamMask::MaskSwb => "MASKSWB",
        }
    }

    /// Case-insensitive lookup; `None` for names without a model grid.
    pub fn from_name(name: &str) -> Option<Self> {
        let upper = name.trim().to_uppercase();
        Self::ALL.into_iter().find(|m| m.name() == upper)
    }
}

/// Output of the mass interpolation, with the diagnostics needed to judge it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MassEstimate {
    pub filter: String,
    pub age_gyr: f64,
    pub target_magnitude: f64,
    /// Interpolated mass in solar masses (the native unit of the tables).
    pub mass_msun: f64,
    /// Interpolated mass in Jupiter masses.
    pub mass_mjup: f64,
    pub files_used: usize,
    pub files_skipped: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array4, IxDyn};

    #[test]
    fn four_dimensional_exposure_keeps_first_integration() {
        let mut data = Array4::<f64>::zeros((2, 3, 4, 5));
        data[[0, 2, 1, 1]] = 7.0;
        data[[1, 2, 1, 1]] = 99.0;
        let cube = ImageCube::from_exposure(data.into_dyn(), (1, 1)).unwrap();
        assert_eq!(cube.n_groups(), 3);
        assert_eq!(cube.frame_shape(), (4, 5));
        assert_eq!(cube.last_frame()[[1, 1]], 7.0);
    }

    #[test]
    fn two_dimensional_exposure_is_rejected() {
        let data = ArrayD::<f64>::zeros(IxDyn(&[4, 4]));
        let err = ImageCube::from_exposure(data, (0, 0)).unwrap_err();
        assert!(matches!(err, ToolError::InvalidShape(_)));
    }

    #[test]
    fn instrument_and_mask_names_are_case_insensitive() {
        assert_eq!("nircam".parse::<Instrument>().unwrap(), Instrument::Nircam);
        assert!("WFC3".parse::<Instrument>().is_err());
        assert_eq!(NircamMask::from_name("mask430r"), Some(NircamMask::Mask430R));
        assert_eq!(NircamMask::from_name("MASK999"), None);
    }
}
