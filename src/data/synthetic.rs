//! Synthetic up-the-ramp image cubes.
//!
//! Each group holds a circular Gaussian PSF on a flat background; the signal
//! accumulates linearly with the group number, as in a non-destructive read
//! sequence. Gaussian read noise is drawn from a seeded RNG so a given seed
//! always produces the same cube.

use ndarray::Array3;
use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::domain::ImageCube;
use crate::error::ToolError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SyntheticCubeParams {
    pub groups: usize,
    /// Frame side length (frames are square).
    pub size: usize,
    /// PSF center `(x, y)`; also the cube's center pixel.
    pub center: (usize, usize),
    /// PSF peak counts accumulated per group.
    pub peak_rate: f64,
    /// Gaussian PSF width in pixels.
    pub sigma_px: f64,
    /// Background counts accumulated per group.
    pub background_rate: f64,
    /// Standard deviation of the per-read noise.
    pub read_noise: f64,
}

impl Default for SyntheticCubeParams {
    fn default() -> Self {
        Self {
            groups: 10,
            size: 64,
            center: (32, 32),
            peak_rate: 1000.0,
            sigma_px: 2.5,
            background_rate: 5.0,
            read_noise: 1.0,
        }
    }
}

pub fn synthetic_cube(params: &SyntheticCubeParams, seed: u64) -> Result<ImageCube, ToolError> {
    if params.groups == 0 || params.size == 0 {
        return Err(ToolError::InvalidInput(
            "synthetic cube needs at least one group and one pixel".to_string(),
        ));
    }
    if !(params.sigma_px.is_finite() && params.sigma_px > 0.0) {
        return Err(ToolError::InvalidInput(format!(
            "PSF sigma must be finite and > 0, got {}",
            params.sigma_px
        )));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let noise = Normal::new(0.0, params.read_noise)
        .map_err(|e| ToolError::InvalidInput(format!("read noise distribution error: {e}")))?;

    let (cx, cy) = (params.center.0 as f64, params.center.1 as f64);
    let two_sigma_sq = 2.0 * params.sigma_px * params.sigma_px;

    let mut data = Array3::zeros((params.groups, params.size, params.size));
    for ((g, y, x), value) in data.indexed_iter_mut() {
        let r2 = (x as f64 - cx).powi(2) + (y as f64 - cy).powi(2);
        let rate = params.peak_rate * (-r2 / two_sigma_sq).exp() + params.background_rate;
        *value = (g + 1) as f64 * rate + noise.sample(&mut rng);
    }

    ImageCube::new(data, params.center)
}

/// A reference cube and a brighter-per-group science cube with fewer groups.
///
/// The science ramp rises 1.3x faster over 6 groups, so its final group holds
/// 7.8 reference-group units of signal.
pub fn synthetic_pair(seed: u64) -> Result<(ImageCube, ImageCube), ToolError> {
    let reference = synthetic_cube(&SyntheticCubeParams::default(), seed)?;
    let base = SyntheticCubeParams::default();
    let science = synthetic_cube(
        &SyntheticCubeParams {
            groups: 6,
            peak_rate: base.peak_rate * 1.3,
            background_rate: base.background_rate * 1.3,
            ..base
        },
        seed.wrapping_add(1),
    )?;
    Ok((reference, science))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brightness::find_matching_group;
    use crate::domain::MatchMethod;

    #[test]
    fn same_seed_same_cube() {
        let params = SyntheticCubeParams {
            size: 16,
            center: (8, 8),
            ..SyntheticCubeParams::default()
        };
        let a = synthetic_cube(&params, 11).unwrap();
        let b = synthetic_cube(&params, 11).unwrap();
        let c = synthetic_cube(&params, 12).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn signal_ramps_up_with_group() {
        let cube = synthetic_cube(
            &SyntheticCubeParams {
                read_noise: 0.0,
                ..SyntheticCubeParams::default()
            },
            0,
        )
        .unwrap();
        let first = cube.frame(0)[[32, 32]];
        let last = cube.last_frame()[[32, 32]];
        assert!((first - 1005.0).abs() < 1e-9);
        assert!((last - 10.0 * 1005.0).abs() < 1e-9);
    }

    #[test]
    fn pair_matches_the_group_below_the_science_level() {
        let (reference, science) = synthetic_pair(7).unwrap();
        let idx = find_matching_group(&reference, &science, false, 15, MatchMethod::Summed).unwrap();
        // Science final group = 7.8 units; group 6 holds 7 units.
        assert_eq!(idx, Some(6));
        let idx = find_matching_group(&reference, &science, false, 15, MatchMethod::MaxPixel).unwrap();
        assert_eq!(idx, Some(7));
    }

    #[test]
    fn rejects_degenerate_parameters() {
        let params = SyntheticCubeParams {
            groups: 0,
            ..SyntheticCubeParams::default()
        };
        assert!(synthetic_cube(&params, 0).is_err());
    }
}
