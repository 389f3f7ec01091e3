//! Read/write image cube JSON files.
//!
//! FITS reading is left to the reduction pipeline; the `coron` binary works
//! on a minimal JSON representation instead:
//!
//! ```json
//! { "center": [cx, cy], "shape": [groups, ny, nx], "data": [0.0, null, ...] }
//! ```
//!
//! `shape` may also be 4D (`[integrations, groups, ny, nx]`); `data` is
//! row-major and `null` encodes an invalid (NaN) sample.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use ndarray::{ArrayD, IxDyn};
use serde::{Deserialize, Serialize};

use crate::domain::ImageCube;
use crate::error::ToolError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CubeFile {
    /// Center pixel `[x, y]` (0-based).
    pub center: [usize; 2],
    pub shape: Vec<usize>,
    pub data: Vec<Option<f64>>,
}

impl CubeFile {
    pub fn from_cube(cube: &ImageCube) -> Self {
        let (cx, cy) = cube.center();
        Self {
            center: [cx, cy],
            shape: cube.data().shape().to_vec(),
            data: cube
                .data()
                .iter()
                .map(|&v| if v.is_nan() { None } else { Some(v) })
                .collect(),
        }
    }

    pub fn into_cube(self) -> Result<ImageCube, ToolError> {
        let expected: usize = self.shape.iter().product();
        if expected != self.data.len() {
            return Err(ToolError::InvalidShape(format!(
                "shape {:?} needs {expected} samples, file has {}",
                self.shape,
                self.data.len()
            )));
        }
        let values: Vec<f64> = self.data.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect();
        let array = ArrayD::from_shape_vec(IxDyn(&self.shape), values)
            .map_err(|e| ToolError::InvalidShape(e.to_string()))?;
        ImageCube::from_exposure(array, (self.center[0], self.center[1]))
    }
}

pub fn read_cube_json(path: &Path) -> Result<ImageCube, ToolError> {
    let file = File::open(path).map_err(|e| ToolError::io(path, e))?;
    let cube: CubeFile = serde_json::from_reader(BufReader::new(file))?;
    cube.into_cube()
}

pub fn write_cube_json(path: &Path, cube: &ImageCube) -> Result<(), ToolError> {
    let file = File::create(path).map_err(|e| ToolError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, &CubeFile::from_cube(cube))?;
    writer.flush().map_err(|e| ToolError::io(path, e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;

    #[test]
    fn nan_samples_survive_a_file_round_trip() {
        let mut data = Array3::from_elem((2, 3, 4), 1.5);
        data[[1, 2, 3]] = f64::NAN;
        let cube = ImageCube::new(data, (2, 1)).unwrap();

        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("cube.json");
        write_cube_json(&path, &cube).unwrap();
        let back = read_cube_json(&path).unwrap();

        assert_eq!(back.center(), (2, 1));
        assert_eq!(back.n_groups(), 2);
        assert!(back.last_frame()[[2, 3]].is_nan());
        assert_eq!(back.last_frame()[[0, 0]], 1.5);
    }

    #[test]
    fn four_dimensional_files_use_the_first_integration() {
        let json = r#"{"center":[0,0],"shape":[2,1,1,2],"data":[1.0,2.0,3.0,4.0]}"#;
        let file: CubeFile = serde_json::from_str(json).unwrap();
        let cube = file.into_cube().unwrap();
        assert_eq!(cube.n_groups(), 1);
        assert_eq!(cube.frame(0)[[0, 1]], 2.0);
    }

    #[test]
    fn sample_count_must_match_shape() {
        let file = CubeFile {
            center: [0, 0],
            shape: vec![1, 2, 2],
            data: vec![Some(1.0); 3],
        };
        assert!(matches!(file.into_cube(), Err(ToolError::InvalidShape(_))));
    }
}
