//! Locating evolutionary model files on disk.
//!
//! The ATMO 2020 distribution keeps one directory of coronagraphic model
//! tables per instrument (and, for NIRCam, per coronagraphic mask) under a
//! root configured by the `ATMO_2020_MODELS` environment variable.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::domain::{Instrument, NircamMask};
use crate::error::ToolError;

/// Environment variable holding the ATMO 2020 root directory.
pub const MODELS_ENV: &str = "ATMO_2020_MODELS";

const CORONAGRAPHY_DIR: [&str; 3] = ["evolutionary_tracks", "ATMO_CEQ", "JWST_coronagraphy"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelLibrary {
    root: PathBuf,
}

impl ModelLibrary {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Build the library from `ATMO_2020_MODELS` (a `.env` file is honored).
    pub fn from_env() -> Result<Self, ToolError> {
        dotenvy::dotenv().ok();
        let root = std::env::var(MODELS_ENV).map_err(|_| {
            ToolError::Config(format!("Missing {MODELS_ENV} in environment (.env)."))
        })?;
        Ok(Self::new(root))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Model directory for an instrument. `mask` only matters for NIRCam.
    pub fn resolve(&self, instrument: Instrument, mask: Option<&str>) -> PathBuf {
        let suffix = match instrument {
            Instrument::Miri => "MIRI".to_string(),
            Instrument::Niriss => "NIRISS".to_string(),
            Instrument::Nircam => format!("NIRCAM_{}", resolve_mask(mask).name()),
        };
        let mut dir = self.root.clone();
        dir.extend(CORONAGRAPHY_DIR);
        dir.join(format!("JWST_coron_{suffix}"))
    }

    /// As [`ModelLibrary::resolve`], with the instrument given by name.
    pub fn resolve_named(&self, instrument: &str, mask: Option<&str>) -> Result<PathBuf, ToolError> {
        Ok(self.resolve(instrument.parse()?, mask))
    }

    /// All `*.txt` model tables for an instrument/mask, sorted by file name.
    pub fn model_files(&self, instrument: Instrument, mask: Option<&str>) -> Result<Vec<PathBuf>, ToolError> {
        list_model_files(&self.resolve(instrument, mask))
    }
}

/// All `*.txt` files directly inside `dir`, sorted by file name.
pub fn list_model_files(dir: &Path) -> Result<Vec<PathBuf>, ToolError> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(ToolError::NoModelsFound(format!(
                "model directory '{}' does not exist",
                dir.display()
            )));
        }
        Err(e) => return Err(ToolError::io(dir, e)),
    };

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| ToolError::io(dir, e))?.path();
        let is_txt = path.extension().is_some_and(|ext| ext == "txt");
        if is_txt && path.is_file() {
            files.push(path);
        }
    }

    if files.is_empty() {
        return Err(ToolError::NoModelsFound(format!(
            "no *.txt model files in '{}'",
            dir.display()
        )));
    }

    files.sort();
    log::debug!("found {} model file(s) in '{}'", files.len(), dir.display());
    Ok(files)
}

/// NIRCam mask with a model grid; unknown or missing names fall back to the default mask.
pub fn resolve_mask(mask: Option<&str>) -> NircamMask {
    match mask.and_then(NircamMask::from_name) {
        Some(m) => m,
        None => {
            let fallback = NircamMask::default();
            log::warn!(
                "Unsupported NIRCam mask {:?}, assuming {}",
                mask.unwrap_or(""),
                fallback.name()
            );
            fallback
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn coron_dir(root: &Path, suffix: &str) -> PathBuf {
        root.join("evolutionary_tracks")
            .join("ATMO_CEQ")
            .join("JWST_coronagraphy")
            .join(format!("JWST_coron_{suffix}"))
    }

    #[test]
    fn resolves_instrument_directories() {
        let lib = ModelLibrary::new("/models");
        assert_eq!(lib.resolve(Instrument::Miri, None), coron_dir(Path::new("/models"), "MIRI"));
        assert_eq!(
            lib.resolve(Instrument::Nircam, Some("mask430r")),
            coron_dir(Path::new("/models"), "NIRCAM_MASK430R")
        );
    }

    #[test]
    fn unknown_mask_falls_back_to_default() {
        let lib = ModelLibrary::new("/models");
        assert_eq!(
            lib.resolve(Instrument::Nircam, Some("MASK999")),
            coron_dir(Path::new("/models"), "NIRCAM_MASK335R")
        );
        assert_eq!(resolve_mask(None), NircamMask::Mask335R);
    }

    #[test]
    fn unknown_instrument_is_an_error() {
        let lib = ModelLibrary::new("/models");
        let err = lib.resolve_named("WFC3", None).unwrap_err();
        assert!(matches!(err, ToolError::NoModelsFound(_)));
    }

    #[test]
    fn lists_only_txt_files_sorted() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = coron_dir(tmp.path(), "NIRISS");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("b_track.txt"), "x").unwrap();
        fs::write(dir.join("a_track.txt"), "x").unwrap();
        fs::write(dir.join("README.md"), "x").unwrap();

        let files = ModelLibrary::new(tmp.path()).model_files(Instrument::Niriss, None).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a_track.txt", "b_track.txt"]);
    }

    #[test]
    fn missing_or_empty_directory_has_no_models() {
        let tmp = tempfile::tempdir().unwrap();
        let lib = ModelLibrary::new(tmp.path());
        assert!(matches!(
            lib.model_files(Instrument::Miri, None),
            Err(ToolError::NoModelsFound(_))
        ));

        fs::create_dir_all(coron_dir(tmp.path(), "MIRI")).unwrap();
        assert!(matches!(
            lib.model_files(Instrument::Miri, None),
            Err(ToolError::NoModelsFound(_))
        ));
    }
}
