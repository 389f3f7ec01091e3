//! Error type shared by the library and the `coron` binary.
//!
//! Every public operation returns `Result<_, ToolError>`. The binary maps each
//! variant to a process exit code via [`ToolError::exit_code`]:
//!
//! - `2`: bad input (arguments, shapes, files that cannot be read or parsed)
//! - `3`: nothing to work on (empty regions, missing models or columns)
//! - `4`: the numeric pipeline could not produce a result

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Invalid shape: {0}")]
    InvalidShape(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Empty region: {0}")]
    EmptyRegion(String),

    #[error("No models found: {0}")]
    NoModelsFound(String),

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("No model file covers age {age_gyr} Gyr ({skipped} file(s) skipped)")]
    NoOverlap { age_gyr: f64, skipped: usize },

    #[error("Age {age_gyr} Gyr is outside the tabulated range [{min}, {max}] of '{}'", .path.display())]
    AgeRangeExceeded {
        age_gyr: f64,
        min: f64,
        max: f64,
        path: PathBuf,
    },

    #[error("Missing column `{column}` in '{}'", .path.display())]
    MissingColumn { column: String, path: PathBuf },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Failed to access '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ToolError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ToolError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            ToolError::InvalidShape(_)
            | ToolError::InvalidInput(_)
            | ToolError::Parse(_)
            | ToolError::Io { .. }
            | ToolError::Json(_)
            | ToolError::Csv(_)
            | ToolError::Config(_) => 2,
            ToolError::EmptyRegion(_)
            | ToolError::NoModelsFound(_)
            | ToolError::MissingColumn { .. } => 3,
            ToolError::InsufficientData(_)
            | ToolError::NoOverlap { .. }
            | ToolError::AgeRangeExceeded { .. } => 4,
        }
    }
}
