//! Evolutionary model table parsing.
//!
//! Each ATMO 2020 coronagraphy file tabulates one mass track: ages (Gyr),
//! the track mass (solar masses) and the apparent magnitude in every
//! supported filter. The text layout is whitespace-delimited:
//!
//! ```text
//! #  Mass    Age    Teff   ...  NIRCAM-F444W  ...     <- header, leading label token
//! #  (Msun)  (Gyr)  (K)    ...  (mag)         ...     <- repeated label row, discarded
//!    0.0050  0.0010 1650.2 ...  12.731        ...
//! ```
//!
//! The header's first token is a label, not a column. Data tokens map
//! positionally onto the remaining header names; trailing extra tokens are
//! ignored. Column lookup is case-insensitive.

use std::path::{Path, PathBuf};

use crate::error::ToolError;

pub const AGE_COLUMN: &str = "AGE";
pub const MASS_COLUMN: &str = "MASS";

#[derive(Debug, Clone, PartialEq)]
pub struct ModelTable {
    path: PathBuf,
    /// Upper-cased column names.
    columns: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl ModelTable {
    /// Read and parse a model file.
    pub fn load(path: &Path) -> Result<Self, ToolError> {
        let text = std::fs::read_to_string(path).map_err(|e| ToolError::io(path, e))?;
        Self::parse(&text, path)
    }

    /// Parse model text; `path` is only used for error messages.
    pub fn parse(text: &str, path: &Path) -> Result<Self, ToolError> {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(idx, line)| (idx + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty());

        let (_, header) = lines.next().ok_or_else(|| {
            ToolError::Parse(format!("model file '{}' is empty", path.display()))
        })?;
        let columns: Vec<String> = header
            .split_whitespace()
            .skip(1)
            .map(str::to_uppercase)
            .collect();
        if columns.is_empty() {
            return Err(ToolError::Parse(format!(
                "model file '{}' has no column names in its header",
                path.display()
            )));
        }

        // The first record after the header repeats the labels.
        lines.next();

        let mut rows = Vec::new();
        for (line_no, line) in lines {
            let tokens: Vec<&str> = line.split_whitespace().take(columns.len()).collect();
            if tokens.len() < columns.len() {
                return Err(ToolError::Parse(format!(
                    "'{}' line {line_no}: expected {} values, found {}",
                    path.display(),
                    columns.len(),
                    tokens.len()
                )));
            }
            let row = tokens
                .iter()
                .map(|tok| {
                    tok.parse::<f64>().map_err(|_| {
                        ToolError::Parse(format!(
                            "'{}' line {line_no}: invalid number '{tok}'",
                            path.display()
                        ))
                    })
                })
                .collect::<Result<Vec<f64>, ToolError>>()?;
            rows.push(row);
        }

        if rows.is_empty() {
            return Err(ToolError::Parse(format!(
                "model file '{}' has no data rows",
                path.display()
            )));
        }

        Ok(Self {
            path: path.to_path_buf(),
            columns,
            rows,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All values of a column, in file order.
    pub fn column(&self, name: &str) -> Result<Vec<f64>, ToolError> {
        let wanted = name.trim().to_uppercase();
        let idx = self
            .columns
            .iter()
            .position(|c| *c == wanted)
            .ok_or_else(|| ToolError::MissingColumn {
                column: wanted.clone(),
                path: self.path.clone(),
            })?;
        Ok(self.rows.iter().map(|row| row[idx]).collect())
    }

    pub fn ages(&self) -> Result<Vec<f64>, ToolError> {
        self.column(AGE_COLUMN)
    }

    /// The track mass in solar masses (taken from the first data row).
    pub fn track_mass(&self) -> Result<f64, ToolError> {
        Ok(self.column(MASS_COLUMN)?[0])
    }
}

/// Drop every pair where either member is exactly `0.0` (the tables' missing-value sentinel).
pub fn strip_zero_pairs(xs: &[f64], ys: &[f64]) -> (Vec<f64>, Vec<f64>) {
    xs.iter()
        .zip(ys)
        .filter(|&(&x, &y)| x != 0.0 && y != 0.0)
        .map(|(&x, &y)| (x, y))
        .unzip()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
#  Mass    Age    Teff   NIRCAM-F444W  NIRCAM-F356W
#  (Msun)  (Gyr)  (K)    (mag)         (mag)
   0.005   0.5    900.0  13.1          14.0
   0.005   1.0    700.0  0.0           14.6

   0.005   2.0    500.0  14.2          15.1
";

    fn sample() -> ModelTable {
        ModelTable::parse(SAMPLE, Path::new("track.txt")).unwrap()
    }

    #[test]
    fn header_label_and_repeated_row_are_dropped() {
        let t = sample();
        assert_eq!(t.columns()[0], "MASS");
        assert_eq!(t.columns().len(), 5);
        assert_eq!(t.len(), 3);
        assert_eq!(t.ages().unwrap(), vec![0.5, 1.0, 2.0]);
        assert_eq!(t.track_mass().unwrap(), 0.005);
    }

    #[test]
    fn column_lookup_is_case_insensitive() {
        let t = sample();
        assert_eq!(t.column("nircam-f444w").unwrap(), vec![13.1, 0.0, 14.2]);
        let err = t.column("MIRI-F1550C").unwrap_err();
        assert!(matches!(err, ToolError::MissingColumn { .. }));
    }

    #[test]
    fn trailing_extra_tokens_are_ignored() {
        let text = "# A B\n# a b\n1 2 3\n";
        let t = ModelTable::parse(text, Path::new("x.txt")).unwrap();
        assert_eq!(t.column("B").unwrap(), vec![2.0]);
    }

    #[test]
    fn short_and_malformed_rows_are_parse_errors() {
        let short = "# A B\n# a b\n1\n";
        assert!(matches!(
            ModelTable::parse(short, Path::new("x.txt")),
            Err(ToolError::Parse(_))
        ));
        let bad = "# A B\n# a b\n1 two\n";
        let err = ModelTable::parse(bad, Path::new("x.txt")).unwrap_err();
        assert!(err.to_string().contains("line 3"));
    }

    #[test]
    fn zero_sentinels_drop_the_whole_pair() {
        let (ages, mags) = strip_zero_pairs(&[0.5, 1.0, 0.0, 2.0], &[13.1, 0.0, 14.0, 14.2]);
        assert_eq!(ages, vec![0.5, 2.0]);
        assert_eq!(mags, vec![13.1, 14.2]);
    }
}
