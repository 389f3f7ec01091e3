//! Export match results to CSV and mass estimates to JSON.
//!
//! The exports are meant to be easy to consume in spreadsheets or downstream scripts.

use std::fs::File;
use std::path::Path;

use chrono::Local;
use serde::Serialize;

use crate::domain::{MassEstimate, MatchResult};
use crate::error::ToolError;

/// One CSV row per matched science cube.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchRow {
    pub label: String,
    pub method: String,
    pub group: Option<usize>,
    pub flux: Option<f64>,
    pub groups_scanned: Option<usize>,
    pub error: Option<String>,
}

impl MatchRow {
    pub fn from_result(label: impl Into<String>, result: &Result<MatchResult, ToolError>) -> Self {
        let label = label.into();
        match result {
            Ok(r) => Self {
                label,
                method: r.method.display_name().to_string(),
                group: r.index(),
                flux: r.best.map(|m| m.flux),
                groups_scanned: Some(r.groups_scanned),
                error: None,
            },
            Err(e) => Self {
                label,
                method: String::new(),
                group: None,
                flux: None,
                groups_scanned: None,
                error: Some(e.to_string()),
            },
        }
    }
}

pub fn write_matches_csv(path: &Path, rows: &[MatchRow]) -> Result<(), ToolError> {
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush().map_err(|e| ToolError::io(path, e))?;
    Ok(())
}

#[derive(Debug, Serialize)]
struct MassExport<'a> {
    tool: &'static str,
    generated: String,
    #[serde(flatten)]
    estimate: &'a MassEstimate,
}

pub fn write_mass_json(path: &Path, estimate: &MassEstimate) -> Result<(), ToolError> {
    let file = File::create(path).map_err(|e| ToolError::io(path, e))?;
    let export = MassExport {
        tool: "coron",
        generated: Local::now().to_rfc3339(),
        estimate,
    };
    serde_json::to_writer_pretty(file, &export)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{GroupMatch, MatchMethod};

    #[test]
    fn csv_has_one_row_per_science_cube() {
        let ok = Ok(MatchResult {
            method: MatchMethod::Summed,
            best: Some(GroupMatch { index: 2, flux: 5.0 }),
            groups_scanned: 5,
        });
        let failed = Err(ToolError::EmptyRegion("off frame".to_string()));
        let rows = vec![
            MatchRow::from_result("sci_a", &ok),
            MatchRow::from_result("sci_b", &failed),
        ];

        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("matches.csv");
        write_matches_csv(&path, &rows).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "label,method,group,flux,groups_scanned,error");
        assert_eq!(lines[1], "sci_a,Summed,2,5.0,5,");
        assert!(lines[2].starts_with("sci_b,,,,,"));
        assert!(lines[2].contains("off frame"));
    }

    #[test]
    fn mass_json_flattens_the_estimate() {
        let estimate = MassEstimate {
            filter: "NIRCAM-F444W".to_string(),
            age_gyr: 1.5,
            target_magnitude: 11.0,
            mass_msun: 7.5,
            mass_mjup: 7856.7,
            files_used: 2,
            files_skipped: 0,
        };
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("mass.json");
        write_mass_json(&path, &estimate).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["tool"], "coron");
        assert_eq!(value["files_used"], 2);
        assert_eq!(value["filter"], "NIRCAM-F444W");
        assert!(value["generated"].as_str().is_some());
    }
}
