//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the numeric code stays clean and testable
//! - output changes are localized

use crate::domain::{MassEstimate, MatchParams};
use crate::io::export::MatchRow;

/// Summary of one reference cube matched against several science cubes.
pub fn format_match_summary(reference: &str, params: &MatchParams, rows: &[MatchRow]) -> String {
    let mut out = String::new();

    out.push_str("=== coron - Brightness Match ===\n");
    out.push_str(&format!("Reference: {reference}\n"));
    out.push_str(&format!(
        "Method: {} | kernel: {}x{} px | scan: {}\n",
        params.method.display_name(),
        2 * params.kernel_radius + 1,
        2 * params.kernel_radius + 1,
        if params.science_is_brighter { "science (brighter)" } else { "reference" },
    ));

    out.push_str("\nResults:\n");
    out.push_str(&format!("  {:<32} {:>6} {:>16} {:>8}\n", "science", "group", "flux", "scanned"));
    for row in rows {
        if let Some(err) = &row.error {
            out.push_str(&format!("  {:<32} error: {err}\n", row.label));
            continue;
        }
        out.push_str(&format!(
            "  {:<32} {:>6} {:>16} {:>8}\n",
            row.label,
            row.group.map(|g| g.to_string()).unwrap_or_else(|| "-".to_string()),
            row.flux.map(|f| format!("{f:.4}")).unwrap_or_else(|| "-".to_string()),
            row.groups_scanned.map(|n| n.to_string()).unwrap_or_default(),
        ));
    }

    out
}

pub fn format_mass_summary(estimate: &MassEstimate) -> String {
    let mut out = String::new();

    out.push_str("=== coron - Mass Estimate ===\n");
    out.push_str(&format!(
        "Filter: {} | age: {:.4} Gyr | target: {:.3} mag\n",
        estimate.filter, estimate.age_gyr, estimate.target_magnitude
    ));
    out.push_str(&format!(
        "Models: {} used, {} skipped (age not covered)\n",
        estimate.files_used, estimate.files_skipped
    ));
    out.push_str(&format!(
        "Mass: {:.4} MJup ({:.6} Msun)\n",
        estimate.mass_mjup, estimate.mass_msun
    ));

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn match_summary_lists_every_row() {
        let rows = vec![
            MatchRow {
                label: "a.json".to_string(),
                method: "Summed".to_string(),
                group: Some(3),
                flux: Some(12.5),
                groups_scanned: Some(10),
                error: None,
            },
            MatchRow {
                label: "b.json".to_string(),
                method: String::new(),
                group: None,
                flux: None,
                groups_scanned: None,
                error: Some("Empty region: off frame".to_string()),
            },
        ];
        let text = format_match_summary("ref.json", &MatchParams::default(), &rows);
        assert!(text.contains("kernel: 31x31 px"));
        assert!(text.contains("12.5000"));
        assert!(text.contains("b.json"));
        assert!(text.contains("error: Empty region"));
    }
}
