//! Sky positions, angular separations and projected separations.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::error::ToolError;

const ARCSEC_PER_DEG: f64 = 3600.0;

/// An equatorial position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkyPosition {
    pub ra_deg: f64,
    pub dec_deg: f64,
}

impl SkyPosition {
    pub fn new(ra_deg: f64, dec_deg: f64) -> Result<Self, ToolError> {
        if !(ra_deg.is_finite() && dec_deg.is_finite()) || dec_deg.abs() > 90.0 {
            return Err(ToolError::InvalidInput(format!(
                "invalid sky position: ra={ra_deg}, dec={dec_deg}"
            )));
        }
        Ok(Self {
            ra_deg: ra_deg.rem_euclid(360.0),
            dec_deg,
        })
    }

    /// Parse sexagesimal coordinates as returned by catalog queries:
    /// RA in hour angle (`"05 35 17.3"` or `"05:35:17.3"`) and Dec in degrees
    /// (`"-05 23 28"`). Trailing components may be omitted.
    pub fn parse(ra: &str, dec: &str) -> Result<Self, ToolError> {
        let ra_hours = parse_sexagesimal(ra)?;
        if !(0.0..24.0).contains(&ra_hours) {
            return Err(ToolError::Parse(format!("RA '{ra}' is outside 0h..24h")));
        }
        Self::new(ra_hours * 15.0, parse_sexagesimal(dec)?)
    }

    fn unit_vector(&self) -> Vector3<f64> {
        let (ra, dec) = (self.ra_deg.to_radians(), self.dec_deg.to_radians());
        Vector3::new(dec.cos() * ra.cos(), dec.cos() * ra.sin(), dec.sin())
    }
}

/// Great-circle separation between two positions, in arcseconds.
///
/// Uses `atan2(|a × b|, a · b)`, which stays accurate for both tiny and
/// near-antipodal separations.
pub fn angular_separation_arcsec(a: &SkyPosition, b: &SkyPosition) -> f64 {
    let (u, v) = (a.unit_vector(), b.unit_vector());
    u.cross(&v).norm().atan2(u.dot(&v)).to_degrees() * ARCSEC_PER_DEG
}

/// A separation expressed either on the sky or in the plane of the target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Separation {
    Arcsec(f64),
    Au(f64),
}

impl Separation {
    /// Convert to the other unit at `distance_pc` (1" at 1 pc is 1 AU).
    pub fn convert(self, distance_pc: f64) -> Result<Separation, ToolError> {
        if !(distance_pc.is_finite() && distance_pc > 0.0) {
            return Err(ToolError::InvalidInput(format!(
                "distance must be finite and > 0 pc, got {distance_pc}"
            )));
        }
        Ok(match self {
            Separation::Arcsec(arcsec) => Separation::Au(arcsec * distance_pc),
            Separation::Au(au) => Separation::Arcsec(au / distance_pc),
        })
    }

    pub fn value(self) -> f64 {
        match self {
            Separation::Arcsec(v) | Separation::Au(v) => v,
        }
    }
}

fn parse_sexagesimal(text: &str) -> Result<f64, ToolError> {
    let trimmed = text.trim();
    let (negative, body) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let parts: Vec<&str> = body
        .split(|c: char| c == ':' || c.is_whitespace())
        .filter(|p| !p.is_empty())
        .collect();
    if parts.is_empty() || parts.len() > 3 {
        return Err(ToolError::Parse(format!("invalid sexagesimal value '{text}'")));
    }

    let mut value = 0.0;
    for (i, part) in parts.iter().enumerate() {
        let v: f64 = part
            .parse()
            .map_err(|_| ToolError::Parse(format!("invalid sexagesimal value '{text}'")))?;
        if !v.is_finite() || v < 0.0 || (i > 0 && v >= 60.0) {
            return Err(ToolError::Parse(format!("invalid sexagesimal value '{text}'")));
        }
        value += v / 60f64.powi(i as i32);
    }

    Ok(if negative { -value } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hour_angle_and_degrees() {
        let p = SkyPosition::parse("05 35 17.3", "-05 23 28").unwrap();
        assert!((p.ra_deg - (5.0 + 35.0 / 60.0 + 17.3 / 3600.0) * 15.0).abs() < 1e-9);
        assert!((p.dec_deg + (5.0 + 23.0 / 60.0 + 28.0 / 3600.0)).abs() < 1e-9);

        // Negative sign applies to the whole value, even below one degree.
        let p = SkyPosition::parse("12:00:00", "-00:30:00").unwrap();
        assert_eq!(p.ra_deg, 180.0);
        assert!((p.dec_deg + 0.5).abs() < 1e-12);
    }

    #[test]
    fn rejects_malformed_coordinates() {
        assert!(SkyPosition::parse("25 00 00", "10 00 00").is_err());
        assert!(SkyPosition::parse("10 61 00", "10 00 00").is_err());
        assert!(SkyPosition::parse("10 00 00", "abc").is_err());
        assert!(SkyPosition::parse("10 00 00", "95 00 00").is_err());
    }

    #[test]
    fn separations_along_axes() {
        let origin = SkyPosition::new(0.0, 0.0).unwrap();
        let north = SkyPosition::new(0.0, 1.0).unwrap();
        let east = SkyPosition::parse("01 00 00", "00 00 00").unwrap();

        assert!(angular_separation_arcsec(&origin, &origin).abs() < 1e-9);
        assert!((angular_separation_arcsec(&origin, &north) - 3600.0).abs() < 1e-6);
        assert!((angular_separation_arcsec(&origin, &east) - 54_000.0).abs() < 1e-6);
    }

    #[test]
    fn separation_wraps_across_ra_zero() {
        let a = SkyPosition::new(359.999, 0.0).unwrap();
        let b = SkyPosition::new(0.001, 0.0).unwrap();
        assert!((angular_separation_arcsec(&a, &b) - 7.2).abs() < 1e-6);
    }

    #[test]
    fn converts_between_arcsec_and_au() {
        assert_eq!(Separation::Arcsec(2.0).convert(10.0).unwrap(), Separation::Au(20.0));
        assert_eq!(Separation::Au(50.0).convert(25.0).unwrap(), Separation::Arcsec(2.0));
        assert!(Separation::Au(1.0).convert(0.0).is_err());
    }
}
