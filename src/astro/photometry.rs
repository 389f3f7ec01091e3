//! Temperature and blackbody helpers.

/// Wien's displacement constant, m·K.
pub const WIEN_B: f64 = 2.8977729e-3;

/// Effective temperature (K) from B and V magnitudes (Ballesteros 2012).
pub fn ballesteros_temperature(b: f64, v: f64) -> f64 {
    let bv = b - v;
    4600.0 * (1.0 / (0.92 * bv + 1.7) + 1.0 / (0.92 * bv + 0.62))
}

/// Peak blackbody wavelength in microns for a temperature in Kelvin.
pub fn wien_peak_microns(temperature_k: f64) -> f64 {
    WIEN_B / temperature_k * 1e6
}
